use wfa_lib::error::ErrorCategory;
use wfa_lib::WfaError;

#[test]
fn config_error_display_includes_message() {
    let err = WfaError::Config("missing viewport".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing viewport");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: WfaError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn completion_helper_includes_status_and_message() {
    let err = WfaError::completion(Some(reqwest::StatusCode::UNAUTHORIZED), "bad key");

    assert_eq!(
        format!("{}", err),
        "Completion API error (status: Some(401)): bad key"
    );
}

#[test]
fn completion_helper_handles_missing_status() {
    let err = WfaError::completion(None, "empty choices");

    assert_eq!(
        format!("{}", err),
        "Completion API error (status: None): empty choices"
    );
}

#[test]
fn render_helper_uses_message() {
    let err = WfaError::render("page crashed");

    assert_eq!(format!("{}", err), "Render error: page crashed");
    assert_eq!(err.to_payload().category, ErrorCategory::Render);
}

#[test]
fn invalid_url_maps_to_config_category() {
    let err: WfaError = url::Url::parse("not a url").unwrap_err().into();

    let payload = err.to_payload();
    assert_eq!(payload.category, ErrorCategory::Config);
    assert!(payload.remediation.unwrap().contains("https://"));
}
