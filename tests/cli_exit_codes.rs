mod common;

use tempfile::TempDir;
use wfa_lib::WfaOutput;

use common::{run_cmd, write_landing_fixtures};

fn parse_pretty(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("pretty output should be JSON")
}

#[test]
fn generate_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(&["generate", "--description", "a signup form"], &[], dir.path());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn empty_description_still_exits_zero_with_warning() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(&["generate", "--description", ""], &[], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let pretty = parse_pretty(&output.stdout);
    let warnings = pretty
        .pointer("/wireframe/warnings")
        .and_then(|v| v.as_array())
        .map(|a| a.len());
    assert_eq!(warnings, Some(1));
}

#[test]
fn analyze_exits_zero_with_fixtures() {
    let dir = TempDir::new().expect("tempdir");
    write_landing_fixtures(dir.path());
    let output = run_cmd(
        &["analyze", "--url", "https://acme.test"],
        &[("WFA_MOCK_DOM_DIR", dir.path().to_str().unwrap())],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn analyze_exits_two_for_unparseable_url() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(
        &["analyze", "--url", "not a url", "--format", "json"],
        &[("WFA_MOCK_DOM_DIR", dir.path().to_str().unwrap())],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    match serde_json::from_slice::<WfaOutput>(&output.stdout).expect("error JSON") {
        WfaOutput::Error(out) => assert!(out.error.remediation.is_some()),
        other => panic!("expected error output, got {:?}", other),
    }
}

#[test]
fn pretty_output_is_json_when_not_a_tty() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(
        &["generate", "--description", "a dashboard", "--format", "pretty"],
        &[],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty(), "stderr should be empty on success");
    let pretty = parse_pretty(&output.stdout);
    assert_eq!(pretty.get("mode").and_then(|v| v.as_str()), Some("generate"));
    assert_eq!(
        pretty.pointer("/wireframe/template").and_then(|v| v.as_str()),
        Some("dashboard")
    );
}

#[test]
fn pretty_error_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(
        &["prompt", "--url", "mailto:team@acme.test", "--format", "pretty"],
        &[],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    let pretty = parse_pretty(&output.stdout);
    assert_eq!(pretty.get("mode").and_then(|v| v.as_str()), Some("error"));
}

#[test]
fn invalid_config_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = dir.path().join("wfa.toml");
    std::fs::write(&cfg, "[timeouts]\nanalysis = \"0s\"\n").expect("write config");

    let output = run_cmd(
        &[
            "generate",
            "--description",
            "a blog",
            "--config",
            cfg.to_str().unwrap(),
        ],
        &[],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    let pretty = parse_pretty(&output.stdout);
    let message = pretty
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    assert!(message.contains("timeouts.analysis"), "{message}");
}

#[test]
fn missing_config_file_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    let output = run_cmd(
        &[
            "generate",
            "--description",
            "a blog",
            "--config",
            missing.to_str().unwrap(),
        ],
        &[],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn yaml_error_output_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_cmd(
        &["wireframe", "--url", "ftp://acme.test", "--format", "yaml"],
        &[],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("mode: error"));
}
