use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum WfaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Completion API error (status: {status:?}): {message}")]
    Completion {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl WfaError {
    pub fn render(message: impl Into<String>) -> Self {
        WfaError::Render(message.into())
    }

    pub fn completion(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        WfaError::Completion {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WfaError::Network(_) => ErrorCategory::Network,
            WfaError::Render(_) => ErrorCategory::Render,
            WfaError::Completion { .. } => ErrorCategory::Completion,
            WfaError::Unknown(_) => ErrorCategory::Unknown,
            WfaError::Io(_)
            | WfaError::InvalidUrl(_)
            | WfaError::Serialization(_)
            | WfaError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Structured form for the `error` output mode, with a hint on how to recover.
    pub fn to_payload(&self) -> ErrorPayload {
        let message = match self {
            WfaError::Completion { status, message } => {
                format!("Completion API error (status {status:?}): {message}")
            }
            WfaError::Render(msg) | WfaError::Config(msg) | WfaError::Unknown(msg) => msg.clone(),
            WfaError::Io(e) => e.to_string(),
            WfaError::Network(e) => e.to_string(),
            WfaError::InvalidUrl(e) => e.to_string(),
            WfaError::Serialization(e) => e.to_string(),
        };
        ErrorPayload::new(self.category(), message, self.remediation())
    }

    fn remediation(&self) -> &'static str {
        match self {
            WfaError::Io(_) => "Check file paths/permissions.",
            WfaError::Network(_) => "Check connectivity/proxy/VPN and retry.",
            WfaError::InvalidUrl(_) => "Verify URL/format (e.g., https://example.com).",
            WfaError::Serialization(_) => {
                "Check JSON inputs (fixtures, renderer output); run with --verbose for details."
            }
            WfaError::Render(msg) => first_hint(msg, RENDER_HINTS)
                .unwrap_or("Re-run with --verbose to see renderer output."),
            WfaError::Completion { .. } => {
                "Check WFA_COMPLETION_API_KEY/OPENAI_API_KEY, endpoint and model; the template generator is used as fallback."
            }
            WfaError::Config(msg) => first_hint(msg, CONFIG_HINTS)
                .unwrap_or("Check flags/paths and the config file (timeouts must be positive)."),
            WfaError::Unknown(_) => "Re-run with --verbose; file an issue if persistent.",
        }
    }
}

/// (lowercase needles, hint) pairs; the first entry with a matching needle wins.
type Hints = &'static [(&'static [&'static str], &'static str)];

const RENDER_HINTS: Hints = &[
    (
        &["playwright npm package is missing"],
        "Install Playwright (e.g., `npm install playwright` and `npx playwright install chromium`).",
    ),
    (
        &["not found on path", "node command"],
        "Install Node.js and ensure the node binary is on PATH.",
    ),
    (
        &["timeout", "timed out"],
        "Try increasing the navigation/process timeouts in the config file, and ensure the page loads without blocking.",
    ),
    (
        &["fixture"],
        "Check WFA_MOCK_DOM_DIR contains desktop.json (and optionally tablet.json/mobile.json).",
    ),
];

const CONFIG_HINTS: Hints = &[
    (
        &["theme", "color scheme"],
        "Use --theme light|dark and --color-scheme blue|green|purple|orange|red|teal|gray.",
    ),
    (
        &["url"],
        "Pass an absolute http(s) URL (e.g., https://example.com).",
    ),
];

fn first_hint(message: &str, hints: Hints) -> Option<&'static str> {
    let lower = message.to_ascii_lowercase();
    hints
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, hint)| *hint)
}

pub type Result<T> = std::result::Result<T, WfaError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Render,
    Completion,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_payload_includes_playwright_remediation() {
        let err = WfaError::render(
            "Playwright npm package is missing; install with `npm install playwright`.",
        );
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Render);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("npm install playwright"),
            "expected remediation to mention npm install playwright, got: {remediation}"
        );
    }

    #[test]
    fn render_payload_includes_timeout_hint() {
        let err = WfaError::render("Playwright timed out after 45s");
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("timeout"),
            "expected timeout remediation, got: {remediation}"
        );
    }

    #[test]
    fn render_payload_includes_fixture_hint() {
        let err = WfaError::render("Fixture snapshot missing: /tmp/x/desktop.json");
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(remediation.contains("WFA_MOCK_DOM_DIR"));
    }

    #[test]
    fn config_payload_lists_themes() {
        let err = WfaError::Config("Unknown theme 'sepia'".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("light|dark"),
            "expected theme remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = WfaError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn completion_payload_mentions_fallback() {
        let err = WfaError::completion(Some(StatusCode::UNAUTHORIZED), "bad key");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Completion);
        assert!(payload.message.contains("401"));
        assert!(payload
            .remediation
            .unwrap_or_default()
            .contains("fallback"));
    }
}
