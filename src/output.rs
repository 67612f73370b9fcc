use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::describe::{ColorScheme, Theme, WireframeDocument};
use crate::error::ErrorPayload;
use crate::patterns::PatternReport;
use crate::types::PageAnalysis;

/// Schema version for output payloads.
pub const WFA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum WfaOutput {
    Analyze(AnalyzeOutput),
    Prompt(PromptOutput),
    Wireframe(WireframeOutput),
    Generate(GenerateOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    pub version: String,
    pub url: String,
    pub analysis: PageAnalysis,
    pub patterns: PatternReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOutput {
    pub version: String,
    pub url: String,
    pub theme: Theme,
    pub color_scheme: ColorScheme,
    pub prompt: String,
}

/// Analysis-driven wireframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireframeOutput {
    pub version: String,
    pub url: String,
    pub theme: Theme,
    pub color_scheme: ColorScheme,
    /// File the HTML was also written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub wireframe: WireframeDocument,
}

/// Description-driven wireframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub version: String,
    pub description: String,
    pub theme: Theme,
    pub color_scheme: ColorScheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub wireframe: WireframeDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::WireframeSource;
    use crate::error::ErrorCategory;

    fn document() -> WireframeDocument {
        WireframeDocument {
            html: "<!DOCTYPE html><html></html>".into(),
            template: None,
            source: WireframeSource::Generative,
            warnings: vec![],
        }
    }

    #[test]
    fn analyze_output_serializes() {
        let output = WfaOutput::Analyze(AnalyzeOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            url: "https://example.com/".into(),
            analysis: PageAnalysis::default(),
            patterns: PatternReport::default(),
        });
        let json = serde_json::to_string(&output).expect("serialize analyze output");
        assert!(json.contains("\"mode\":\"analyze\""));
        assert!(json.contains("\"pageInfo\""));
        assert!(json.contains("\"advancedCSS\""));
    }

    #[test]
    fn wireframe_output_serializes() {
        let output = WfaOutput::Wireframe(WireframeOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            url: "https://example.com/".into(),
            theme: Theme::Dark,
            color_scheme: ColorScheme::Teal,
            output_path: None,
            wireframe: document(),
        });
        let json = serde_json::to_string(&output).expect("serialize wireframe output");
        assert!(json.contains("\"mode\":\"wireframe\""));
        assert!(json.contains("\"colorScheme\":\"teal\""));
        assert!(json.contains("\"source\":\"generative\""));
        assert!(!json.contains("outputPath"));
    }

    #[test]
    fn error_output_round_trips_through_yaml() {
        let output = WfaOutput::Error(ErrorOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            message: Some("bad url".into()),
            error: ErrorPayload::new(ErrorCategory::Config, "bad url".into(), "check --url"),
        });
        let yaml = serde_yaml::to_string(&output).expect("serialize yaml");
        assert!(yaml.contains("mode: error"));
        let back: WfaOutput = serde_yaml::from_str(&yaml).expect("parse yaml");
        assert!(matches!(back, WfaOutput::Error(_)));
    }
}
