//! Description-driven wireframe synthesis.
//!
//! [`generate_from_description`] never touches the network and never fails:
//! unrecognized text falls back to the generic template with default counts.

pub mod description;
pub mod templates;
pub mod theme;

use serde::{Deserialize, Serialize};

pub use description::{
    analyze_description, DescriptionAnalysis, DescriptionIntent, LayoutStyle, WireframeTemplate,
};
pub use templates::{escape_html, ResolvedCounts};
pub use theme::{ColorScheme, ColorTokens, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireframeSource {
    /// Markup returned by the text completer.
    Generative,
    /// Markup rendered from a local template.
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireframeDocument {
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<WireframeTemplate>,
    pub source: WireframeSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Render a wireframe for `text` using the local templates.
pub fn generate_from_description(
    text: &str,
    theme: Theme,
    color_scheme: ColorScheme,
) -> WireframeDocument {
    let analysis = analyze_description(text);
    let mut warnings = Vec::new();
    if text.trim().is_empty() {
        warnings.push("Description is empty; generic template defaults were used".to_string());
    }

    tracing::debug!(
        template = %analysis.purpose,
        hero = analysis.include_hero,
        "rendering template"
    );

    WireframeDocument {
        html: templates::render(text, &analysis, theme, color_scheme),
        template: Some(analysis.purpose),
        source: WireframeSource::Template,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn two_textboxes_and_two_buttons() {
        let doc = generate_from_description("2 textboxes and 2 buttons", Theme::Light, ColorScheme::Blue);
        assert_eq!(count(&doc.html, "<input"), 2);
        assert_eq!(count(&doc.html, "<button"), 2);
        assert_eq!(doc.template, Some(WireframeTemplate::Generic));
        assert_eq!(doc.source, WireframeSource::Template);
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn dashboard_scenario() {
        let doc = generate_from_description(
            "Create a dashboard with analytics",
            Theme::Light,
            ColorScheme::Blue,
        );
        assert_eq!(doc.template, Some(WireframeTemplate::Dashboard));
        assert!(doc.html.contains("wf-sidebar"));
    }

    #[test]
    fn learning_page_scenario_counts_are_exact() {
        let doc = generate_from_description(
            "a learning page with a hero and two cards and 2 textboxes and 2 buttons",
            Theme::Light,
            ColorScheme::Blue,
        );
        assert_eq!(count(&doc.html, "<section class=\"wf-hero\">"), 1);
        assert_eq!(count(&doc.html, "class=\"wf-card\""), 2);
        assert_eq!(count(&doc.html, "<input"), 2);
        assert_eq!(count(&doc.html, "<button"), 2);
    }

    #[test]
    fn no_keywords_falls_back_to_generic() {
        for text in ["", "   ", "zzz qqq", "🙂🙂🙂", "\u{0}\u{1}"] {
            let doc = generate_from_description(text, Theme::Dark, ColorScheme::Gray);
            assert_eq!(doc.template, Some(WireframeTemplate::Generic), "{text:?}");
            assert!(doc.html.starts_with("<!DOCTYPE html>"));
        }
        let empty = generate_from_description("", Theme::Light, ColorScheme::Blue);
        assert_eq!(empty.warnings.len(), 1);
    }

    #[test]
    fn explicit_zero_suppresses_defaults() {
        let doc = generate_from_description("a signup form with 0 buttons", Theme::Light, ColorScheme::Green);
        assert_eq!(count(&doc.html, "<button"), 0);
        assert_eq!(count(&doc.html, "<input"), 3);
    }
}
