//! Analysis-driven wireframes: prompt the text completer, fall back to templates.

use std::sync::Arc;
use std::time::Duration;

use crate::capability::TextCompleter;
use crate::config::Config;
use crate::describe::{
    generate_from_description, ColorScheme, Theme, WireframeDocument, WireframeSource,
};
use crate::prompt::build_prompt;
use crate::types::{PageAnalysis, SectionType};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

pub struct WireframeGenerator {
    completer: Option<Arc<dyn TextCompleter>>,
    timeout: Duration,
}

impl WireframeGenerator {
    pub fn new(completer: Arc<dyn TextCompleter>) -> Self {
        Self {
            completer: Some(completer),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// A generator with no completer; every request takes the template path.
    pub fn offline() -> Self {
        Self {
            completer: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn from_config(completer: Option<Arc<dyn TextCompleter>>, config: &Config) -> Self {
        let generator = match completer {
            Some(completer) => Self::new(completer),
            None => Self::offline(),
        };
        generator.with_timeout(config.timeouts.generation)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the completer for a wireframe of `analysis`. Any completer failure,
    /// timeout or unusable reply yields the template rendering plus a warning.
    pub async fn generate_from_analysis(
        &self,
        analysis: &PageAnalysis,
        theme: Theme,
        color_scheme: ColorScheme,
    ) -> WireframeDocument {
        let failure = match &self.completer {
            Some(completer) => {
                let prompt = build_prompt(analysis, theme, color_scheme);
                tracing::info!(prompt_len = prompt.len(), "requesting generative wireframe");
                match tokio::time::timeout(self.timeout, completer.complete_text(&prompt)).await {
                    Ok(Ok(reply)) => match extract_html(&reply) {
                        Some(html) => {
                            return WireframeDocument {
                                html,
                                template: None,
                                source: WireframeSource::Generative,
                                warnings: Vec::new(),
                            }
                        }
                        None => "completion did not contain an HTML document".to_string(),
                    },
                    Ok(Err(err)) => format!("completion failed: {}", err),
                    Err(_) => format!("completion timed out after {:?}", self.timeout),
                }
            }
            None => "no completion API key configured".to_string(),
        };

        tracing::warn!(reason = %failure, "falling back to template wireframe");
        let description = describe_analysis(analysis);
        let mut doc = generate_from_description(&description, theme, color_scheme);
        doc.warnings
            .insert(0, format!("Generative wireframe unavailable ({}); used template", failure));
        doc
    }
}

/// Strip markdown fences and accept the reply only if it looks like a document.
pub fn extract_html(reply: &str) -> Option<String> {
    let mut body = reply.trim();
    if let Some(rest) = body.strip_prefix("```") {
        // Drop the info string (`html`) on the opening fence line.
        body = rest.split_once('\n').map(|(_, r)| r).unwrap_or("");
        body = body.trim_end();
        body = body.strip_suffix("```").unwrap_or(body).trim();
    }
    if body.is_empty() {
        return None;
    }
    let lower = body.to_ascii_lowercase();
    if lower.contains("<!doctype") || lower.contains("<html") {
        Some(body.to_string())
    } else {
        None
    }
}

/// Summarize an analysis as a description the template path understands.
///
/// Built only from extracted structure; page copy such as the title would
/// feed the purpose and count heuristics.
pub fn describe_analysis(analysis: &PageAnalysis) -> String {
    let sections = &analysis.layout.sections;
    let has = |t: SectionType| sections.iter().any(|s| s.section_type == t);

    let kind = if analysis.layout.sidebar.is_some() && !has(SectionType::Hero) {
        "dashboard"
    } else if has(SectionType::Pricing) || has(SectionType::Hero) {
        "landing page"
    } else if has(SectionType::BlogList) || has(SectionType::Content) {
        "blog"
    } else if analysis.forms.total_forms > 0 && sections.len() <= 2 {
        "form"
    } else {
        "page"
    };

    let mut parts = vec![format!("A {}", kind)];
    if has(SectionType::Hero) {
        parts.push("a hero".to_string());
    }

    let cards = sections
        .iter()
        .filter(|s| {
            matches!(
                s.section_type,
                SectionType::Features
                    | SectionType::Pricing
                    | SectionType::Testimonials
                    | SectionType::Team
                    | SectionType::BlogList
            )
        })
        .count();
    if cards > 0 {
        parts.push(format!("{} cards", cards.min(12)));
    }

    let inputs = analysis
        .forms
        .forms
        .iter()
        .flat_map(|f| f.fields.iter())
        .filter(|f| f.field_type != "checkbox" && f.field_type != "hidden")
        .count();
    if inputs > 0 {
        parts.push(format!("{} textboxes", inputs.min(12)));
    }
    let buttons = analysis.forms.forms.iter().filter(|f| f.submit_text.is_some()).count();
    if buttons > 0 {
        parts.push(format!("{} buttons", buttons.min(12)));
    }

    let mut description = parts.join(" with ");
    if analysis.styling.colors.is_dark_theme {
        description.push_str(" in dark mode");
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::StaticTextCompleter;
    use crate::describe::WireframeTemplate;
    use crate::types::{BoundingBox, FormField, FormInfo, Section, SectionCounts};
    use crate::{Result, WfaError};
    use async_trait::async_trait;

    struct FailingCompleter;

    #[async_trait]
    impl TextCompleter for FailingCompleter {
        async fn complete_text(&self, _prompt: &str) -> Result<String> {
            Err(WfaError::completion(None, "service unavailable"))
        }
    }

    struct SlowCompleter;

    #[async_trait]
    impl TextCompleter for SlowCompleter {
        async fn complete_text(&self, _prompt: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("<!DOCTYPE html><html></html>".into())
        }
    }

    fn section(section_type: SectionType, heading: &str) -> Section {
        Section {
            section_type,
            heading: heading.into(),
            subheadings: vec![],
            text: format!("{} and enough trailing copy to pass the length floor", heading),
            summary: String::new(),
            has_images: false,
            has_buttons: false,
            has_links: false,
            has_videos: false,
            has_forms: false,
            counts: SectionCounts::default(),
            ctas: vec![],
            class_name: String::new(),
            id: String::new(),
            bounds: BoundingBox::default(),
        }
    }

    fn landing() -> PageAnalysis {
        let mut page = PageAnalysis::default();
        page.page_info.title = "Acme".into();
        page.layout.sections = vec![
            section(SectionType::Hero, "Build faster"),
            section(SectionType::Features, "Features"),
            section(SectionType::Pricing, "Pricing"),
        ];
        page.forms.total_forms = 1;
        page.forms.forms.push(FormInfo {
            selector: "form#signup".into(),
            action: None,
            method: "post".into(),
            fields: vec![FormField {
                tag: "input".into(),
                field_type: "email".into(),
                name: Some("email".into()),
                label: None,
                required: true,
                has_validation: true,
            }],
            submit_text: Some("Join".into()),
        });
        page
    }

    #[test]
    fn extracts_fenced_html() {
        let reply = "```html\n<!DOCTYPE html>\n<html><body></body></html>\n```";
        let html = extract_html(reply).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(extract_html("   ").is_none());
        assert!(extract_html("Sorry, I can't help with that.").is_none());
    }

    #[test]
    fn description_reflects_sections_and_forms() {
        let text = describe_analysis(&landing());
        assert_eq!(
            text,
            "A landing page with a hero with 2 cards with 1 textboxes with 1 buttons"
        );
    }

    #[tokio::test]
    async fn page_title_does_not_steer_the_template() {
        let mut blog = PageAnalysis::default();
        blog.page_info.title = "Analytics Weekly: 9 buttons and 12 cards".into();
        blog.layout.sections = vec![section(SectionType::BlogList, "Latest posts")];

        let text = describe_analysis(&blog);
        assert_eq!(text, "A blog with 1 cards");

        let doc = WireframeGenerator::offline()
            .generate_from_analysis(&blog, Theme::Light, ColorScheme::Blue)
            .await;
        assert_eq!(doc.template, Some(WireframeTemplate::Content));
        assert_eq!(doc.html.matches("class=\"wf-card\"").count(), 1);
    }

    #[tokio::test]
    async fn uses_completion_when_it_is_html() {
        let generator = WireframeGenerator::new(Arc::new(StaticTextCompleter::new(
            "<!DOCTYPE html><html><body>wire</body></html>",
        )));
        let doc = generator
            .generate_from_analysis(&landing(), Theme::Light, ColorScheme::Blue)
            .await;
        assert_eq!(doc.source, WireframeSource::Generative);
        assert!(doc.html.contains("wire"));
        assert!(doc.warnings.is_empty());
    }

    #[tokio::test]
    async fn falls_back_when_completion_fails() {
        let generator = WireframeGenerator::new(Arc::new(FailingCompleter));
        let doc = generator
            .generate_from_analysis(&landing(), Theme::Dark, ColorScheme::Teal)
            .await;
        assert_eq!(doc.source, WireframeSource::Template);
        assert_eq!(doc.template, Some(WireframeTemplate::Landing));
        assert!(doc.warnings[0].contains("service unavailable"));
    }

    #[tokio::test]
    async fn falls_back_when_reply_is_not_markup() {
        let generator = WireframeGenerator::new(Arc::new(StaticTextCompleter::new("")));
        let doc = generator
            .generate_from_analysis(&PageAnalysis::default(), Theme::Light, ColorScheme::Blue)
            .await;
        assert_eq!(doc.source, WireframeSource::Template);
        assert!(doc.html.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn offline_generator_uses_templates() {
        let doc = WireframeGenerator::offline()
            .generate_from_analysis(&landing(), Theme::Light, ColorScheme::Blue)
            .await;
        assert_eq!(doc.source, WireframeSource::Template);
        assert!(doc.warnings[0].contains("no completion API key"));
        assert_eq!(doc.html.matches("<section class=\"wf-hero\">").count(), 1);
    }

    #[tokio::test]
    async fn falls_back_on_timeout() {
        let generator =
            WireframeGenerator::new(Arc::new(SlowCompleter)).with_timeout(Duration::from_millis(50));
        let doc = generator
            .generate_from_analysis(&landing(), Theme::Light, ColorScheme::Blue)
            .await;
        assert_eq!(doc.source, WireframeSource::Template);
        assert!(doc.warnings[0].contains("timed out"));
    }
}
