//! Named UX patterns inferred from a finished [`PageAnalysis`].
//!
//! Each rule combines two or more extractor outputs into a boolean match plus a
//! set of weighted signal strengths. Suggestions come from a fixed table keyed by
//! pattern type, so the report is fully deterministic.

mod rules;
mod suggestions;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::types::PageAnalysis;

pub use rules::{Rule, RULES};
pub use suggestions::{suggestions_for, SuggestionEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    LongForm,
    ValidatedForm,
    HeroCta,
    ContentHeavy,
    SocialProof,
    PricingTiers,
    CollapsibleNavigation,
    RichMotion,
    AsyncLoading,
    MegaNavigation,
    SidebarLayout,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::LongForm => "long-form",
            PatternType::ValidatedForm => "validated-form",
            PatternType::HeroCta => "hero-cta",
            PatternType::ContentHeavy => "content-heavy",
            PatternType::SocialProof => "social-proof",
            PatternType::PricingTiers => "pricing-tiers",
            PatternType::CollapsibleNavigation => "collapsible-navigation",
            PatternType::RichMotion => "rich-motion",
            PatternType::AsyncLoading => "async-loading",
            PatternType::MegaNavigation => "mega-navigation",
            PatternType::SidebarLayout => "sidebar-layout",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal used for pattern priority and for suggestion impact/effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn rank(&self) -> u8 {
        match self {
            Level::High => 3,
            Level::Medium => 2,
            Level::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub title: String,
    /// In `[0, 1]`.
    pub confidence: f32,
    pub priority: Level,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub impact: Level,
    pub effort: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSuggestions {
    pub pattern_type: PatternType,
    pub items: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub patterns: Vec<Pattern>,
    pub suggestions: Vec<PatternSuggestions>,
}

/// One contributing signal: `strength` in `[0, 1]`, `weight` > 0.
#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub weight: f32,
    pub strength: f32,
}

impl Signal {
    pub fn new(weight: f32, strength: f32) -> Self {
        Self { weight, strength }
    }

    /// `count / saturation`, capped at 1.
    pub fn ratio(weight: f32, count: usize, saturation: usize) -> Self {
        let strength = if saturation == 0 {
            1.0
        } else {
            count as f32 / saturation as f32
        };
        Self::new(weight, strength)
    }

    pub fn flag(weight: f32, present: bool) -> Self {
        Self::new(weight, if present { 1.0 } else { 0.0 })
    }
}

/// Weighted mean of the signal strengths, clamped to `[0, 1]`.
pub fn confidence(signals: &[Signal]) -> f32 {
    let total_weight: f32 = signals.iter().map(|s| s.weight.max(0.0)).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f32 = signals
        .iter()
        .map(|s| s.weight.max(0.0) * s.strength.clamp(0.0, 1.0))
        .sum();
    (weighted / total_weight).clamp(0.0, 1.0)
}

/// Evaluate every rule against `analysis` and attach ranked suggestions.
pub fn recognize_patterns(analysis: &PageAnalysis) -> PatternReport {
    let mut patterns: Vec<Pattern> = RULES
        .iter()
        .filter_map(|rule| {
            let signals = (rule.evaluate)(analysis)?;
            Some(Pattern {
                pattern_type: rule.pattern_type,
                title: rule.title.to_string(),
                confidence: confidence(&signals),
                priority: rule.priority,
                tags: rule.tags.iter().map(|t| t.to_string()).collect(),
            })
        })
        .collect();

    patterns.sort_by(compare_patterns);

    let suggestions = patterns
        .iter()
        .map(|p| PatternSuggestions {
            pattern_type: p.pattern_type,
            items: ranked_suggestions(p.pattern_type),
        })
        .collect();

    tracing::debug!(matched = patterns.len(), "patterns recognized");
    PatternReport {
        patterns,
        suggestions,
    }
}

fn compare_patterns(a: &Pattern, b: &Pattern) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
}

/// Table suggestions for `pattern_type`, impact descending then effort ascending.
pub fn ranked_suggestions(pattern_type: PatternType) -> Vec<Suggestion> {
    let mut items: Vec<Suggestion> = suggestions_for(pattern_type)
        .iter()
        .map(|s| Suggestion {
            title: s.title.to_string(),
            description: s.description.to_string(),
            impact: s.impact,
            effort: s.effort,
        })
        .collect();
    items.sort_by(|a, b| {
        b.impact
            .rank()
            .cmp(&a.impact.rank())
            .then_with(|| a.effort.rank().cmp(&b.effort.rank()))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BoundingBox, FormField, FormInfo, LandmarkRegion, LoadingIndicator, NavLink,
        NavigationModel, ResponsiveLayout, Section, SectionCounts, SectionType, Viewport,
        ViewportAnalysis, ViewportClass,
    };

    fn section(section_type: SectionType, buttons: usize) -> Section {
        Section {
            section_type,
            heading: "Heading".into(),
            subheadings: vec![],
            text: "Some section text that is long enough to keep".into(),
            summary: String::new(),
            has_images: false,
            has_buttons: buttons > 0,
            has_links: false,
            has_videos: false,
            has_forms: false,
            counts: SectionCounts {
                buttons,
                ..SectionCounts::default()
            },
            ctas: if buttons > 0 { vec!["Get Started".into()] } else { vec![] },
            class_name: String::new(),
            id: String::new(),
            bounds: BoundingBox::default(),
        }
    }

    fn field(required: bool) -> FormField {
        FormField {
            tag: "input".into(),
            field_type: "text".into(),
            name: None,
            label: None,
            required,
            has_validation: required,
        }
    }

    fn viewport(class: ViewportClass, hamburger: bool, nav_visible: bool) -> ViewportAnalysis {
        ViewportAnalysis {
            viewport: class.viewport(),
            class,
            layout: ResponsiveLayout {
                nav_visible,
                sidebar_visible: false,
                has_hamburger_menu: hamburger,
                section_count: 1,
            },
            measurements: crate::types::Measurements::for_viewport(class.viewport()),
        }
    }

    fn rich_page() -> PageAnalysis {
        let mut page = PageAnalysis::default();
        page.layout.sections = vec![
            section(SectionType::Hero, 1),
            section(SectionType::Pricing, 3),
            section(SectionType::Testimonials, 0),
        ];
        page.forms.total_forms = 1;
        page.forms.has_validation = true;
        page.forms.has_error_states = true;
        page.forms.forms = vec![FormInfo {
            selector: "form#signup".into(),
            action: None,
            method: "post".into(),
            fields: (0..7).map(|i| field(i % 2 == 0)).collect(),
            submit_text: Some("Create account".into()),
        }];
        page.responsive.set(ViewportClass::Mobile, viewport(ViewportClass::Mobile, true, false));
        page.responsive.set(ViewportClass::Desktop, viewport(ViewportClass::Desktop, false, true));
        page.layout.navigation = Some(NavigationModel {
            links: vec![NavLink {
                text: "Home".into(),
                href: Some("/".into()),
                is_button: false,
                has_dropdown: false,
            }],
            structure: "nav".into(),
            has_sub_navs: false,
            bounds: BoundingBox::default(),
        });
        page
    }

    #[test]
    fn empty_analysis_matches_nothing() {
        let report = recognize_patterns(&PageAnalysis::default());
        assert!(report.patterns.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn rich_page_matches_expected_patterns() {
        let report = recognize_patterns(&rich_page());
        let types: Vec<PatternType> = report.patterns.iter().map(|p| p.pattern_type).collect();
        for expected in [
            PatternType::LongForm,
            PatternType::ValidatedForm,
            PatternType::HeroCta,
            PatternType::PricingTiers,
            PatternType::SocialProof,
            PatternType::CollapsibleNavigation,
        ] {
            assert!(types.contains(&expected), "missing {expected}: {types:?}");
        }
        assert!(!types.contains(&PatternType::SidebarLayout));
        assert_eq!(report.suggestions.len(), report.patterns.len());
    }

    #[test]
    fn confidences_bounded_and_sorted() {
        let report = recognize_patterns(&rich_page());
        for p in &report.patterns {
            assert!((0.0..=1.0).contains(&p.confidence), "{p:?}");
        }
        for pair in report.patterns.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.confidence > b.confidence
                    || (a.confidence == b.confidence && a.priority.rank() >= b.priority.rank()),
                "{a:?} before {b:?}"
            );
        }
    }

    #[test]
    fn confidence_is_clamped_weighted_mean() {
        assert_eq!(confidence(&[]), 0.0);
        let c = confidence(&[Signal::new(1.0, 1.0), Signal::new(1.0, 0.0)]);
        assert!((c - 0.5).abs() < 1e-6);
        let over = confidence(&[Signal::ratio(2.0, 40, 10)]);
        assert_eq!(over, 1.0);
    }

    #[test]
    fn more_fields_never_lower_long_form_confidence() {
        let mut page = rich_page();
        let base = recognize_patterns(&page);
        page.forms.forms[0].fields.extend((0..5).map(|_| field(true)));
        let more = recognize_patterns(&page);
        let conf = |r: &PatternReport| {
            r.patterns
                .iter()
                .find(|p| p.pattern_type == PatternType::LongForm)
                .map(|p| p.confidence)
                .unwrap()
        };
        assert!(conf(&more) >= conf(&base));
    }

    #[test]
    fn sidebar_and_loading_patterns() {
        let mut page = PageAnalysis::default();
        page.layout.sidebar = Some(LandmarkRegion {
            tag: "aside".into(),
            class_name: None,
            id: None,
            bounds: BoundingBox::new(0.0, 80.0, 280.0, 900.0),
            sticky: true,
        });
        page.layout.main = Some(LandmarkRegion {
            tag: "main".into(),
            class_name: None,
            id: None,
            bounds: BoundingBox::new(280.0, 80.0, 1160.0, 900.0),
            sticky: false,
        });
        page.layout.measurements.viewport = Viewport::DESKTOP;
        page.loading_states.skeletons.push(LoadingIndicator {
            selector: "div.skeleton".into(),
            has_animation: true,
        });
        page.frameworks.frameworks.push("React".into());

        let types: Vec<PatternType> = recognize_patterns(&page)
            .patterns
            .into_iter()
            .map(|p| p.pattern_type)
            .collect();
        assert!(types.contains(&PatternType::SidebarLayout));
        assert!(types.contains(&PatternType::AsyncLoading));
    }

    #[test]
    fn suggestions_ranked_by_impact_then_effort() {
        for rule in RULES.iter() {
            let items = ranked_suggestions(rule.pattern_type);
            assert!(!items.is_empty(), "no suggestions for {}", rule.pattern_type);
            for pair in items.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.impact.rank() > b.impact.rank()
                        || (a.impact == b.impact && a.effort.rank() <= b.effort.rank())
                );
            }
        }
    }
}
