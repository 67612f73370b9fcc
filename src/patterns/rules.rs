//! The fixed pattern rule set.

use crate::types::{PageAnalysis, Section, SectionType, ViewportClass};

use super::{Level, PatternType, Signal};

pub struct Rule {
    pub pattern_type: PatternType,
    pub title: &'static str,
    pub priority: Level,
    pub tags: &'static [&'static str],
    /// `None` when the pattern does not apply, otherwise its contributing signals.
    pub evaluate: fn(&PageAnalysis) -> Option<Vec<Signal>>,
}

pub const RULES: [Rule; 11] = [
    Rule {
        pattern_type: PatternType::LongForm,
        title: "Long form",
        priority: Level::Medium,
        tags: &["forms", "conversion"],
        evaluate: long_form,
    },
    Rule {
        pattern_type: PatternType::ValidatedForm,
        title: "Validated form with feedback states",
        priority: Level::High,
        tags: &["forms", "accessibility"],
        evaluate: validated_form,
    },
    Rule {
        pattern_type: PatternType::HeroCta,
        title: "Hero with call to action",
        priority: Level::High,
        tags: &["marketing", "conversion"],
        evaluate: hero_cta,
    },
    Rule {
        pattern_type: PatternType::ContentHeavy,
        title: "Content-heavy page",
        priority: Level::Medium,
        tags: &["content", "readability"],
        evaluate: content_heavy,
    },
    Rule {
        pattern_type: PatternType::SocialProof,
        title: "Social proof",
        priority: Level::Medium,
        tags: &["marketing", "trust"],
        evaluate: social_proof,
    },
    Rule {
        pattern_type: PatternType::PricingTiers,
        title: "Pricing tiers",
        priority: Level::High,
        tags: &["marketing", "conversion"],
        evaluate: pricing_tiers,
    },
    Rule {
        pattern_type: PatternType::CollapsibleNavigation,
        title: "Collapsible mobile navigation",
        priority: Level::Medium,
        tags: &["navigation", "responsive"],
        evaluate: collapsible_navigation,
    },
    Rule {
        pattern_type: PatternType::RichMotion,
        title: "Rich motion design",
        priority: Level::Low,
        tags: &["motion", "performance"],
        evaluate: rich_motion,
    },
    Rule {
        pattern_type: PatternType::AsyncLoading,
        title: "Asynchronous loading states",
        priority: Level::Medium,
        tags: &["performance", "feedback"],
        evaluate: async_loading,
    },
    Rule {
        pattern_type: PatternType::MegaNavigation,
        title: "Mega navigation",
        priority: Level::Medium,
        tags: &["navigation", "information-architecture"],
        evaluate: mega_navigation,
    },
    Rule {
        pattern_type: PatternType::SidebarLayout,
        title: "Sidebar layout",
        priority: Level::Low,
        tags: &["layout", "responsive"],
        evaluate: sidebar_layout,
    },
];

const LONG_FORM_FIELDS: usize = 5;

fn first_of(analysis: &PageAnalysis, section_type: SectionType) -> Option<&Section> {
    analysis
        .layout
        .sections
        .iter()
        .find(|s| s.section_type == section_type)
}

fn count_of(analysis: &PageAnalysis, types: &[SectionType]) -> usize {
    analysis
        .layout
        .sections
        .iter()
        .filter(|s| types.contains(&s.section_type))
        .count()
}

fn long_form(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let form = a.forms.forms.first()?;
    if a.forms.total_forms == 0 || form.fields.len() <= LONG_FORM_FIELDS {
        return None;
    }
    let required = form.fields.iter().filter(|f| f.required).count();
    Some(vec![
        Signal::ratio(2.0, form.fields.len(), 12),
        Signal::ratio(1.0, required, form.fields.len()),
        Signal::flag(1.0, a.forms.has_validation),
    ])
}

fn validated_form(a: &PageAnalysis) -> Option<Vec<Signal>> {
    if a.forms.total_forms == 0 || !a.forms.has_validation {
        return None;
    }
    if !a.forms.has_error_states && !a.interactive.has_focus_styles {
        return None;
    }
    let validated = a
        .forms
        .forms
        .iter()
        .flat_map(|f| f.fields.iter())
        .filter(|f| f.has_validation)
        .count();
    Some(vec![
        Signal::flag(2.0, a.forms.has_error_states),
        Signal::flag(1.0, a.interactive.has_focus_styles),
        Signal::ratio(1.0, validated, 3),
    ])
}

fn hero_cta(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let hero = first_of(a, SectionType::Hero)?;
    if hero.ctas.is_empty() || (!hero.has_buttons && a.interactive.buttons.is_empty()) {
        return None;
    }
    let is_first = a
        .layout
        .sections
        .first()
        .map(|s| s.section_type == SectionType::Hero)
        .unwrap_or(false);
    Some(vec![
        Signal::flag(2.0, true),
        Signal::flag(1.0, is_first),
        Signal::ratio(1.0, hero.ctas.len(), 2),
    ])
}

fn content_heavy(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let content = count_of(a, &[SectionType::Content, SectionType::BlogList]);
    let headings = a.layout.visual_hierarchy.headings.len();
    if content < 3 || headings < 5 {
        return None;
    }
    Some(vec![
        Signal::ratio(2.0, content, 6),
        Signal::ratio(1.0, headings, 15),
        Signal::ratio(1.0, a.layout.visual_hierarchy.font_size_tiers.len(), 4),
    ])
}

fn social_proof(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let testimonials = count_of(a, &[SectionType::Testimonials]);
    let stats = count_of(a, &[SectionType::Stats]);
    if testimonials + stats == 0 || a.layout.sections.len() < 2 {
        return None;
    }
    Some(vec![
        Signal::flag(2.0, testimonials > 0),
        Signal::flag(1.0, stats > 0),
        Signal::flag(1.0, first_of(a, SectionType::Hero).is_some()),
    ])
}

fn pricing_tiers(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let pricing = first_of(a, SectionType::Pricing)?;
    let buttons = pricing.counts.buttons.max(a.interactive.buttons.len());
    if buttons < 2 {
        return None;
    }
    Some(vec![
        Signal::flag(2.0, true),
        Signal::ratio(1.0, pricing.counts.buttons, 3),
    ])
}

fn collapsible_navigation(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let mobile = a.responsive.get(ViewportClass::Mobile)?;
    if !mobile.layout.has_hamburger_menu {
        return None;
    }
    let desktop_nav = a
        .responsive
        .get(ViewportClass::Desktop)
        .map(|d| d.layout.nav_visible)
        .unwrap_or(false);
    if !desktop_nav && a.layout.navigation.is_none() {
        return None;
    }
    Some(vec![
        Signal::flag(2.0, true),
        Signal::flag(1.0, desktop_nav),
        Signal::flag(1.0, !mobile.layout.nav_visible),
    ])
}

fn rich_motion(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let motion = a.animations.css_transitions.len() + a.animations.css_animations.len();
    if motion < 5 && !a.animations.has_parallax {
        return None;
    }
    if !a.interactive.has_hover_effects && !a.animations.has_micro_interactions {
        return None;
    }
    Some(vec![
        Signal::ratio(2.0, motion, 15),
        Signal::flag(1.0, a.animations.has_parallax),
        Signal::flag(1.0, a.animations.has_micro_interactions),
    ])
}

fn async_loading(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let states = &a.loading_states;
    if states.is_empty() {
        return None;
    }
    let animated = states
        .spinners
        .iter()
        .chain(states.skeletons.iter())
        .any(|i| i.has_animation);
    let spa = !a.frameworks.frameworks.is_empty();
    if !spa && !animated {
        return None;
    }
    let kinds = [
        !states.spinners.is_empty(),
        !states.skeletons.is_empty(),
        !states.progress_bars.is_empty(),
    ]
    .iter()
    .filter(|k| **k)
    .count();
    Some(vec![
        Signal::ratio(2.0, kinds, 2),
        Signal::flag(1.0, spa),
        Signal::flag(1.0, animated),
    ])
}

fn mega_navigation(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let nav = a.layout.navigation.as_ref()?;
    let dropdowns = nav.links.iter().filter(|l| l.has_dropdown).count();
    if nav.links.len() < 12 || (!nav.has_sub_navs && dropdowns < 2) {
        return None;
    }
    Some(vec![
        Signal::ratio(2.0, nav.links.len(), 25),
        Signal::flag(1.0, nav.has_sub_navs),
        Signal::ratio(1.0, dropdowns, 5),
    ])
}

fn sidebar_layout(a: &PageAnalysis) -> Option<Vec<Signal>> {
    let sidebar = a.layout.sidebar.as_ref()?;
    if sidebar.bounds.is_empty() {
        return None;
    }
    let desktop_visible = a
        .responsive
        .get(ViewportClass::Desktop)
        .map(|d| d.layout.sidebar_visible);
    if a.layout.main.is_none() && desktop_visible != Some(true) {
        return None;
    }
    let viewport_width = a.layout.measurements.viewport.width.max(1) as f32;
    let narrow = sidebar.bounds.width / viewport_width <= 0.35;
    let hidden_on_mobile = a
        .responsive
        .get(ViewportClass::Mobile)
        .map(|m| !m.layout.sidebar_visible)
        .unwrap_or(false);
    Some(vec![
        Signal::flag(2.0, narrow),
        Signal::flag(1.0, sidebar.sticky),
        Signal::flag(1.0, hidden_on_mobile),
    ])
}
