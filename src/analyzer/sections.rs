//! Section extraction and classification.
//!
//! Candidate regions are reduced to a [`SectionSignals`] value first; the
//! classifier is an ordered table of `(SectionType, predicate)` pairs over
//! those signals, evaluated top to bottom with the first match winning.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{heading_level, DomNode, Section, SectionCounts, SectionType};

use super::elements::{is_button_like, is_cta_like, is_image, is_input_field, is_link, is_navigation_element, is_video};
use super::tree::{collapse_whitespace, mentions_any, normalize, truncate_chars, word_tokens, DomTree};

pub const MAX_SECTIONS: usize = 20;
/// Sections shorter than this are noise (wrappers, spacers, icon rows).
pub const MIN_SECTION_TEXT: usize = 30;
pub const MAX_SECTION_TEXT: usize = 300;
pub const MAX_SUMMARY: usize = 150;
pub const DEDUPE_PREFIX: usize = 100;
pub const MAX_SUBHEADINGS: usize = 3;
pub const MAX_CTAS: usize = 3;

static STAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?\s*[kmb]?\s*[%+]").expect("valid stat regex"));

/// Everything the classifier looks at, extracted from one candidate region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSignals {
    /// Normalized class, id, heading and text, tokenized for keyword checks
    tokens: Vec<String>,
    pub heading: String,
    pub text: String,
    pub has_h1: bool,
    pub cta_count: usize,
    pub card_children: usize,
    pub media_children: usize,
    pub image_count: usize,
    pub has_blockquote: bool,
    pub price_children: usize,
    pub has_form: bool,
    pub input_count: usize,
    pub stat_children: usize,
    pub has_nav: bool,
    pub link_count: usize,
    pub article_children: usize,
}

impl SectionSignals {
    /// Build signals from already-normalized strings; DOM-derived counts start at zero.
    pub fn from_text(class_and_id: &str, heading: &str, text: &str) -> Self {
        let heading = normalize(heading);
        let text = normalize(text);
        let haystack = format!("{} {} {}", normalize(class_and_id), heading, text);
        let tokens = word_tokens(&haystack);
        Self {
            tokens,
            heading,
            text,
            ..Self::default()
        }
    }

    /// True if any keyword appears as a word prefix, or any multi-word phrase appears whole.
    pub fn mentions(&self, keywords: &[&str]) -> bool {
        mentions_any(&self.tokens, keywords)
    }
}

type Rule = (SectionType, fn(&SectionSignals) -> bool);

/// Classification rules in priority order.
pub const RULES: [Rule; 12] = [
    (SectionType::Hero, is_hero),
    (SectionType::Features, is_features),
    (SectionType::Cta, is_cta),
    (SectionType::Testimonials, is_testimonials),
    (SectionType::Pricing, is_pricing),
    (SectionType::Team, is_team),
    (SectionType::Gallery, is_gallery),
    (SectionType::Form, is_form),
    (SectionType::Stats, is_stats),
    (SectionType::Navigation, is_navigation),
    (SectionType::BlogList, is_blog_list),
    (SectionType::Content, is_content),
];

pub fn classify(signals: &SectionSignals) -> SectionType {
    RULES
        .iter()
        .find(|(_, predicate)| predicate(signals))
        .map(|(section_type, _)| *section_type)
        .unwrap_or(SectionType::Section)
}

fn is_hero(s: &SectionSignals) -> bool {
    let short_heading = !s.heading.is_empty() && s.heading.chars().count() < 100;
    short_heading
        && s.cta_count >= 1
        && (s.mentions(&["hero", "banner", "jumbotron"]) || s.has_h1)
}

fn is_features(s: &SectionSignals) -> bool {
    s.card_children >= 2 || (s.mentions(&["feature"]) && s.media_children >= 2)
}

fn is_cta(s: &SectionSignals) -> bool {
    s.cta_count >= 1
        && s.text.chars().count() < 500
        && s.mentions(&["cta", "signup", "sign up", "get started"])
}

fn is_testimonials(s: &SectionSignals) -> bool {
    s.mentions(&["testimonial", "review", "quote"]) || s.has_blockquote
}

fn is_pricing(s: &SectionSignals) -> bool {
    s.mentions(&["pricing", "plan"]) || s.price_children >= 2
}

fn is_team(s: &SectionSignals) -> bool {
    s.mentions(&["team", "about", "who we are"])
}

fn is_gallery(s: &SectionSignals) -> bool {
    s.image_count >= 3 && s.mentions(&["gallery", "showcase"])
}

fn is_form(s: &SectionSignals) -> bool {
    s.has_form || s.input_count >= 2
}

fn is_stats(s: &SectionSignals) -> bool {
    s.stat_children >= 2 || STAT_PATTERN.is_match(&s.text)
}

fn is_navigation(s: &SectionSignals) -> bool {
    s.has_nav || s.link_count >= 5
}

fn is_blog_list(s: &SectionSignals) -> bool {
    s.article_children >= 2 || s.mentions(&["blog", "news", "article"])
}

fn is_content(s: &SectionSignals) -> bool {
    s.text.chars().count() > 200 && !s.heading.is_empty()
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Collect, classify and de-duplicate the page's content sections.
pub fn extract_sections(tree: &DomTree<'_>, max_sections: usize) -> Vec<Section> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sections = Vec::new();

    let candidates: Vec<&DomNode> = tree.nodes().filter(|n| is_candidate(tree, n)).collect();
    for candidate in candidates {
        if sections.len() >= max_sections {
            break;
        }
        let Some(section) = build_section(tree, candidate) else {
            continue;
        };
        let key = truncate_chars(&section.text, DEDUPE_PREFIX);
        if !seen.insert(key) {
            continue;
        }
        sections.push(section);
    }

    tracing::debug!(count = sections.len(), "extracted sections");
    sections
}

fn is_candidate(tree: &DomTree<'_>, node: &DomNode) -> bool {
    if matches!(node.tag.as_str(), "section" | "article") {
        return true;
    }
    if node.role() == Some("region") {
        return true;
    }
    if matches!(node.tag.as_str(), "html" | "body" | "main" | "head") {
        return false;
    }
    if node
        .class_name()
        .split_whitespace()
        .any(|c| c.to_lowercase().contains("section"))
    {
        return true;
    }
    tree.parent(node).map(|p| p.tag == "main").unwrap_or(false)
}

fn build_section(tree: &DomTree<'_>, node: &DomNode) -> Option<Section> {
    let text = tree.text_content(node);
    if text.chars().count() < MIN_SECTION_TEXT {
        return None;
    }

    let descendants = tree.descendants(node);
    let headings: Vec<(u8, String)> = descendants
        .iter()
        .filter_map(|d| heading_level(&d.tag).map(|level| (level, tree.text_content(d))))
        .filter(|(_, text)| !text.is_empty())
        .collect();
    let heading = headings.first().map(|(_, t)| t.clone()).unwrap_or_default();
    let subheadings: Vec<String> = headings
        .iter()
        .skip(1)
        .take(MAX_SUBHEADINGS)
        .map(|(_, t)| truncate_chars(t, 100))
        .collect();

    let mut signals = SectionSignals::from_text(&node.class_and_id(), &heading, &text);
    let mut counts = SectionCounts::default();
    let mut ctas = Vec::new();

    signals.has_nav = is_navigation_element(node);
    for d in descendants.iter().copied() {
        let class = d.class_name().to_lowercase();
        if d.tag == "h1" {
            signals.has_h1 = true;
        }
        if is_button_like(d) {
            counts.buttons += 1;
        } else if is_link(d) {
            counts.links += 1;
        }
        if is_link(d) || d.tag == "a" {
            signals.link_count += 1;
        }
        let label = if is_button_like(d) || d.tag == "a" {
            tree.label_of(d)
        } else {
            String::new()
        };
        if (is_button_like(d) || d.tag == "a") && is_cta_like(d, &label) {
            signals.cta_count += 1;
            if ctas.len() < MAX_CTAS && !label.is_empty() {
                ctas.push(truncate_chars(&label, 60));
            }
        }
        if is_image(d) {
            counts.images += 1;
            signals.image_count += 1;
        }
        if is_image(d) || class.contains("icon") {
            signals.media_children += 1;
        }
        if is_video(d) {
            counts.videos += 1;
        }
        if d.tag == "form" {
            counts.forms += 1;
            signals.has_form = true;
        }
        if is_input_field(d) && matches!(d.tag.as_str(), "input" | "textarea") {
            signals.input_count += 1;
        }
        if d.tag == "blockquote" {
            signals.has_blockquote = true;
        }
        if is_navigation_element(d) {
            signals.has_nav = true;
        }
        if class.contains("card") || class.contains("feature") || class.contains("tile") {
            signals.card_children += 1;
        }
        if class.contains("price") || class.contains("pricing") || class.contains("plan") || class.contains("tier") {
            signals.price_children += 1;
        }
        if class.contains("stat") || class.contains("metric") || class.contains("counter") {
            signals.stat_children += 1;
        }
        if d.tag == "article" || class.contains("post") || class.contains("article") {
            signals.article_children += 1;
        }
    }

    let section_type = classify(&signals);
    Some(Section {
        section_type,
        heading: truncate_chars(&heading, 200),
        subheadings,
        text: truncate_chars(&text, MAX_SECTION_TEXT),
        summary: summarize(&text, MAX_SUMMARY),
        has_images: counts.images > 0,
        has_buttons: counts.buttons > 0,
        has_links: counts.links > 0,
        has_videos: counts.videos > 0,
        has_forms: counts.forms > 0,
        counts,
        ctas,
        class_name: node.class_name().to_string(),
        id: node.element_id().to_string(),
        bounds: node.bounding_box,
    })
}

/// Shorten to `max` chars, cutting at a word boundary and marking the cut.
pub fn summarize(text: &str, max: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max {
        return text;
    }
    let budget = max.saturating_sub(3);
    let head = truncate_chars(&text, budget);
    let cut = match head.rfind(' ') {
        Some(idx) if idx > budget / 2 => &head[..idx],
        _ => head.as_str(),
    };
    format!("{}...", cut.trim_end())
}
