//! Colors, typography and advanced CSS usage.

use once_cell::sync::Lazy;
use palette::{convert::FromColorUnclamped, Lab, Srgb};
use regex::Regex;

use crate::types::{AdvancedCss, ColorSummary, DomNode, Styling, TypographySummary};

use super::tree::DomTree;

const MAX_COLORS: usize = 8;
const MAX_FONT_FAMILIES: usize = 5;
/// Lab lightness below which a page background reads as dark.
const DARK_LIGHTNESS: f32 = 50.0;

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*([\d.]+)[,\s]+([\d.]+)[,\s]+([\d.]+)(?:\s*[,/]\s*([\d.]+%?))?\s*\)$")
        .expect("valid rgb regex")
});

/// An opaque-enough sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CIE L* of this color, 0 (black) to 100 (white).
    pub fn lightness(self) -> f32 {
        let srgb = Srgb::new(self.r, self.g, self.b).into_format::<f32>();
        let lab: Lab = Lab::from_color_unclamped(srgb);
        lab.l
    }
}

/// Parse a computed CSS color. Fully transparent values yield `None`.
pub fn parse_css_color(value: &str) -> Option<Rgb8> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() || value == "transparent" || value == "none" {
        return None;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let caps = RGB_PATTERN.captures(&value)?;
    let channel = |i: usize| -> Option<u8> {
        let n: f32 = caps.get(i)?.as_str().parse().ok()?;
        Some(n.round().clamp(0.0, 255.0) as u8)
    };
    if let Some(alpha) = caps.get(4) {
        let raw = alpha.as_str();
        let alpha: f32 = match raw.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => raw.parse().ok()?,
        };
        if alpha <= 0.0 {
            return None;
        }
    }
    Some(Rgb8 {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}

fn parse_hex(hex: &str) -> Option<Rgb8> {
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().take(3).flat_map(|c| [c, c]).collect(),
        6 | 8 => hex[..6].to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb8 {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
    })
}

/// Frequency counter that breaks ties by first appearance.
#[derive(Default)]
struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    fn add(&mut self, key: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    fn ranked(mut self, limit: usize) -> Vec<String> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.into_iter().take(limit).map(|(k, _)| k).collect()
    }

    fn top(self) -> Option<String> {
        self.ranked(1).into_iter().next()
    }
}

fn has_own_text(node: &DomNode) -> bool {
    node.text.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false)
}

pub fn extract_styling(tree: &DomTree<'_>) -> Styling {
    Styling {
        colors: extract_colors(tree),
        typography: extract_typography(tree),
        advanced_css: extract_advanced_css(tree),
    }
}

fn extract_colors(tree: &DomTree<'_>) -> ColorSummary {
    let mut text = Tally::default();
    let mut backgrounds = Tally::default();
    for node in tree.nodes().filter(|n| n.is_visible()) {
        let Some(style) = node.computed_style.as_ref() else {
            continue;
        };
        if has_own_text(node) {
            if let Some(color) = style.color.as_deref().and_then(parse_css_color) {
                text.add(color.to_hex());
            }
        }
        if let Some(color) = style.background_color.as_deref().and_then(parse_css_color) {
            backgrounds.add(color.to_hex());
        }
    }

    let page_background = ["body", "html"].iter().find_map(|tag| {
        tree.find_first(|n| n.tag == *tag)
            .and_then(|n| n.computed_style.as_ref())
            .and_then(|s| s.background_color.as_deref())
            .and_then(parse_css_color)
    });

    ColorSummary {
        text: text.ranked(MAX_COLORS),
        backgrounds: backgrounds.ranked(MAX_COLORS),
        page_background: page_background.map(Rgb8::to_hex),
        is_dark_theme: page_background
            .map(|c| c.lightness() < DARK_LIGHTNESS)
            .unwrap_or(false),
    }
}

/// First family of a `font-family` list, unquoted.
fn primary_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim().trim_matches(|c| c == '"' || c == '\'');
    (!first.is_empty()).then(|| first.to_string())
}

fn extract_typography(tree: &DomTree<'_>) -> TypographySummary {
    let mut families = Tally::default();
    let mut body_sizes = Tally::default();
    let mut heading_family = None;

    for node in tree.nodes().filter(|n| has_own_text(n)) {
        let Some(style) = node.computed_style.as_ref() else {
            continue;
        };
        let family = style.font_family.as_deref().and_then(primary_family);
        if let Some(family) = &family {
            families.add(family.clone());
        }
        if node.is_heading() {
            if heading_family.is_none() && matches!(node.tag.as_str(), "h1" | "h2") {
                heading_family = family;
            }
        } else if let Some(size) = style.font_size.filter(|s| *s > 0.0) {
            body_sizes.add(format!("{size}"));
        }
    }

    TypographySummary {
        font_families: families.ranked(MAX_FONT_FAMILIES),
        base_font_size: body_sizes.top().and_then(|s| s.parse().ok()),
        heading_font_family: heading_family,
    }
}

fn is_set(value: Option<&str>, neutral: &[&str]) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !neutral.contains(&v),
    }
}

fn extract_advanced_css(tree: &DomTree<'_>) -> AdvancedCss {
    let sheets = &tree.snapshot().stylesheets;
    let mut css = AdvancedCss {
        uses_custom_properties: sheets.custom_properties > 0,
        media_query_count: sheets.media_queries,
        keyframe_count: sheets.keyframes,
        ..AdvancedCss::default()
    };
    for style in tree.nodes().filter_map(|n| n.computed_style.as_ref()) {
        match style.display.as_deref() {
            Some("grid") | Some("inline-grid") => css.uses_grid = true,
            Some("flex") | Some("inline-flex") => css.uses_flexbox = true,
            _ => {}
        }
        css.has_shadows |= is_set(style.box_shadow.as_deref(), &["none"]);
        css.has_gradients |= style
            .background_image
            .as_deref()
            .map(|b| b.contains("gradient"))
            .unwrap_or(false);
        css.has_rounded_corners |= is_set(style.border_radius.as_deref(), &["0", "0px", "0%"]);
    }
    css
}
