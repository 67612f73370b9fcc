//! Element-kind predicates shared by the extractors.

use crate::types::DomNode;

use super::tree::{mentions_any, word_tokens};

const BUTTON_CLASS_MARKERS: [&str; 3] = ["btn", "button", "cta"];
const CTA_PHRASES: [&str; 12] = [
    "get started",
    "sign up",
    "signup",
    "start",
    "try",
    "join",
    "buy",
    "subscribe",
    "contact",
    "learn more",
    "book",
    "download",
];

pub fn is_button(node: &DomNode) -> bool {
    match node.tag.as_str() {
        "button" => true,
        "input" => matches!(
            node.attr("type").map(str::to_ascii_lowercase).as_deref(),
            Some("submit") | Some("button") | Some("reset")
        ),
        _ => node.role() == Some("button"),
    }
}

pub fn is_link(node: &DomNode) -> bool {
    node.tag == "a" && (node.attr("href").is_some() || node.role() == Some("link"))
}

/// A link styled as a button (`.btn`, `.button`, `.cta`).
pub fn is_button_styled_link(node: &DomNode) -> bool {
    if node.tag != "a" {
        return false;
    }
    let class = node.class_name().to_lowercase();
    BUTTON_CLASS_MARKERS.iter().any(|m| class.contains(m))
}

pub fn is_button_like(node: &DomNode) -> bool {
    is_button(node) || is_button_styled_link(node)
}

/// Whether a button-like element reads as a call to action.
pub fn is_cta_like(node: &DomNode, label: &str) -> bool {
    if is_button_like(node) {
        return true;
    }
    if node.tag != "a" {
        return false;
    }
    mentions_any(&word_tokens(label), &CTA_PHRASES)
}

/// Text-entry and choice controls (not buttons, not hidden).
pub fn is_input_field(node: &DomNode) -> bool {
    match node.tag.as_str() {
        "textarea" | "select" => true,
        "input" => !matches!(
            node.attr("type").map(str::to_ascii_lowercase).as_deref(),
            Some("submit") | Some("button") | Some("reset") | Some("hidden") | Some("image")
        ),
        _ => false,
    }
}

pub fn input_type(node: &DomNode) -> String {
    match node.tag.as_str() {
        "input" => node
            .attr("type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string()),
        other => other.to_string(),
    }
}

pub fn is_image(node: &DomNode) -> bool {
    matches!(node.tag.as_str(), "img" | "picture" | "svg") || node.role() == Some("img")
}

pub fn is_video(node: &DomNode) -> bool {
    node.tag == "video"
        || (node.tag == "iframe"
            && node
                .attr("src")
                .map(|s| {
                    let s = s.to_lowercase();
                    s.contains("youtube") || s.contains("vimeo") || s.contains("player")
                })
                .unwrap_or(false))
}

pub fn is_navigation_element(node: &DomNode) -> bool {
    node.tag == "nav" || node.role() == Some("navigation")
}

pub fn is_interactive(node: &DomNode) -> bool {
    node.tag == "a" || is_button(node) || node.role() == Some("menuitem")
}
