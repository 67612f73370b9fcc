//! DOM snapshot types for browser-captured pages.
//!
//! These types represent the DOM structure extracted from web pages
//! by the page renderer. Every analysis phase reads from this immutable
//! snapshot; nothing here is mutated after capture.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::core::BoundingBox;

/// A snapshot of a web page's DOM structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    /// The URL of the captured page
    pub url: Option<String>,
    /// The page title
    pub title: Option<String>,
    /// Flattened list of DOM nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<DomNode>,
    /// `<meta>` tags from the document head
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<MetaTag>,
    /// `src` of every `<script>` element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    /// Aggregate facts from a scan of the readable stylesheets
    #[serde(default)]
    pub stylesheets: StylesheetSignals,
}

/// A single DOM element with its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Unique identifier for this node
    pub id: String,
    /// HTML tag name (e.g., "div", "span", "button")
    pub tag: String,
    /// IDs of child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// ID of parent node
    pub parent: Option<String>,
    /// HTML attributes (id, class, data-*, etc.)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    /// Direct text content (not including children)
    pub text: Option<String>,
    /// Position and size on screen
    #[serde(default)]
    pub bounding_box: BoundingBox,
    /// CSS computed styles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_style: Option<ComputedStyle>,
}

impl DomNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn class_name(&self) -> &str {
        self.attr("class").unwrap_or("")
    }

    pub fn element_id(&self) -> &str {
        self.attr("id").unwrap_or("")
    }

    pub fn role(&self) -> Option<&str> {
        self.attr("role")
    }

    /// Lower-cased `class` and `id` joined, for keyword checks.
    pub fn class_and_id(&self) -> String {
        format!("{} {}", self.class_name(), self.element_id()).to_lowercase()
    }

    pub fn has_class_containing(&self, needle: &str) -> bool {
        self.class_name().to_lowercase().contains(needle)
    }

    pub fn is_heading(&self) -> bool {
        heading_level(&self.tag).is_some()
    }

    /// Whether the element renders: non-empty box and not hidden by style.
    pub fn is_visible(&self) -> bool {
        if self.bounding_box.is_empty() {
            return false;
        }
        match &self.computed_style {
            Some(style) => style.is_rendered(),
            None => true,
        }
    }

    /// A short CSS-like selector (`tag#id.class1.class2`) for reports.
    pub fn selector(&self) -> String {
        let mut selector = self.tag.clone();
        let id = self.element_id();
        if !id.is_empty() {
            selector.push('#');
            selector.push_str(id);
        }
        for class in self.class_name().split_whitespace().take(2) {
            selector.push('.');
            selector.push_str(class);
        }
        selector
    }
}

/// Heading level for `h1`..`h6`.
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Computed CSS styles for a DOM element.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<String>,
    pub line_height: Option<f32>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub background_attachment: Option<String>,
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f32>,
    pub position: Option<String>,
    pub transition: Option<String>,
    pub animation_name: Option<String>,
    pub animation_duration: Option<String>,
    pub box_shadow: Option<String>,
    pub border_radius: Option<String>,
    pub cursor: Option<String>,
}

impl ComputedStyle {
    pub fn is_rendered(&self) -> bool {
        if self.display.as_deref() == Some("none") {
            return false;
        }
        if matches!(self.visibility.as_deref(), Some("hidden") | Some("collapse")) {
            return false;
        }
        !matches!(self.opacity, Some(o) if o <= 0.0)
    }

    /// True when `transition` is set to something that actually animates.
    pub fn has_transition(&self) -> bool {
        match self.transition.as_deref().map(str::trim) {
            None | Some("") | Some("none") => false,
            Some(value) => value
                .split(',')
                .any(|part| !part.trim().starts_with("none") && has_nonzero_duration(part)),
        }
    }

    /// True when an `animation-name` other than `none` runs for a non-zero duration.
    pub fn has_animation(&self) -> bool {
        let named = matches!(
            self.animation_name.as_deref().map(str::trim),
            Some(name) if !name.is_empty() && name != "none"
        );
        named
            && self
                .animation_duration
                .as_deref()
                .map(has_nonzero_duration)
                .unwrap_or(true)
    }
}

fn has_nonzero_duration(value: &str) -> bool {
    value.split_whitespace().any(|token| {
        let number = token
            .strip_suffix("ms")
            .or_else(|| token.strip_suffix('s'))
            .and_then(|n| n.parse::<f32>().ok());
        matches!(number, Some(n) if n > 0.0)
    })
}

/// A `<meta>` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTag {
    pub name: Option<String>,
    pub property: Option<String>,
    pub content: Option<String>,
}

/// Counts gathered by scanning `document.styleSheets`.
///
/// Cross-origin sheets are unreadable from the page, so these are lower bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylesheetSignals {
    #[serde(default)]
    pub hover_rules: u32,
    #[serde(default)]
    pub focus_rules: u32,
    #[serde(default)]
    pub keyframes: u32,
    #[serde(default)]
    pub media_queries: u32,
    #[serde(default)]
    pub custom_properties: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ComputedStyle {
        ComputedStyle::default()
    }

    #[test]
    fn default_transition_is_not_counted() {
        let mut s = style();
        s.transition = Some("all 0s ease 0s".into());
        assert!(!s.has_transition());
        s.transition = Some("none 0s ease 0s".into());
        assert!(!s.has_transition());
        s.transition = Some("background-color 0.2s ease-in-out 0s".into());
        assert!(s.has_transition());
        s.transition = Some("opacity 150ms linear".into());
        assert!(s.has_transition());
    }

    #[test]
    fn animation_requires_name_and_duration() {
        let mut s = style();
        s.animation_name = Some("none".into());
        assert!(!s.has_animation());
        s.animation_name = Some("spin".into());
        s.animation_duration = Some("0s".into());
        assert!(!s.has_animation());
        s.animation_duration = Some("1s".into());
        assert!(s.has_animation());
    }

    #[test]
    fn hidden_styles_are_not_rendered() {
        let mut s = style();
        assert!(s.is_rendered());
        s.display = Some("none".into());
        assert!(!s.is_rendered());
        s.display = Some("block".into());
        s.visibility = Some("hidden".into());
        assert!(!s.is_rendered());
    }

    #[test]
    fn selector_includes_id_and_first_classes() {
        let mut attributes = HashMap::new();
        attributes.insert("id".to_string(), "top".to_string());
        attributes.insert("class".to_string(), "btn btn-primary large".to_string());
        let node = DomNode {
            id: "node-1".into(),
            tag: "button".into(),
            children: vec![],
            parent: None,
            attributes,
            text: Some("Go".into()),
            bounding_box: BoundingBox::default(),
            computed_style: None,
        };
        assert_eq!(node.selector(), "button#top.btn.btn-primary");
    }

    #[test]
    fn snapshot_deserializes_without_optional_sections() {
        let json = r#"{"url":"https://example.com","title":"Example","nodes":[
            {"id":"node-0","tag":"body","parent":null,"text":null}
        ]}"#;
        let snapshot: DomSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.nodes.len(), 1);
        assert!(snapshot.meta.is_empty());
        assert_eq!(snapshot.stylesheets.hover_rules, 0);
        assert_eq!(snapshot.nodes[0].bounding_box.width, 0.0);
    }
}
