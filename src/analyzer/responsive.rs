//! Per-viewport layout comparison.

use crate::types::{DomNode, ResponsiveLayout, Viewport, ViewportAnalysis};

use super::layout::{find_landmarks, measure};
use super::navigation::{extract_navigation, find_navigation};
use super::sections::extract_sections;
use super::tree::{normalize, DomTree};

const TOGGLE_MARKERS: [&str; 6] = [
    "hamburger",
    "menu-toggle",
    "navbar-toggler",
    "nav-toggle",
    "menu-button",
    "mobile-menu-toggle",
];

/// Whether `node` looks like a collapsed-menu toggle, regardless of visibility.
pub fn is_menu_toggle(tree: &DomTree<'_>, node: &DomNode) -> bool {
    let haystack = format!(
        "{} {}",
        node.class_and_id(),
        node.attr("aria-label").map(normalize).unwrap_or_default()
    );
    if TOGGLE_MARKERS.iter().any(|m| haystack.contains(m)) {
        return true;
    }
    let is_control = node.tag == "button" || node.role() == Some("button");
    is_control
        && node.attr("aria-expanded").is_some()
        && tree.label_of(node).to_lowercase().contains("menu")
}

pub fn has_visible_menu_toggle(tree: &DomTree<'_>) -> bool {
    tree.nodes()
        .any(|n| is_menu_toggle(tree, n) && tree.is_rendered(n))
}

/// Summarize one viewport's snapshot.
pub fn analyze_viewport(tree: &DomTree<'_>, viewport: Viewport, max_sections: usize) -> ViewportAnalysis {
    let landmarks = find_landmarks(tree);
    let navigation = extract_navigation(tree);
    let sections = extract_sections(tree, max_sections);

    let layout = ResponsiveLayout {
        nav_visible: find_navigation(tree)
            .map(|n| tree.is_rendered(n))
            .unwrap_or(false),
        sidebar_visible: landmarks
            .sidebar
            .map(|n| tree.is_rendered(n))
            .unwrap_or(false),
        has_hamburger_menu: has_visible_menu_toggle(tree),
        section_count: sections.len(),
    };

    tracing::debug!(
        width = viewport.width,
        nav_visible = layout.nav_visible,
        hamburger = layout.has_hamburger_menu,
        "viewport analyzed"
    );

    ViewportAnalysis {
        viewport,
        class: viewport.class(),
        layout,
        measurements: measure(viewport, &landmarks.regions(), navigation.as_ref(), &sections),
    }
}
