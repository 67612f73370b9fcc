//! Primary navigation detection.

use crate::types::{DomNode, NavLink, NavigationModel};

use super::elements::{is_button_like, is_interactive, is_link, is_navigation_element};
use super::tree::{truncate_chars, DomTree};

pub const MAX_NAV_LINKS: usize = 25;
const MIN_FALLBACK_LINKS: usize = 3;

/// Class fragments that mark a navigation container, including common UI kits.
const NAV_CLASS_MARKERS: [&str; 5] = ["nav", "navbar", "menu", "muiappbar", "chakra-nav"];

fn is_list(node: &DomNode) -> bool {
    matches!(node.tag.as_str(), "ul" | "ol")
}

fn is_nav_candidate(tree: &DomTree<'_>, node: &DomNode) -> bool {
    if is_navigation_element(node) {
        return true;
    }
    if matches!(node.tag.as_str(), "html" | "body" | "main") {
        return false;
    }
    let class = node.class_name().to_lowercase();
    if NAV_CLASS_MARKERS.iter().any(|m| class.contains(m)) {
        return true;
    }
    if node
        .attr("data-testid")
        .map(|v| v.to_lowercase().contains("nav"))
        .unwrap_or(false)
    {
        return true;
    }
    node.tag == "ul" && tree.has_ancestor(node, |a| a.tag == "header")
}

fn interactive_count(tree: &DomTree<'_>, node: &DomNode) -> usize {
    tree.descendants(node).into_iter().filter(|d| is_interactive(d)).count()
}

/// The element chosen as the page's main navigation.
pub fn find_navigation<'a>(tree: &DomTree<'a>) -> Option<&'a DomNode> {
    let mut best: Option<(&DomNode, usize)> = None;
    for node in tree.nodes().filter(|n| is_nav_candidate(tree, n)) {
        let count = interactive_count(tree, node);
        // Strictly greater keeps the earliest candidate on ties.
        if best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((node, count));
        }
    }

    match best {
        Some((node, count)) if count > 0 => Some(node),
        _ => tree.find_first(|n| {
            is_list(n)
                && tree
                    .descendants(n)
                    .into_iter()
                    .filter(|d| is_link(d))
                    .count()
                    >= MIN_FALLBACK_LINKS
        }),
    }
}

/// Pick the main navigation and collect its links.
///
/// Returns `None` when the page has no recognizable navigation at all.
pub fn extract_navigation(tree: &DomTree<'_>) -> Option<NavigationModel> {
    let chosen = find_navigation(tree)?;
    let links = collect_links(tree, chosen);
    let has_sub_navs = tree
        .descendants(chosen)
        .into_iter()
        .any(|d| is_nested_list(tree, d, chosen));

    tracing::debug!(structure = %chosen.tag, links = links.len(), "navigation selected");

    Some(NavigationModel {
        links,
        structure: chosen.tag.clone(),
        has_sub_navs,
        bounds: chosen.bounding_box,
    })
}

/// A list with another list between it and `root`.
fn is_nested_list(tree: &DomTree<'_>, node: &DomNode, root: &DomNode) -> bool {
    if !is_list(node) {
        return false;
    }
    for ancestor in tree.ancestors(node) {
        if is_list(ancestor) {
            return true;
        }
        if ancestor.id == root.id {
            break;
        }
    }
    false
}

fn collect_links(tree: &DomTree<'_>, nav: &DomNode) -> Vec<NavLink> {
    let mut links = Vec::new();
    for node in tree.descendants(nav) {
        if links.len() >= MAX_NAV_LINKS {
            break;
        }
        if !(node.tag == "a" || is_button_like(node) || node.role() == Some("menuitem")) {
            continue;
        }
        let text = tree.label_of(node);
        if text.is_empty() {
            continue;
        }
        links.push(NavLink {
            text: truncate_chars(&text, 80),
            href: node.attr("href").map(str::to_string),
            is_button: is_button_like(node),
            has_dropdown: has_dropdown(tree, node),
        });
    }
    links
}

fn has_dropdown(tree: &DomTree<'_>, link: &DomNode) -> bool {
    if link.attr("aria-haspopup").is_some() || link.attr("aria-expanded").is_some() {
        return true;
    }
    if link.has_class_containing("dropdown") {
        return true;
    }
    match tree.parent(link) {
        Some(parent) => {
            parent.has_class_containing("dropdown")
                || (parent.tag == "li" && tree.descendants(parent).into_iter().any(is_list))
        }
        None => false,
    }
}
