//! Landmark regions, per-viewport measurements and visual hierarchy.

use crate::types::{
    heading_level, BoundingBox, DomNode, HeadingInfo, LandmarkRegion, Measurements, NavigationModel,
    Section, Viewport, VisualHierarchy,
};

use super::tree::{truncate_chars, DomTree};

pub const MAX_MEASURED_SECTIONS: usize = 15;
pub const MAX_HEADINGS: usize = 20;
/// Relative font-size difference under which two sizes share a tier.
pub const TIER_TOLERANCE: f32 = 0.1;

/// The four structural landmarks of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Landmarks {
    pub header: Option<LandmarkRegion>,
    pub main: Option<LandmarkRegion>,
    pub sidebar: Option<LandmarkRegion>,
    pub footer: Option<LandmarkRegion>,
}

struct LandmarkRule {
    tags: &'static [&'static str],
    role: &'static str,
    class_markers: &'static [&'static str],
}

const HEADER: LandmarkRule = LandmarkRule {
    tags: &["header"],
    role: "banner",
    class_markers: &["header", "masthead", "topbar"],
};
const MAIN: LandmarkRule = LandmarkRule {
    tags: &["main"],
    role: "main",
    class_markers: &["main-content", "main", "content"],
};
const SIDEBAR: LandmarkRule = LandmarkRule {
    tags: &["aside"],
    role: "complementary",
    class_markers: &["sidebar", "side-bar", "sidenav"],
};
const FOOTER: LandmarkRule = LandmarkRule {
    tags: &["footer"],
    role: "contentinfo",
    class_markers: &["footer"],
};

/// Landmark elements before they are reduced to [`LandmarkRegion`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarkNodes<'a> {
    pub header: Option<&'a DomNode>,
    pub main: Option<&'a DomNode>,
    pub sidebar: Option<&'a DomNode>,
    pub footer: Option<&'a DomNode>,
}

impl LandmarkNodes<'_> {
    pub fn regions(&self) -> Landmarks {
        Landmarks {
            header: self.header.map(region),
            main: self.main.map(region),
            sidebar: self.sidebar.map(region),
            footer: self.footer.map(region),
        }
    }
}

pub fn find_landmarks<'a>(tree: &DomTree<'a>) -> LandmarkNodes<'a> {
    LandmarkNodes {
        header: find_landmark(tree, &HEADER),
        main: find_landmark(tree, &MAIN),
        sidebar: find_landmark(tree, &SIDEBAR),
        footer: find_landmark(tree, &FOOTER),
    }
}

pub fn extract_landmarks(tree: &DomTree<'_>) -> Landmarks {
    find_landmarks(tree).regions()
}

fn find_landmark<'a>(tree: &DomTree<'a>, rule: &LandmarkRule) -> Option<&'a DomNode> {
    let semantic = tree.find_first(|n| rule.tags.contains(&n.tag.as_str()) || n.role() == Some(rule.role));
    semantic.or_else(|| {
        tree.find_first(|n| {
            if matches!(n.tag.as_str(), "html" | "body" | "head") {
                return false;
            }
            let class_and_id = n.class_and_id();
            class_and_id
                .split_whitespace()
                .any(|token| rule.class_markers.iter().any(|m| token == *m || token.starts_with(&format!("{m}-"))))
        })
    })
}

fn region(node: &DomNode) -> LandmarkRegion {
    let sticky = node
        .computed_style
        .as_ref()
        .and_then(|s| s.position.as_deref())
        .map(|p| p == "fixed" || p == "sticky")
        .unwrap_or(false);
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    LandmarkRegion {
        tag: node.tag.clone(),
        class_name: non_empty(node.class_name()),
        id: non_empty(node.element_id()),
        bounds: node.bounding_box,
        sticky,
    }
}

/// Bounding boxes of the landmarks and sections as rendered at `viewport`.
pub fn measure(
    viewport: Viewport,
    landmarks: &Landmarks,
    navigation: Option<&NavigationModel>,
    sections: &[Section],
) -> Measurements {
    let bounds = |r: &Option<LandmarkRegion>| r.as_ref().map(|r| r.bounds);
    Measurements {
        viewport,
        header: bounds(&landmarks.header),
        navigation: navigation.map(|n| n.bounds),
        main: bounds(&landmarks.main),
        sidebar: bounds(&landmarks.sidebar),
        footer: bounds(&landmarks.footer),
        sections: sections
            .iter()
            .take(MAX_MEASURED_SECTIONS)
            .map(|s| s.bounds)
            .collect::<Vec<BoundingBox>>(),
    }
}

pub fn extract_visual_hierarchy(tree: &DomTree<'_>) -> VisualHierarchy {
    let headings: Vec<HeadingInfo> = tree
        .nodes()
        .filter_map(|n| heading_level(&n.tag).map(|level| (n, level)))
        .filter_map(|(n, level)| {
            let text = tree.text_content(n);
            (!text.is_empty()).then(|| HeadingInfo {
                level,
                text: truncate_chars(&text, 120),
                font_size: n.computed_style.as_ref().and_then(|s| s.font_size),
            })
        })
        .take(MAX_HEADINGS)
        .collect();

    let mut sizes: Vec<f32> = tree
        .nodes()
        .filter(|n| n.text.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false))
        .filter_map(|n| n.computed_style.as_ref().and_then(|s| s.font_size))
        .filter(|size| *size > 0.0)
        .collect();
    sizes.extend(headings.iter().filter_map(|h| h.font_size));

    VisualHierarchy {
        headings,
        font_size_tiers: group_into_tiers(sizes),
    }
}

/// Group sizes (largest first) so each tier holds sizes within
/// [`TIER_TOLERANCE`] of its representative.
pub fn group_into_tiers(mut sizes: Vec<f32>) -> Vec<f32> {
    sizes.retain(|s| s.is_finite());
    sizes.sort_by(|a, b| b.total_cmp(a));
    let mut tiers: Vec<f32> = Vec::new();
    for size in sizes {
        match tiers.last() {
            Some(&rep) if size >= rep * (1.0 - TIER_TOLERANCE) => {}
            _ => tiers.push(size),
        }
    }
    tiers
}
