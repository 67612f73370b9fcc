//! The semantic page model produced by [`crate::Analyzer`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::core::{BoundingBox, Screenshot, Viewport, ViewportClass};

/// Root aggregate for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub page_info: PageInfo,
    pub layout: Layout,
    pub styling: Styling,
    pub responsive: Responsive,
    pub interactive: Interactive,
    pub animations: Animations,
    pub forms: Forms,
    pub loading_states: LoadingStates,
    pub frameworks: Frameworks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Screenshot>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub header: Option<LandmarkRegion>,
    pub navigation: Option<NavigationModel>,
    pub main: Option<LandmarkRegion>,
    pub sidebar: Option<LandmarkRegion>,
    pub footer: Option<LandmarkRegion>,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub measurements: Measurements,
    pub visual_hierarchy: VisualHierarchy,
}

/// A structural landmark (header, main, sidebar, footer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkRegion {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub bounds: BoundingBox,
    /// `position: fixed` or `position: sticky`
    pub sticky: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Hero,
    Features,
    Cta,
    Testimonials,
    Pricing,
    Team,
    Gallery,
    Form,
    Stats,
    Navigation,
    BlogList,
    Content,
    Section,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Features => "features",
            SectionType::Cta => "cta",
            SectionType::Testimonials => "testimonials",
            SectionType::Pricing => "pricing",
            SectionType::Team => "team",
            SectionType::Gallery => "gallery",
            SectionType::Form => "form",
            SectionType::Stats => "stats",
            SectionType::Navigation => "navigation",
            SectionType::BlogList => "blog-list",
            SectionType::Content => "content",
            SectionType::Section => "section",
        }
    }
}

impl Default for SectionType {
    fn default() -> Self {
        SectionType::Section
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCounts {
    pub buttons: usize,
    pub links: usize,
    pub images: usize,
    pub videos: usize,
    pub forms: usize,
}

/// A classified content region of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub heading: String,
    #[serde(default)]
    pub subheadings: Vec<String>,
    pub text: String,
    pub summary: String,
    pub has_images: bool,
    pub has_buttons: bool,
    pub has_links: bool,
    pub has_videos: bool,
    pub has_forms: bool,
    pub counts: SectionCounts,
    #[serde(default)]
    pub ctas: Vec<String>,
    pub class_name: String,
    pub id: String,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationModel {
    pub links: Vec<NavLink>,
    /// Tag name of the chosen navigation element
    pub structure: String,
    pub has_sub_navs: bool,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub text: String,
    pub href: Option<String>,
    pub is_button: bool,
    pub has_dropdown: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub viewport: Viewport,
    pub header: Option<BoundingBox>,
    pub navigation: Option<BoundingBox>,
    pub main: Option<BoundingBox>,
    pub sidebar: Option<BoundingBox>,
    pub footer: Option<BoundingBox>,
    #[serde(default)]
    pub sections: Vec<BoundingBox>,
}

impl Measurements {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualHierarchy {
    #[serde(default)]
    pub headings: Vec<HeadingInfo>,
    #[serde(default)]
    pub font_size_tiers: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingInfo {
    pub level: u8,
    pub text: String,
    pub font_size: Option<f32>,
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    pub colors: ColorSummary,
    pub typography: TypographySummary,
    #[serde(rename = "advancedCSS")]
    pub advanced_css: AdvancedCss,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSummary {
    /// Most frequent text colors as `#RRGGBB`
    pub text: Vec<String>,
    /// Most frequent background colors as `#RRGGBB`
    pub backgrounds: Vec<String>,
    pub page_background: Option<String>,
    pub is_dark_theme: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySummary {
    pub font_families: Vec<String>,
    pub base_font_size: Option<f32>,
    pub heading_font_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedCss {
    pub uses_grid: bool,
    pub uses_flexbox: bool,
    pub has_shadows: bool,
    pub has_gradients: bool,
    pub has_rounded_corners: bool,
    pub uses_custom_properties: bool,
    pub media_query_count: u32,
    pub keyframe_count: u32,
}

// ---------------------------------------------------------------------------
// Responsive
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsive {
    pub mobile: Option<ViewportAnalysis>,
    pub tablet: Option<ViewportAnalysis>,
    pub desktop: Option<ViewportAnalysis>,
}

impl Responsive {
    pub fn get(&self, class: ViewportClass) -> Option<&ViewportAnalysis> {
        match class {
            ViewportClass::Mobile => self.mobile.as_ref(),
            ViewportClass::Tablet => self.tablet.as_ref(),
            ViewportClass::Desktop => self.desktop.as_ref(),
        }
    }

    pub fn set(&mut self, class: ViewportClass, analysis: ViewportAnalysis) {
        match class {
            ViewportClass::Mobile => self.mobile = Some(analysis),
            ViewportClass::Tablet => self.tablet = Some(analysis),
            ViewportClass::Desktop => self.desktop = Some(analysis),
        }
    }

    /// Captured passes ordered by viewport width.
    pub fn captured(&self) -> Vec<&ViewportAnalysis> {
        ViewportClass::all()
            .iter()
            .filter_map(|class| self.get(*class))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportAnalysis {
    pub viewport: Viewport,
    pub class: ViewportClass,
    pub layout: ResponsiveLayout,
    pub measurements: Measurements,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveLayout {
    pub nav_visible: bool,
    pub sidebar_visible: bool,
    pub has_hamburger_menu: bool,
    pub section_count: usize,
}

// ---------------------------------------------------------------------------
// Interaction, motion, forms, loading states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactive {
    pub buttons: Vec<InteractiveElement>,
    pub links: Vec<InteractiveElement>,
    pub inputs: Vec<InputElement>,
    pub has_hover_effects: bool,
    pub has_focus_styles: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveElement {
    pub selector: String,
    pub text: String,
    pub styles: StyleDetails,
    pub has_transition: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputElement {
    pub selector: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub has_transition: bool,
}

/// The computed style properties relevant to interaction states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDetails {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_radius: Option<String>,
    pub cursor: Option<String>,
    pub transition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animations {
    pub css_transitions: Vec<MotionDetail>,
    pub css_animations: Vec<MotionDetail>,
    pub has_parallax: bool,
    pub has_micro_interactions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionDetail {
    pub selector: String,
    /// `transition` shorthand or `animation-name`
    pub value: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forms {
    pub total_forms: usize,
    pub has_validation: bool,
    pub has_error_states: bool,
    pub forms: Vec<FormInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    pub selector: String,
    pub action: Option<String>,
    pub method: String,
    pub fields: Vec<FormField>,
    pub submit_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub tag: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub required: bool,
    pub has_validation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingStates {
    pub spinners: Vec<LoadingIndicator>,
    pub skeletons: Vec<LoadingIndicator>,
    pub progress_bars: Vec<LoadingIndicator>,
}

impl LoadingStates {
    pub fn is_empty(&self) -> bool {
        self.spinners.is_empty() && self.skeletons.is_empty() && self.progress_bars.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingIndicator {
    pub selector: String,
    pub has_animation: bool,
}

// ---------------------------------------------------------------------------
// Frameworks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frameworks {
    pub frameworks: Vec<String>,
    pub libraries: Vec<String>,
    pub build_tools: Vec<String>,
    pub meta: Vec<String>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Which analysis phases did not complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub partial: bool,
    pub timed_out: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PhaseFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseFailure {
    pub phase: String,
    pub message: String,
}
