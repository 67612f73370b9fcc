//! Static improvement suggestions keyed by pattern type.

use super::{Level, PatternType};

pub struct SuggestionEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Level,
    pub effort: Level,
}

const fn entry(
    title: &'static str,
    description: &'static str,
    impact: Level,
    effort: Level,
) -> SuggestionEntry {
    SuggestionEntry {
        title,
        description,
        impact,
        effort,
    }
}

const LONG_FORM: &[SuggestionEntry] = &[
    entry(
        "Split into steps",
        "Group related fields into a multi-step flow with a progress indicator.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Trim optional fields",
        "Remove or defer fields that are not needed to complete the task.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Single-column layout",
        "Stack fields in one column so the eye follows a straight path.",
        Level::Medium,
        Level::Low,
    ),
];

const VALIDATED_FORM: &[SuggestionEntry] = &[
    entry(
        "Inline validation",
        "Validate on blur and show the message next to the field.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Announce errors",
        "Tie error text to fields with aria-describedby and a live region.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Mark required fields",
        "Label required fields consistently instead of relying on color.",
        Level::Medium,
        Level::Low,
    ),
];

const HERO_CTA: &[SuggestionEntry] = &[
    entry(
        "One primary action",
        "Keep a single visually dominant call to action above the fold.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Benefit-led headline",
        "State the outcome for the visitor in the headline, not the feature.",
        Level::Medium,
        Level::Low,
    ),
    entry(
        "Supporting visual",
        "Pair the hero copy with a product image or short demo.",
        Level::Medium,
        Level::Medium,
    ),
];

const CONTENT_HEAVY: &[SuggestionEntry] = &[
    entry(
        "Table of contents",
        "Add in-page anchors so readers can jump between sections.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Constrain line length",
        "Keep body text between 60 and 80 characters per line.",
        Level::Medium,
        Level::Low,
    ),
    entry(
        "Progressive disclosure",
        "Collapse secondary detail behind accordions or tabs.",
        Level::Medium,
        Level::Medium,
    ),
];

const SOCIAL_PROOF: &[SuggestionEntry] = &[
    entry(
        "Place proof near actions",
        "Move testimonials or figures next to the primary call to action.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Attribute quotes",
        "Show a name, role and photo with every testimonial.",
        Level::Medium,
        Level::Low,
    ),
];

const PRICING_TIERS: &[SuggestionEntry] = &[
    entry(
        "Highlight a recommended plan",
        "Visually emphasize the plan most visitors should choose.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Comparison table",
        "Add a feature matrix below the tier cards.",
        Level::Medium,
        Level::Medium,
    ),
    entry(
        "Billing toggle",
        "Offer a monthly/annual switch with the saving spelled out.",
        Level::Medium,
        Level::Medium,
    ),
];

const COLLAPSIBLE_NAVIGATION: &[SuggestionEntry] = &[
    entry(
        "Label the toggle",
        "Give the menu button a visible or aria label and aria-expanded state.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Expose key links",
        "Keep the one or two most used destinations outside the collapsed menu.",
        Level::Medium,
        Level::Low,
    ),
    entry(
        "Trap focus in the open menu",
        "Keep keyboard focus inside the menu while it is open.",
        Level::Medium,
        Level::Medium,
    ),
];

const RICH_MOTION: &[SuggestionEntry] = &[
    entry(
        "Respect reduced motion",
        "Disable non-essential animation under prefers-reduced-motion.",
        Level::High,
        Level::Low,
    ),
    entry(
        "Animate cheap properties",
        "Limit transitions to transform and opacity.",
        Level::Medium,
        Level::Medium,
    ),
];

const ASYNC_LOADING: &[SuggestionEntry] = &[
    entry(
        "Prefer skeletons to spinners",
        "Reserve layout space with skeleton placeholders to avoid shifts.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Announce loading",
        "Set aria-busy on regions that are loading.",
        Level::Medium,
        Level::Low,
    ),
];

const MEGA_NAVIGATION: &[SuggestionEntry] = &[
    entry(
        "Group links",
        "Organize menu entries under short, scannable column headings.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Keyboard access",
        "Open submenus on focus and close them on Escape.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Add search",
        "Offer site search alongside large menus.",
        Level::Medium,
        Level::High,
    ),
];

const SIDEBAR_LAYOUT: &[SuggestionEntry] = &[
    entry(
        "Collapse on small screens",
        "Move the sidebar into a drawer below tablet width.",
        Level::High,
        Level::Medium,
    ),
    entry(
        "Sticky sidebar",
        "Keep sidebar navigation in view while the main column scrolls.",
        Level::Medium,
        Level::Low,
    ),
];

pub fn suggestions_for(pattern_type: PatternType) -> &'static [SuggestionEntry] {
    match pattern_type {
        PatternType::LongForm => LONG_FORM,
        PatternType::ValidatedForm => VALIDATED_FORM,
        PatternType::HeroCta => HERO_CTA,
        PatternType::ContentHeavy => CONTENT_HEAVY,
        PatternType::SocialProof => SOCIAL_PROOF,
        PatternType::PricingTiers => PRICING_TIERS,
        PatternType::CollapsibleNavigation => COLLAPSIBLE_NAVIGATION,
        PatternType::RichMotion => RICH_MOTION,
        PatternType::AsyncLoading => ASYNC_LOADING,
        PatternType::MegaNavigation => MEGA_NAVIGATION,
        PatternType::SidebarLayout => SIDEBAR_LAYOUT,
    }
}
