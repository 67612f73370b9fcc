//! Shallow keyword extraction from a free-text wireframe request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::theme::{ColorScheme, Theme};

/// Upper bound for any requested element count.
pub const MAX_COUNT: u32 = 50;
/// Count assumed when an element is mentioned without a number.
pub const MENTIONED_COUNT: u32 = 2;

const NUMBER: &str = r"(\d+|one|two|three|four|five|six|seven|eight|nine|ten)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireframeTemplate {
    Landing,
    Dashboard,
    Form,
    Content,
    #[default]
    Generic,
}

impl WireframeTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireframeTemplate::Landing => "landing",
            WireframeTemplate::Dashboard => "dashboard",
            WireframeTemplate::Form => "form",
            WireframeTemplate::Content => "content",
            WireframeTemplate::Generic => "generic",
        }
    }
}

impl fmt::Display for WireframeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    Grid,
    List,
    Sidebar,
    Centered,
}

impl LayoutStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStyle::Grid => "grid",
            LayoutStyle::List => "list",
            LayoutStyle::Sidebar => "sidebar",
            LayoutStyle::Centered => "centered",
        }
    }
}

/// Element counts requested in the text. `None` means "not mentioned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textboxes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkboxes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdowns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionAnalysis {
    pub purpose: WireframeTemplate,
    pub intent: DescriptionIntent,
    pub include_hero: bool,
    pub layout_style: LayoutStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_hint: Option<Theme>,
}

struct CountRule {
    numbered: Regex,
    mentioned: Regex,
}

impl CountRule {
    fn new(noun: &str) -> Self {
        let numbered = format!(r"(?i)\b{NUMBER}\s+(?:[a-z][a-z-]*\s+)?(?:{noun})\b");
        let mentioned = format!(r"(?i)\b(?:{noun})\b");
        Self {
            numbered: Regex::new(&numbered).expect("valid count regex"),
            mentioned: Regex::new(&mentioned).expect("valid noun regex"),
        }
    }

    /// Sum of every numbered mention, else [`MENTIONED_COUNT`] if the noun
    /// appears at all.
    fn count(&self, text: &str) -> Option<u32> {
        let mut total: Option<u32> = None;
        for caps in self.numbered.captures_iter(text) {
            let n = caps.get(1).map(|m| parse_number(m.as_str())).unwrap_or(0);
            total = Some(total.unwrap_or(0).saturating_add(n));
        }
        match total {
            Some(n) => Some(n.min(MAX_COUNT)),
            None if self.mentioned.is_match(text) => Some(MENTIONED_COUNT),
            None => None,
        }
    }
}

static TEXTBOXES: Lazy<CountRule> = Lazy::new(|| {
    CountRule::new(r"text\s*-?\s*box(?:es)?|text\s*fields?|textareas?|inputs?|fields?")
});
static BUTTONS: Lazy<CountRule> = Lazy::new(|| CountRule::new(r"buttons?|btns?"));
static CHECKBOXES: Lazy<CountRule> =
    Lazy::new(|| CountRule::new(r"check\s*-?\s*box(?:es)?|tick\s*box(?:es)?"));
static DROPDOWNS: Lazy<CountRule> =
    Lazy::new(|| CountRule::new(r"drop\s*-?\s*downs?|select\s*(?:box(?:es)?|menus?)|selects?"));
static CARDS: Lazy<CountRule> = Lazy::new(|| CountRule::new(r"cards?|tiles?"));

/// Purpose families, checked in this order.
static PURPOSES: Lazy<Vec<(WireframeTemplate, Regex)>> = Lazy::new(|| {
    [
        (
            WireframeTemplate::Landing,
            r"\b(landing|home\s*page|homepage|marketing|startup|saas|launch|promo\w*|sales\s+page|coming\s+soon|product\s+page)\b",
        ),
        (
            WireframeTemplate::Dashboard,
            r"\b(dashboards?|admin|analytics|metrics|kpis?|control\s+panel|reporting|reports?|crm|back\s*office|console|monitoring)\b",
        ),
        (
            WireframeTemplate::Form,
            r"\b(forms?|sign\s*-?\s*up|register|registration|log\s*-?\s*in|sign\s*-?\s*in|contact|checkout|survey|questionnaire|application|onboarding)\b",
        ),
        (
            WireframeTemplate::Content,
            r"\b(blog|articles?|news|docs|documentation|learning|course|lessons?|tutorials?|guides?|wiki|portfolio|magazine|posts?|about)\b",
        ),
    ]
    .into_iter()
    .map(|(template, pattern)| {
        (
            template,
            Regex::new(&format!("(?i){pattern}")).expect("valid purpose regex"),
        )
    })
    .collect()
});

static HERO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hero|banner|jumbotron|splash|masthead)\b").expect("valid hero regex"));

static LAYOUTS: Lazy<Vec<(LayoutStyle, Regex)>> = Lazy::new(|| {
    [
        (LayoutStyle::Sidebar, r"\b(side\s*-?\s*bar|side\s*nav|left\s+nav|drawer)\b"),
        (LayoutStyle::Grid, r"\b(grid|gallery|masonry|columns)\b"),
        (LayoutStyle::List, r"\b(list|feed|table|timeline)\b"),
        (LayoutStyle::Centered, r"\b(centered|centred|center|minimal|single\s+column)\b"),
    ]
    .into_iter()
    .map(|(style, pattern)| {
        (
            style,
            Regex::new(&format!("(?i){pattern}")).expect("valid layout regex"),
        )
    })
    .collect()
});

static COLORS: Lazy<Vec<(ColorScheme, Regex)>> = Lazy::new(|| {
    [
        (ColorScheme::Blue, r"\b(blue|navy|azure)\b"),
        (ColorScheme::Green, r"\b(green|emerald|mint)\b"),
        (ColorScheme::Purple, r"\b(purple|violet|indigo|lavender)\b"),
        (ColorScheme::Orange, r"\b(orange|amber)\b"),
        (ColorScheme::Red, r"\b(red|crimson|rose)\b"),
        (ColorScheme::Teal, r"\b(teal|cyan|turquoise)\b"),
        (ColorScheme::Gray, r"\b(gray|grey|monochrome|neutral)\b"),
    ]
    .into_iter()
    .map(|(scheme, pattern)| {
        (
            scheme,
            Regex::new(&format!("(?i){pattern}")).expect("valid color regex"),
        )
    })
    .collect()
});

static DARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdark\s*(mode|theme|ui|background)?\b").expect("valid theme regex"));

fn parse_number(word: &str) -> u32 {
    match word.to_ascii_lowercase().as_str() {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        digits => digits.parse::<u32>().unwrap_or(MAX_COUNT),
    }
}

pub fn extract_intent(text: &str) -> DescriptionIntent {
    // Count checkboxes and dropdowns on text with those phrases removed so
    // "select box" or "check box" are not also read as text boxes.
    let without_checkboxes = CHECKBOXES.mentioned.replace_all(text, " ");
    let without_controls = DROPDOWNS.mentioned.replace_all(&without_checkboxes, " ");
    DescriptionIntent {
        textboxes: TEXTBOXES.count(&without_controls),
        buttons: BUTTONS.count(text),
        checkboxes: CHECKBOXES.count(text),
        dropdowns: DROPDOWNS.count(text),
        cards: CARDS.count(text),
    }
}

pub fn detect_purpose(text: &str) -> WireframeTemplate {
    PURPOSES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(template, _)| *template)
        .unwrap_or(WireframeTemplate::Generic)
}

fn default_layout(purpose: WireframeTemplate) -> LayoutStyle {
    match purpose {
        WireframeTemplate::Landing => LayoutStyle::Grid,
        WireframeTemplate::Dashboard => LayoutStyle::Sidebar,
        WireframeTemplate::Content => LayoutStyle::List,
        WireframeTemplate::Form | WireframeTemplate::Generic => LayoutStyle::Centered,
    }
}

/// Read purpose, counts, hero, layout and color hints from `text`.
///
/// Never fails; empty or unrecognizable text yields the generic template
/// with no explicit counts.
pub fn analyze_description(text: &str) -> DescriptionAnalysis {
    let purpose = detect_purpose(text);
    let layout_style = LAYOUTS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(style, _)| *style)
        .unwrap_or_else(|| default_layout(purpose));

    DescriptionAnalysis {
        purpose,
        intent: extract_intent(text),
        include_hero: HERO.is_match(text) || purpose == WireframeTemplate::Landing,
        layout_style,
        color_hint: COLORS
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(scheme, _)| *scheme),
        theme_hint: DARK.is_match(text).then_some(Theme::Dark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_digits_and_number_words() {
        let intent = extract_intent("2 textboxes and three buttons");
        assert_eq!(intent.textboxes, Some(2));
        assert_eq!(intent.buttons, Some(3));
        assert_eq!(intent.checkboxes, None);
        assert_eq!(intent.cards, None);
    }

    #[test]
    fn allows_one_adjective_between_number_and_noun() {
        let intent = extract_intent("add 4 large cards, 1 primary button and 2 text boxes");
        assert_eq!(intent.cards, Some(4));
        assert_eq!(intent.buttons, Some(1));
        assert_eq!(intent.textboxes, Some(2));
    }

    #[test]
    fn mention_without_number_defaults_to_two() {
        let intent = extract_intent("a page with some checkboxes and a dropdown");
        assert_eq!(intent.checkboxes, Some(MENTIONED_COUNT));
        assert_eq!(intent.dropdowns, Some(MENTIONED_COUNT));
        assert_eq!(intent.textboxes, None);
    }

    #[test]
    fn select_and_check_boxes_are_not_text_boxes() {
        let intent = extract_intent("3 check boxes and 2 select boxes");
        assert_eq!(intent.checkboxes, Some(3));
        assert_eq!(intent.dropdowns, Some(2));
        assert_eq!(intent.textboxes, None);
    }

    #[test]
    fn counts_are_capped() {
        let intent = extract_intent("9999 buttons and 99999999999999 cards");
        assert_eq!(intent.buttons, Some(MAX_COUNT));
        assert_eq!(intent.cards, Some(MAX_COUNT));
    }

    #[test]
    fn repeated_mentions_add_up() {
        assert_eq!(extract_intent("2 primary buttons and 1 secondary button").buttons, Some(3));
    }

    #[test]
    fn purpose_order_is_landing_dashboard_form_content() {
        assert_eq!(detect_purpose("Create a dashboard with analytics"), WireframeTemplate::Dashboard);
        assert_eq!(detect_purpose("landing page with a signup form"), WireframeTemplate::Landing);
        assert_eq!(detect_purpose("a contact form for the blog"), WireframeTemplate::Form);
        assert_eq!(detect_purpose("a learning page"), WireframeTemplate::Content);
        assert_eq!(detect_purpose("something nice"), WireframeTemplate::Generic);
        assert_eq!(detect_purpose(""), WireframeTemplate::Generic);
    }

    #[test]
    fn learning_page_scenario() {
        let analysis =
            analyze_description("a learning page with a hero and two cards and 2 textboxes and 2 buttons");
        assert_eq!(analysis.purpose, WireframeTemplate::Content);
        assert!(analysis.include_hero);
        assert_eq!(analysis.intent.cards, Some(2));
        assert_eq!(analysis.intent.textboxes, Some(2));
        assert_eq!(analysis.intent.buttons, Some(2));
    }

    #[test]
    fn layout_and_color_hints() {
        let analysis = analyze_description("admin console with a sidebar, dark mode, teal accents");
        assert_eq!(analysis.purpose, WireframeTemplate::Dashboard);
        assert_eq!(analysis.layout_style, LayoutStyle::Sidebar);
        assert_eq!(analysis.color_hint, Some(ColorScheme::Teal));
        assert_eq!(analysis.theme_hint, Some(Theme::Dark));

        let plain = analyze_description("a simple contact form");
        assert_eq!(plain.layout_style, LayoutStyle::Centered);
        assert_eq!(plain.color_hint, None);
        assert!(!plain.include_hero);
    }
}
