//! Deterministic HTML templates for the five wireframe purposes.
//!
//! Every template shares the same building blocks so that element counts are
//! exact: text inputs and `<button>`s are only ever emitted from the resolved
//! counts, hero CTAs and nav entries are links.

use std::fmt::Write;

use super::description::{DescriptionAnalysis, LayoutStyle, WireframeTemplate};
use super::theme::{ColorScheme, ColorTokens, Theme};

const MAX_TITLE_CHARS: usize = 80;

/// Counts a template falls back to when the description does not mention an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub textboxes: u32,
    pub buttons: u32,
    pub checkboxes: u32,
    pub dropdowns: u32,
    pub cards: u32,
}

impl WireframeTemplate {
    pub fn defaults(&self) -> TemplateDefaults {
        match self {
            WireframeTemplate::Landing => TemplateDefaults {
                textboxes: 1,
                buttons: 1,
                checkboxes: 0,
                dropdowns: 0,
                cards: 3,
            },
            WireframeTemplate::Dashboard => TemplateDefaults {
                textboxes: 1,
                buttons: 2,
                checkboxes: 0,
                dropdowns: 1,
                cards: 4,
            },
            WireframeTemplate::Form => TemplateDefaults {
                textboxes: 3,
                buttons: 1,
                checkboxes: 0,
                dropdowns: 1,
                cards: 0,
            },
            WireframeTemplate::Content => TemplateDefaults {
                textboxes: 0,
                buttons: 1,
                checkboxes: 0,
                dropdowns: 0,
                cards: 3,
            },
            WireframeTemplate::Generic => TemplateDefaults {
                textboxes: 2,
                buttons: 2,
                checkboxes: 0,
                dropdowns: 0,
                cards: 0,
            },
        }
    }

    fn button_labels(&self) -> &'static [&'static str] {
        match self {
            WireframeTemplate::Landing => &["Get started", "Learn more", "Book a demo"],
            WireframeTemplate::Dashboard => &["New report", "Export", "Refresh", "Filter"],
            WireframeTemplate::Form => &["Submit", "Cancel", "Save draft"],
            WireframeTemplate::Content => &["Subscribe", "Read more", "Share"],
            WireframeTemplate::Generic => &["Continue", "Cancel", "More options"],
        }
    }

    fn card_titles(&self) -> &'static [&'static str] {
        match self {
            WireframeTemplate::Dashboard => &["Revenue", "Active users", "Conversion rate", "Sessions", "Churn"],
            WireframeTemplate::Content => &["Getting started", "Core concepts", "Next steps", "Further reading"],
            _ => &["Fast setup", "Secure by default", "Works everywhere", "Built for teams", "Insightful reports"],
        }
    }

    fn nav_links(&self) -> &'static [&'static str] {
        match self {
            WireframeTemplate::Landing => &["Features", "Pricing", "About", "Contact"],
            WireframeTemplate::Dashboard => &["Overview", "Reports", "Customers", "Settings"],
            WireframeTemplate::Form => &["Home", "Help"],
            WireframeTemplate::Content => &["Home", "Topics", "Archive", "About"],
            WireframeTemplate::Generic => &["Home", "About", "Contact"],
        }
    }
}

const TEXTBOX_FIELDS: [(&str, &str); 6] = [
    ("Full name", "Jane Doe"),
    ("Email address", "jane@example.com"),
    ("Company", "Acme Inc."),
    ("Phone", "+1 555 0100"),
    ("Subject", "How can we help?"),
    ("Website", "https://example.com"),
];

const CHECKBOX_LABELS: [&str; 4] = [
    "I agree to the terms",
    "Send me product updates",
    "Remember me",
    "Subscribe to the newsletter",
];

const DROPDOWN_FIELDS: [(&str, &[&str]); 3] = [
    ("Category", &["General", "Support", "Sales"]),
    ("Time range", &["Last 7 days", "Last 30 days", "This year"]),
    ("Country", &["United States", "Germany", "Japan"]),
];

/// Counts after template defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCounts {
    pub textboxes: u32,
    pub buttons: u32,
    pub checkboxes: u32,
    pub dropdowns: u32,
    pub cards: u32,
}

impl ResolvedCounts {
    pub fn resolve(analysis: &DescriptionAnalysis) -> Self {
        let defaults = analysis.purpose.defaults();
        let intent = &analysis.intent;
        Self {
            textboxes: intent.textboxes.unwrap_or(defaults.textboxes),
            buttons: intent.buttons.unwrap_or(defaults.buttons),
            checkboxes: intent.checkboxes.unwrap_or(defaults.checkboxes),
            dropdowns: intent.dropdowns.unwrap_or(defaults.dropdowns),
            cards: intent.cards.unwrap_or(defaults.cards),
        }
    }

    fn has_controls(&self) -> bool {
        self.textboxes + self.buttons + self.checkboxes + self.dropdowns > 0
    }
}

/// Escape text for HTML body and attribute contexts.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn cycle<T: Copy>(pool: &[T], index: usize) -> T {
    pool[index % pool.len()]
}

/// Headline derived from the first sentence of the description.
fn headline(description: &str, template: WireframeTemplate) -> String {
    let first = description
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty());
    match first {
        Some(sentence) => {
            let mut title: String = sentence.chars().take(MAX_TITLE_CHARS).collect();
            if sentence.chars().count() > MAX_TITLE_CHARS {
                title.push_str("...");
            }
            let mut chars = title.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => title,
            }
        }
        None => match template {
            WireframeTemplate::Generic => "Untitled wireframe".to_string(),
            other => format!("Untitled {} wireframe", other),
        },
    }
}

/// Render the full document.
pub fn render(
    description: &str,
    analysis: &DescriptionAnalysis,
    theme: Theme,
    scheme: ColorScheme,
) -> String {
    let template = analysis.purpose;
    let counts = ResolvedCounts::resolve(analysis);
    let tokens = ColorTokens::resolve(theme, scheme);
    let title = escape_html(&headline(description, template));

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>").ok();
    writeln!(html, "<html lang=\"en\" data-theme=\"{}\" data-scheme=\"{}\">", theme, scheme).ok();
    writeln!(html, "<head>").ok();
    writeln!(html, "<meta charset=\"utf-8\">").ok();
    writeln!(html, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">").ok();
    writeln!(html, "<title>{}</title>", title).ok();
    writeln!(html, "<style>").ok();
    writeln!(html, ":root {{ {} }}", tokens.to_css_vars()).ok();
    html.push_str(BASE_CSS);
    writeln!(html, "</style>").ok();
    writeln!(html, "</head>").ok();
    writeln!(
        html,
        "<body class=\"wf-{} wf-layout-{}\">",
        template,
        analysis.layout_style.as_str()
    ).ok();

    render_header(&mut html, template);

    match template {
        WireframeTemplate::Dashboard => render_dashboard(&mut html, analysis, &counts, &title),
        WireframeTemplate::Form => render_form_page(&mut html, analysis, &counts, &title),
        WireframeTemplate::Content => render_content(&mut html, analysis, &counts, &title),
        WireframeTemplate::Landing | WireframeTemplate::Generic => {
            render_landing(&mut html, analysis, &counts, &title)
        }
    }

    writeln!(
        html,
        "<footer class=\"wf-footer\"><p>{}</p></footer>",
        escape_html(description.trim())
    ).ok();
    writeln!(html, "</body>").ok();
    writeln!(html, "</html>").ok();
    html
}

fn render_header(html: &mut String, template: WireframeTemplate) {
    writeln!(html, "<header class=\"wf-header\">").ok();
    writeln!(html, "<div class=\"wf-logo\">Logo</div>").ok();
    writeln!(html, "<nav class=\"wf-nav\">").ok();
    for link in template.nav_links() {
        writeln!(html, "<a href=\"#\">{}</a>", link).ok();
    }
    writeln!(html, "</nav>").ok();
    writeln!(html, "</header>").ok();
}

fn render_hero(html: &mut String, title: &str, template: WireframeTemplate) {
    writeln!(html, "<section class=\"wf-hero\">").ok();
    writeln!(html, "<h1>{}</h1>", title).ok();
    writeln!(
        html,
        "<p class=\"wf-lead\">A short supporting sentence that explains the value of this page.</p>"
    ).ok();
    writeln!(
        html,
        "<a class=\"wf-link-button\" href=\"#\">{}</a>",
        cycle(template.button_labels(), 0)
    ).ok();
    writeln!(html, "</section>").ok();
}

fn render_cards(html: &mut String, count: u32, template: WireframeTemplate, style: LayoutStyle) {
    if count == 0 {
        return;
    }
    let container = if style == LayoutStyle::List { "wf-list" } else { "wf-grid" };
    writeln!(html, "<section class=\"{}\">", container).ok();
    for i in 0..count as usize {
        writeln!(html, "<article class=\"wf-card\">").ok();
        if template == WireframeTemplate::Dashboard {
            writeln!(html, "<p class=\"wf-label\">{}</p>", cycle(template.card_titles(), i)).ok();
            writeln!(html, "<p class=\"wf-figure\">{}</p>", 1200 + i * 340).ok();
        } else {
            writeln!(html, "<div class=\"wf-media\"></div>").ok();
            writeln!(html, "<h3>{}</h3>", cycle(template.card_titles(), i)).ok();
            writeln!(
                html,
                "<p>Placeholder copy describing this item in one or two lines.</p>"
            ).ok();
        }
        writeln!(html, "</article>").ok();
    }
    writeln!(html, "</section>").ok();
}

/// Text inputs, selects, checkboxes and buttons, in that order.
fn render_controls(html: &mut String, counts: &ResolvedCounts, template: WireframeTemplate, class: &str) {
    if !counts.has_controls() {
        return;
    }
    writeln!(html, "<form class=\"{}\" action=\"#\" method=\"post\">", class).ok();
    for i in 0..counts.textboxes as usize {
        let (label, placeholder) = cycle(&TEXTBOX_FIELDS, i);
        writeln!(
            html,
            "<label class=\"wf-field\">{}<input type=\"text\" name=\"field-{}\" placeholder=\"{}\"></label>",
            label,
            i + 1,
            placeholder
        ).ok();
    }
    for i in 0..counts.dropdowns as usize {
        let (label, options) = cycle(&DROPDOWN_FIELDS, i);
        write!(
            html,
            "<label class=\"wf-field\">{}<select name=\"select-{}\">",
            label,
            i + 1
        ).ok();
        for option in options {
            write!(html, "<option>{}</option>", option).ok();
        }
        writeln!(html, "</select></label>").ok();
    }
    for i in 0..counts.checkboxes as usize {
        writeln!(
            html,
            "<label class=\"wf-check\"><input type=\"checkbox\" name=\"check-{}\"> {}</label>",
            i + 1,
            cycle(&CHECKBOX_LABELS, i)
        ).ok();
    }
    if counts.buttons > 0 {
        writeln!(html, "<div class=\"wf-actions\">").ok();
        for i in 0..counts.buttons as usize {
            let kind = if i == 0 { "submit" } else { "button" };
            let variant = if i == 0 { "wf-primary" } else { "wf-secondary" };
            writeln!(
                html,
                "<button type=\"{}\" class=\"{}\">{}</button>",
                kind,
                variant,
                cycle(template.button_labels(), i)
            ).ok();
        }
        writeln!(html, "</div>").ok();
    }
    writeln!(html, "</form>").ok();
}

fn render_landing(html: &mut String, analysis: &DescriptionAnalysis, counts: &ResolvedCounts, title: &str) {
    let template = analysis.purpose;
    writeln!(html, "<main class=\"wf-main\">").ok();
    if analysis.include_hero {
        render_hero(html, title, template);
    } else {
        writeln!(html, "<h1>{}</h1>", title).ok();
    }
    render_cards(html, counts.cards, template, analysis.layout_style);
    render_controls(html, counts, template, "wf-panel");
    writeln!(html, "</main>").ok();
}

fn render_dashboard(html: &mut String, analysis: &DescriptionAnalysis, counts: &ResolvedCounts, title: &str) {
    let template = analysis.purpose;
    writeln!(html, "<div class=\"wf-shell\">").ok();
    writeln!(html, "<aside class=\"wf-sidebar\">").ok();
    for link in template.nav_links() {
        writeln!(html, "<a href=\"#\">{}</a>", link).ok();
    }
    writeln!(html, "</aside>").ok();
    writeln!(html, "<main class=\"wf-main\">").ok();
    if analysis.include_hero {
        render_hero(html, title, template);
    } else {
        writeln!(html, "<h1>{}</h1>", title).ok();
    }
    render_controls(html, counts, template, "wf-toolbar");
    render_cards(html, counts.cards, template, analysis.layout_style);
    writeln!(html, "<section class=\"wf-chart\" aria-label=\"Chart placeholder\"></section>").ok();
    writeln!(html, "<table class=\"wf-table\">").ok();
    writeln!(html, "<thead><tr><th>Name</th><th>Status</th><th>Updated</th></tr></thead>").ok();
    writeln!(html, "<tbody>").ok();
    for row in 1..=3 {
        writeln!(html, "<tr><td>Item {}</td><td>Active</td><td>Today</td></tr>", row).ok();
    }
    writeln!(html, "</tbody>").ok();
    writeln!(html, "</table>").ok();
    writeln!(html, "</main>").ok();
    writeln!(html, "</div>").ok();
}

fn render_form_page(html: &mut String, analysis: &DescriptionAnalysis, counts: &ResolvedCounts, title: &str) {
    let template = analysis.purpose;
    writeln!(html, "<main class=\"wf-main wf-centered\">").ok();
    if analysis.include_hero {
        render_hero(html, title, template);
    }
    writeln!(html, "<section class=\"wf-panel\">").ok();
    if !analysis.include_hero {
        writeln!(html, "<h1>{}</h1>", title).ok();
    }
    writeln!(html, "<p class=\"wf-lead\">Fill in the details below.</p>").ok();
    render_controls(html, counts, template, "wf-form");
    writeln!(html, "</section>").ok();
    render_cards(html, counts.cards, template, analysis.layout_style);
    writeln!(html, "</main>").ok();
}

fn render_content(html: &mut String, analysis: &DescriptionAnalysis, counts: &ResolvedCounts, title: &str) {
    let template = analysis.purpose;
    writeln!(html, "<main class=\"wf-main\">").ok();
    if analysis.include_hero {
        render_hero(html, title, template);
    }
    writeln!(html, "<article class=\"wf-article\">").ok();
    if !analysis.include_hero {
        writeln!(html, "<h1>{}</h1>", title).ok();
    }
    for heading in ["Introduction", "Details", "Summary"] {
        writeln!(html, "<h2>{}</h2>", heading).ok();
        writeln!(
            html,
            "<p>Body copy placeholder. Replace with the real content for this part of the page.</p>"
        ).ok();
    }
    writeln!(html, "</article>").ok();
    render_cards(html, counts.cards, template, analysis.layout_style);
    render_controls(html, counts, template, "wf-panel");
    writeln!(html, "</main>").ok();
}

const BASE_CSS: &str = "\
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--wf-bg); color: var(--wf-text); }
a { color: var(--wf-primary); }
.wf-header { display: flex; justify-content: space-between; align-items: center; padding: 16px 32px; border-bottom: 1px solid var(--wf-border); }
.wf-nav a { margin-left: 16px; text-decoration: none; }
.wf-main { max-width: 1200px; margin: 0 auto; padding: 32px; }
.wf-centered { max-width: 560px; }
.wf-hero { padding: 64px 32px; margin-bottom: 32px; text-align: center; background: var(--wf-primary-soft); border-radius: 12px; }
.wf-lead { color: var(--wf-muted); }
.wf-link-button { display: inline-block; padding: 12px 24px; border-radius: 8px; background: var(--wf-primary); color: #FFFFFF; text-decoration: none; }
.wf-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 24px; margin: 32px 0; }
.wf-list { display: flex; flex-direction: column; gap: 16px; margin: 32px 0; }
.wf-card { padding: 24px; background: var(--wf-surface); border: 1px solid var(--wf-border); border-radius: 12px; }
.wf-media { height: 120px; margin-bottom: 16px; background: var(--wf-border); border-radius: 8px; }
.wf-figure { font-size: 28px; font-weight: 700; margin: 0; }
.wf-label { color: var(--wf-muted); margin: 0 0 8px; }
.wf-panel, .wf-form, .wf-toolbar { display: flex; flex-direction: column; gap: 16px; padding: 24px; background: var(--wf-surface); border: 1px solid var(--wf-border); border-radius: 12px; }
.wf-toolbar { flex-direction: row; flex-wrap: wrap; align-items: flex-end; margin-bottom: 24px; }
.wf-field { display: flex; flex-direction: column; gap: 6px; font-size: 14px; }
.wf-field input, .wf-field select { padding: 10px 12px; border: 1px solid var(--wf-border); border-radius: 6px; background: var(--wf-bg); color: var(--wf-text); }
.wf-actions { display: flex; gap: 12px; }
.wf-primary { padding: 10px 20px; border: 0; border-radius: 6px; background: var(--wf-primary); color: #FFFFFF; }
.wf-primary:hover { background: var(--wf-primary-hover); }
.wf-secondary { padding: 10px 20px; border: 1px solid var(--wf-border); border-radius: 6px; background: transparent; color: var(--wf-text); }
.wf-shell { display: grid; grid-template-columns: 240px 1fr; min-height: 100vh; }
.wf-sidebar { display: flex; flex-direction: column; gap: 12px; padding: 24px; background: var(--wf-surface); border-right: 1px solid var(--wf-border); }
.wf-chart { height: 240px; margin: 24px 0; background: var(--wf-surface); border: 1px dashed var(--wf-border); border-radius: 12px; }
.wf-table { width: 100%; border-collapse: collapse; }
.wf-table th, .wf-table td { padding: 12px; text-align: left; border-bottom: 1px solid var(--wf-border); }
.wf-article h2 { margin-top: 32px; }
.wf-footer { padding: 24px 32px; color: var(--wf-muted); border-top: 1px solid var(--wf-border); }
@media (max-width: 768px) { .wf-shell { grid-template-columns: 1fr; } .wf-sidebar { display: none; } .wf-nav { display: none; } }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::description::analyze_description;

    fn count(html: &str, needle: &str) -> usize {
        html.matches(needle).count()
    }

    #[test]
    fn every_template_is_a_full_document() {
        for text in [
            "landing page",
            "admin dashboard",
            "signup form",
            "blog article",
            "",
        ] {
            let analysis = analyze_description(text);
            let html = render(text, &analysis, Theme::Light, ColorScheme::Blue);
            assert!(html.starts_with("<!DOCTYPE html>"), "{text}");
            assert!(html.trim_end().ends_with("</html>"), "{text}");
            assert_eq!(count(&html, "<body"), 1);
            assert_eq!(count(&html, "</body>"), 1);
        }
    }

    #[test]
    fn defaults_fill_unmentioned_counts() {
        let analysis = analyze_description("signup form");
        let html = render("signup form", &analysis, Theme::Light, ColorScheme::Blue);
        assert_eq!(count(&html, "<input"), 3);
        assert_eq!(count(&html, "<button"), 1);
        assert_eq!(count(&html, "<select"), 1);
        assert_eq!(count(&html, "class=\"wf-card\""), 0);
    }

    #[test]
    fn labels_cycle_past_pool_size() {
        let analysis = analyze_description("a form with 8 textboxes");
        let html = render("a form with 8 textboxes", &analysis, Theme::Light, ColorScheme::Blue);
        assert_eq!(count(&html, "<input type=\"text\""), 8);
        assert_eq!(count(&html, ">Full name<input"), 2);
    }

    #[test]
    fn description_text_is_escaped() {
        let text = "<script>alert('x')</script> & 2 buttons";
        let analysis = analyze_description(text);
        let html = render(text, &analysis, Theme::Dark, ColorScheme::Red);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert_eq!(count(&html, "<button"), 2);
        assert!(html.contains("data-theme=\"dark\""));
    }

    #[test]
    fn headline_falls_back_when_empty() {
        assert_eq!(headline("   ", WireframeTemplate::Generic), "Untitled wireframe");
        assert_eq!(headline("make a shop. with stuff", WireframeTemplate::Landing), "Make a shop");
        let long = "x".repeat(200);
        assert_eq!(headline(&long, WireframeTemplate::Generic).chars().count(), MAX_TITLE_CHARS + 3);
    }
}
