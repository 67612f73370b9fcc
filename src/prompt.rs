//! Turns a [`PageAnalysis`] into the natural-language brief sent to the text completer.

use std::fmt::Write;

use crate::describe::{ColorScheme, ColorTokens, Theme};
use crate::patterns::{recognize_patterns, PatternReport};
use crate::types::{BoundingBox, PageAnalysis, ViewportClass};

const MAX_PROMPT_SECTIONS: usize = 12;
const MAX_PROMPT_LINKS: usize = 10;

fn fmt_box(b: &BoundingBox) -> String {
    format!("{:.0}x{:.0} at ({:.0}, {:.0})", b.width, b.height, b.x, b.y)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Build the wireframe brief for `analysis`.
pub fn build_prompt(analysis: &PageAnalysis, theme: Theme, color_scheme: ColorScheme) -> String {
    let report = recognize_patterns(analysis);
    build_prompt_with_patterns(analysis, &report, theme, color_scheme)
}

/// Same as [`build_prompt`], reusing an already computed pattern report.
pub fn build_prompt_with_patterns(
    analysis: &PageAnalysis,
    report: &PatternReport,
    theme: Theme,
    color_scheme: ColorScheme,
) -> String {
    let mut buf = String::new();

    writeln!(
        buf,
        "You are a UX designer. Produce a low-fidelity HTML wireframe that reproduces the structure of the page described below."
    )
    .ok();
    writeln!(buf).ok();

    write_page_info(&mut buf, analysis);
    write_layout(&mut buf, analysis);
    write_styling(&mut buf, analysis);
    write_responsive(&mut buf, analysis);
    write_interaction(&mut buf, analysis);
    write_patterns(&mut buf, report);
    write_instructions(&mut buf, theme, color_scheme);

    buf
}

fn write_page_info(buf: &mut String, analysis: &PageAnalysis) {
    let info = &analysis.page_info;
    writeln!(buf, "## Page").ok();
    if !info.title.is_empty() {
        writeln!(buf, "Title: {}", info.title).ok();
    }
    writeln!(buf, "URL: {}", info.url).ok();
    if !info.description.is_empty() {
        writeln!(buf, "Description: {}", info.description).ok();
    }
    if analysis.diagnostics.partial {
        writeln!(
            buf,
            "Note: the analysis is incomplete; fill gaps with conventional structure."
        )
        .ok();
    }
    writeln!(buf).ok();
}

fn write_layout(buf: &mut String, analysis: &PageAnalysis) {
    let layout = &analysis.layout;
    writeln!(buf, "## Layout").ok();

    let landmarks = [
        ("Header", &layout.header),
        ("Main", &layout.main),
        ("Sidebar", &layout.sidebar),
        ("Footer", &layout.footer),
    ];
    for (name, region) in landmarks {
        if let Some(region) = region {
            writeln!(
                buf,
                "- {}: <{}> {}{}",
                name,
                region.tag,
                fmt_box(&region.bounds),
                if region.sticky { ", sticky" } else { "" }
            )
            .ok();
        }
    }

    if let Some(nav) = &layout.navigation {
        let labels: Vec<String> = nav
            .links
            .iter()
            .take(MAX_PROMPT_LINKS)
            .map(|l| {
                if l.has_dropdown {
                    format!("{} (dropdown)", l.text)
                } else {
                    l.text.clone()
                }
            })
            .collect();
        writeln!(
            buf,
            "- Navigation <{}> with {} links{}: {}",
            nav.structure,
            nav.links.len(),
            if nav.has_sub_navs { " and sub-menus" } else { "" },
            labels.join(", ")
        )
        .ok();
    }

    if layout.sections.is_empty() {
        writeln!(buf, "- No distinct content sections were detected.").ok();
    } else {
        writeln!(buf, "Sections, top to bottom:").ok();
        for (i, section) in layout.sections.iter().take(MAX_PROMPT_SECTIONS).enumerate() {
            let heading = if section.heading.is_empty() {
                "(no heading)"
            } else {
                section.heading.as_str()
            };
            writeln!(buf, "{}. [{}] {}", i + 1, section.section_type, heading).ok();
            if !section.summary.is_empty() {
                writeln!(buf, "   {}", section.summary).ok();
            }
            let c = &section.counts;
            writeln!(
                buf,
                "   buttons {}, links {}, images {}, videos {}, forms {}",
                c.buttons, c.links, c.images, c.videos, c.forms
            )
            .ok();
            if !section.ctas.is_empty() {
                writeln!(buf, "   CTAs: {}", section.ctas.join(" | ")).ok();
            }
        }
        if layout.sections.len() > MAX_PROMPT_SECTIONS {
            writeln!(
                buf,
                "   ... and {} more sections",
                layout.sections.len() - MAX_PROMPT_SECTIONS
            )
            .ok();
        }
    }

    let hierarchy = &layout.visual_hierarchy;
    if !hierarchy.font_size_tiers.is_empty() {
        let tiers: Vec<String> = hierarchy
            .font_size_tiers
            .iter()
            .map(|s| format!("{:.0}px", s))
            .collect();
        writeln!(buf, "Heading size tiers: {}", tiers.join(", ")).ok();
    }
    writeln!(buf).ok();
}

fn write_styling(buf: &mut String, analysis: &PageAnalysis) {
    let styling = &analysis.styling;
    writeln!(buf, "## Styling").ok();
    writeln!(
        buf,
        "- Theme of the source page: {}",
        if styling.colors.is_dark_theme { "dark" } else { "light" }
    )
    .ok();
    if !styling.typography.font_families.is_empty() {
        writeln!(buf, "- Fonts: {}", styling.typography.font_families.join(", ")).ok();
    }
    if let Some(size) = styling.typography.base_font_size {
        writeln!(buf, "- Base font size: {:.0}px", size).ok();
    }
    let css = &styling.advanced_css;
    writeln!(
        buf,
        "- Grid: {}, flexbox: {}, shadows: {}, rounded corners: {}",
        yes_no(css.uses_grid),
        yes_no(css.uses_flexbox),
        yes_no(css.has_shadows),
        yes_no(css.has_rounded_corners)
    )
    .ok();
    let fw = &analysis.frameworks;
    if !fw.frameworks.is_empty() || !fw.libraries.is_empty() {
        let stack: Vec<&str> = fw
            .frameworks
            .iter()
            .chain(fw.libraries.iter())
            .map(String::as_str)
            .collect();
        writeln!(buf, "- Built with: {}", stack.join(", ")).ok();
    }
    writeln!(buf).ok();
}

fn write_responsive(buf: &mut String, analysis: &PageAnalysis) {
    let captured = analysis.responsive.captured();
    if captured.is_empty() {
        return;
    }
    writeln!(buf, "## Responsive behavior").ok();
    for pass in captured {
        let l = &pass.layout;
        writeln!(
            buf,
            "- {} ({}): nav visible {}, sidebar visible {}, hamburger menu {}, {} sections",
            pass.class,
            pass.viewport,
            yes_no(l.nav_visible),
            yes_no(l.sidebar_visible),
            yes_no(l.has_hamburger_menu),
            l.section_count
        )
        .ok();
    }
    let mobile_toggle = analysis
        .responsive
        .get(ViewportClass::Mobile)
        .map(|m| m.layout.has_hamburger_menu)
        .unwrap_or(false);
    if mobile_toggle {
        writeln!(buf, "Collapse the navigation into a menu button on small screens.").ok();
    }
    writeln!(buf).ok();
}

fn write_interaction(buf: &mut String, analysis: &PageAnalysis) {
    writeln!(buf, "## Interaction").ok();
    let i = &analysis.interactive;
    writeln!(
        buf,
        "- {} buttons, {} links, {} inputs sampled; hover effects {}, focus styles {}",
        i.buttons.len(),
        i.links.len(),
        i.inputs.len(),
        yes_no(i.has_hover_effects),
        yes_no(i.has_focus_styles)
    )
    .ok();
    for form in &analysis.forms.forms {
        let fields: Vec<String> = form
            .fields
            .iter()
            .map(|f| match &f.label {
                Some(label) => format!("{} ({})", label, f.field_type),
                None => f.field_type.clone(),
            })
            .collect();
        writeln!(
            buf,
            "- Form {} [{}]: {}{}",
            form.selector,
            form.method,
            fields.join(", "),
            form.submit_text
                .as_ref()
                .map(|s| format!("; submit \"{}\"", s))
                .unwrap_or_default()
        )
        .ok();
    }
    let a = &analysis.animations;
    if a.has_parallax || a.has_micro_interactions || !a.css_animations.is_empty() {
        writeln!(
            buf,
            "- Motion: {} transitions, {} animations, parallax {}",
            a.css_transitions.len(),
            a.css_animations.len(),
            yes_no(a.has_parallax)
        )
        .ok();
    }
    let loading = &analysis.loading_states;
    if !loading.is_empty() {
        writeln!(
            buf,
            "- Loading states: {} spinners, {} skeletons, {} progress bars",
            loading.spinners.len(),
            loading.skeletons.len(),
            loading.progress_bars.len()
        )
        .ok();
    }
    writeln!(buf).ok();
}

fn write_patterns(buf: &mut String, report: &PatternReport) {
    if report.patterns.is_empty() {
        return;
    }
    writeln!(buf, "## Detected patterns").ok();
    for pattern in &report.patterns {
        writeln!(
            buf,
            "- {} ({}, confidence {:.2})",
            pattern.title, pattern.pattern_type, pattern.confidence
        )
        .ok();
    }
    let improvements: Vec<String> = report
        .suggestions
        .iter()
        .filter_map(|s| s.items.first())
        .map(|s| format!("- {}: {}", s.title, s.description))
        .collect();
    if !improvements.is_empty() {
        writeln!(buf, "Apply these improvements where they fit:").ok();
        for line in improvements {
            writeln!(buf, "{}", line).ok();
        }
    }
    writeln!(buf).ok();
}

fn write_instructions(buf: &mut String, theme: Theme, color_scheme: ColorScheme) {
    let tokens = ColorTokens::resolve(theme, color_scheme);
    writeln!(buf, "## Output").ok();
    writeln!(
        buf,
        "- Use a {} theme with the {} color scheme: primary {}, background {}, surface {}, text {}, border {}.",
        theme, color_scheme, tokens.primary, tokens.background, tokens.surface, tokens.text, tokens.border
    )
    .ok();
    writeln!(buf, "- Use grey boxes for images and placeholder copy for text.").ok();
    writeln!(buf, "- Keep the section order listed above.").ok();
    writeln!(
        buf,
        "- Respond with a single complete HTML document starting with <!DOCTYPE html>, with inline CSS and no external assets. Do not wrap it in markdown."
    )
    .ok();
}
