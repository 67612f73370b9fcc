//! Interaction, motion, form and loading-state signals.
//!
//! Each extractor samples a bounded number of visible elements per kind.
//! A page without a given signal yields `false` and empty lists.

use crate::types::{
    Animations, ComputedStyle, DomNode, FormField, FormInfo, Forms, InputElement, Interactive,
    InteractiveElement, LoadingIndicator, LoadingStates, MotionDetail, StyleDetails,
};

use super::elements::{input_type, is_button, is_button_like, is_input_field, is_link};
use super::tree::{truncate_chars, DomTree};

pub const MAX_SAMPLE: usize = 20;
pub const MAX_LOADING: usize = 10;
const MICRO_INTERACTION_THRESHOLD: usize = 3;

const VALIDATION_ATTRS: [&str; 6] = ["required", "pattern", "min", "max", "minlength", "maxlength"];
const VALIDATED_TYPES: [&str; 4] = ["email", "url", "tel", "number"];

fn style_of(node: &DomNode) -> Option<&ComputedStyle> {
    node.computed_style.as_ref()
}

fn has_transition(node: &DomNode) -> bool {
    style_of(node).map(ComputedStyle::has_transition).unwrap_or(false)
}

fn style_details(node: &DomNode) -> StyleDetails {
    match style_of(node) {
        Some(s) => StyleDetails {
            color: s.color.clone(),
            background_color: s.background_color.clone(),
            border_radius: s.border_radius.clone(),
            cursor: s.cursor.clone(),
            transition: s.transition.clone().filter(|_| s.has_transition()),
        },
        None => StyleDetails::default(),
    }
}

fn interactive_element(tree: &DomTree<'_>, node: &DomNode) -> InteractiveElement {
    InteractiveElement {
        selector: node.selector(),
        text: truncate_chars(&tree.label_of(node), 80),
        styles: style_details(node),
        has_transition: has_transition(node),
    }
}

pub fn extract_interactive(tree: &DomTree<'_>) -> Interactive {
    let visible: Vec<&DomNode> = tree.nodes().filter(|n| tree.is_rendered(n)).collect();

    let buttons: Vec<InteractiveElement> = visible
        .iter()
        .filter(|n| is_button_like(n))
        .take(MAX_SAMPLE)
        .map(|n| interactive_element(tree, n))
        .collect();
    let links: Vec<InteractiveElement> = visible
        .iter()
        .filter(|n| is_link(n) && !is_button_like(n))
        .take(MAX_SAMPLE)
        .map(|n| interactive_element(tree, n))
        .collect();
    let inputs: Vec<InputElement> = visible
        .iter()
        .filter(|n| is_input_field(n))
        .take(MAX_SAMPLE)
        .map(|n| InputElement {
            selector: n.selector(),
            input_type: input_type(n),
            name: n.attr("name").map(str::to_string),
            placeholder: n.attr("placeholder").map(str::to_string),
            required: n.attr("required").is_some(),
            has_transition: has_transition(n),
        })
        .collect();

    let sheets = &tree.snapshot().stylesheets;
    let has_hover_effects = sheets.hover_rules > 0
        || buttons.iter().chain(links.iter()).any(|e| e.has_transition);

    Interactive {
        has_hover_effects,
        has_focus_styles: sheets.focus_rules > 0,
        buttons,
        links,
        inputs,
    }
}

pub fn extract_animations(tree: &DomTree<'_>) -> Animations {
    let mut animations = Animations::default();
    let mut transitioning_controls = 0usize;

    for node in tree.nodes().filter(|n| tree.is_rendered(n)) {
        let Some(style) = style_of(node) else {
            continue;
        };
        if style.has_transition() {
            if is_button_like(node) || is_link(node) || is_input_field(node) {
                transitioning_controls += 1;
            }
            if animations.css_transitions.len() < MAX_SAMPLE {
                animations.css_transitions.push(MotionDetail {
                    selector: node.selector(),
                    value: style.transition.clone().unwrap_or_default(),
                    duration: None,
                });
            }
        }
        if style.has_animation() && animations.css_animations.len() < MAX_SAMPLE {
            animations.css_animations.push(MotionDetail {
                selector: node.selector(),
                value: style.animation_name.clone().unwrap_or_default(),
                duration: style.animation_duration.clone(),
            });
        }
        if style.background_attachment.as_deref() == Some("fixed") || node.has_class_containing("parallax") {
            animations.has_parallax = true;
        }
    }

    animations.has_micro_interactions = transitioning_controls >= MICRO_INTERACTION_THRESHOLD;
    animations
}

fn field_has_validation(node: &DomNode) -> bool {
    VALIDATION_ATTRS.iter().any(|a| node.attr(a).is_some())
        || VALIDATED_TYPES.contains(&input_type(node).as_str())
}

fn has_error_marker(node: &DomNode) -> bool {
    node.attr("aria-invalid").is_some()
        || node.role() == Some("alert")
        || node.has_class_containing("error")
        || node.has_class_containing("invalid")
}

/// Label for a field: `<label for=id>`, an enclosing `<label>`, then aria-label/placeholder.
fn field_label(tree: &DomTree<'_>, field: &DomNode) -> Option<String> {
    let id = field.element_id();
    let by_for = (!id.is_empty())
        .then(|| tree.find_first(|n| n.tag == "label" && n.attr("for") == Some(id)))
        .flatten();
    let enclosing = || tree.ancestors(field).into_iter().find(|a| a.tag == "label");
    by_for
        .or_else(enclosing)
        .map(|label| tree.text_content(label))
        .filter(|t| !t.is_empty())
        .or_else(|| field.attr("aria-label").map(str::to_string))
        .or_else(|| field.attr("placeholder").map(str::to_string))
        .map(|t| truncate_chars(&t, 80))
}

pub fn extract_forms(tree: &DomTree<'_>) -> Forms {
    let form_nodes: Vec<&DomNode> = tree.nodes().filter(|n| n.tag == "form").collect();
    let mut forms = Vec::new();

    for form in form_nodes.iter().take(MAX_SAMPLE) {
        let descendants = tree.descendants(form);
        let fields: Vec<FormField> = descendants
            .iter()
            .filter(|d| is_input_field(d))
            .map(|d| FormField {
                tag: d.tag.clone(),
                field_type: input_type(d),
                name: d.attr("name").map(str::to_string),
                label: field_label(tree, d),
                required: d.attr("required").is_some(),
                has_validation: field_has_validation(d),
            })
            .collect();
        let submit_text = descendants
            .iter()
            .find(|d| is_button(d))
            .map(|d| tree.label_of(d))
            .filter(|t| !t.is_empty());
        forms.push(FormInfo {
            selector: form.selector(),
            action: form.attr("action").map(str::to_string),
            method: form
                .attr("method")
                .map(str::to_ascii_lowercase)
                .unwrap_or_else(|| "get".to_string()),
            fields,
            submit_text,
        });
    }

    Forms {
        total_forms: form_nodes.len(),
        has_validation: forms.iter().flat_map(|f| &f.fields).any(|f| f.has_validation),
        has_error_states: tree.nodes().any(has_error_marker),
        forms,
    }
}

fn classify_loading(node: &DomNode) -> Option<LoadingKind> {
    let class = node.class_and_id();
    let animation = style_of(node)
        .and_then(|s| s.animation_name.as_deref())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if node.tag == "progress" || node.role() == Some("progressbar") {
        Some(LoadingKind::Progress)
    } else if ["skeleton", "shimmer", "placeholder"].iter().any(|m| class.contains(m)) {
        Some(LoadingKind::Skeleton)
    } else if ["spinner", "loader", "loading"].iter().any(|m| class.contains(m)) || animation.contains("spin") {
        Some(LoadingKind::Spinner)
    } else {
        None
    }
}

enum LoadingKind {
    Spinner,
    Skeleton,
    Progress,
}

pub fn extract_loading_states(tree: &DomTree<'_>) -> LoadingStates {
    let mut states = LoadingStates::default();
    for node in tree.nodes() {
        let Some(kind) = classify_loading(node) else {
            continue;
        };
        let list = match kind {
            LoadingKind::Spinner => &mut states.spinners,
            LoadingKind::Skeleton => &mut states.skeletons,
            LoadingKind::Progress => &mut states.progress_bars,
        };
        if list.len() < MAX_LOADING {
            list.push(LoadingIndicator {
                selector: node.selector(),
                has_animation: style_of(node).map(ComputedStyle::has_animation).unwrap_or(false),
            });
        }
    }
    states
}
