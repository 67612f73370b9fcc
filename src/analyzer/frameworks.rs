//! Framework, library and build-tool fingerprints.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DomNode, Frameworks};

use super::tree::DomTree;

static TAILWIND_UTILITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z]+:)?(?:p[xytrbl]?|m[xytrbl]?|gap|space-[xy])-\d+$|^(?:text|bg|border)-[a-z]+-\d{2,3}$")
        .expect("valid tailwind regex")
});

/// Utility classes needed before a page counts as Tailwind-styled.
const TAILWIND_MIN_HITS: usize = 5;

#[derive(Default)]
struct Fingerprint {
    react: bool,
    next: bool,
    vue: bool,
    nuxt: bool,
    angular: bool,
    svelte: bool,
    gatsby: bool,
    bootstrap: bool,
    mui: bool,
    chakra: bool,
    aos: bool,
    tailwind_hits: usize,
}

impl Fingerprint {
    fn observe(&mut self, node: &DomNode) {
        let id = node.element_id();
        match id {
            "__next" => self.next = true,
            "__nuxt" | "__layout" => self.nuxt = true,
            "___gatsby" => self.gatsby = true,
            _ => {}
        }
        for name in node.attributes.keys() {
            let name = name.as_str();
            if name == "data-reactroot" || name == "data-reactid" {
                self.react = true;
            } else if name.starts_with("data-v-") {
                self.vue = true;
            } else if name == "ng-version" || name.starts_with("_ngcontent") || name.starts_with("_nghost") || name == "ng-app" {
                self.angular = true;
            } else if name == "data-aos" {
                self.aos = true;
            }
        }
        for class in node.class_name().split_whitespace() {
            if class.starts_with("svelte-") {
                self.svelte = true;
            } else if class.starts_with("Mui") {
                self.mui = true;
            } else if class.starts_with("chakra-") {
                self.chakra = true;
            } else if class.starts_with("btn-") || class.starts_with("col-md-") || class == "navbar-expand-lg" {
                self.bootstrap = true;
            } else if TAILWIND_UTILITY.is_match(class) {
                self.tailwind_hits += 1;
            }
        }
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

pub fn detect_frameworks(tree: &DomTree<'_>) -> Frameworks {
    let mut print = Fingerprint::default();
    for node in tree.nodes() {
        print.observe(node);
    }

    let snapshot = tree.snapshot();
    let scripts: Vec<String> = snapshot.scripts.iter().map(|s| s.to_lowercase()).collect();
    let script_has = |needle: &str| scripts.iter().any(|s| s.contains(needle));
    let generator = snapshot
        .meta
        .iter()
        .find(|m| m.name.as_deref() == Some("generator"))
        .and_then(|m| m.content.clone());
    let generator_has = |needle: &str| {
        generator
            .as_deref()
            .map(|g| g.to_lowercase().contains(needle))
            .unwrap_or(false)
    };

    let mut out = Frameworks::default();

    if print.next || script_has("/_next/") || generator_has("next.js") {
        push_unique(&mut out.frameworks, "Next.js");
        push_unique(&mut out.frameworks, "React");
    }
    if print.gatsby || generator_has("gatsby") {
        push_unique(&mut out.frameworks, "Gatsby");
        push_unique(&mut out.frameworks, "React");
    }
    if print.react || script_has("react") {
        push_unique(&mut out.frameworks, "React");
    }
    if print.nuxt || script_has("/_nuxt/") || generator_has("nuxt") {
        push_unique(&mut out.frameworks, "Nuxt");
        push_unique(&mut out.frameworks, "Vue");
    }
    if print.vue || script_has("vue") {
        push_unique(&mut out.frameworks, "Vue");
    }
    if print.angular || script_has("angular") {
        push_unique(&mut out.frameworks, "Angular");
    }
    if print.svelte || script_has("svelte") {
        push_unique(&mut out.frameworks, "Svelte");
    }

    if print.tailwind_hits >= TAILWIND_MIN_HITS || script_has("tailwind") {
        push_unique(&mut out.libraries, "Tailwind CSS");
    }
    if print.bootstrap || script_has("bootstrap") {
        push_unique(&mut out.libraries, "Bootstrap");
    }
    if print.mui {
        push_unique(&mut out.libraries, "Material UI");
    }
    if print.chakra {
        push_unique(&mut out.libraries, "Chakra UI");
    }
    if script_has("jquery") {
        push_unique(&mut out.libraries, "jQuery");
    }
    if script_has("gsap") || script_has("greensock") {
        push_unique(&mut out.libraries, "GSAP");
    }
    if print.aos || script_has("aos.js") || script_has("/aos") {
        push_unique(&mut out.libraries, "AOS");
    }

    if script_has("webpack") || script_has("chunk.js") || script_has("bundle.js") {
        push_unique(&mut out.build_tools, "Webpack");
    }
    if script_has("/@vite/") || script_has("vite") {
        push_unique(&mut out.build_tools, "Vite");
    }
    if script_has("parcel") {
        push_unique(&mut out.build_tools, "Parcel");
    }

    for meta in &snapshot.meta {
        if let (Some(name), Some(content)) = (meta.name.as_deref(), meta.content.as_deref()) {
            if matches!(name, "generator" | "viewport") {
                out.meta.push(format!("{name}: {content}"));
            }
        }
    }

    tracing::debug!(frameworks = ?out.frameworks, libraries = ?out.libraries, "fingerprinted page");
    out
}
