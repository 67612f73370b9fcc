#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use wfa_lib::types::{BoundingBox, ComputedStyle, DomNode, DomSnapshot};
use wfa_lib::WfaOutput;

pub fn bin_path() -> PathBuf {
    std::env::var("CARGO_BIN_EXE_wfa")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("target")
                .join("debug")
                .join(if cfg!(windows) { "wfa.exe" } else { "wfa" })
        })
}

/// Run the binary with a scrubbed environment: no real API keys, no central config.
pub fn run_cmd(args: &[&str], envs: &[(&str, &str)], home: &Path) -> Output {
    let mut cmd = Command::new(bin_path());
    cmd.args(args)
        .env("HOME", home)
        .env_remove("OPENAI_API_KEY")
        .env_remove("WFA_COMPLETION_API_KEY")
        .env_remove("WFA_MOCK_COMPLETION")
        .env_remove("WFA_MOCK_DOM_DIR")
        .env_remove("WFA_LOG");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("run wfa command")
}

pub fn parse_output(stdout: &[u8]) -> WfaOutput {
    serde_json::from_slice(stdout).unwrap_or_else(|e| {
        panic!(
            "output should be valid JSON ({e}): {}",
            String::from_utf8_lossy(stdout)
        )
    })
}

/// Minimal flat-DOM builder for fixture files.
pub struct Snapshot {
    snapshot: DomSnapshot,
}

impl Snapshot {
    pub fn new(title: &str) -> Self {
        Self {
            snapshot: DomSnapshot {
                title: Some(title.to_string()),
                ..DomSnapshot::default()
            },
        }
    }

    pub fn node(
        &mut self,
        id: &str,
        tag: &str,
        parent: Option<&str>,
        attrs: &[(&str, &str)],
        text: Option<&str>,
        bounds: (f32, f32, f32, f32),
    ) -> &mut Self {
        if let Some(p) = parent {
            if let Some(parent) = self.snapshot.nodes.iter_mut().find(|n| n.id == p) {
                parent.children.push(id.to_string());
            }
        }
        self.snapshot.nodes.push(DomNode {
            id: id.to_string(),
            tag: tag.to_string(),
            children: vec![],
            parent: parent.map(str::to_string),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            text: text.map(str::to_string),
            bounding_box: BoundingBox::new(bounds.0, bounds.1, bounds.2, bounds.3),
            computed_style: None,
        });
        self
    }

    /// Hide the most recently added node with `display: none`.
    pub fn hidden(&mut self) -> &mut Self {
        if let Some(node) = self.snapshot.nodes.last_mut() {
            node.computed_style = Some(ComputedStyle {
                display: Some("none".to_string()),
                ..ComputedStyle::default()
            });
        }
        self
    }

    pub fn build(&self) -> DomSnapshot {
        self.snapshot.clone()
    }
}

/// A landing page: header nav, a hero with a "Get Started" button and a
/// features block. On mobile the nav is hidden and a menu toggle shows.
pub fn landing_page(mobile: bool) -> DomSnapshot {
    let width = if mobile { 375.0 } else { 1440.0 };
    let mut s = Snapshot::new("Acme");
    s.node("body", "body", None, &[], None, (0.0, 0.0, width, 2000.0))
        .node("header", "header", Some("body"), &[], None, (0.0, 0.0, width, 80.0))
        .node("nav", "nav", Some("header"), &[], None, (200.0, 20.0, 600.0, 40.0));
    if mobile {
        s.hidden();
    }
    s.node("a1", "a", Some("nav"), &[("href", "/")], Some("Home"), (200.0, 20.0, 80.0, 40.0))
        .node("a2", "a", Some("nav"), &[("href", "/pricing")], Some("Pricing"), (300.0, 20.0, 80.0, 40.0))
        .node("a3", "a", Some("nav"), &[("href", "/docs")], Some("Docs"), (400.0, 20.0, 80.0, 40.0))
        .node(
            "toggle",
            "button",
            Some("header"),
            &[("class", "navbar-toggler"), ("aria-label", "Open menu")],
            None,
            (320.0, 20.0, 40.0, 40.0),
        );
    if !mobile {
        s.hidden();
    }
    s.node("main", "main", Some("body"), &[], None, (0.0, 80.0, width, 1600.0))
        .node("hero", "section", Some("main"), &[("class", "hero-banner")], None, (0.0, 80.0, width, 600.0))
        .node("h1", "h1", Some("hero"), &[], Some("Build faster with Acme"), (40.0, 120.0, 800.0, 60.0))
        .node("lead", "p", Some("hero"), &[], Some("The platform for modern product teams."), (40.0, 200.0, 800.0, 30.0))
        .node("cta", "button", Some("hero"), &[], Some("Get Started"), (40.0, 260.0, 160.0, 48.0))
        .node("features", "section", Some("main"), &[("class", "features")], None, (0.0, 700.0, width, 500.0))
        .node("h2", "h2", Some("features"), &[], Some("Features"), (40.0, 720.0, 400.0, 40.0))
        .node("f1", "div", Some("features"), &[("class", "feature-card")], Some("Fast builds that keep your team shipping every day."), (40.0, 780.0, 300.0, 200.0))
        .node("f2", "div", Some("features"), &[("class", "feature-card")], Some("Secure by default with audited infrastructure."), (360.0, 780.0, 300.0, 200.0))
        .node("footer", "footer", Some("body"), &[], Some("© Acme"), (0.0, 1700.0, width, 120.0));
    s.build()
}

/// Write `desktop.json` and `mobile.json`; tablet falls back to desktop.
pub fn write_landing_fixtures(dir: &Path) {
    let write = |name: &str, snapshot: &DomSnapshot| {
        let json = serde_json::to_string_pretty(snapshot).expect("serialize fixture");
        std::fs::write(dir.join(name), json).expect("write fixture");
    };
    write("desktop.json", &landing_page(false));
    write("mobile.json", &landing_page(true));
}
