//! Multi-phase page analysis.
//!
//! The [`Analyzer`] renders a page once at the configured viewport, runs every
//! extractor over the captured DOM and, optionally, re-renders at the canonical
//! mobile/tablet/desktop viewports to compare layouts. Extractors are pure
//! functions over a [`DomTree`] and never fail; render failures and deadline
//! expiry are recorded in [`Diagnostics`] instead of being returned as errors.

pub mod elements;
pub mod frameworks;
pub mod interactive;
pub mod layout;
pub mod navigation;
pub mod responsive;
pub mod sections;
pub mod styling;
pub mod tree;

#[cfg(test)]
mod fixture;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::capability::{PageRenderer, RenderedPage};
use crate::config::Config;
use crate::types::{
    Diagnostics, DomSnapshot, Layout, PageAnalysis, PageInfo, PhaseFailure, Responsive, Viewport,
    ViewportClass,
};
use crate::{Result, WfaError};

pub use tree::DomTree;

/// Knobs for one [`Analyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    /// Run the mobile/tablet/desktop comparison passes.
    pub responsive: bool,
    /// Keep the base render's screenshot in the result.
    pub screenshot: bool,
    pub max_sections: usize,
    /// Budget for the whole `analyze` call.
    pub deadline: Duration,
    /// Viewport of the base render.
    pub viewport: Viewport,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            screenshot: false,
            max_sections: sections::MAX_SECTIONS,
            deadline: Duration::from_secs(120),
            viewport: Viewport::default(),
        }
    }
}

impl AnalyzerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            responsive: config.analysis.responsive,
            screenshot: config.analysis.screenshot,
            max_sections: config.analysis.max_sections,
            deadline: config.timeouts.analysis,
            viewport: config.viewport,
        }
    }
}

pub struct Analyzer {
    renderer: Arc<dyn PageRenderer>,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(renderer: Arc<dyn PageRenderer>, options: AnalyzerOptions) -> Self {
        Self { renderer, options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyze `url`. Only an unusable URL is an error; everything else
    /// degrades into `diagnostics`.
    pub async fn analyze(&self, url: &str) -> Result<PageAnalysis> {
        self.analyze_with_cancel(url, CancellationToken::new()).await
    }

    /// Like [`Analyzer::analyze`], stopping early once `cancel` fires.
    pub async fn analyze_with_cancel(
        &self,
        url: &str,
        cancel: CancellationToken,
    ) -> Result<PageAnalysis> {
        let url = validate_url(url)?;
        let deadline = Instant::now() + self.options.deadline;
        let base_viewport = self.options.viewport;

        tracing::info!(%url, width = base_viewport.width, "analysis started");

        let mut analysis = PageAnalysis::default();
        let mut diagnostics = Diagnostics::default();
        let mut base_dom: Option<DomSnapshot> = None;

        match self.render(url.as_str(), base_viewport, &cancel, deadline).await {
            Pass::Rendered(page) => {
                analysis = analyze_snapshot(&page.dom, base_viewport, self.options.max_sections);
                if self.options.screenshot {
                    analysis.screenshot = page.screenshot;
                }
                base_dom = Some(page.dom);
            }
            Pass::Failed(err) => record_failure(&mut diagnostics, "render", &err),
            Pass::Stopped => {
                diagnostics.timed_out = true;
            }
        }
        if analysis.page_info.url.is_empty() {
            analysis.page_info.url = url.to_string();
        }

        if self.options.responsive && !diagnostics.timed_out {
            for class in ViewportClass::all() {
                let viewport = class.viewport();
                let phase = format!("responsive:{}", class);

                // The base render already covers this viewport.
                if viewport == base_viewport {
                    if let Some(dom) = &base_dom {
                        let tree = DomTree::new(dom);
                        analysis.responsive.set(
                            class,
                            responsive::analyze_viewport(&tree, viewport, self.options.max_sections),
                        );
                        continue;
                    }
                }

                match self.render(url.as_str(), viewport, &cancel, deadline).await {
                    Pass::Rendered(page) => {
                        let tree = DomTree::new(&page.dom);
                        analysis.responsive.set(
                            class,
                            responsive::analyze_viewport(&tree, viewport, self.options.max_sections),
                        );
                    }
                    Pass::Failed(err) => record_failure(&mut diagnostics, &phase, &err),
                    Pass::Stopped => {
                        diagnostics.timed_out = true;
                        break;
                    }
                }
            }
        }

        if diagnostics.timed_out {
            tracing::warn!(%url, "analysis deadline reached; returning partial result");
        }
        diagnostics.partial = diagnostics.timed_out || !diagnostics.failures.is_empty();
        analysis.diagnostics = diagnostics;

        tracing::info!(
            %url,
            sections = analysis.layout.sections.len(),
            partial = analysis.diagnostics.partial,
            "analysis finished"
        );
        Ok(analysis)
    }

    async fn render(
        &self,
        url: &str,
        viewport: Viewport,
        cancel: &CancellationToken,
        deadline: Instant,
    ) -> Pass {
        if cancel.is_cancelled() || Instant::now() >= deadline {
            return Pass::Stopped;
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "rendering");
        tokio::select! {
            _ = cancel.cancelled() => Pass::Stopped,
            result = tokio::time::timeout_at(deadline, self.renderer.render_page(url, viewport)) => {
                match result {
                    Ok(Ok(page)) => Pass::Rendered(page),
                    Ok(Err(err)) => Pass::Failed(err),
                    Err(_) => Pass::Stopped,
                }
            }
        }
    }
}

enum Pass {
    Rendered(RenderedPage),
    Failed(WfaError),
    /// Cancelled or out of time.
    Stopped,
}

fn record_failure(diagnostics: &mut Diagnostics, phase: &str, err: &WfaError) {
    tracing::warn!(phase, error = %err, "analysis phase failed");
    diagnostics.failures.push(PhaseFailure {
        phase: phase.to_string(),
        message: err.to_string(),
    });
}

/// Parse `raw` and insist on an http(s) scheme.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WfaError::Config(format!(
            "Unsupported url scheme '{}'; expected http or https",
            other
        ))),
    }
}

/// Run every extractor over one captured DOM.
///
/// `responsive`, `screenshot` and `diagnostics` are left empty; those belong to
/// the multi-render flow in [`Analyzer`].
pub fn analyze_snapshot(dom: &DomSnapshot, viewport: Viewport, max_sections: usize) -> PageAnalysis {
    let tree = DomTree::new(dom);

    let landmarks = layout::extract_landmarks(&tree);
    let navigation = navigation::extract_navigation(&tree);
    let sections = sections::extract_sections(&tree, max_sections);
    let measurements = layout::measure(viewport, &landmarks, navigation.as_ref(), &sections);

    PageAnalysis {
        page_info: page_info(dom),
        layout: Layout {
            header: landmarks.header,
            navigation,
            main: landmarks.main,
            sidebar: landmarks.sidebar,
            footer: landmarks.footer,
            sections,
            measurements,
            visual_hierarchy: layout::extract_visual_hierarchy(&tree),
        },
        styling: styling::extract_styling(&tree),
        responsive: Responsive::default(),
        interactive: interactive::extract_interactive(&tree),
        animations: interactive::extract_animations(&tree),
        forms: interactive::extract_forms(&tree),
        loading_states: interactive::extract_loading_states(&tree),
        frameworks: frameworks::detect_frameworks(&tree),
        screenshot: None,
        diagnostics: Diagnostics::default(),
    }
}

fn page_info(dom: &DomSnapshot) -> PageInfo {
    let meta_content = |key: &str| {
        dom.meta
            .iter()
            .find(|m| {
                m.name.as_deref() == Some(key)
                    || m.property.as_deref() == Some(format!("og:{key}").as_str())
            })
            .and_then(|m| m.content.clone())
    };
    PageInfo {
        title: dom.title.clone().unwrap_or_default(),
        url: dom.url.clone().unwrap_or_default(),
        description: meta_content("description")
            .map(|d| tree::collapse_whitespace(&d))
            .unwrap_or_default(),
    }
}
