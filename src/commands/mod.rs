mod analyze;
mod generate;
mod prompt;
mod wireframe;

use std::path::Path;
use std::sync::Arc;

use wfa_lib::{
    Analyzer, BrowserManager, Config, FixtureRenderer, HttpTextCompleter, PageAnalysis,
    PageRenderer, Result, StaticTextCompleter, TextCompleter,
};

use crate::cli::CaptureArgs;
use crate::settings::{format_effective_config, resolve_capture_settings, FlagSources};

pub use analyze::run_analyze;
pub use generate::run_generate;
pub use prompt::run_prompt;
pub use wireframe::run_wireframe;

/// Fixture renderer when `WFA_MOCK_DOM_DIR` is set, Playwright otherwise.
fn page_renderer(browser: wfa_lib::BrowserOptions) -> Arc<dyn PageRenderer> {
    match FixtureRenderer::from_env() {
        Some(fixture) => {
            tracing::info!(dir = %fixture.dir().display(), "using DOM fixtures instead of a browser");
            Arc::new(fixture)
        }
        None => Arc::new(BrowserManager::new(browser)),
    }
}

/// Canned completer when `WFA_MOCK_COMPLETION` is set, HTTP when a key is configured.
fn text_completer(config: &Config) -> Option<Arc<dyn TextCompleter>> {
    if let Some(mock) = StaticTextCompleter::from_env() {
        return Some(Arc::new(mock));
    }
    HttpTextCompleter::from_config(&config.completion)
        .map(|c| Arc::new(c) as Arc<dyn TextCompleter>)
}

/// Resolve capture settings and run the analyzer for `capture.url`.
async fn analyze_url(
    raw_args: &[String],
    config: &Config,
    config_path: Option<&Path>,
    verbose: bool,
    capture: &CaptureArgs,
    screenshot: bool,
) -> Result<PageAnalysis> {
    let flags = FlagSources::from_args(raw_args);
    let resolved = resolve_capture_settings(capture, screenshot, config, &flags);
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&resolved.analyzer.viewport, &resolved, config_path)
        );
        eprintln!("Analyzing {}\u{2026}", capture.url);
    }
    let analyzer = Analyzer::new(page_renderer(resolved.browser), resolved.analyzer);
    analyzer.analyze(&capture.url).await
}
