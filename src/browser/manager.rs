//! Live page rendering through a Node.js Playwright helper.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::analyzer::tree::truncate_chars;
use crate::capability::{PageRenderer, RenderedPage};
use crate::config::Config;
use crate::{Result, Viewport, WfaError};

use super::dom::{convert_raw_dom, screenshot_from_base64, CaptureResult};
use super::playwright::{
    ensure_node_available, ensure_playwright_available, map_playwright_error,
    map_playwright_status_error, map_spawn_error, ScriptError, PLAYWRIGHT_CAPTURE_SCRIPT,
};

/// Default timeout for page navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for waiting for network idle state.
pub const DEFAULT_NETWORK_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the entire Playwright process.
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(45);

/// How much of the helper's stdout an error message quotes.
const MAX_RAW_OUTPUT_IN_ERROR: usize = 500;

/// Upper bound on captured elements per page.
pub const DEFAULT_MAX_NODES: usize = 6000;

/// Configuration options for browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// The Node.js command to use (default: "node").
    pub node_command: String,
    /// Whether to run in headless mode.
    pub headless: bool,
    /// Timeout for page navigation.
    pub navigation_timeout: Duration,
    /// Timeout for waiting for network idle state.
    pub network_idle_timeout: Duration,
    /// Timeout for the entire Playwright process.
    pub process_timeout: Duration,
    /// Maximum number of concurrent browser sessions.
    pub max_concurrent_sessions: usize,
    /// Attach a PNG of the viewport to every render.
    pub capture_screenshot: bool,
    pub max_nodes: usize,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            node_command: "node".to_string(),
            headless: true,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            network_idle_timeout: DEFAULT_NETWORK_IDLE_TIMEOUT,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
            max_concurrent_sessions: 1,
            capture_screenshot: false,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl BrowserOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            navigation_timeout: config.timeouts.navigation,
            network_idle_timeout: config.timeouts.network_idle,
            process_timeout: config.timeouts.process,
            capture_screenshot: config.analysis.screenshot,
            ..Self::default()
        }
    }
}

/// Renders pages through a Node.js Playwright helper, one session per permit.
#[derive(Debug, Clone)]
pub struct BrowserManager {
    options: BrowserOptions,
    semaphore: Arc<Semaphore>,
}

impl BrowserManager {
    pub fn new(options: BrowserOptions) -> Self {
        let permits = options.max_concurrent_sessions.max(1);
        Self {
            options,
            semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn options(&self) -> &BrowserOptions {
        &self.options
    }

    fn capture_command(&self, url: &str, viewport: Viewport) -> Command {
        let opts = &self.options;
        let flag = |on: bool| if on { "1" } else { "0" };
        let mut cmd = Command::new(&opts.node_command);
        cmd.arg("-e").arg(PLAYWRIGHT_CAPTURE_SCRIPT).args([
            url.to_string(),
            viewport.width.to_string(),
            viewport.height.to_string(),
            opts.navigation_timeout.as_millis().to_string(),
            opts.network_idle_timeout.as_millis().to_string(),
            flag(opts.capture_screenshot).to_string(),
            flag(opts.headless).to_string(),
            opts.max_nodes.to_string(),
        ]);
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn run_capture(&self, url: &str, viewport: Viewport) -> Result<RenderedPage> {
        let node = &self.options.node_command;
        ensure_node_available(node).await?;
        ensure_playwright_available(node).await?;

        tracing::info!(%url, %viewport, "launching headless browser");
        let started = Instant::now();
        let mut child = self
            .capture_command(url, viewport)
            .spawn()
            .map_err(|err| map_spawn_error(err, node))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let limit = self.options.process_timeout;
        let status = match timeout(limit, child.wait()).await {
            Ok(waited) => waited?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(WfaError::render(format!(
                    "Capture timed out after {limit:?}"
                )));
            }
        };

        let stdout = stdout.await.unwrap_or_default();
        let stderr = stderr.await.unwrap_or_default();
        if !status.success() {
            return Err(map_playwright_error(
                status.to_string(),
                &String::from_utf8_lossy(&stderr),
            ));
        }

        let page = parse_capture(String::from_utf8_lossy(&stdout).trim())?;
        tracing::info!(
            nodes = page.dom.nodes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "capture finished"
        );
        Ok(page)
    }
}

/// Reads a child pipe to the end on its own task so neither pipe can fill and stall the child.
fn drain<R>(pipe: Option<R>) -> tokio::task::JoinHandle<Vec<u8>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    })
}

/// Turns the helper's stdout into a rendered page.
fn parse_capture(raw: &str) -> Result<RenderedPage> {
    let result: CaptureResult = serde_json::from_str(raw).map_err(|err| {
        WfaError::render(format!(
            "Unreadable capture output ({err}): {}",
            truncate_chars(raw, MAX_RAW_OUTPUT_IN_ERROR)
        ))
    })?;

    if result.status != "ok" {
        return Err(match serde_json::from_str::<ScriptError>(raw) {
            Ok(script) => map_playwright_status_error(&script.status, script.message),
            Err(_) => WfaError::render(format!("Capture helper reported {}", result.status)),
        });
    }

    let raw_dom = result
        .dom
        .ok_or_else(|| WfaError::render("Capture helper reported ok without a DOM"))?;
    Ok(RenderedPage {
        dom: convert_raw_dom(raw_dom),
        screenshot: result.screenshot.map(screenshot_from_base64).transpose()?,
    })
}

#[async_trait]
impl PageRenderer for BrowserManager {
    async fn render_page(&self, url: &str, viewport: Viewport) -> Result<RenderedPage> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| WfaError::Unknown("Browser manager unavailable".to_string()))?;

        self.run_capture(url, viewport).await
    }
}
