//! Page renderers.
//!
//! - [`manager`] - Playwright-backed [`BrowserManager`] with concurrency control
//! - [`playwright`] - capture script, error mapping and availability checks
//! - [`dom`] - raw capture output and conversion
//! - [`fixture`] - [`FixtureRenderer`], which replays snapshots from disk
//!
//! # Example
//!
//! ```no_run
//! use wfa_lib::{BrowserManager, BrowserOptions, PageRenderer, Viewport};
//!
//! # async fn example() -> wfa_lib::Result<()> {
//! let manager = BrowserManager::new(BrowserOptions::default());
//! let page = manager.render_page("https://example.com", Viewport::DESKTOP).await?;
//! println!("captured {} nodes", page.dom.nodes.len());
//! # Ok(())
//! # }
//! ```

mod dom;
mod fixture;
mod manager;
mod playwright;

pub use fixture::{FixtureRenderer, MOCK_DOM_DIR_ENV};
pub use manager::{
    BrowserManager, BrowserOptions, DEFAULT_MAX_NODES, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_NETWORK_IDLE_TIMEOUT, DEFAULT_PROCESS_TIMEOUT,
};
