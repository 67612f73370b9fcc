//! Seams to the two external collaborators: a page renderer and a text completer.
//!
//! The analyzer and the wireframe generator only ever talk to these traits, so
//! the browser and the model endpoint can be swapped for fixtures in tests.

use async_trait::async_trait;

use crate::types::{DomSnapshot, Screenshot};
use crate::{Result, Viewport};

/// One rendered page: the DOM with computed styles, plus an optional screenshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub dom: DomSnapshot,
    pub screenshot: Option<Screenshot>,
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Load `url` at `viewport` and capture its DOM.
    async fn render_page(&self, url: &str, viewport: Viewport) -> Result<RenderedPage>;
}

#[async_trait]
pub trait TextCompleter: Send + Sync {
    async fn complete_text(&self, prompt: &str) -> Result<String>;
}
