//! Replays captured DOM snapshots from disk instead of launching a browser.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

use crate::capability::{PageRenderer, RenderedPage};
use crate::types::DomSnapshot;
use crate::{Result, Viewport, ViewportClass, WfaError};

use super::dom::screenshot_from_image_bytes;

/// Env var naming the fixture directory used in place of a real browser.
pub const MOCK_DOM_DIR_ENV: &str = "WFA_MOCK_DOM_DIR";

/// Serves `<dir>/{mobile,tablet,desktop}.json` by viewport class.
///
/// A missing class file falls back to `desktop.json`; `screenshot.png`, when
/// present, is attached to every render.
#[derive(Debug, Clone)]
pub struct FixtureRenderer {
    dir: PathBuf,
}

impl FixtureRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var_os(MOCK_DOM_DIR_ENV).map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, class: ViewportClass) -> Option<PathBuf> {
        let exact = self.dir.join(format!("{}.json", class.as_str()));
        if exact.is_file() {
            return Some(exact);
        }
        let fallback = self.dir.join("desktop.json");
        fallback.is_file().then_some(fallback)
    }
}

#[async_trait]
impl PageRenderer for FixtureRenderer {
    async fn render_page(&self, url: &str, viewport: Viewport) -> Result<RenderedPage> {
        let class = viewport.class();
        let path = self.snapshot_path(class).ok_or_else(|| {
            WfaError::render(format!(
                "No fixture for {} in {}",
                class,
                self.dir.display()
            ))
        })?;
        let raw = fs::read_to_string(&path)?;
        let mut dom: DomSnapshot = serde_json::from_str(&raw).map_err(|e| {
            WfaError::render(format!("Invalid fixture {}: {}", path.display(), e))
        })?;
        if dom.url.is_none() {
            dom.url = Some(url.to_string());
        }

        let shot_path = self.dir.join("screenshot.png");
        let screenshot = if shot_path.is_file() {
            Some(screenshot_from_image_bytes(&fs::read(&shot_path)?)?)
        } else {
            None
        };

        tracing::debug!(fixture = %path.display(), nodes = dom.nodes.len(), "replayed fixture");
        Ok(RenderedPage { dom, screenshot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: &str = r#"{"title":"Desktop","nodes":[{"id":"b","tag":"body","parent":null,"text":null}]}"#;
    const MOBILE: &str = r#"{"title":"Mobile","nodes":[]}"#;

    #[tokio::test]
    async fn picks_file_by_viewport_class() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("desktop.json"), DESKTOP).unwrap();
        fs::write(dir.path().join("mobile.json"), MOBILE).unwrap();
        let renderer = FixtureRenderer::new(dir.path());

        let mobile = renderer.render_page("https://a.test", Viewport::MOBILE).await.unwrap();
        assert_eq!(mobile.dom.title.as_deref(), Some("Mobile"));
        assert_eq!(mobile.dom.url.as_deref(), Some("https://a.test"));

        // No tablet.json: desktop is reused.
        let tablet = renderer.render_page("https://a.test", Viewport::TABLET).await.unwrap();
        assert_eq!(tablet.dom.title.as_deref(), Some("Desktop"));
        assert!(tablet.screenshot.is_none());
    }

    #[tokio::test]
    async fn empty_dir_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureRenderer::new(dir.path())
            .render_page("https://a.test", Viewport::DESKTOP)
            .await
            .unwrap_err();
        match err {
            WfaError::Render(msg) => assert!(msg.contains("No fixture")),
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_fixture_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("desktop.json"), "{not json").unwrap();
        let err = FixtureRenderer::new(dir.path())
            .render_page("https://a.test", Viewport::DESKTOP)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid fixture"));
    }
}
