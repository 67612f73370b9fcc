//! Wireframe Analyzer (WFA) Library
//!
//! Extracts a semantic model of a live web page (layout regions, classified
//! content sections, navigation, styling, responsive behavior, interaction and
//! form details) and turns it into low-fidelity HTML wireframes, either through
//! a text-completion model or through local templates driven by a short
//! natural-language description.
//!
//! # Module Overview
//!
//! - [`analyzer`] - Multi-phase page analysis over a rendered DOM
//! - [`browser`] - Headless browser capture (Playwright) and fixture rendering
//! - [`patterns`] - UX pattern recognition and improvement suggestions
//! - [`prompt`] - Wireframe brief assembled from an analysis
//! - [`generator`] - Analysis-driven wireframes with template fallback
//! - [`describe`] - Description-driven wireframe templates and themes
//! - [`config`] - Configuration file support
//! - [`types`] - Core data types and structures
//! - [`output`] - JSON/YAML output schemas
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wfa_lib::{recognize_patterns, Analyzer, AnalyzerOptions, BrowserManager, BrowserOptions};
//!
//! # async fn example() -> wfa_lib::Result<()> {
//! let renderer = Arc::new(BrowserManager::new(BrowserOptions::default()));
//! let analyzer = Analyzer::new(renderer, AnalyzerOptions::default());
//! let analysis = analyzer.analyze("https://example.com").await?;
//! let report = recognize_patterns(&analysis);
//! println!("{} sections, {} patterns", analysis.layout.sections.len(), report.patterns.len());
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod browser;
pub mod capability;
pub mod completion;
pub mod config;
pub mod describe;
pub mod error;
pub mod generator;
pub mod output;
pub mod patterns;
pub mod prompt;
pub mod types;
pub mod viewport;

pub use analyzer::{analyze_snapshot, validate_url, Analyzer, AnalyzerOptions};
pub use browser::{
    BrowserManager, BrowserOptions, FixtureRenderer, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_NETWORK_IDLE_TIMEOUT, DEFAULT_PROCESS_TIMEOUT, MOCK_DOM_DIR_ENV,
};
pub use capability::{PageRenderer, RenderedPage, TextCompleter};
pub use completion::{HttpTextCompleter, StaticTextCompleter, MOCK_COMPLETION_ENV};
pub use config::Config;
pub use describe::{
    analyze_description, generate_from_description, ColorScheme, DescriptionAnalysis, Theme,
    WireframeDocument, WireframeSource, WireframeTemplate,
};
pub use error::{ErrorCategory, ErrorPayload, Result, WfaError};
pub use generator::WireframeGenerator;
pub use output::{
    AnalyzeOutput, ErrorOutput, GenerateOutput, PromptOutput, WfaOutput, WireframeOutput,
    WFA_OUTPUT_VERSION,
};
pub use patterns::{recognize_patterns, Pattern, PatternReport, PatternType, Suggestion};
pub use prompt::build_prompt;
pub use types::{DomSnapshot, PageAnalysis};
pub use viewport::{Viewport, ViewportClass};
