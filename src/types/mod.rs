//! Core data types shared by the analyzer, pattern recognizer and generators.

pub mod analysis;
pub mod core;
pub mod dom;

pub use analysis::*;
pub use self::core::{BoundingBox, Dimensions, ImageFormat, Screenshot, Viewport, ViewportClass};
pub use dom::{heading_level, ComputedStyle, DomNode, DomSnapshot, MetaTag, StylesheetSignals};
