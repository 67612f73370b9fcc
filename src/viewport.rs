use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
        }
    }
}

impl Viewport {
    pub const MOBILE: Viewport = Viewport {
        width: 375,
        height: 812,
    };
    pub const TABLET: Viewport = Viewport {
        width: 768,
        height: 1024,
    };
    pub const DESKTOP: Viewport = Viewport {
        width: 1440,
        height: 900,
    };

    /// Screen-width bucket this viewport falls into.
    pub fn class(&self) -> ViewportClass {
        if self.width <= 480 {
            ViewportClass::Mobile
        } else if self.width < 1024 {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Named screen-width bucket used for responsive comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportClass {
    /// Capture order for responsive passes, narrowest first.
    pub const fn all() -> [ViewportClass; 3] {
        [
            ViewportClass::Mobile,
            ViewportClass::Tablet,
            ViewportClass::Desktop,
        ]
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            ViewportClass::Mobile => Viewport::MOBILE,
            ViewportClass::Tablet => Viewport::TABLET,
            ViewportClass::Desktop => Viewport::DESKTOP,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ViewportParseError {
    #[error("Invalid viewport format: expected WIDTHxHEIGHT (e.g., 1440x900)")]
    InvalidFormat,
    #[error("Invalid width: {0}")]
    InvalidWidth(String),
    #[error("Invalid height: {0}")]
    InvalidHeight(String),
    #[error("Width must be positive")]
    ZeroWidth,
    #[error("Height must be positive")]
    ZeroHeight,
}

impl FromStr for Viewport {
    type Err = ViewportParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .filter(|(_, h)| !h.contains('x'))
            .ok_or(ViewportParseError::InvalidFormat)?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| ViewportParseError::InvalidWidth(w.to_string()))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| ViewportParseError::InvalidHeight(h.to_string()))?;

        match (width, height) {
            (0, _) => Err(ViewportParseError::ZeroWidth),
            (_, 0) => Err(ViewportParseError::ZeroHeight),
            _ => Ok(Viewport { width, height }),
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
