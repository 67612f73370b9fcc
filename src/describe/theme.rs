//! Theme and color scheme tokens for generated wireframes.

use palette::{convert::FromColorUnclamped, Lab, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WfaError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = WfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(WfaError::Config(format!(
                "Unknown theme '{}'; expected light or dark",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Teal,
    Gray,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Blue,
        ColorScheme::Green,
        ColorScheme::Purple,
        ColorScheme::Orange,
        ColorScheme::Red,
        ColorScheme::Teal,
        ColorScheme::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Blue => "blue",
            ColorScheme::Green => "green",
            ColorScheme::Purple => "purple",
            ColorScheme::Orange => "orange",
            ColorScheme::Red => "red",
            ColorScheme::Teal => "teal",
            ColorScheme::Gray => "gray",
        }
    }

    /// Base accent as 8-bit sRGB.
    fn base(&self) -> [u8; 3] {
        match self {
            ColorScheme::Blue => [0x25, 0x63, 0xEB],
            ColorScheme::Green => [0x16, 0xA3, 0x4A],
            ColorScheme::Purple => [0x7C, 0x3A, 0xED],
            ColorScheme::Orange => [0xEA, 0x58, 0x0C],
            ColorScheme::Red => [0xDC, 0x26, 0x26],
            ColorScheme::Teal => [0x0D, 0x94, 0x88],
            ColorScheme::Gray => [0x4B, 0x55, 0x63],
        }
    }
}

impl FromStr for ColorScheme {
    type Err = WfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let lower = if lower == "grey" { "gray".to_string() } else { lower };
        ColorScheme::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                WfaError::Config(format!(
                    "Unknown color scheme '{}'; expected one of blue, green, purple, orange, red, teal, gray",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved CSS colors for one theme and scheme, all `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTokens {
    pub primary: String,
    pub primary_hover: String,
    /// Tinted background for hero and highlighted panels.
    pub primary_soft: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted: String,
    pub border: String,
}

impl ColorTokens {
    pub fn resolve(theme: Theme, scheme: ColorScheme) -> Self {
        let base = scheme.base();
        match theme {
            Theme::Light => Self {
                primary: hex(base),
                primary_hover: shift_lightness(base, -10.0),
                primary_soft: shift_lightness(base, 45.0),
                background: "#FFFFFF".into(),
                surface: "#F8FAFC".into(),
                text: "#0F172A".into(),
                muted: "#64748B".into(),
                border: "#E2E8F0".into(),
            },
            Theme::Dark => Self {
                primary: shift_lightness(base, 12.0),
                primary_hover: shift_lightness(base, 22.0),
                primary_soft: shift_lightness(base, -25.0),
                background: "#0F172A".into(),
                surface: "#1E293B".into(),
                text: "#F1F5F9".into(),
                muted: "#94A3B8".into(),
                border: "#334155".into(),
            },
        }
    }

    /// CSS custom property declarations for a `:root` block.
    pub fn to_css_vars(&self) -> String {
        [
            ("primary", &self.primary),
            ("primary-hover", &self.primary_hover),
            ("primary-soft", &self.primary_soft),
            ("bg", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("muted", &self.muted),
            ("border", &self.border),
        ]
        .iter()
        .map(|(name, value)| format!("--wf-{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Move a color's CIE L* by `delta`, keeping hue and chroma.
fn shift_lightness(rgb: [u8; 3], delta: f32) -> String {
    let srgb = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format::<f32>();
    let mut lab: Lab = Lab::from_color_unclamped(srgb);
    lab.l = (lab.l + delta).clamp(0.0, 100.0);
    let out: Srgb<f32> = Srgb::from_color_unclamped(lab);
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    hex([channel(out.red), channel(out.green), channel(out.blue)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("TEAL".parse::<ColorScheme>().unwrap(), ColorScheme::Teal);
        assert_eq!("grey".parse::<ColorScheme>().unwrap(), ColorScheme::Gray);
    }

    #[test]
    fn unknown_names_are_config_errors() {
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert!(err.to_string().contains("Unknown theme"));
        let err = "magenta".parse::<ColorScheme>().unwrap_err();
        assert!(matches!(err, WfaError::Config(_)));
    }

    #[test]
    fn defaults_are_light_blue() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(ColorScheme::default(), ColorScheme::Blue);
        assert_eq!(ColorTokens::resolve(Theme::Light, ColorScheme::Blue).primary, "#2563EB");
    }

    #[test]
    fn hover_is_darker_in_light_theme() {
        for scheme in ColorScheme::ALL {
            let tokens = ColorTokens::resolve(Theme::Light, scheme);
            assert_ne!(tokens.primary, tokens.primary_hover, "{scheme}");
            assert!(tokens.primary_hover.starts_with('#') && tokens.primary_hover.len() == 7);
        }
    }

    #[test]
    fn css_vars_cover_every_token() {
        let css = ColorTokens::resolve(Theme::Dark, ColorScheme::Green).to_css_vars();
        for name in ["--wf-primary:", "--wf-bg:", "--wf-text:", "--wf-border:"] {
            assert!(css.contains(name), "{css}");
        }
    }
}
