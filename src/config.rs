use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::describe::{ColorScheme, Theme};
use crate::{Result, Viewport, WfaError};

/// Settings loaded from `config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: Viewport,
    pub timeouts: Timeouts,
    pub analysis: AnalysisConfig,
    pub generation: GenerationConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub navigation: Duration,
    #[serde(with = "humantime_serde")]
    pub network_idle: Duration,
    #[serde(with = "humantime_serde")]
    pub process: Duration,
    /// Overall budget for one `analyze` call, responsive passes included.
    #[serde(with = "humantime_serde")]
    pub analysis: Duration,
    #[serde(with = "humantime_serde")]
    pub generation: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            network_idle: Duration::from_secs(10),
            process: Duration::from_secs(45),
            analysis: Duration::from_secs(120),
            generation: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Run the mobile/tablet/desktop comparison passes.
    pub responsive: bool,
    /// Attach a screenshot of the base render.
    pub screenshot: bool,
    pub max_sections: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            screenshot: false,
            max_sections: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub theme: Theme,
    pub color_scheme: ColorScheme,
}

/// OpenAI-compatible chat completion settings; env vars fill any gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

impl Config {
    /// Load config from a TOML file, central config, or return defaults.
    /// Priority: explicit path > ~/.config/wfa/config.toml > defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| WfaError::Config(format!("Invalid config TOML: {}", e)))
    }

    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("wfa")
                .join("config.toml")
        })
    }

    pub fn validate(&self) -> Result<()> {
        let timeouts = [
            ("navigation", self.timeouts.navigation),
            ("network_idle", self.timeouts.network_idle),
            ("process", self.timeouts.process),
            ("analysis", self.timeouts.analysis),
            ("generation", self.timeouts.generation),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, d)| d.is_zero()) {
            return Err(WfaError::Config(format!(
                "timeouts.{} must be greater than zero",
                name
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(WfaError::Config(
                "viewport width and height must be positive".to_string(),
            ));
        }
        if self.analysis.max_sections == 0 {
            return Err(WfaError::Config(
                "analysis.max_sections must be at least 1".to_string(),
            ));
        }
        if let Some(endpoint) = &self.completion.api_endpoint {
            url::Url::parse(endpoint).map_err(|e| {
                WfaError::Config(format!("completion.api_endpoint is not a valid url: {}", e))
            })?;
        }
        Ok(())
    }
}
