use std::path::Path;
use std::time::Duration;

use wfa_lib::{
    AnalyzerOptions, BrowserOptions, ColorScheme, Config, DescriptionAnalysis, Theme, Viewport,
    WfaError,
};

use crate::cli::{CaptureArgs, ThemeArgs};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct FlagSources {
    pub viewport: bool,
    pub nav_timeout: bool,
    pub network_idle_timeout: bool,
    pub process_timeout: bool,
    pub theme: bool,
    pub color_scheme: bool,
}

impl FlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            viewport: flag_present(args, "--viewport"),
            nav_timeout: flag_present(args, "--nav-timeout"),
            network_idle_timeout: flag_present(args, "--network-idle-timeout"),
            process_timeout: flag_present(args, "--process-timeout"),
            theme: flag_present(args, "--theme"),
            color_scheme: flag_present(args, "--color-scheme"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Capture settings after merging CLI args and config file.
#[derive(Debug, Clone)]
pub struct ResolvedCapture {
    pub analyzer: AnalyzerOptions,
    pub browser: BrowserOptions,
}

/// Merge capture flags with config, preferring CLI when flags are present.
pub fn resolve_capture_settings(
    capture: &CaptureArgs,
    screenshot: bool,
    config: &Config,
    flags: &FlagSources,
) -> ResolvedCapture {
    let mut analyzer = AnalyzerOptions::from_config(config);
    if flags.viewport {
        analyzer.viewport = capture.viewport;
    }
    if capture.no_responsive {
        analyzer.responsive = false;
    }
    analyzer.screenshot = analyzer.screenshot || screenshot;

    let mut browser = BrowserOptions::from_config(config);
    if flags.nav_timeout {
        browser.navigation_timeout = Duration::from_secs(capture.nav_timeout);
    }
    if flags.network_idle_timeout {
        browser.network_idle_timeout = Duration::from_secs(capture.network_idle_timeout);
    }
    if flags.process_timeout {
        browser.process_timeout = Duration::from_secs(capture.process_timeout);
    }
    browser.capture_screenshot = analyzer.screenshot;

    ResolvedCapture { analyzer, browser }
}

/// Pick theme and color scheme: explicit flag > description hint > config.
pub fn resolve_theme(
    args: &ThemeArgs,
    hints: Option<&DescriptionAnalysis>,
    config: &Config,
    flags: &FlagSources,
) -> (Theme, ColorScheme) {
    let theme = if flags.theme {
        args.theme
    } else {
        hints
            .and_then(|h| h.theme_hint)
            .unwrap_or(config.generation.theme)
    };
    let color_scheme = if flags.color_scheme {
        args.color_scheme
    } else {
        hints
            .and_then(|h| h.color_hint)
            .unwrap_or(config.generation.color_scheme)
    };
    (theme, color_scheme)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/wfa/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, WfaError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        WfaError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        WfaError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective capture settings as a single-line string.
pub fn format_effective_config(
    viewport: &Viewport,
    resolved: &ResolvedCapture,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: viewport={}x{}, responsive={}, screenshot={}, timeouts: nav={}s, network-idle={}s, process={}s, analysis={}s",
        viewport.width,
        viewport.height,
        resolved.analyzer.responsive,
        resolved.analyzer.screenshot,
        resolved.browser.navigation_timeout.as_secs(),
        resolved.browser.network_idle_timeout.as_secs(),
        resolved.browser.process_timeout.as_secs(),
        resolved.analyzer.deadline.as_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_lib::analyze_description;
    use wfa_lib::config::{GenerationConfig, Timeouts};

    fn capture() -> CaptureArgs {
        CaptureArgs {
            url: "https://example.com".into(),
            viewport: Viewport {
                width: 999,
                height: 999,
            },
            no_responsive: false,
            nav_timeout: 30,
            network_idle_timeout: 10,
            process_timeout: 45,
        }
    }

    fn theme_args() -> ThemeArgs {
        ThemeArgs {
            theme: Theme::Light,
            color_scheme: ColorScheme::Blue,
        }
    }

    #[test]
    fn capture_settings_prefer_config_when_flags_absent() {
        let cfg = Config {
            viewport: Viewport {
                width: 111,
                height: 222,
            },
            timeouts: Timeouts {
                navigation: Duration::from_secs(5),
                network_idle: Duration::from_secs(6),
                process: Duration::from_secs(7),
                ..Timeouts::default()
            },
            ..Config::default()
        };
        let resolved =
            resolve_capture_settings(&capture(), false, &cfg, &FlagSources::default());

        assert_eq!(resolved.analyzer.viewport.width, 111);
        assert_eq!(resolved.analyzer.viewport.height, 222);
        assert!(resolved.analyzer.responsive);
        assert_eq!(resolved.browser.navigation_timeout, Duration::from_secs(5));
        assert_eq!(resolved.browser.network_idle_timeout, Duration::from_secs(6));
        assert_eq!(resolved.browser.process_timeout, Duration::from_secs(7));
    }

    #[test]
    fn capture_settings_prefer_cli_when_flags_present() {
        let flags = FlagSources {
            viewport: true,
            nav_timeout: true,
            network_idle_timeout: true,
            process_timeout: true,
            ..FlagSources::default()
        };
        let mut args = capture();
        args.no_responsive = true;
        args.nav_timeout = 50;
        let resolved = resolve_capture_settings(&args, true, &Config::default(), &flags);

        assert_eq!(resolved.analyzer.viewport.width, 999);
        assert!(!resolved.analyzer.responsive);
        assert!(resolved.analyzer.screenshot);
        assert!(resolved.browser.capture_screenshot);
        assert_eq!(resolved.browser.navigation_timeout, Duration::from_secs(50));
        assert_eq!(resolved.browser.process_timeout, Duration::from_secs(45));
    }

    #[test]
    fn theme_prefers_flag_then_hint_then_config() {
        let cfg = Config {
            generation: GenerationConfig {
                theme: Theme::Light,
                color_scheme: ColorScheme::Orange,
            },
            ..Config::default()
        };
        let hints = analyze_description("a dark green landing page");

        let (theme, scheme) =
            resolve_theme(&theme_args(), Some(&hints), &cfg, &FlagSources::default());
        assert_eq!(theme, Theme::Dark);
        assert_eq!(scheme, ColorScheme::Green);

        let flags = FlagSources {
            theme: true,
            color_scheme: true,
            ..FlagSources::default()
        };
        let (theme, scheme) = resolve_theme(&theme_args(), Some(&hints), &cfg, &flags);
        assert_eq!(theme, Theme::Light);
        assert_eq!(scheme, ColorScheme::Blue);

        let (_, scheme) = resolve_theme(&theme_args(), None, &cfg, &FlagSources::default());
        assert_eq!(scheme, ColorScheme::Orange);
    }

    #[test]
    fn flag_present_matches_equals_form() {
        let args: Vec<String> = ["wfa", "generate", "--theme=dark"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(flag_present(&args, "--theme"));
        assert!(!flag_present(&args, "--color-scheme"));
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let flags = FlagSources::default();
        let resolved = resolve_capture_settings(&capture(), false, &Config::default(), &flags);
        let summary = format_effective_config(
            &resolved.analyzer.viewport,
            &resolved,
            Some(Path::new("wfa.toml")),
        );
        assert!(summary.contains("1440x900"));
        assert!(summary.contains("responsive=true"));
        assert!(summary.contains("nav=30s"));
        assert!(summary.contains("network-idle=10s"));
        assert!(summary.contains("process=45s"));
        assert!(summary.contains("analysis=120s"));
        assert!(summary.contains("wfa.toml"));
    }
}
