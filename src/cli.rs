use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wfa_lib::{ColorScheme, Theme, Viewport};

#[derive(Parser)]
#[command(name = "wfa")]
#[command(
    version,
    about = "Wireframe Analyzer - Extract page structure from live sites and synthesize wireframes",
    long_about = "Wireframe Analyzer (WFA)\n\nModes:\n- analyze: capture a URL and report layout, sections, navigation, styling, responsive behavior, UX patterns and suggestions.\n- prompt: print the wireframe brief built from a URL's analysis.\n- wireframe: generate an HTML wireframe for a URL through a text-completion model (falls back to templates).\n- generate: render an HTML wireframe from a short description, fully offline.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output (debug logging on stderr)")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for viewport/timeouts/theme/completion; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

/// Flags shared by every command that renders a URL.
#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    #[arg(long, help = "Page to analyze (http or https)")]
    pub url: String,

    #[arg(
        long,
        default_value = "1440x900",
        help = "Base viewport dimensions (WIDTHxHEIGHT)"
    )]
    pub viewport: Viewport,

    #[arg(long, help = "Skip the mobile/tablet/desktop comparison passes")]
    pub no_responsive: bool,

    #[arg(
        long,
        default_value = "30",
        help = "Navigation timeout (seconds) for URL rendering"
    )]
    pub nav_timeout: u64,

    #[arg(
        long,
        default_value = "10",
        help = "Network idle timeout (seconds) for URL rendering"
    )]
    pub network_idle_timeout: u64,

    #[arg(
        long,
        default_value = "45",
        help = "Process timeout (seconds) for Playwright invocation"
    )]
    pub process_timeout: u64,
}

/// Theme flags shared by the prompt and wireframe commands.
#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    #[arg(long, default_value = "light", help = "Wireframe theme (light, dark)")]
    pub theme: Theme,

    #[arg(
        long,
        default_value = "blue",
        help = "Accent color scheme (blue, green, purple, orange, red, teal, gray)"
    )]
    pub color_scheme: ColorScheme,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a page's structure, styling and UX patterns
    Analyze {
        #[command(flatten)]
        capture: CaptureArgs,

        #[arg(long, help = "Attach a base64 screenshot of the base render")]
        screenshot: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Print the wireframe brief built from a page analysis
    Prompt {
        #[command(flatten)]
        capture: CaptureArgs,

        #[command(flatten)]
        theme: ThemeArgs,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Generate an HTML wireframe for a page
    Wireframe {
        #[command(flatten)]
        capture: CaptureArgs,

        #[command(flatten)]
        theme: ThemeArgs,

        #[arg(
            long,
            short,
            help = "Write the wireframe HTML to this file (JSON status is printed to stdout)"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Generate an HTML wireframe from a description (offline)
    Generate {
        #[arg(long, help = "What the page should contain, e.g. \"a signup form with 2 textboxes\"")]
        description: String,

        #[command(flatten)]
        theme: ThemeArgs,

        #[arg(
            long,
            short,
            help = "Write the wireframe HTML to this file (JSON status is printed to stdout)"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    Yaml,
}

pub fn parse() -> Cli {
    Cli::parse()
}
