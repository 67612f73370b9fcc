use std::path::PathBuf;
use std::process::ExitCode;

use wfa_lib::{WfaError, WfaOutput, WireframeGenerator, WireframeOutput, WFA_OUTPUT_VERSION};

use crate::cli::{CaptureArgs, OutputFormat, ThemeArgs};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_theme, FlagSources};

use super::{analyze_url, text_completer};

/// Run the wireframe command.
pub async fn run_wireframe(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    capture: CaptureArgs,
    theme_args: ThemeArgs,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let (theme, color_scheme) = resolve_theme(
        &theme_args,
        None,
        &config,
        &FlagSources::from_args(raw_args),
    );

    let analysis = match analyze_url(
        raw_args,
        &config,
        config_path.as_deref(),
        verbose,
        &capture,
        false,
    )
    .await
    {
        Ok(analysis) => analysis,
        Err(err) => return render_error(err, format, None),
    };

    if verbose {
        eprintln!("Generating wireframe ({} / {})\u{2026}", theme, color_scheme);
    }
    let generator = WireframeGenerator::from_config(text_completer(&config), &config);
    let wireframe = generator
        .generate_from_analysis(&analysis, theme, color_scheme)
        .await;

    if let Some(path) = &output {
        if let Err(err) = std::fs::write(path, wireframe.html.as_bytes()) {
            return render_error(WfaError::Io(err), format, None);
        }
    }

    let body = WfaOutput::Wireframe(WireframeOutput {
        version: WFA_OUTPUT_VERSION.to_string(),
        url: analysis.page_info.url.clone(),
        theme,
        color_scheme,
        output_path: output,
        wireframe,
    });
    if let Err(err) = write_output(&body, format, None) {
        return render_error(WfaError::Unknown(err.to_string()), format, None);
    }
    ExitCode::SUCCESS
}
