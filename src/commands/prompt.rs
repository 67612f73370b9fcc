use std::path::PathBuf;
use std::process::ExitCode;

use wfa_lib::{build_prompt, PromptOutput, WfaError, WfaOutput, WFA_OUTPUT_VERSION};

use crate::cli::{CaptureArgs, OutputFormat, ThemeArgs};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_theme, FlagSources};

use super::analyze_url;

/// Run the prompt command.
pub async fn run_prompt(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    capture: CaptureArgs,
    theme_args: ThemeArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
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
        Err(err) => return render_error(err, format, output),
    };

    let body = WfaOutput::Prompt(PromptOutput {
        version: WFA_OUTPUT_VERSION.to_string(),
        url: analysis.page_info.url.clone(),
        theme,
        color_scheme,
        prompt: build_prompt(&analysis, theme, color_scheme),
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(WfaError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
