use std::path::PathBuf;
use std::process::ExitCode;

use wfa_lib::{recognize_patterns, AnalyzeOutput, WfaError, WfaOutput, WFA_OUTPUT_VERSION};

use crate::cli::{CaptureArgs, OutputFormat};
use crate::formatting::{render_error, write_output};
use crate::settings::load_config;

use super::analyze_url;

/// Run the analyze command.
pub async fn run_analyze(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    capture: CaptureArgs,
    screenshot: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };

    let analysis = match analyze_url(
        raw_args,
        &config,
        config_path.as_deref(),
        verbose,
        &capture,
        screenshot,
    )
    .await
    {
        Ok(analysis) => analysis,
        Err(err) => return render_error(err, format, output),
    };

    if verbose {
        eprintln!("Recognizing UX patterns\u{2026}");
    }
    let patterns = recognize_patterns(&analysis);

    let body = WfaOutput::Analyze(AnalyzeOutput {
        version: WFA_OUTPUT_VERSION.to_string(),
        url: analysis.page_info.url.clone(),
        analysis,
        patterns,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(WfaError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
