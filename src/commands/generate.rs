use std::path::PathBuf;
use std::process::ExitCode;

use wfa_lib::{
    analyze_description, generate_from_description, GenerateOutput, WfaError, WfaOutput,
    WFA_OUTPUT_VERSION,
};

use crate::cli::{OutputFormat, ThemeArgs};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_theme, FlagSources};

/// Run the generate command.
pub async fn run_generate(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    description: String,
    theme_args: ThemeArgs,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };

    let hints = analyze_description(&description);
    let (theme, color_scheme) = resolve_theme(
        &theme_args,
        Some(&hints),
        &config,
        &FlagSources::from_args(raw_args),
    );
    if verbose {
        eprintln!(
            "Rendering {} template ({} / {})\u{2026}",
            hints.purpose, theme, color_scheme
        );
    }

    let wireframe = generate_from_description(&description, theme, color_scheme);
    if let Some(path) = &output {
        if let Err(err) = std::fs::write(path, wireframe.html.as_bytes()) {
            return render_error(WfaError::Io(err), format, None);
        }
    }

    let body = WfaOutput::Generate(GenerateOutput {
        version: WFA_OUTPUT_VERSION.to_string(),
        description,
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
