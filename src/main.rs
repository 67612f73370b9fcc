mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cli::Commands;
use commands::{run_analyze, run_generate, run_prompt, run_wireframe};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "wfa=debug,wfa_lib=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("WFA_LOG")
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Analyze {
            capture,
            screenshot,
            format,
            output,
        } => {
            run_analyze(
                &raw_args,
                args.config,
                args.verbose,
                capture,
                screenshot,
                format,
                output,
            )
            .await
        }
        Commands::Prompt {
            capture,
            theme,
            format,
            output,
        } => {
            run_prompt(
                &raw_args,
                args.config,
                args.verbose,
                capture,
                theme,
                format,
                output,
            )
            .await
        }
        Commands::Wireframe {
            capture,
            theme,
            output,
            format,
        } => {
            run_wireframe(
                &raw_args,
                args.config,
                args.verbose,
                capture,
                theme,
                output,
                format,
            )
            .await
        }
        Commands::Generate {
            description,
            theme,
            output,
            format,
        } => {
            run_generate(
                &raw_args,
                args.config,
                args.verbose,
                description,
                theme,
                output,
                format,
            )
            .await
        }
    }
}
