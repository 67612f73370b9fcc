use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use wfa_lib::{ErrorOutput, WfaError, WfaOutput, WireframeDocument, WFA_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &WfaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
        OutputFormat::Yaml => write_yaml_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: WfaError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    tracing::debug!(error = %err, "command failed");
    let error_payload = err.to_payload();
    let payload = WfaOutput::Error(ErrorOutput {
        version: WFA_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    let written = match format {
        OutputFormat::Json => write_json_output(&payload, output.as_deref()),
        OutputFormat::Pretty => {
            write_pretty_output(&payload, output.as_deref()).map_err(|e| e.into())
        }
        OutputFormat::Yaml => write_yaml_output(&payload, output.as_deref()),
    };
    if let Err(write_err) = written {
        eprintln!("Failed to write error output: {}", write_err);
        let content =
            serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
        println!("{content}");
    }

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &WfaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    emit(&content, output)?;
    Ok(())
}

fn write_yaml_output(
    body: &WfaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_yaml::to_string(body)?;
    emit(content.trim_end(), output)?;
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &WfaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    emit(&content, output)
}

fn emit(content: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &WfaOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        WfaOutput::Analyze(out) => {
            let analysis = &out.analysis;
            let status = if analysis.diagnostics.partial {
                color("PARTIAL", "33", colorize)
            } else {
                color("OK", "32", colorize)
            };
            writeln!(buf, "{} Page analysis: {}", status, out.url).ok();
            if !analysis.page_info.title.is_empty() {
                writeln!(buf, "Title: {}", analysis.page_info.title).ok();
            }

            let layout = &analysis.layout;
            let regions: Vec<&str> = [
                ("header", layout.header.is_some()),
                ("nav", layout.navigation.is_some()),
                ("main", layout.main.is_some()),
                ("sidebar", layout.sidebar.is_some()),
                ("footer", layout.footer.is_some()),
            ]
            .iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| *name)
            .collect();
            if !regions.is_empty() {
                writeln!(buf, "Regions: {}", regions.join(", ")).ok();
            }

            if !layout.sections.is_empty() {
                writeln!(buf, "Sections ({}):", layout.sections.len()).ok();
                for section in &layout.sections {
                    let heading = if section.heading.is_empty() {
                        "-"
                    } else {
                        section.heading.as_str()
                    };
                    writeln!(buf, "- {:13} {}", section.section_type.as_str(), heading).ok();
                }
            }

            let viewports: Vec<String> = analysis
                .responsive
                .captured()
                .iter()
                .map(|v| {
                    let menu = if v.layout.has_hamburger_menu { " (menu)" } else { "" };
                    format!("{} {}{}", v.class, v.viewport, menu)
                })
                .collect();
            if !viewports.is_empty() {
                writeln!(buf, "Viewports: {}", viewports.join(", ")).ok();
            }

            if !out.patterns.patterns.is_empty() {
                writeln!(buf, "Patterns:").ok();
                for pattern in &out.patterns.patterns {
                    let conf = format!("{:.2}", pattern.confidence);
                    writeln!(
                        buf,
                        "- {:24} {} [{}]",
                        pattern.pattern_type.as_str(),
                        color(&conf, confidence_color_code(pattern.confidence), colorize),
                        pattern.priority.as_str()
                    )
                    .ok();
                }
            }

            for failure in &analysis.diagnostics.failures {
                writeln!(buf, "Warning: {} failed: {}", failure.phase, failure.message).ok();
            }
            if analysis.diagnostics.timed_out {
                writeln!(buf, "Warning: analysis deadline reached").ok();
            }
        }
        WfaOutput::Prompt(out) => {
            let header = color("[PROMPT]", "36", colorize);
            writeln!(
                buf,
                "{} {} ({} / {})",
                header, out.url, out.theme, out.color_scheme
            )
            .ok();
            writeln!(buf).ok();
            write!(buf, "{}", out.prompt).ok();
        }
        WfaOutput::Wireframe(out) => {
            let header = color("[WIREFRAME]", "36", colorize);
            writeln!(buf, "{} {}", header, out.url).ok();
            write_document_summary(&mut buf, &out.wireframe, out.output_path.as_deref(), colorize);
        }
        WfaOutput::Generate(out) => {
            let header = color("[GENERATE]", "36", colorize);
            writeln!(buf, "{} {}", header, out.description).ok();
            write_document_summary(&mut buf, &out.wireframe, out.output_path.as_deref(), colorize);
        }
        WfaOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn write_document_summary(
    buf: &mut String,
    doc: &WireframeDocument,
    output_path: Option<&Path>,
    colorize: bool,
) {
    let source = format!("{:?}", doc.source).to_lowercase();
    match doc.template {
        Some(template) => writeln!(buf, "Source: {} ({} template)", source, template).ok(),
        None => writeln!(buf, "Source: {}", source).ok(),
    };
    writeln!(buf, "HTML: {} bytes", doc.html.len()).ok();
    if let Some(path) = output_path {
        writeln!(buf, "Written to: {}", path.display()).ok();
    }
    for warning in &doc.warnings {
        writeln!(buf, "{} {}", color("Warning:", "33", colorize), warning).ok();
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Map confidence to ANSI color code.
fn confidence_color_code(confidence: f32) -> &'static str {
    if confidence >= 0.75 {
        "32" // green
    } else if confidence >= 0.5 {
        "33" // yellow
    } else {
        "31" // red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfa_lib::error::{ErrorCategory, ErrorPayload};
    use wfa_lib::patterns::Level;
    use wfa_lib::types::{PhaseFailure, SectionType};
    use wfa_lib::{
        AnalyzeOutput, GenerateOutput, PageAnalysis, Pattern, PatternReport, PatternType,
        WireframeSource, WireframeTemplate,
    };

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(WfaError::Config("boom".to_string()), OutputFormat::Json, None);
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_summarizes_analysis() {
        let mut analysis = PageAnalysis::default();
        analysis.page_info.title = "Acme".into();
        analysis.layout.sections.push(wfa_lib::types::Section {
            section_type: SectionType::Hero,
            heading: "Build faster".into(),
            subheadings: vec![],
            text: "Build faster with the platform for modern teams.".into(),
            summary: String::new(),
            has_images: false,
            has_buttons: true,
            has_links: false,
            has_videos: false,
            has_forms: false,
            counts: Default::default(),
            ctas: vec!["Get Started".into()],
            class_name: "hero".into(),
            id: String::new(),
            bounds: Default::default(),
        });
        analysis.diagnostics.partial = true;
        analysis.diagnostics.failures.push(PhaseFailure {
            phase: "responsive:mobile".into(),
            message: "timeout".into(),
        });
        let output = WfaOutput::Analyze(AnalyzeOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            url: "https://acme.test/".into(),
            analysis,
            patterns: PatternReport {
                patterns: vec![Pattern {
                    pattern_type: PatternType::HeroCta,
                    title: "Hero with call to action".into(),
                    confidence: 0.8,
                    priority: Level::High,
                    tags: vec![],
                }],
                suggestions: vec![],
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("PARTIAL Page analysis: https://acme.test/"));
        assert!(pretty.contains("Title: Acme"));
        assert!(pretty.contains("Sections (1):"));
        assert!(pretty.contains("hero") && pretty.contains("Build faster"));
        assert!(pretty.contains("hero-cta") && pretty.contains("0.80"));
        assert!(pretty.contains("responsive:mobile failed: timeout"));
    }

    #[test]
    fn format_pretty_summarizes_generated_document() {
        let output = WfaOutput::Generate(GenerateOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            description: "a dashboard".into(),
            theme: Default::default(),
            color_scheme: Default::default(),
            output_path: Some(PathBuf::from("out.html")),
            wireframe: WireframeDocument {
                html: "<!DOCTYPE html>".into(),
                template: Some(WireframeTemplate::Dashboard),
                source: WireframeSource::Template,
                warnings: vec!["note".into()],
            },
        });
        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[GENERATE] a dashboard"));
        assert!(pretty.contains("Source: template (dashboard template)"));
        assert!(pretty.contains("Written to: out.html"));
        assert!(pretty.contains("Warning: note"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = WfaOutput::Error(ErrorOutput {
            version: WFA_OUTPUT_VERSION.to_string(),
            message: Some("bad input".to_string()),
            error: ErrorPayload {
                category: ErrorCategory::Config,
                message: "bad input".to_string(),
                remediation: Some("check flags".to_string()),
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
