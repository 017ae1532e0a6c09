// synapse CLI
// reads one source file, runs the front end and prints the dump or the diagnostics

mod cli;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::{Cli, DriverConfig, Emit};
use console::style;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use synapse::ast::Position;
use synapse::ast_printer::{dump, dump_tokens, to_source};
use synapse::parser::ParseError;
use synapse::semantic::SemanticError;
use synapse::{Compilation, compile};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
enum DriverError {
    #[error("could not read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn main() -> ExitCode {
    let config = DriverConfig::from(Cli::parse());
    config.apply_color();
    config.init_logging();

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn run(config: &DriverConfig) -> Result<bool> {
    let bytes = fs::read(&config.input).map_err(|source| DriverError::Read {
        path: config.input.clone(),
        source,
    })?;
    info!(path = %config.input.display(), bytes = bytes.len(), "compiling");

    let compilation = compile(&bytes);
    let source = String::from_utf8_lossy(&bytes);

    let mut stdout = io::stdout().lock();
    let output = match config.emit {
        Emit::Ast => Some(dump(&compilation.program)),
        Emit::Tokens => Some(dump_tokens(&compilation.tokens)),
        Emit::Source => Some(to_source(&compilation.program)),
        Emit::None => None,
    };
    if let Some(output) = output {
        stdout
            .write_all(output.as_bytes())
            .context("writing to standard output")?;
        stdout.flush().context("writing to standard output")?;
    }

    report(config, &compilation, &source);
    debug!(succeeded = compilation.succeeded(), "done");
    Ok(compilation.succeeded())
}

// one diagnostic from either stage, as the driver prints it
struct Report<'c> {
    stage: &'static str,
    pos: Position,
    message: &'c str,
    code: &'c str,
    suggestion: Option<&'c str>,
    is_error: bool,
}

impl<'c> From<&'c ParseError> for Report<'c> {
    fn from(error: &'c ParseError) -> Self {
        Report {
            stage: "Parsing",
            pos: error.pos,
            message: &error.message,
            code: error.code,
            suggestion: error.suggestion.as_deref(),
            is_error: error.is_error(),
        }
    }
}

impl<'c> From<&'c SemanticError> for Report<'c> {
    fn from(error: &'c SemanticError) -> Self {
        Report {
            stage: "Semantic",
            pos: error.pos,
            message: &error.message,
            code: error.code(),
            suggestion: None,
            is_error: true,
        }
    }
}

// everything in source order; a stage header opens each run from one stage
fn report(config: &DriverConfig, compilation: &Compilation, source: &str) {
    let mut reports: Vec<Report> = compilation
        .syntax_errors
        .iter()
        .map(Report::from)
        .chain(compilation.semantic_errors.iter().map(Report::from))
        .collect();
    reports.sort_by_key(|r| r.pos);

    let mut last_header = None;
    for report in &reports {
        let header = (report.stage, report.is_error);
        if last_header != Some(header) {
            stage_header(config, report.stage, report.is_error);
            last_header = Some(header);
        }
        print_diagnostic(config, source, report);
        print_hint(config, report.suggestion);
    }
}

fn stage_header(config: &DriverConfig, phase: &str, is_error: bool) {
    if !config.context {
        return;
    }
    let (mark, phase) = if is_error {
        (style("✘").red().bold(), style(phase).red().bold())
    } else {
        (style("!").yellow().bold(), style(phase).yellow().bold())
    };
    eprintln!("\n{} Stage: {}", mark, phase);
}

// plain mode is exactly `[line:column] message`, --context adds the source line and a caret
fn print_diagnostic(config: &DriverConfig, source: &str, report: &Report) {
    let Report {
        pos,
        message,
        code,
        is_error,
        ..
    } = *report;
    let prefix = format!("[{}]", pos);
    let prefix = if is_error {
        style(prefix).red().bold()
    } else {
        style(prefix).yellow().bold()
    };
    eprintln!("{} {}", prefix, message);

    if !config.context {
        return;
    }
    if let Some(line_text) = source.lines().nth(pos.line.saturating_sub(1)) {
        eprintln!("{:>4} | {}", pos.line, style(line_text).dim());
        let caret = if is_error {
            style("^").red().bold()
        } else {
            style("^").yellow().bold()
        };
        eprintln!(
            "     | {}{} {}",
            " ".repeat(pos.column.saturating_sub(1)),
            caret,
            style(code).dim()
        );
    }
}

fn print_hint(config: &DriverConfig, suggestion: Option<&str>) {
    if let (true, Some(suggestion)) = (config.context, suggestion) {
        eprintln!(
            "{} {}",
            style("Hint:").cyan().bold(),
            style(suggestion).cyan()
        );
    }
}
