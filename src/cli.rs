// command line options and the settings the driver runs with

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SYNAPSE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Indented AST dump
    Ast,
    /// One line per token
    Tokens,
    /// The AST printed back as source
    Source,
    /// Only diagnostics
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "synapse", version, about = "Check a source file and dump its syntax tree")]
pub struct Cli {
    /// Source file to compile
    pub input: PathBuf,

    /// What to print on standard output
    #[arg(long, value_enum, default_value_t = Emit::Ast)]
    pub emit: Emit,

    /// Show the offending source line and a hint under each diagnostic
    #[arg(long)]
    pub context: bool,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub input: PathBuf,
    pub emit: Emit,
    pub context: bool,
    pub color: ColorChoice,
    pub log_level: &'static str,
}

impl From<Cli> for DriverConfig {
    fn from(cli: Cli) -> Self {
        let log_level = if cli.quiet {
            "error"
        } else {
            match cli.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        DriverConfig {
            input: cli.input,
            emit: cli.emit,
            context: cli.context,
            color: cli.color,
            log_level,
        }
    }
}

impl DriverConfig {
    pub fn apply_color(&self) {
        match self.color {
            ColorChoice::Auto => {}
            ColorChoice::Always => {
                console::set_colors_enabled(true);
                console::set_colors_enabled_stderr(true);
            }
            ColorChoice::Never => {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
        }
    }

    // SYNAPSE_LOG wins over -v/-q when it is set
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.log_level));
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(self.ansi_logs())
            .with_env_filter(filter)
            .init();
    }

    // auto follows console's own terminal detection for stderr
    fn ansi_logs(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled_stderr(),
        }
    }
}
