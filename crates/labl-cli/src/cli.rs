//! CLI argument definitions for the column mapper.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use labl_model::CanonicalField;

use crate::logging::{LogConfig, LogFormat};
use crate::overrides::parse_field_assignment;

#[derive(Parser)]
#[command(
    name = "labl",
    version,
    about = "Labl IQ column mapper - match manifest columns to shipping fields",
    long_about = "Match the columns of an uploaded shipping manifest to the fields the\n\
                  rate engine expects, and manage reusable mapping profiles."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ./labl.json when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding saved mapping profiles.
    #[arg(long = "profiles-dir", value_name = "DIR", global = true)]
    pub profiles_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging configuration. `--log-level` beats `-v`/`-q`, and either one
    /// disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.verbosity.is_present() || self.log_level.is_some();
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: self
                .log_level
                .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from),
            use_env_filter: !explicit,
            with_ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest a column mapping for a CSV file.
    Suggest(SuggestArgs),

    /// List the canonical shipping fields.
    Fields,

    /// Manage saved mapping profiles.
    #[command(subcommand)]
    Profile(ProfileCommand),
}

/// Options shared by commands that build a mapping from a file.
#[derive(Args)]
pub struct MappingArgs {
    /// CSV file whose header row is mapped.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Manual assignment applied after auto-mapping (repeatable).
    #[arg(
        long = "set",
        value_name = "FIELD=HEADER",
        value_parser = parse_field_assignment
    )]
    pub set: Vec<(CanonicalField, String)>,

    /// Never map one column to two fields.
    #[arg(long = "exclusive")]
    pub exclusive: bool,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Start from a saved profile (name or id) instead of auto-mapping.
    #[arg(long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Print the request body as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Save the mapping suggested for a file as a profile.
    Save(SaveArgs),

    /// List saved profiles.
    List,

    /// Show one profile.
    Show {
        /// Profile name or id.
        #[arg(value_name = "PROFILE")]
        profile: String,
    },

    /// Delete a profile.
    Delete {
        /// Profile name or id.
        #[arg(value_name = "PROFILE")]
        profile: String,
    },
}

#[derive(Args)]
pub struct SaveArgs {
    /// Profile name.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Free-form description.
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
