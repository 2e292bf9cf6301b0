//! CLI argument definitions for mdlist.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mdlist",
    version,
    about = "Render academic activity lists from structured records",
    long_about = "Render talks, publications, grants, teaching, meetings and people lists\n\
                  from YAML, JSON, CSV or Markdown front matter records.\n\n\
                  Each category filters, sorts and renders its records through a template."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Config file (default: ./mdlist.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one category from record files or directories.
    Render(RenderArgs),

    /// List the built-in categories.
    Categories,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Category to render, e.g. talks or exgrants.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Record files or directories, read in the order given.
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep only records from this year on (default: five years ago).
    #[arg(short = 's', long = "since-year", value_name = "YEAR")]
    pub since_year: Option<i64>,

    /// Treat this date as today (YYYY-MM-DD).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Directory of template overrides.
    #[arg(long = "templates", value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Supervisor id for the students and pdras categories.
    #[arg(long = "supervisor", value_name = "ID")]
    pub supervisor: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "markdown")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Markdown,
    Json,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
