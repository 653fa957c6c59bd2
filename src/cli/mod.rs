//! CLI argument parsing for clarity
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use clarity_core::format::OutputFormat;
use parse::parse_format;

/// Clarity - score text against declarative rule templates
#[derive(Parser, Debug)]
#[command(name = "clarity")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON to stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score text against a template
    Score {
        /// Path to a text file to score
        text_file: Option<PathBuf>,

        /// Direct text input to score
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Path to the YAML template file
        #[arg(long)]
        template: PathBuf,

        /// Show a per-rule breakdown
        #[arg(long)]
        detailed: bool,

        /// Show per-rule explanations and overall feedback
        #[arg(long, conflicts_with = "detailed")]
        explain: bool,
    },

    /// Create a starter template file
    CreateTemplate {
        /// Template name
        #[arg(long)]
        name: String,

        /// Template description
        #[arg(long)]
        description: Option<String>,

        /// Output YAML file path
        #[arg(long)]
        output: PathBuf,
    },

    /// List supported rule types
    Rules,
}
