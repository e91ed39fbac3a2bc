//! Command-line argument definitions for the incident normalizer
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::record_filter::RecordFilter;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the incident normalizer
///
/// Reads incident exports (xlsx workbooks or CSV files), normalizes them into
/// canonical records and summarises them.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "incident-normalizer",
    version,
    about = "Normalize issue-tracker incident exports and summarise them",
    long_about = "Reads incident exports in either the raw issue-tracker layout or the \
                  preprocessed layout, from xlsx workbooks or CSV files. Cleans up keys, \
                  labels, linked issues and comments, drops empty rows and reports \
                  frequency tables for labels and linked issues."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a file and print the normalized records with their stats
    Parse(ParseArgs),
    /// Print only the frequency tables for a file
    Stats(StatsArgs),
    /// Parse a file and write the normalized records to an xlsx or CSV file
    Export(ExportArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Incident export to read (.xlsx or .csv), or `-` for standard input
    #[arg(
        value_name = "FILE",
        help = "Incident export to read (.xlsx or .csv, \"-\" for standard input)"
    )]
    pub file: PathBuf,

    /// Maximum number of data rows to accept
    ///
    /// Files with more data rows are rejected outright. Zero or a negative
    /// value means the default of 50,000. Overrides INCIDENT_MAX_ROWS.
    #[arg(
        long = "max-rows",
        value_name = "COUNT",
        allow_negative_numbers = true,
        help = "Maximum number of data rows to accept"
    )]
    pub max_rows: Option<i64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Record selection flags
#[derive(Debug, Clone, Default, Parser)]
pub struct FilterArgs {
    /// Keep records whose linked issues equal this value (repeatable)
    #[arg(
        long = "issue-link",
        value_name = "VALUE",
        help = "Keep records with this linked-issues value (repeatable, \"(empty)\" for none)"
    )]
    pub issue_links: Vec<String>,

    /// Keep records whose labels equal this value (repeatable)
    #[arg(
        long = "label",
        value_name = "VALUE",
        help = "Keep records with this label value (repeatable, \"(empty)\" for none)"
    )]
    pub labels: Vec<String>,

    #[arg(
        long = "key-contains",
        value_name = "TEXT",
        help = "Keep records whose issue key contains TEXT (case-insensitive)"
    )]
    pub key_contains: Option<String>,

    #[arg(
        long = "comment-contains",
        value_name = "TEXT",
        help = "Keep records whose comment contains TEXT (case-insensitive)"
    )]
    pub comment_contains: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter::new()
            .with_issue_links(self.issue_links.clone())
            .with_labels(self.labels.clone())
            .with_issue_key_query(self.key_contains.clone().unwrap_or_default())
            .with_comment_query(self.comment_contains.clone().unwrap_or_default())
    }
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Number of buckets to show per table before grouping the rest as "Other"
    #[arg(long = "top", value_name = "N", help = "Show the N largest buckets per table")]
    pub top: Option<usize>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the stats command
#[derive(Debug, Clone, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long = "top", value_name = "N", help = "Show the N largest buckets per table")]
    pub top: Option<usize>,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Destination file
    ///
    /// The extension picks the format: `.xlsx` writes a workbook with a bold
    /// header, linked issue keys and wrapped comments, `.csv` writes plain
    /// rows. Existing files are overwritten.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = crate::constants::DEFAULT_EXPORT_FILENAME,
        help = "Destination file (.xlsx or .csv)"
    )]
    pub output: PathBuf,

    /// Base URL for issue links
    ///
    /// When set, issue keys link to this URL followed by the key: as
    /// hyperlinks in a workbook, or as a fifth column in CSV.
    /// Overrides INCIDENT_ISSUE_BASE_URL.
    #[arg(
        long = "issue-base-url",
        value_name = "URL",
        help = "Base URL used to link issue keys"
    )]
    pub issue_base_url: Option<String>,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Parse(args) => &args.common,
            Commands::Stats(args) => &args.common,
            Commands::Export(args) => &args.common,
        }
    }
}
