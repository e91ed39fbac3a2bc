//! Command implementations for the incident normalizer CLI
//!
//! This module contains logging setup, layered configuration loading, the
//! three subcommands and their human/JSON/CSV renderers.

use crate::app::models::{IncidentRecord, ParseResult, StatBucket, Stats};
use crate::app::services::export::{export_latest_to_path, export_records};
use crate::app::services::incident_store::IncidentStore;
use crate::app::services::stats_aggregator::{build_stats, group_top_n};
use crate::cli::args::{CommonArgs, Commands, ExportArgs, OutputFormat, ParseArgs, StatsArgs};
use crate::cli::input::{is_stdin, read_input_file};
use crate::config::{Config, LoggingConfig};
use crate::{Error, ErrorCategory, IncidentParser, Result};
use colored::*;
use std::io::{self, Write};
use tracing::{debug, info};

/// Exit status for failures caused by the input file or arguments
pub const EXIT_CLIENT_ERROR: i32 = 2;
/// Exit status for internal failures
pub const EXIT_SERVER_ERROR: i32 = 1;

/// Run a subcommand to completion
pub fn run(command: Commands) -> Result<()> {
    let config = load_configuration(&command)?;
    setup_logging(&config.logging)?;

    debug!("Command line arguments: {:?}", command);
    debug!("Loaded configuration: {:?}", config);

    match &command {
        Commands::Parse(args) => run_parse(args, &config),
        Commands::Stats(args) => run_stats(args, &config),
        Commands::Export(args) => run_export(args, &config),
    }
}

/// Exit status for an error, split by who caused it
pub fn exit_code(error: &Error) -> i32 {
    match error.category() {
        ErrorCategory::ClientInput => EXIT_CLIENT_ERROR,
        ErrorCategory::ServerFault => EXIT_SERVER_ERROR,
    }
}

/// Set up logging from the resolved configuration; `RUST_LOG` takes precedence
fn setup_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = logging.level.as_str();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("incident_normalizer={}", log_level)));

    if !logging.structured {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> env -> args)
fn load_configuration(command: &Commands) -> Result<Config> {
    let mut config = Config::from_env()?;

    let common = command.common();
    if let Some(max_rows) = common.max_rows {
        config = config.with_max_rows(max_rows);
    }
    config = config.with_log_level(common.get_log_level());
    config.logging.structured = !common.quiet;

    if let Commands::Export(args) = command {
        if let Some(url) = &args.issue_base_url {
            config = config.with_issue_base_url(url.clone());
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_file(common: &CommonArgs, config: &Config) -> Result<ParseResult> {
    let parser = IncidentParser::new(&config.parsing);
    debug!("Reader order: {}", parser.reader_names().join(", "));

    if is_stdin(&common.file) {
        info!("Parsing standard input");
        return parser.parse_reader(io::stdin().lock());
    }

    let bytes = read_input_file(&common.file)?;
    info!("Parsing {}", common.file.display());
    parser.parse(&bytes)
}

fn run_parse(args: &ParseArgs, config: &Config) -> Result<()> {
    let result = parse_file(&args.common, config)?;

    let filter = args.filters.to_filter();
    let (records, stats) = if filter.is_empty() {
        (result.records, result.stats)
    } else {
        let selected: Vec<IncidentRecord> =
            filter.apply(&result.records).into_iter().cloned().collect();
        info!(
            "Filter kept {} of {} records",
            selected.len(),
            result.records.len()
        );
        let stats = build_stats(&selected);
        (selected, stats)
    };
    let stats = limit_stats(stats, args.top);

    match args.output_format {
        OutputFormat::Human => {
            print_human_records(&records, &result.source_format.to_string());
            print_human_stats(&stats);
            Ok(())
        }
        OutputFormat::Json => write_json(&serde_json::json!({
            "sourceFormat": result.source_format,
            "records": records,
            "stats": stats,
        })),
        OutputFormat::Csv => {
            export_records(&records, io::stdout().lock(), &config.export)?;
            Ok(())
        }
    }
}

fn run_stats(args: &StatsArgs, config: &Config) -> Result<()> {
    let result = parse_file(&args.common, config)?;
    let stats = limit_stats(result.stats, args.top);

    match args.output_format {
        OutputFormat::Human => {
            println!(
                "{} {} records ({})",
                "Parsed".bright_green().bold(),
                result.records.len().to_string().bright_white().bold(),
                result.source_format
            );
            print_human_stats(&stats);
            Ok(())
        }
        OutputFormat::Json => write_json(&stats),
        OutputFormat::Csv => write_stats_csv(&stats, io::stdout().lock()),
    }
}

fn run_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let result = parse_file(&args.common, config)?;

    let store = IncidentStore::new();
    store.save(result.records);
    let written = export_latest_to_path(&store, &args.output, &config.export)?;

    if !args.common.quiet {
        println!(
            "{} {} records to {}",
            "Exported".bright_green().bold(),
            written.to_string().bright_white().bold(),
            args.output.display()
        );
    }
    Ok(())
}

fn limit_stats(stats: Stats, top: Option<usize>) -> Stats {
    match top {
        Some(n) => Stats {
            by_issue_links: group_top_n(&stats.by_issue_links, n),
            by_label: group_top_n(&stats.by_label, n),
        },
        None => stats,
    }
}

fn print_human_records(records: &[IncidentRecord], source_format: &str) {
    println!(
        "\n{} ({}, {} records)",
        "Incidents".bright_green().bold(),
        source_format,
        records.len()
    );
    for record in records {
        let key = if record.issue_key.is_empty() {
            "-".dimmed().to_string()
        } else {
            record.issue_key.bright_white().bold().to_string()
        };
        println!("  {}  [{}]  {}", key, record.label, record.issue_links);
        for line in record.comment.lines() {
            println!("      {}", line);
        }
    }
}

fn print_human_stats(stats: &Stats) {
    print_human_buckets("By issue links", &stats.by_issue_links);
    print_human_buckets("By label", &stats.by_label);
    println!();
}

fn print_human_buckets(title: &str, buckets: &[StatBucket]) {
    println!("\n{}", title.bright_green().bold());
    if buckets.is_empty() {
        println!("  (no records)");
        return;
    }
    for bucket in buckets {
        println!(
            "  {:>6}  {:>5.1}%  {}",
            bucket.count.to_string().bright_white().bold(),
            bucket.percentage,
            bucket.key
        );
    }
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(|e| Error::io("Failed to write JSON output", e.into()))?;
    writeln!(stdout).map_err(|e| Error::io("Failed to write JSON output", e))
}

/// Write both frequency tables as `field,key,count,percentage` rows
pub fn write_stats_csv<W: Write>(stats: &Stats, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["field", "key", "count", "percentage"])
        .map_err(|e| Error::export("Failed to write stats header", Some(e)))?;

    let tables = [
        ("issueLinks", &stats.by_issue_links),
        ("label", &stats.by_label),
    ];
    for (field, buckets) in tables {
        for bucket in buckets {
            let count = bucket.count.to_string();
            let percentage = format!("{:.1}", bucket.percentage);
            csv_writer
                .write_record([field, bucket.key.as_str(), count.as_str(), percentage.as_str()])
                .map_err(|e| Error::export("Failed to write stats row", Some(e)))?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush stats output", e))
}
