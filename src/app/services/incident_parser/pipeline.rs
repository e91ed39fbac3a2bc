//! Parse pipeline with reader fallback
//!
//! Bytes are offered to each configured reader in order (structured sheet
//! first, delimited text second). A missing-headers failure is final for any
//! reader; any other failure moves on to the next reader. Exceeding the row
//! ceiling in any reader is reported as such, whatever the later readers say.

use std::io::Read;
use tracing::{debug, info, warn};

use super::format_detector::detect_source_format;
use super::header_resolver::resolve_columns;
use super::row_assembler::RowAssembler;
use crate::app::models::{ParseResult, RawTable};
use crate::app::services::stats_aggregator::build_stats;
use crate::app::services::tabular_reader::{
    DelimitedReader, RowCeiling, SheetReader, TabularReader,
};
use crate::config::{ParsingConfig, effective_max_rows};
use crate::{Error, Result};

/// Entry point for turning an uploaded file into records and stats
pub struct IncidentParser {
    readers: Vec<Box<dyn TabularReader>>,
}

impl IncidentParser {
    /// Parser with the sheet and delimited readers sharing the configured ceiling
    pub fn new(config: &ParsingConfig) -> Self {
        let ceiling = RowCeiling::from_config(config);
        Self::with_readers(vec![
            Box::new(SheetReader::new(ceiling)),
            Box::new(DelimitedReader::new(ceiling)),
        ])
    }

    /// Parser with a row ceiling; non-positive values use the default
    pub fn with_max_rows(max_rows: i64) -> Self {
        Self::new(&ParsingConfig {
            max_rows: effective_max_rows(max_rows),
        })
    }

    /// Parser that tries `readers` in the given order
    pub fn with_readers(readers: Vec<Box<dyn TabularReader>>) -> Self {
        Self { readers }
    }

    /// Names of the configured readers, in attempt order
    pub fn reader_names(&self) -> Vec<&'static str> {
        self.readers.iter().map(|reader| reader.name()).collect()
    }

    /// Drain a byte stream and parse it
    pub fn parse_reader<R: Read>(&self, mut source: R) -> Result<ParseResult> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .map_err(|e| Error::invalid_input(Some(e.to_string())))?;
        self.parse(&bytes)
    }

    /// Parse file bytes into records, stats and the detected layout
    pub fn parse(&self, bytes: &[u8]) -> Result<ParseResult> {
        if bytes.is_empty() {
            return Err(Error::invalid_input(None));
        }

        let mut row_limit_failure: Option<Error> = None;
        let mut last_failure: Option<Error> = None;

        for reader in &self.readers {
            match Self::attempt(reader.as_ref(), bytes) {
                Ok(result) => {
                    info!(
                        "Parsed {} records ({}) with the {} reader",
                        result.records.len(),
                        result.source_format,
                        reader.name()
                    );
                    return Ok(result);
                }
                Err(error) if error.is_missing_headers() => {
                    // An earlier row-limit failure outranks missing headers
                    return Err(row_limit_failure.unwrap_or(error));
                }
                Err(error) => {
                    debug!("{} reader failed: {}", reader.name(), error);
                    if matches!(error, Error::RowLimitExceeded { .. })
                        && row_limit_failure.is_none()
                    {
                        row_limit_failure = Some(error);
                    } else {
                        last_failure = Some(error);
                    }
                }
            }
        }

        // Too many rows wins over whatever the other readers reported
        if let Some(error) = row_limit_failure {
            return Err(error);
        }

        warn!("No reader could parse the input");
        Err(Error::invalid_input(
            last_failure.map(|error| error.to_string()),
        ))
    }

    fn attempt(reader: &dyn TabularReader, bytes: &[u8]) -> Result<ParseResult> {
        let table = reader.read(bytes)?;
        normalize_table(&table)
    }
}

impl Default for IncidentParser {
    fn default() -> Self {
        Self::new(&ParsingConfig::default())
    }
}

/// Detect, resolve, assemble and aggregate an already-read table
pub fn normalize_table(table: &RawTable) -> Result<ParseResult> {
    let source_format = detect_source_format(&table.headers)?;
    let columns = resolve_columns(&table.headers, source_format)?;

    let records = RowAssembler::new(source_format, columns).assemble(&table.rows);
    let stats = build_stats(&records);

    Ok(ParseResult {
        records,
        stats,
        source_format,
    })
}
