//! Delimited-text backend
//!
//! Reads UTF-8 comma-separated text with standard double-quote escaping.
//! Quoted fields may embed commas and newlines. The first record is the
//! header; cells missing from a short record read as `""`.

use std::collections::HashMap;
use tracing::debug;

use super::{RowCeiling, TabularReader, strip_bom};
use crate::app::models::RawTable;
use crate::{Error, Result};

/// Reader for comma-separated text
#[derive(Debug, Clone, Default)]
pub struct DelimitedReader {
    ceiling: RowCeiling,
}

impl DelimitedReader {
    pub fn new(ceiling: RowCeiling) -> Self {
        Self { ceiling }
    }
}

impl TabularReader for DelimitedReader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn read(&self, bytes: &[u8]) -> Result<RawTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let header_record = csv_reader
            .headers()
            .map_err(|e| {
                let message = format!("Failed to read CSV headers: {}", e);
                Error::delimited_parsing(message, Some(e))
            })?
            .clone();

        if header_record.is_empty() {
            debug!("CSV input has no header record");
            return Ok(RawTable::empty());
        }

        let headers: Vec<String> = header_record.iter().map(strip_bom).collect();

        let mut rows = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            self.ceiling.check(index + 1)?;

            let record = result.map_err(|e| {
                let message = format!("CSV parse error at record {}: {}", index + 1, e);
                Error::delimited_parsing(message, Some(e))
            })?;

            let mut mapped = HashMap::with_capacity(headers.len());
            for (col, header) in headers.iter().enumerate() {
                mapped.insert(header.clone(), record.get(col).unwrap_or("").to_string());
            }
            rows.push(mapped);
        }

        debug!(
            "Read {} headers and {} data rows from CSV",
            headers.len(),
            rows.len()
        );
        Ok(RawTable::new(headers, rows))
    }
}
