//! Tabular readers for incident export files
//!
//! This module turns raw file bytes into a [`RawTable`]: an ordered header
//! list plus one header-to-cell-text mapping per data row. Two interchangeable
//! backends implement the same [`TabularReader`] contract:
//!
//! - [`sheet_reader`] - first worksheet of an xlsx workbook (via `calamine`)
//! - [`delimited_reader`] - double-quote-escaped comma-separated UTF-8 text
//!
//! Both enforce the same [`RowCeiling`]: once the number of data rows read so
//! far exceeds the configured maximum, reading stops with
//! [`Error::RowLimitExceeded`](crate::Error::RowLimitExceeded).

pub mod delimited_reader;
pub mod sheet_reader;

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::app::models::RawTable;
use crate::config::ParsingConfig;
use crate::constants::{BYTE_ORDER_MARK, DEFAULT_MAX_PARSED_ROWS};
use tracing::warn;

pub use delimited_reader::DelimitedReader;
pub use sheet_reader::SheetReader;

/// A backend that can turn file bytes into a [`RawTable`]
pub trait TabularReader: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Read the whole input, failing with a backend-specific parse error
    fn read(&self, bytes: &[u8]) -> Result<RawTable>;
}

/// Hard ceiling on the number of data rows a single read may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCeiling {
    max_rows: usize,
}

impl RowCeiling {
    /// Create a ceiling; zero falls back to the default
    pub fn new(max_rows: usize) -> Self {
        let max_rows = if max_rows == 0 {
            DEFAULT_MAX_PARSED_ROWS
        } else {
            max_rows
        };
        Self { max_rows }
    }

    /// Ceiling taken from the parsing configuration
    pub fn from_config(config: &ParsingConfig) -> Self {
        Self::new(config.max_rows)
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Fail once `parsed_rows` exceeds the ceiling
    pub fn check(&self, parsed_rows: usize) -> Result<()> {
        if parsed_rows > self.max_rows {
            warn!(
                "Row ceiling of {} exceeded at data row {}",
                self.max_rows, parsed_rows
            );
            return Err(crate::Error::row_limit_exceeded(self.max_rows));
        }
        Ok(())
    }
}

impl Default for RowCeiling {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARSED_ROWS)
    }
}

/// Remove every byte-order mark from a header or value
pub fn strip_bom(value: &str) -> String {
    value.replace(BYTE_ORDER_MARK, "")
}
