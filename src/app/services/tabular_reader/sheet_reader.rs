//! Structured-sheet backend
//!
//! Reads the first worksheet of an xlsx workbook. The first row of the used
//! range is the header row; every cell is rendered to the text a spreadsheet
//! viewer would display.

use calamine::{Data, Range, Reader, Xlsx};
use chrono::Timelike;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

use super::{RowCeiling, TabularReader, strip_bom};
use crate::app::models::RawTable;
use crate::{Error, Result};

/// Reader for the first worksheet of an xlsx workbook
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    ceiling: RowCeiling,
}

impl SheetReader {
    pub fn new(ceiling: RowCeiling) -> Self {
        Self { ceiling }
    }

    /// Build the table from a worksheet range
    fn table_from_range(&self, range: &Range<Data>) -> Result<RawTable> {
        let mut rows_iter = range.rows();

        let Some(header_row) = rows_iter.next() else {
            debug!("Worksheet is empty");
            return Ok(RawTable::empty());
        };

        // The header row ends at its last populated cell
        let header_width = header_row
            .iter()
            .rposition(|cell| !matches!(cell, Data::Empty))
            .map_or(0, |last| last + 1);
        if header_width == 0 {
            debug!("Worksheet header row has no cells");
            return Ok(RawTable::empty());
        }

        let headers: Vec<String> = header_row[..header_width]
            .iter()
            .map(|cell| strip_bom(&cell_text(cell)))
            .collect();

        let mut rows = Vec::new();
        for (index, row) in rows_iter.enumerate() {
            self.ceiling.check(index + 1)?;

            let mut mapped = HashMap::with_capacity(headers.len());
            for (col, header) in headers.iter().enumerate() {
                let value = row.get(col).map(cell_text).unwrap_or_default();
                mapped.insert(header.clone(), value);
            }
            rows.push(mapped);
        }

        debug!(
            "Read {} headers and {} data rows from worksheet",
            headers.len(),
            rows.len()
        );
        Ok(RawTable::new(headers, rows))
    }
}

impl TabularReader for SheetReader {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn read(&self, bytes: &[u8]) -> Result<RawTable> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| Error::sheet_parsing(format!("Failed to open workbook: {}", e)))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                return Err(Error::sheet_parsing(format!(
                    "Failed to read first worksheet: {}",
                    e
                )));
            }
            None => return Err(Error::sheet_parsing("Workbook contains no worksheets")),
        };

        self.table_from_range(&range)
    }
}

/// Shortest text for `value` at 15 significant digits, as spreadsheets display it
pub fn format_number(value: f64) -> String {
    format!("{:.14e}", value)
        .parse::<f64>()
        .unwrap_or(value)
        .to_string()
}

/// Render a cell the way a spreadsheet viewer shows it
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return format_number(dt.as_f64());
            }
            match dt.as_datetime() {
                Some(naive) if naive.time().num_seconds_from_midnight() == 0 => {
                    naive.format("%Y-%m-%d").to_string()
                }
                Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => format_number(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
