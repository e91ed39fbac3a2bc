//! Minimal in-memory xlsx workbooks for reader and pipeline tests
//!
//! Builds a single-sheet workbook through the same writer the export uses.
//! Blank cells are never written, so a row of blanks is stored as a missing
//! row, which is how spreadsheet applications store physically blank rows.

#![allow(dead_code)]

use std::io::Cursor;

/// A cell written into a fixture workbook
#[derive(Debug, Clone, PartialEq)]
pub enum XlsxCell {
    Text(String),
    Number(f64),
    Blank,
}

/// Text cell, or blank for `""`
pub fn text(value: &str) -> XlsxCell {
    if value.is_empty() {
        XlsxCell::Blank
    } else {
        XlsxCell::Text(value.to_string())
    }
}

/// Workbook whose cells are all text (`""` = blank)
pub fn build_text_workbook(rows: &[&[&str]]) -> Vec<u8> {
    let rows: Vec<Vec<XlsxCell>> = rows
        .iter()
        .map(|row| row.iter().map(|value| text(value)).collect())
        .collect();
    build_workbook(&rows)
}

/// Workbook with one sheet holding `rows`, starting at A1
pub fn build_workbook(rows: &[Vec<XlsxCell>]) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet("Sheet1").unwrap();

    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            let coordinate = (col_index as u32 + 1, row_index as u32 + 1);
            match cell {
                XlsxCell::Blank => {}
                XlsxCell::Number(value) => {
                    sheet.get_cell_mut(coordinate).set_value_number(*value);
                }
                XlsxCell::Text(value) => {
                    sheet.get_cell_mut(coordinate).set_value_string(value.clone());
                }
            }
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer).unwrap();
    buffer.into_inner()
}
