//! Normalized export, as an xlsx workbook or as CSV
//!
//! Both renderings put records under the preprocessed header titles, so an
//! exported file can be parsed again as a preprocessed source. The workbook
//! has a bold header row, hyperlinked issue keys when a tracker base URL is
//! configured and a word-wrapped comment column. The CSV rendering instead
//! carries the links in an optional fifth column.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::Spreadsheet;
use umya_spreadsheet::structs::Hyperlink;

use crate::app::models::IncidentRecord;
use crate::app::services::incident_store::IncidentStore;
use crate::config::ExportConfig;
use crate::constants::{
    EXPORT_ISSUE_URL_HEADER, EXPORT_LINK_COLOR, EXPORT_SHEET_NAME, preprocessed_headers,
};
use crate::{Error, Result};

/// File format of an export, chosen from the destination's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Format for `path`; anything but `.xlsx` or `.csv` is rejected
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(Self::Xlsx),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::invalid_input(Some(format!(
                "unsupported export type for {} (expected .xlsx or .csv)",
                path.display()
            )))),
        }
    }
}

fn base_url(config: &ExportConfig) -> Option<&str> {
    config
        .issue_base_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// Write `records` as CSV and return the number of data rows written
pub fn export_records<W: Write>(
    records: &[IncidentRecord],
    writer: W,
    config: &ExportConfig,
) -> Result<usize> {
    let base_url = base_url(config);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = preprocessed_headers::REQUIRED.to_vec();
    if base_url.is_some() {
        header.push(EXPORT_ISSUE_URL_HEADER);
    }
    csv_writer
        .write_record(&header)
        .map_err(|e| Error::export("Failed to write export header", Some(e)))?;

    for (index, record) in records.iter().enumerate() {
        let mut fields = vec![
            record.issue_key.clone(),
            record.issue_links.clone(),
            record.label.clone(),
            record.comment.clone(),
        ];
        if let Some(base_url) = base_url {
            fields.push(issue_url(base_url, &record.issue_key));
        }

        csv_writer.write_record(&fields).map_err(|e| {
            Error::export(format!("Failed to write export row {}", index + 1), Some(e))
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush export", e))?;
    Ok(records.len())
}

/// Build the export workbook: one `incidents` sheet, header in row 1
pub fn build_workbook(records: &[IncidentRecord], config: &ExportConfig) -> Result<Spreadsheet> {
    let base_url = base_url(config);

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(EXPORT_SHEET_NAME)
        .map_err(|e| Error::export(format!("Failed to create worksheet: {}", e), None))?;

    for (col, title) in preprocessed_headers::REQUIRED.iter().enumerate() {
        let cell = sheet.get_cell_mut((col as u32 + 1, 1));
        cell.set_value_string(*title);
        cell.get_style_mut().get_font_mut().set_bold(true);
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 2;

        let key_cell = sheet.get_cell_mut((1, row));
        key_cell.set_value_string(record.issue_key.as_str());
        if let Some(base_url) = base_url {
            if !record.issue_key.is_empty() {
                let mut link = Hyperlink::default();
                link.set_url(issue_url(base_url, &record.issue_key));
                key_cell.set_hyperlink(link);

                let font = key_cell.get_style_mut().get_font_mut();
                font.set_underline("single");
                font.get_color_mut().set_argb(EXPORT_LINK_COLOR);
            }
        }

        sheet
            .get_cell_mut((2, row))
            .set_value_string(record.issue_links.as_str());
        sheet
            .get_cell_mut((3, row))
            .set_value_string(record.label.as_str());

        let comment_cell = sheet.get_cell_mut((4, row));
        comment_cell.set_value_string(record.comment.as_str());
        comment_cell
            .get_style_mut()
            .get_alignment_mut()
            .set_wrap_text(true);
    }

    debug!("Built export workbook with {} data rows", records.len());
    Ok(book)
}

/// Write `records` as an xlsx workbook and return the number of data rows written
pub fn export_workbook<W: Write + Seek>(
    records: &[IncidentRecord],
    writer: W,
    config: &ExportConfig,
) -> Result<usize> {
    let book = build_workbook(records, config)?;
    umya_spreadsheet::writer::xlsx::write_writer(&book, writer)
        .map_err(|e| Error::export(format!("Failed to write workbook: {}", e), None))?;
    Ok(records.len())
}

/// Export the store's latest records; fails when nothing has been saved
pub fn export_latest<W: Write + Seek>(
    store: &IncidentStore,
    writer: W,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<usize> {
    let records = store.latest().ok_or(Error::NothingToExport)?;
    match format {
        ExportFormat::Xlsx => export_workbook(&records, writer, config),
        ExportFormat::Csv => export_records(&records, writer, config),
    }
}

/// Export the store's latest records to a file, formatted by its extension
pub fn export_latest_to_path(
    store: &IncidentStore,
    path: &Path,
    config: &ExportConfig,
) -> Result<usize> {
    let format = ExportFormat::from_path(path)?;
    if store.latest().is_none() {
        return Err(Error::NothingToExport);
    }

    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    let written = export_latest(store, file, format, config)?;

    info!("Exported {} records to {}", written, path.display());
    Ok(written)
}

/// Link for an issue key, or `""` when the key is empty
pub fn issue_url(base_url: &str, issue_key: &str) -> String {
    if issue_key.is_empty() {
        String::new()
    } else {
        format!("{}{}", base_url, issue_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::SourceFormat;
    use crate::app::services::incident_parser::IncidentParser;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sample() -> Vec<IncidentRecord> {
        vec![
            IncidentRecord::new("TSC-1", "Payments, Billing", "bug, urgent", "first\nsecond"),
            IncidentRecord::new("", "Core", "", "a, \"quoted\" note"),
        ]
    }

    fn linked_config() -> ExportConfig {
        ExportConfig {
            issue_base_url: Some("https://tracker.example.com/browse/".to_string()),
        }
    }

    fn export_to_string(records: &[IncidentRecord], config: &ExportConfig) -> String {
        let mut buffer = Vec::new();
        export_records(records, &mut buffer, config).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn export_to_workbook_bytes(records: &[IncidentRecord], config: &ExportConfig) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        export_workbook(records, &mut buffer, config).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_header_row() {
        let csv = export_to_string(&[], &ExportConfig::default());
        assert_eq!(csv, "Issue Key,Custom Field (Issue Links),Label,Comment\n");
    }

    #[test]
    fn test_issue_url_column() {
        let csv = export_to_string(&sample(), &linked_config());
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        assert_eq!(reader.headers().unwrap().get(4), Some("Issue URL"));
        let urls: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(4).unwrap().to_string())
            .collect();
        assert_eq!(urls, vec!["https://tracker.example.com/browse/TSC-1", ""]);
    }

    #[test]
    fn test_export_reparses_as_preprocessed() {
        let records = sample();
        let csv = export_to_string(&records, &ExportConfig::default());

        let result = IncidentParser::default().parse(csv.as_bytes()).unwrap();

        assert_eq!(result.source_format, SourceFormat::Preprocessed);
        assert_eq!(result.records, records);
    }

    #[test]
    fn test_workbook_reparses_as_preprocessed() {
        let records = sample();
        let bytes = export_to_workbook_bytes(&records, &linked_config());

        let result = IncidentParser::default().parse(&bytes).unwrap();

        assert_eq!(result.source_format, SourceFormat::Preprocessed);
        assert_eq!(result.records, records);
    }

    #[test]
    fn test_workbook_header_is_bold() {
        let book = build_workbook(&sample(), &ExportConfig::default()).unwrap();
        let sheet = book.get_sheet_by_name(EXPORT_SHEET_NAME).unwrap();

        for col in 1..=4u32 {
            let cell = sheet.get_cell((col, 1)).unwrap();
            let font = cell.get_style().get_font().unwrap();
            assert!(matches!(font.get_bold(), true));
        }
        assert_eq!(sheet.get_cell((1, 1)).unwrap().get_value(), "Issue Key");
        assert_eq!(sheet.get_cell((4, 1)).unwrap().get_value(), "Comment");
    }

    #[test]
    fn test_workbook_links_only_non_empty_keys() {
        let book = build_workbook(&sample(), &linked_config()).unwrap();
        let sheet = book.get_sheet_by_name(EXPORT_SHEET_NAME).unwrap();

        let linked = sheet.get_cell((1, 2)).unwrap();
        assert_eq!(
            linked.get_hyperlink().map(|link| link.get_url().to_string()),
            Some("https://tracker.example.com/browse/TSC-1".to_string())
        );
        assert!(sheet.get_cell((1, 3)).unwrap().get_hyperlink().is_none());
    }

    #[test]
    fn test_workbook_without_base_url_has_no_links() {
        let book = build_workbook(&sample(), &ExportConfig::default()).unwrap();
        let sheet = book.get_sheet_by_name(EXPORT_SHEET_NAME).unwrap();

        assert!(sheet.get_cell((1, 2)).unwrap().get_hyperlink().is_none());
    }

    #[test]
    fn test_workbook_wraps_comments() {
        let book = build_workbook(&sample(), &ExportConfig::default()).unwrap();
        let sheet = book.get_sheet_by_name(EXPORT_SHEET_NAME).unwrap();

        let comment = sheet.get_cell((4, 2)).unwrap();
        assert_eq!(comment.get_value(), "first\nsecond");
        let alignment = comment.get_style().get_alignment().unwrap();
        assert!(matches!(alignment.get_wrap_text(), true));
    }

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.xlsx")).unwrap(),
            ExportFormat::Xlsx
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("OUT.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert!(ExportFormat::from_path(Path::new("out.json")).is_err());
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_export_latest_requires_data() {
        let store = IncidentStore::new();
        let error = export_latest(
            &store,
            Cursor::new(Vec::new()),
            ExportFormat::Xlsx,
            &ExportConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(error, Error::NothingToExport));
        assert_eq!(error.to_string(), "no data to export");
    }

    #[test]
    fn test_export_latest_to_csv_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let store = IncidentStore::new();
        store.save(sample());

        let written = export_latest_to_path(&store, &path, &ExportConfig::default()).unwrap();

        assert_eq!(written, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"first\nsecond\""));
    }

    #[test]
    fn test_export_latest_to_xlsx_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let store = IncidentStore::new();
        store.save(sample());

        let written = export_latest_to_path(&store, &path, &linked_config()).unwrap();

        assert_eq!(written, 2);
        let bytes = std::fs::read(&path).unwrap();
        let result = IncidentParser::default().parse(&bytes).unwrap();
        assert_eq!(result.records, sample());
    }

    #[test]
    fn test_empty_store_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        let error =
            export_latest_to_path(&IncidentStore::new(), &path, &ExportConfig::default())
                .unwrap_err();

        assert!(matches!(error, Error::NothingToExport));
        assert!(!path.exists());
    }

    #[test]
    fn test_issue_url() {
        assert_eq!(issue_url("https://t/", "A-1"), "https://t/A-1");
        assert_eq!(issue_url("https://t/", ""), "");
    }
}
