//! Row assembly
//!
//! Converts raw rows into canonical records using the columns resolved for the
//! detected layout. Each layout owns a small table of field rules, so adding a
//! layout means adding one table rather than another branch per field.

use std::collections::HashMap;
use tracing::debug;

use super::field_normalizer::{
    clean_comment, normalize_issue_key, normalize_issue_links, normalize_labels, trim_field,
};
use super::header_resolver::ResolvedColumns;
use crate::app::models::{IncidentRecord, SourceFormat};

type FieldRule = fn(&str) -> String;

/// Per-layout normalization applied after trimming
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub issue_key: FieldRule,
    pub issue_links: FieldRule,
    pub label: FieldRule,
    pub comment: FieldRule,
}

impl FieldRules {
    /// The rule table for a layout
    pub fn for_format(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Preprocessed => Self {
                issue_key: normalize_issue_key,
                issue_links: keep,
                label: keep,
                comment: keep,
            },
            SourceFormat::RawExport => Self {
                issue_key: normalize_issue_key,
                issue_links: normalize_issue_links,
                label: normalize_labels,
                comment: clean_comment,
            },
        }
    }
}

fn keep(value: &str) -> String {
    value.to_string()
}

/// Cell values of one row, looked up through the resolved columns and trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRow<'a> {
    pub issue_key: &'a str,
    pub issue_links: &'a str,
    pub label: &'a str,
    pub comment: &'a str,
}

impl<'a> ResolvedRow<'a> {
    pub fn from_row(row: &'a HashMap<String, String>, columns: &ResolvedColumns) -> Self {
        let cell = |header: &str| row.get(header).map_or("", |value| trim_field(value));
        Self {
            issue_key: cell(&columns.issue_key),
            issue_links: cell(&columns.issue_links),
            label: cell(&columns.label),
            comment: cell(&columns.comment),
        }
    }
}

/// Builds canonical records for one detected layout
#[derive(Debug, Clone)]
pub struct RowAssembler {
    columns: ResolvedColumns,
    rules: FieldRules,
}

impl RowAssembler {
    pub fn new(format: SourceFormat, columns: ResolvedColumns) -> Self {
        Self {
            columns,
            rules: FieldRules::for_format(format),
        }
    }

    /// Normalize one row, or `None` when all four fields end up empty
    pub fn assemble_row(&self, row: &HashMap<String, String>) -> Option<IncidentRecord> {
        let resolved = ResolvedRow::from_row(row, &self.columns);
        let record = IncidentRecord {
            issue_key: (self.rules.issue_key)(resolved.issue_key),
            issue_links: (self.rules.issue_links)(resolved.issue_links),
            label: (self.rules.label)(resolved.label),
            comment: (self.rules.comment)(resolved.comment),
        };

        if record.is_empty() { None } else { Some(record) }
    }

    /// Normalize all rows in order, skipping empty ones
    pub fn assemble(&self, rows: &[HashMap<String, String>]) -> Vec<IncidentRecord> {
        let records: Vec<IncidentRecord> =
            rows.iter().filter_map(|row| self.assemble_row(row)).collect();

        let skipped = rows.len() - records.len();
        if skipped > 0 {
            debug!("Skipped {} empty rows", skipped);
        }
        records
    }
}
