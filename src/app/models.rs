//! Data models for incident normalization
//!
//! This module contains the core data structures exchanged between the
//! readers, the normalization pipeline and external collaborators: the raw
//! header/row table, the detected source layout, canonical incident records,
//! frequency buckets and the parse result bundle.

use crate::constants::{preprocessed_headers, raw_export_headers};
use crate::{Error, ErrorCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Raw Table
// =============================================================================

/// Header list plus row mappings as produced by a tabular reader backend
///
/// Headers keep file order and are BOM-stripped but otherwise untouched, so
/// they may still contain duplicates or surrounding whitespace. Each row maps
/// header text to raw cell text; duplicate headers collapse with the last
/// column winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// Create a table from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<HashMap<String, String>>) -> Self {
        Self { headers, rows }
    }

    /// A table with no headers and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Source Format
// =============================================================================

/// The two known export layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceFormat {
    /// Canonical layout, already normalized upstream
    Preprocessed,
    /// Native issue-tracker export requiring field-level cleanup
    RawExport,
}

impl SourceFormat {
    /// Stable name reported to collaborators
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Preprocessed => "PREPROCESSED",
            SourceFormat::RawExport => "RAW_EXPORT",
        }
    }

    /// The issue-key header literal that identifies this layout
    pub fn issue_key_marker(&self) -> &'static str {
        match self {
            SourceFormat::Preprocessed => preprocessed_headers::ISSUE_KEY,
            SourceFormat::RawExport => raw_export_headers::ISSUE_KEY,
        }
    }

    /// Required headers in canonical field order (key, links, label, comment)
    pub fn required_headers(&self) -> [&'static str; 4] {
        match self {
            SourceFormat::Preprocessed => preprocessed_headers::REQUIRED,
            SourceFormat::RawExport => raw_export_headers::REQUIRED,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Canonical Records
// =============================================================================

/// One normalized incident row
///
/// Every field is trimmed and never null; `""` means absent. Multi-valued
/// fields are stored joined with `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    pub issue_key: String,
    pub issue_links: String,
    pub label: String,
    pub comment: String,
}

impl IncidentRecord {
    /// Create a record from its four canonical fields
    pub fn new(
        issue_key: impl Into<String>,
        issue_links: impl Into<String>,
        label: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            issue_key: issue_key.into(),
            issue_links: issue_links.into(),
            label: label.into(),
            comment: comment.into(),
        }
    }

    /// True when all four fields are empty
    pub fn is_empty(&self) -> bool {
        self.issue_key.is_empty()
            && self.issue_links.is_empty()
            && self.label.is_empty()
            && self.comment.is_empty()
    }
}

/// Fields a frequency table can be keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    IssueLinks,
    Label,
}

impl StatField {
    /// Select this field's value from a record
    pub fn select<'a>(&self, record: &'a IncidentRecord) -> &'a str {
        match self {
            StatField::IssueLinks => &record.issue_links,
            StatField::Label => &record.label,
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Distinct field value with its occurrence count and share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBucket {
    pub key: String,
    pub count: usize,
    /// Share of emitted records, rounded half-up to one decimal
    pub percentage: f64,
}

/// Frequency tables over the two summarised fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub by_issue_links: Vec<StatBucket>,
    pub by_label: Vec<StatBucket>,
}

/// The unit handed to external collaborators after a successful parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub records: Vec<IncidentRecord>,
    pub stats: Stats,
    pub source_format: SourceFormat,
}

// =============================================================================
// Error Reports
// =============================================================================

/// Structured, caller-facing description of a failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorReport {
    /// Build the report for an error, hiding internals of server faults
    pub fn from_error(error: &Error) -> Self {
        if error.category() == ErrorCategory::ServerFault {
            return Self {
                message: "internal server error".to_string(),
                missing_headers: None,
                details: None,
            };
        }

        match error {
            Error::MissingHeaders { missing } => Self {
                message: error.to_string(),
                missing_headers: Some(missing.clone()),
                details: None,
            },
            Error::InvalidInput { details } => Self {
                message: "invalid input file".to_string(),
                missing_headers: None,
                details: details.clone().filter(|d| !d.trim().is_empty()),
            },
            other => Self {
                message: other.to_string(),
                missing_headers: None,
                details: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = IncidentRecord::new("TSC-1", "Payments", "bug", "text");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["issueKey"], "TSC-1");
        assert_eq!(json["issueLinks"], "Payments");
        assert_eq!(json["label"], "bug");
        assert_eq!(json["comment"], "text");
    }

    #[test]
    fn test_source_format_names() {
        assert_eq!(SourceFormat::RawExport.to_string(), "RAW_EXPORT");
        assert_eq!(SourceFormat::Preprocessed.name(), "PREPROCESSED");
        assert_eq!(
            serde_json::to_value(SourceFormat::RawExport).unwrap(),
            "RAW_EXPORT"
        );
        assert_eq!(SourceFormat::RawExport.issue_key_marker(), "Issue key");
        assert_eq!(SourceFormat::Preprocessed.issue_key_marker(), "Issue Key");
    }

    #[test]
    fn test_record_is_empty() {
        assert!(IncidentRecord::default().is_empty());
        assert!(!IncidentRecord::new("", "", "", "x").is_empty());
    }

    #[test]
    fn test_error_report_missing_headers() {
        let report = ErrorReport::from_error(&Error::missing_headers(["Labels", "Comment"]));

        assert_eq!(report.message, "missing required headers: Labels, Comment");
        assert_eq!(
            report.missing_headers,
            Some(vec!["Labels".to_string(), "Comment".to_string()])
        );
        assert_eq!(report.details, None);
    }

    #[test]
    fn test_error_report_invalid_input_details() {
        let with_cause = ErrorReport::from_error(&Error::invalid_input(Some(
            "unequal lengths".to_string(),
        )));
        assert_eq!(with_cause.message, "invalid input file");
        assert_eq!(with_cause.details.as_deref(), Some("unequal lengths"));

        let blank_cause = ErrorReport::from_error(&Error::invalid_input(Some("  ".to_string())));
        assert_eq!(blank_cause.details, None);
    }

    #[test]
    fn test_error_report_hides_server_faults() {
        let report = ErrorReport::from_error(&Error::configuration("secret path /etc/x"));
        assert_eq!(report.message, "internal server error");
        assert_eq!(report.details, None);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("missingHeaders").is_none());
    }

    #[test]
    fn test_error_report_row_limit() {
        let report = ErrorReport::from_error(&Error::row_limit_exceeded(2));
        assert_eq!(report.message, "file has too many rows");
    }
}
