//! Application constants for the incident normalizer
//!
//! This module contains the schema marker headers, default values and
//! fixed messages used throughout the parsing engine and the CLI.

// =============================================================================
// Schema Header Literals
// =============================================================================

/// Column headers of the preprocessed (canonical) layout
pub mod preprocessed_headers {
    pub const ISSUE_KEY: &str = "Issue Key";
    pub const ISSUE_LINKS: &str = "Custom Field (Issue Links)";
    pub const LABEL: &str = "Label";
    pub const COMMENT: &str = "Comment";

    /// Required headers in canonical field order
    pub const REQUIRED: [&str; 4] = [ISSUE_KEY, ISSUE_LINKS, LABEL, COMMENT];
}

/// Column headers of the raw issue-tracker export layout
pub mod raw_export_headers {
    pub const ISSUE_KEY: &str = "Issue key";
    pub const ISSUE_LINKS: &str = "Custom field (Issue Links)";
    pub const LABEL: &str = "Labels";
    pub const COMMENT: &str = "Comment";

    /// Required headers in canonical field order
    pub const REQUIRED: [&str; 4] = [ISSUE_KEY, ISSUE_LINKS, LABEL, COMMENT];
}

/// Byte-order mark that some exporters prepend to the first header cell
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Literal issue key emitted by the source system for "no key"
pub const NULL_ISSUE_KEY_LITERAL: &str = "null";

// =============================================================================
// Normalization and Statistics
// =============================================================================

/// Separator used to join multi-valued fields (labels, issue links)
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Number of `;`-separated parts in a metadata-prefixed comment line
pub const COMMENT_METADATA_PARTS: usize = 3;

/// Bucket name for blank field values in frequency tables
pub const EMPTY_BUCKET: &str = "(empty)";

/// Bucket name that collects everything beyond the top N buckets
pub const OTHER_BUCKET: &str = "Other";

// =============================================================================
// Limits and Defaults
// =============================================================================

/// Default ceiling on data rows parsed from a single file
pub const DEFAULT_MAX_PARSED_ROWS: usize = 50_000;

/// Fixed message reported when a file exceeds the row ceiling
pub const ROW_LIMIT_MESSAGE: &str = "file has too many rows";

/// File extensions accepted by the CLI (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "csv"];

/// Column title for the optional issue URL column of the normalized export
pub const EXPORT_ISSUE_URL_HEADER: &str = "Issue URL";

/// Input path that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Default file name for the normalized export
pub const DEFAULT_EXPORT_FILENAME: &str = "incidents_normalized.xlsx";

/// Worksheet name used by the workbook export
pub const EXPORT_SHEET_NAME: &str = "incidents";

/// ARGB font colour for hyperlinked issue keys
pub const EXPORT_LINK_COLOR: &str = "FF0000FF";

// =============================================================================
// Environment Variables
// =============================================================================

/// Overrides `parsing.max_rows`
pub const ENV_MAX_ROWS: &str = "INCIDENT_MAX_ROWS";

/// Overrides `export.issue_base_url`
pub const ENV_ISSUE_BASE_URL: &str = "INCIDENT_ISSUE_BASE_URL";
