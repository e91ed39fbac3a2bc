//! Incident Normalizer Library
//!
//! A Rust library for turning incident export spreadsheets into one canonical
//! record layout, with frequency statistics over the normalized data.
//!
//! This library provides tools for:
//! - Reading xlsx workbooks and CSV text into a uniform header/row table
//! - Detecting which of the two known export layouts a file uses
//! - Resolving required headers tolerant of case, whitespace and BOM noise
//! - Cleaning issue keys, label sets, issue-link sets and metadata-prefixed comments
//! - Aggregating label and issue-link frequencies with a stable ordering
//! - Keeping the most recent result and exporting it as an xlsx workbook or CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod export;
        pub mod incident_parser;
        pub mod incident_store;
        pub mod record_filter;
        pub mod stats_aggregator;
        pub mod tabular_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{ErrorReport, IncidentRecord, ParseResult, SourceFormat, StatBucket, Stats};
pub use app::services::incident_parser::IncidentParser;
pub use config::Config;

/// Result type alias for the incident normalizer
pub type Result<T> = std::result::Result<T, Error>;

/// How a failure should be presented to whoever handed us the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The uploaded file or the request was at fault
    ClientInput,
    /// Something went wrong on our side; no detail is shown to the caller
    ServerFault,
}

/// Error types for incident parsing, normalization and export
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Neither schema marker was found, or a required column is absent
    #[error("missing required headers: {}", .missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    /// The file has more data rows than the configured ceiling
    #[error("file has too many rows")]
    RowLimitExceeded { limit: usize },

    /// Empty, unreadable or otherwise unparsable input
    #[error("invalid input file{}", .details.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    InvalidInput { details: Option<String> },

    /// The structured-sheet backend could not read the workbook
    #[error("spreadsheet parsing error: {message}")]
    SheetParsing { message: String },

    /// The delimited-text backend could not read the text
    #[error("CSV parsing error: {message}")]
    DelimitedParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Export was requested before anything was parsed
    #[error("no data to export")]
    NothingToExport,

    /// Writing the normalized export failed
    #[error("export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a missing-headers error naming the absent headers
    pub fn missing_headers<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingHeaders {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a row-limit error for the given ceiling
    pub fn row_limit_exceeded(limit: usize) -> Self {
        Self::RowLimitExceeded { limit }
    }

    /// Create an invalid-input error with an optional cause description
    pub fn invalid_input(details: Option<String>) -> Self {
        Self::InvalidInput { details }
    }

    /// Create a structured-sheet parsing error
    pub fn sheet_parsing(message: impl Into<String>) -> Self {
        Self::SheetParsing {
            message: message.into(),
        }
    }

    /// Create a delimited-text parsing error
    pub fn delimited_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::DelimitedParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::Export {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this failure is the diagnostic missing-headers condition
    pub fn is_missing_headers(&self) -> bool {
        matches!(self, Self::MissingHeaders { .. })
    }

    /// Classify the error for the boundary layer
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingHeaders { .. }
            | Self::RowLimitExceeded { .. }
            | Self::InvalidInput { .. }
            | Self::SheetParsing { .. }
            | Self::DelimitedParsing { .. }
            | Self::NothingToExport => ErrorCategory::ClientInput,
            Self::Export { .. } | Self::Io { .. } | Self::Configuration { .. } => {
                ErrorCategory::ServerFault
            }
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::DelimitedParsing {
            message: error.to_string(),
            source: Some(error),
        }
    }
}
