//! Incident parsing and normalization engine
//!
//! This module turns a [`RawTable`](crate::app::models::RawTable) from either
//! tabular backend into canonical [`IncidentRecord`](crate::IncidentRecord)s
//! and wraps the whole flow behind [`IncidentParser`].
//!
//! ## Architecture
//!
//! - [`format_detector`] - classify the headers as preprocessed or raw export
//! - [`header_resolver`] - map required headers to the headers actually present
//! - [`field_normalizer`] - pure cleanup rules for keys, labels, links and comments
//! - [`row_assembler`] - apply the per-format rules to every row, dropping empty ones
//! - [`pipeline`] - reader fallback strategy, stats and the error taxonomy
//!
//! ## Usage
//!
//! ```rust
//! use incident_normalizer::IncidentParser;
//! use incident_normalizer::config::ParsingConfig;
//!
//! let csv = "Issue key,Custom field (Issue Links),Labels,Comment\n\
//!            TSC-10,\"Payments, Billing\",bug urgent,\"25/Feb/26 10:06 AM;712020:uuid;text\"\n";
//!
//! let parser = IncidentParser::new(&ParsingConfig::default());
//! let result = parser.parse(csv.as_bytes())?;
//!
//! assert_eq!(result.records[0].label, "bug, urgent");
//! assert_eq!(result.records[0].comment, "text");
//! # Ok::<(), incident_normalizer::Error>(())
//! ```

pub mod field_normalizer;
pub mod format_detector;
pub mod header_resolver;
pub mod pipeline;
pub mod row_assembler;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_normalizer::trim_field;
pub use format_detector::detect_source_format;
pub use header_resolver::{ResolvedColumns, resolve_columns, resolve_headers};
pub use pipeline::IncidentParser;
pub use row_assembler::{FieldRules, RowAssembler};
