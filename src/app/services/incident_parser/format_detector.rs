//! Source layout detection
//!
//! Looks for the issue-key marker header of each known layout. Comparison is
//! exact-case after trimming and BOM removal.

use tracing::debug;

use super::field_normalizer::trim_field;
use crate::app::models::SourceFormat;
use crate::app::services::tabular_reader::strip_bom;
use crate::{Error, Result};

/// Classify a header list as one of the two known layouts
///
/// The raw-export marker wins when both markers are present.
pub fn detect_source_format<S: AsRef<str>>(headers: &[S]) -> Result<SourceFormat> {
    let mut has_raw_issue_key = false;
    let mut has_preprocessed_issue_key = false;

    for header in headers {
        let stripped = strip_bom(header.as_ref());
        let cleaned = trim_field(&stripped);

        if cleaned == SourceFormat::RawExport.issue_key_marker() {
            has_raw_issue_key = true;
        }
        if cleaned == SourceFormat::Preprocessed.issue_key_marker() {
            has_preprocessed_issue_key = true;
        }
    }

    let format = if has_raw_issue_key {
        SourceFormat::RawExport
    } else if has_preprocessed_issue_key {
        SourceFormat::Preprocessed
    } else {
        return Err(Error::missing_headers([
            SourceFormat::RawExport.issue_key_marker(),
            SourceFormat::Preprocessed.issue_key_marker(),
        ]));
    };

    debug!("Detected source format {}", format);
    Ok(format)
}
