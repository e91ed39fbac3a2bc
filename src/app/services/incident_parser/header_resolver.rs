//! Required header resolution
//!
//! Headers are compared on a key that is BOM-stripped, trimmed and
//! lower-cased. When two headers share a key the first one wins.

use std::collections::HashMap;
use tracing::debug;

use super::field_normalizer::trim_field;
use crate::app::models::SourceFormat;
use crate::app::services::tabular_reader::strip_bom;
use crate::{Error, Result};

/// Actual header text to read for each canonical field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub issue_key: String,
    pub issue_links: String,
    pub label: String,
    pub comment: String,
}

/// Comparison key used to match headers
pub fn comparison_key(header: &str) -> String {
    trim_field(&strip_bom(header)).to_lowercase()
}

/// Map each required header to the header present in the file
///
/// The mapped value is the header exactly as it appears in the table, so it
/// can be used directly for cell lookups. Fails naming only the required
/// headers that have no match.
pub fn resolve_headers<S: AsRef<str>>(
    headers: &[S],
    required: &[&str],
) -> Result<HashMap<String, String>> {
    let mut by_key: HashMap<String, &str> = HashMap::new();
    for header in headers {
        let header = header.as_ref();
        let key = comparison_key(header);
        if !key.is_empty() {
            by_key.entry(key).or_insert(header);
        }
    }

    let mut missing = Vec::new();
    let mut resolved = HashMap::with_capacity(required.len());

    for &name in required {
        match by_key.get(&comparison_key(name)) {
            Some(actual) => {
                resolved.insert(name.to_string(), actual.to_string());
            }
            None => missing.push(name),
        }
    }

    if !missing.is_empty() {
        debug!("Unresolved required headers: {:?}", missing);
        return Err(Error::missing_headers(missing));
    }

    Ok(resolved)
}

/// Resolve the four canonical columns for a detected layout
pub fn resolve_columns<S: AsRef<str>>(
    headers: &[S],
    format: SourceFormat,
) -> Result<ResolvedColumns> {
    let [issue_key, issue_links, label, comment] = format.required_headers();
    let mut resolved = resolve_headers(headers, &[issue_key, issue_links, label, comment])?;

    let mut take = |name: &str| resolved.remove(name).unwrap_or_default();
    Ok(ResolvedColumns {
        issue_key: take(issue_key),
        issue_links: take(issue_links),
        label: take(label),
        comment: take(comment),
    })
}
