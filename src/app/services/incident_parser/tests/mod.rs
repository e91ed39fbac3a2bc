//! Test utilities for the incident parser


use std::collections::HashMap;

/// Header row of a raw issue-tracker export
pub const RAW_EXPORT_HEADER: [&str; 4] =
    ["Issue key", "Custom field (Issue Links)", "Labels", "Comment"];

/// Header row of a preprocessed file
pub const PREPROCESSED_HEADER: [&str; 4] =
    ["Issue Key", "Custom Field (Issue Links)", "Label", "Comment"];

/// Owned header list
pub fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// One raw row keyed by the given headers
pub fn row(headers: &[&str], values: &[&str]) -> HashMap<String, String> {
    headers
        .iter()
        .zip(values)
        .map(|(header, value)| (header.to_string(), value.to_string()))
        .collect()
}

/// A delimited raw export with one data line per entry of `rows`
pub fn raw_export_csv(rows: &[&str]) -> String {
    let mut csv = String::from("Issue key,Custom field (Issue Links),Labels,Comment\n");
    for line in rows {
        csv.push_str(line);
        csv.push('\n');
    }
    csv
}
