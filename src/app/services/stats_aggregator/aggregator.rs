//! Bucket counting
//!
//! Records are bucketed by the trimmed value of one field, with blank values
//! collected under `(empty)`. Buckets are ordered by count (descending), then
//! case-insensitively by key, then by the raw key.

use std::collections::HashMap;
use tracing::debug;

use crate::app::models::{IncidentRecord, StatBucket, StatField, Stats};
use crate::app::services::incident_parser::trim_field;
use crate::constants::EMPTY_BUCKET;

/// Count the values of `field` across `records`
pub fn aggregate(records: &[IncidentRecord], field: StatField) -> Vec<StatBucket> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let value = trim_field(field.select(record));
        let key = if value.is_empty() { EMPTY_BUCKET } else { value };
        *counts.entry(key).or_insert(0) += 1;
    }

    let total = records.len();
    let mut buckets: Vec<StatBucket> = counts
        .into_iter()
        .map(|(key, count)| StatBucket {
            key: key.to_string(),
            count,
            percentage: percentage_of(count, total),
        })
        .collect();

    buckets.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.key.to_lowercase().cmp(&b.key.to_lowercase()))
            .then_with(|| a.key.cmp(&b.key))
    });

    debug!("Built {} buckets for {:?}", buckets.len(), field);
    buckets
}

/// Frequency tables for issue links and labels
pub fn build_stats(records: &[IncidentRecord]) -> Stats {
    Stats {
        by_issue_links: aggregate(records, StatField::IssueLinks),
        by_label: aggregate(records, StatField::Label),
    }
}

/// `count / total * 100`, rounded half-up to one decimal; zero when `total` is zero
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_one_decimal(count as f64 / total as f64 * 100.0)
}

/// Round half-up to one decimal place
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
