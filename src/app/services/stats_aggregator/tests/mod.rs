//! Test utilities for the stats aggregator

mod grouping_tests;

use crate::app::models::{IncidentRecord, StatBucket};

/// Records carrying only the given labels
pub fn records_with_labels(labels: &[&str]) -> Vec<IncidentRecord> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| IncidentRecord::new(format!("TSC-{}", i + 1), "", *label, ""))
        .collect()
}

pub fn bucket(key: &str, count: usize, percentage: f64) -> StatBucket {
    StatBucket {
        key: key.to_string(),
        count,
        percentage,
    }
}
