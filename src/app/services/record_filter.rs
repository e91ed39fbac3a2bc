//! Record filtering for display
//!
//! Filters combine with AND. Empty filter lists and blank queries match
//! everything. Issue-link and label filters compare against the same keys the
//! stats tables use, so a bucket key can be fed straight back as a filter.

use crate::app::models::{IncidentRecord, StatField};
use crate::app::services::incident_parser::trim_field;
use crate::constants::EMPTY_BUCKET;

/// Selection criteria over normalized records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Accepted issue-link bucket keys
    pub issue_links: Vec<String>,
    /// Accepted label bucket keys
    pub labels: Vec<String>,
    /// Case-insensitive substring of the issue key
    pub issue_key_query: String,
    /// Case-insensitive substring of the comment
    pub comment_query: String,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue_links(mut self, issue_links: Vec<String>) -> Self {
        self.issue_links = issue_links;
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_issue_key_query(mut self, query: impl Into<String>) -> Self {
        self.issue_key_query = query.into();
        self
    }

    pub fn with_comment_query(mut self, query: impl Into<String>) -> Self {
        self.comment_query = query.into();
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.issue_links.is_empty()
            && self.labels.is_empty()
            && self.issue_key_query.trim().is_empty()
            && self.comment_query.trim().is_empty()
    }

    /// Whether a single record passes every criterion
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        matches_any(&self.issue_links, StatField::IssueLinks, record)
            && matches_any(&self.labels, StatField::Label, record)
            && contains_query(&record.issue_key, &self.issue_key_query)
            && contains_query(&record.comment, &self.comment_query)
    }

    /// Records that pass, in their original order
    pub fn apply<'a>(&self, records: &'a [IncidentRecord]) -> Vec<&'a IncidentRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// The value a record is filtered and bucketed under
pub fn filter_value(record: &IncidentRecord, field: StatField) -> &str {
    let value = trim_field(field.select(record));
    if value.is_empty() { EMPTY_BUCKET } else { value }
}

fn matches_any(accepted: &[String], field: StatField, record: &IncidentRecord) -> bool {
    if accepted.is_empty() {
        return true;
    }
    let value = filter_value(record, field);
    accepted.iter().any(|candidate| candidate == value)
}

fn contains_query(value: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || value.to_lowercase().contains(&query)
}
