use super::*;
use crate::app::models::StatField;
use crate::app::services::stats_aggregator::{aggregate, group_top_n};

#[test]
fn test_short_lists_are_unchanged() {
    let buckets = vec![bucket("bug", 2, 66.7), bucket("urgent", 1, 33.3)];
    assert_eq!(group_top_n(&buckets, 2), buckets);
    assert_eq!(group_top_n(&buckets, 5), buckets);
}

#[test]
fn test_tail_folds_into_other() {
    let records = records_with_labels(&["a", "a", "a", "b", "b", "c", "d"]);
    let buckets = aggregate(&records, StatField::Label);

    let grouped = group_top_n(&buckets, 2);

    assert_eq!(grouped.len(), 3);
    assert_eq!(grouped[0].key, "a");
    assert_eq!(grouped[1].key, "b");
    assert_eq!(grouped[2], bucket("Other", 2, 28.6));
}

#[test]
fn test_zero_keeps_only_other() {
    let buckets = vec![bucket("bug", 1, 50.0), bucket("ops", 1, 50.0)];

    let grouped = group_top_n(&buckets, 0);

    assert_eq!(grouped, vec![bucket("Other", 2, 100.0)]);
}
