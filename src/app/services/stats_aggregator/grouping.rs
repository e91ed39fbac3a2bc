//! Top-N grouping for display

use crate::app::models::StatBucket;
use crate::constants::OTHER_BUCKET;

use super::aggregator::percentage_of;

/// Keep the first `n` buckets and fold the rest into `Other`
///
/// Input order is preserved, so this expects buckets already sorted by
/// [`aggregate`](super::aggregate). The `Other` percentage is taken against
/// the sum of all counts.
pub fn group_top_n(buckets: &[StatBucket], n: usize) -> Vec<StatBucket> {
    if buckets.len() <= n {
        return buckets.to_vec();
    }

    let total: usize = buckets.iter().map(|bucket| bucket.count).sum();
    let other_count: usize = buckets[n..].iter().map(|bucket| bucket.count).sum();

    let mut grouped = buckets[..n].to_vec();
    grouped.push(StatBucket {
        key: OTHER_BUCKET.to_string(),
        count: other_count,
        percentage: percentage_of(other_count, total),
    });
    grouped
}
