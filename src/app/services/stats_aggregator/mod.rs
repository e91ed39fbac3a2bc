//! Frequency statistics over normalized records
//!
//! - [`aggregator`] - per-field bucket counts and rounded percentages
//! - [`grouping`] - folding a long tail of buckets into a single `Other` bucket

pub mod aggregator;
pub mod grouping;

#[cfg(test)]
pub mod tests;

pub use aggregator::{aggregate, build_stats, round_to_one_decimal};
pub use grouping::group_top_n;
