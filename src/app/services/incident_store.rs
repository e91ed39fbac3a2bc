//! Single-slot store for the most recent parse
//!
//! Saving replaces the slot as a whole; readers get an immutable snapshot that
//! stays valid after later saves.

use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::app::models::IncidentRecord;

/// Thread-safe holder of the latest normalized records
#[derive(Debug, Default)]
pub struct IncidentStore {
    latest: RwLock<Option<Arc<[IncidentRecord]>>>,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored records
    pub fn save(&self, records: Vec<IncidentRecord>) {
        let snapshot: Arc<[IncidentRecord]> = records.into();
        debug!("Storing {} records as the latest result", snapshot.len());
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    /// Snapshot of the latest records, if any were saved
    pub fn latest(&self) -> Option<Arc<[IncidentRecord]>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_store() {
        let store = IncidentStore::new();
        assert!(store.latest().is_none());
    }

    #[test]
    fn test_save_replaces_and_snapshots_survive() {
        let store = IncidentStore::new();
        store.save(vec![IncidentRecord::new("TSC-1", "", "", "")]);
        let first = store.latest().unwrap();

        store.save(vec![
            IncidentRecord::new("TSC-2", "", "", ""),
            IncidentRecord::new("TSC-3", "", "", ""),
        ]);

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].issue_key, "TSC-1");
        assert_eq!(store.latest().unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_saves_leave_one_whole_result() {
        let store = Arc::new(IncidentStore::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let records = (0..n + 1)
                        .map(|i| IncidentRecord::new(format!("T{}-{}", n, i), "", "", ""))
                        .collect();
                    store.save(records);
                    store.latest().map(|snapshot| snapshot.len())
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }

        let latest = store.latest().unwrap();
        let prefix = latest[0].issue_key.split('-').next().unwrap().to_string();
        assert!(latest.iter().all(|r| r.issue_key.starts_with(&format!("{}-", prefix))));
    }
}
