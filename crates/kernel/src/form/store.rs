//! Append-only submission logs, one per form.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::types::Submission;

/// Per-form submission logs.
///
/// Appends to the same form are serialized by that form's lock. Readers
/// take a snapshot and never observe a partial append.
#[derive(Debug, Default)]
pub struct SubmissionStore {
    logs: DashMap<String, Arc<RwLock<Vec<Submission>>>>,
}

impl SubmissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submission to the end of a form's log, creating the log on first use.
    pub fn append(&self, form_id: &str, submission: Submission) {
        // Clone the handle so the map shard is released before taking the form lock.
        let log = self
            .logs
            .entry(form_id.to_string())
            .or_default()
            .value()
            .clone();
        log.write().push(submission);
    }

    /// Snapshot of a form's log in append order. Empty when nothing was submitted.
    pub fn list_by_form(&self, form_id: &str) -> Vec<Submission> {
        let Some(log) = self.logs.get(form_id).map(|entry| entry.value().clone()) else {
            return Vec::new();
        };
        log.read().clone()
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::form::SubmissionValue;

    fn submission(form_id: &str, id: &str) -> Submission {
        Submission {
            id: id.to_string(),
            form_id: form_id.to_string(),
            created_at: Utc::now(),
            values: vec![SubmissionValue::new("f", id)],
        }
    }

    #[test]
    fn test_unknown_form_is_empty() {
        let store = SubmissionStore::new();
        assert!(store.list_by_form("nothing").is_empty());
    }

    #[test]
    fn test_append_order_and_isolation() {
        let store = SubmissionStore::new();
        store.append("a", submission("a", "1"));
        store.append("b", submission("b", "x"));
        store.append("a", submission("a", "2"));

        let ids: Vec<_> = store.list_by_form("a").into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(store.list_by_form("b").len(), 1);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let store = SubmissionStore::new();
        store.append("a", submission("a", "1"));
        let snapshot = store.list_by_form("a");
        store.append("a", submission("a", "2"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list_by_form("a").len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let store = SubmissionStore::new();
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for n in 0..250 {
                        store.append("shared", submission("shared", &format!("{worker}-{n}")));
                    }
                });
            }
        });

        let log = store.list_by_form("shared");
        assert_eq!(log.len(), 2000);
        let ids: std::collections::HashSet<_> = log.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 2000);
    }
}
