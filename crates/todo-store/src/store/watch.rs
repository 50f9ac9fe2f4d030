//! Push-based query subscriptions.
//!
//! A screen subscribes to one query shape and re-renders from the result
//! sets the watcher yields; it never re-queries at the mutation call site.
//! Dropping the watcher is the unsubscribe — the only cancellation
//! primitive the store offers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use todo_core::Task;

use crate::errors::{Result, StoreError};
use crate::sqlite::task_repo::SortDirection;
use crate::store::TaskStore;

/// A mutation notice published on the store's change feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Change {
    /// A task was inserted.
    Inserted(i64),
    /// A task was replaced.
    Updated(i64),
    /// A task was deleted.
    Deleted(i64),
    /// Every task was removed.
    Cleared,
}

/// The query shapes a subscription can watch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskQuery {
    /// All tasks in insertion order.
    All,
    /// All tasks ordered by priority value.
    ByPriority(SortDirection),
    /// Tasks whose title contains the pattern (case-sensitive substring;
    /// empty pattern matches everything).
    TitleContains(String),
}

/// Live subscription to one query.
///
/// The first [`next`](TaskWatcher::next) call yields the current snapshot;
/// each later call waits for a mutation and yields a freshly computed
/// result set. Snapshots are eventually consistent: a watcher that lags
/// behind the change feed collapses the missed notices into one fresh
/// recomputation instead of replaying them.
pub struct TaskWatcher {
    store: Arc<TaskStore>,
    query: TaskQuery,
    rx: broadcast::Receiver<Change>,
    primed: bool,
}

impl TaskWatcher {
    pub(crate) fn new(
        store: Arc<TaskStore>,
        query: TaskQuery,
        rx: broadcast::Receiver<Change>,
    ) -> Self {
        Self {
            store,
            query,
            rx,
            primed: false,
        }
    }

    /// The query this watcher recomputes.
    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Wait for the next result set.
    pub async fn next(&mut self) -> Result<Vec<Task>> {
        if !self.primed {
            self.primed = true;
            return self.store.query(&self.query);
        }
        match self.rx.recv().await {
            Ok(change) => {
                trace!(?change, "recomputing watched query");
                self.store.query(&self.query)
            }
            // Missed notices collapse into one fresh snapshot.
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                trace!(missed, "watcher lagged, recomputing from current state");
                self.store.query(&self.query)
            }
            // Unreachable while the watcher holds the store alive, but the
            // variant must be covered.
            Err(broadcast::error::RecvError::Closed) => {
                Err(StoreError::Internal("change feed closed".into()))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use todo_core::Priority;

    fn setup() -> Arc<TaskStore> {
        Arc::new(TaskStore::open_in_memory().unwrap())
    }

    fn task(title: &str, priority: Priority) -> Task {
        Task::new(title, format!("{title} notes"), priority)
    }

    #[tokio::test]
    async fn first_next_yields_current_snapshot() {
        let store = setup();
        store.insert(&task("a", Priority::Low)).unwrap();
        store.insert(&task("b", Priority::High)).unwrap();

        let mut watcher = store.subscribe(TaskQuery::All);
        let snapshot = watcher.next().await.unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_of_empty_store_is_empty() {
        let store = setup();
        let mut watcher = store.subscribe(TaskQuery::All);
        assert!(watcher.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutation_pushes_fresh_result_set() {
        let store = setup();
        let mut watcher = store.subscribe(TaskQuery::All);
        assert!(watcher.next().await.unwrap().is_empty());

        let inserted = store.insert(&task("a", Priority::Low)).unwrap();
        let result = watcher.next().await.unwrap();
        assert_eq!(result, vec![inserted]);
    }

    #[tokio::test]
    async fn each_mutation_yields_one_result_set() {
        let store = setup();
        let mut watcher = store.subscribe(TaskQuery::All);
        let _ = watcher.next().await.unwrap();

        // Result sets recompute against current state, so two buffered
        // notices yield the same (current) set twice.
        let a = store.insert(&task("a", Priority::Low)).unwrap();
        let b = store.insert(&task("b", Priority::High)).unwrap();

        let first = watcher.next().await.unwrap();
        let second = watcher.next().await.unwrap();
        assert_eq!(first, vec![a.clone(), b.clone()]);
        assert_eq!(second, vec![a, b]);
    }

    #[tokio::test]
    async fn search_watcher_tracks_matching_subset() {
        let store = setup();
        let mut watcher = store.subscribe(TaskQuery::TitleContains("call".into()));
        assert!(watcher.next().await.unwrap().is_empty());

        let matching = store.insert(&task("call the bank", Priority::Medium)).unwrap();
        assert_eq!(watcher.next().await.unwrap(), vec![matching.clone()]);

        store.insert(&task("groceries", Priority::Low)).unwrap();
        assert_eq!(watcher.next().await.unwrap(), vec![matching]);
    }

    #[tokio::test]
    async fn priority_watcher_orders_descending() {
        let store = setup();
        let a = store.insert(&task("A", Priority::Low)).unwrap();
        let b = store.insert(&task("B", Priority::High)).unwrap();
        let c = store.insert(&task("C", Priority::Medium)).unwrap();

        let mut watcher = store.subscribe(TaskQuery::ByPriority(SortDirection::Descending));
        assert_eq!(watcher.next().await.unwrap(), vec![b, c, a]);
    }

    #[tokio::test]
    async fn delete_all_pushes_empty_result_set() {
        let store = setup();
        store.insert(&task("a", Priority::Low)).unwrap();

        let mut watcher = store.subscribe(TaskQuery::All);
        assert_eq!(watcher.next().await.unwrap().len(), 1);

        store.delete_all().unwrap();
        assert!(watcher.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lagged_watcher_recomputes_from_current_state() {
        let store = setup();
        let mut watcher = store.subscribe(TaskQuery::All);
        let _ = watcher.next().await.unwrap();

        // Overflow the change feed while the watcher is not draining it.
        for i in 0..100 {
            store.insert(&task(&format!("t{i}"), Priority::Low)).unwrap();
        }

        let result = watcher.next().await.unwrap();
        assert_eq!(result.len(), 100);
    }

    #[tokio::test]
    async fn dropping_watcher_unsubscribes() {
        let store = setup();
        let watcher = store.subscribe(TaskQuery::All);
        let other = store.subscribe(TaskQuery::All);
        assert_eq!(store.subscriber_count(), 2);

        drop(watcher);
        assert_eq!(store.subscriber_count(), 1);
        drop(other);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn independent_watchers_see_the_same_mutation() {
        let store = setup();
        let mut list = store.subscribe(TaskQuery::All);
        let mut sorted = store.subscribe(TaskQuery::ByPriority(SortDirection::Ascending));
        let _ = list.next().await.unwrap();
        let _ = sorted.next().await.unwrap();

        let inserted = store.insert(&task("a", Priority::Medium)).unwrap();
        assert_eq!(list.next().await.unwrap(), vec![inserted.clone()]);
        assert_eq!(sorted.next().await.unwrap(), vec![inserted]);
    }

    #[test]
    fn change_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Change::Inserted(3)).unwrap();
        assert_eq!(json, r#"{"kind":"inserted","id":3}"#);
        let json = serde_json::to_string(&Change::Cleared).unwrap();
        assert_eq!(json, r#"{"kind":"cleared"}"#);
    }
}
