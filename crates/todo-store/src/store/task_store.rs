//! High-level `TaskStore` API.
//!
//! Composes the connection pool and [`TaskRepo`] into the operation set a
//! screen calls. All mutations are serialized through one in-process write
//! lock (single logical writer), and each successful mutation publishes a
//! [`Change`] on the broadcast feed that drives query subscriptions.
//!
//! INVARIANT: a change notification is published only after the mutation
//! has committed, while still holding the write lock — subscribers observe
//! notifications in mutation order and recompute against the new state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use todo_core::Task;

use crate::errors::Result;
use crate::sqlite::connection::{self, ConnectionConfig, ConnectionPool, PooledConnection};
use crate::sqlite::migrations::run_migrations;
use crate::sqlite::task_repo::{SortDirection, TaskRepo};
use crate::store::watch::{Change, TaskQuery, TaskWatcher};

/// Capacity of the broadcast change feed. A subscriber that falls further
/// behind than this sees a lag and recomputes from the current state.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// High-level task store wrapping a connection pool.
///
/// Query methods are pass-through to [`TaskRepo`] and add no business
/// rules; validation happens upstream in `todo-core` before a task ever
/// reaches this type.
pub struct TaskStore {
    pool: ConnectionPool,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<Change>,
}

impl TaskStore {
    /// Create a store over an existing pool. The caller has already run
    /// migrations.
    pub fn new(pool: ConnectionPool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            pool,
            write_lock: Mutex::new(()),
            changes,
        }
    }

    /// Open a file-backed store and run pending migrations.
    pub fn open_file(path: &str, config: &ConnectionConfig) -> Result<Self> {
        let pool = connection::new_file(path, config)?;
        {
            let conn = pool.get()?;
            let _ = run_migrations(&conn)?;
        }
        Ok(Self::new(pool))
    }

    /// Open an in-memory store and run migrations (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let pool = connection::new_in_memory(&ConnectionConfig::default())?;
        {
            let conn = pool.get()?;
            let _ = run_migrations(&conn)?;
        }
        Ok(Self::new(pool))
    }

    /// Get a connection from the pool.
    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    fn publish(&self, change: Change) {
        // send fails only when there are no subscribers
        let _ = self.changes.send(change);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Persist a task, assigning an identity when `task.id == 0`.
    ///
    /// Title and description are expected non-empty — enforced upstream by
    /// `todo_core::validate` before the store is called.
    #[instrument(skip(self, task))]
    pub fn insert(&self, task: &Task) -> Result<Task> {
        let _guard = self.write_lock.lock();
        let conn = self.conn()?;
        let inserted = TaskRepo::insert(&conn, task)?;
        debug!(id = inserted.id, "task inserted");
        self.publish(Change::Inserted(inserted.id));
        Ok(inserted)
    }

    /// Replace the task with `task.id` wholesale.
    ///
    /// Returns `Ok(false)` (and publishes nothing) when the id does not
    /// exist — a silent no-op by contract.
    #[instrument(skip(self, task), fields(id = task.id))]
    pub fn update(&self, task: &Task) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let conn = self.conn()?;
        let changed = TaskRepo::update(&conn, task)?;
        if changed {
            debug!(id = task.id, "task updated");
            self.publish(Change::Updated(task.id));
        }
        Ok(changed)
    }

    /// Delete the given task by its id.
    ///
    /// Returns `Ok(false)` (and publishes nothing) when the id does not
    /// exist.
    #[instrument(skip(self, task), fields(id = task.id))]
    pub fn delete(&self, task: &Task) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let conn = self.conn()?;
        let deleted = TaskRepo::delete(&conn, task.id)?;
        if deleted {
            debug!(id = task.id, "task deleted");
            self.publish(Change::Deleted(task.id));
        }
        Ok(deleted)
    }

    /// Delete every task. Returns the number of rows removed.
    #[instrument(skip(self))]
    pub fn delete_all(&self) -> Result<usize> {
        let _guard = self.write_lock.lock();
        let conn = self.conn()?;
        let removed = TaskRepo::delete_all(&conn)?;
        if removed > 0 {
            debug!(removed, "all tasks deleted");
            self.publish(Change::Cleared);
        }
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// All tasks in insertion order.
    pub fn all(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        TaskRepo::list_all(&conn)
    }

    /// All tasks, low-priority first.
    pub fn by_priority_ascending(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        TaskRepo::list_by_priority(&conn, SortDirection::Ascending)
    }

    /// All tasks, high-priority first.
    pub fn by_priority_descending(&self) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        TaskRepo::list_by_priority(&conn, SortDirection::Descending)
    }

    /// Tasks whose title contains `pattern` (case-sensitive substring).
    pub fn search(&self, pattern: &str) -> Result<Vec<Task>> {
        let conn = self.conn()?;
        TaskRepo::search(&conn, pattern)
    }

    /// Get a task by id.
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn()?;
        TaskRepo::get_by_id(&conn, id)
    }

    /// Count all tasks.
    pub fn count(&self) -> Result<i64> {
        let conn = self.conn()?;
        TaskRepo::count(&conn)
    }

    /// Whether the store holds no tasks (drives the empty-list placeholder).
    pub fn is_empty(&self) -> Result<bool> {
        let conn = self.conn()?;
        TaskRepo::is_empty(&conn)
    }

    /// Run a [`TaskQuery`] once.
    pub fn query(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        match query {
            TaskQuery::All => self.all(),
            TaskQuery::ByPriority(SortDirection::Ascending) => self.by_priority_ascending(),
            TaskQuery::ByPriority(SortDirection::Descending) => self.by_priority_descending(),
            TaskQuery::TitleContains(pattern) => self.search(pattern),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────

    /// Subscribe to a query. The watcher yields the current snapshot first,
    /// then a fresh result set per mutation, until dropped.
    pub fn subscribe(self: &Arc<Self>, query: TaskQuery) -> TaskWatcher {
        TaskWatcher::new(Arc::clone(self), query, self.changes.subscribe())
    }

    /// Subscribe to the raw change feed (no query recomputation).
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }

    /// Number of live change-feed subscribers (watchers included).
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
