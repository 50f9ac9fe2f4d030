//! Task repository — CRUD and query shaping for the `todos` table.
//!
//! The storage gateway of the system: every ordering and matching rule the
//! store exposes is decided here, in SQL. Stateless — every method takes
//! `&Connection`.

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

use todo_core::{Priority, Task};

use crate::errors::Result;

/// Sort direction for priority-ordered listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Non-decreasing priority value: low-priority tasks first.
    Ascending,
    /// Exact reverse: high-priority tasks first.
    Descending,
}

/// Task repository — stateless, every method takes `&Connection`.
pub struct TaskRepo;

const SELECT_COLUMNS: &str = "SELECT id, title, description, priority FROM todos";

impl TaskRepo {
    /// Insert a task. Returns the persisted row with its assigned id.
    ///
    /// A task with `id == 0` gets a fresh identity from the store. A
    /// non-zero id is written as-is — that is how an undo flow restores a
    /// just-deleted task under its original identity.
    pub fn insert(conn: &Connection, task: &Task) -> Result<Task> {
        let id = if task.id == 0 {
            let _ = conn.execute(
                "INSERT INTO todos (title, description, priority) VALUES (?1, ?2, ?3)",
                params![task.title, task.description, task.priority.as_str()],
            )?;
            conn.last_insert_rowid()
        } else {
            let _ = conn.execute(
                "INSERT INTO todos (id, title, description, priority) VALUES (?1, ?2, ?3, ?4)",
                params![task.id, task.title, task.description, task.priority.as_str()],
            )?;
            task.id
        };
        Ok(task.clone().with_id(id))
    }

    /// Replace the task with the given id wholesale.
    ///
    /// Returns `false` when no row has that id (silent no-op by contract).
    pub fn update(conn: &Connection, task: &Task) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE todos SET title = ?1, description = ?2, priority = ?3 WHERE id = ?4",
            params![task.title, task.description, task.priority.as_str(), task.id],
        )?;
        Ok(changed > 0)
    }

    /// Delete the task with the given id. Returns `false` when absent.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Delete every task. Returns the number of rows removed.
    pub fn delete_all(conn: &Connection) -> Result<usize> {
        let removed = conn.execute("DELETE FROM todos", [])?;
        Ok(removed)
    }

    /// Get a task by id.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// List all tasks in insertion order.
    pub fn list_all(conn: &Connection) -> Result<Vec<Task>> {
        Self::collect(conn, &format!("{SELECT_COLUMNS} ORDER BY id ASC"), &[])
    }

    /// List all tasks ordered by priority value.
    ///
    /// Ties keep insertion order in both directions (stable sort via the
    /// id secondary key).
    pub fn list_by_priority(conn: &Connection, direction: SortDirection) -> Result<Vec<Task>> {
        let order = match direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        let sql = format!(
            "{SELECT_COLUMNS} \
             ORDER BY CASE priority \
                 WHEN 'LOW' THEN 0 WHEN 'MEDIUM' THEN 1 WHEN 'HIGH' THEN 2 \
             END {order}, id ASC"
        );
        Self::collect(conn, &sql, &[])
    }

    /// List tasks whose title contains `pattern` as a case-sensitive
    /// substring, in insertion order. The empty pattern matches everything.
    ///
    /// Uses `instr` rather than `LIKE`: SQLite `LIKE` is case-insensitive
    /// for ASCII, which would break the search contract.
    pub fn search(conn: &Connection, pattern: &str) -> Result<Vec<Task>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE ?1 = '' OR instr(title, ?1) > 0 ORDER BY id ASC"
        );
        Self::collect(conn, &sql, &[&pattern as &dyn rusqlite::types::ToSql])
    }

    /// Count all tasks.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Whether the table holds no tasks.
    pub fn is_empty(conn: &Connection) -> Result<bool> {
        Ok(Self::count(conn)? == 0)
    }

    fn collect(
        conn: &Connection,
        sql: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(sql)?;
        let tasks = stmt
            .query_map(params, task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

/// Map a `todos` row to a [`Task`].
///
/// A priority value outside the three storage names can only mean a
/// corrupted row (the CHECK constraint forbids it on write), so it surfaces
/// as a conversion failure rather than a fallback.
fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(3)?;
    let priority = priority.parse::<Priority>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
