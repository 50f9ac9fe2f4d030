//! # todo-store
//!
//! SQLite-backed task store with push-based query subscriptions.
//!
//! Layering, bottom-up:
//!
//! - [`sqlite::connection`] — `r2d2` connection pool with WAL pragmas
//! - [`sqlite::migrations`] — embedded, versioned schema migrations
//! - [`sqlite::task_repo::TaskRepo`] — stateless CRUD and query shaping
//!   over the `todos` table (the storage gateway)
//! - [`store::TaskStore`] — pool-owning façade with a single global writer
//!   and a broadcast change feed (the task repository)
//! - [`store::watch::TaskWatcher`] — subscription handle that yields a
//!   fresh result set per mutation until dropped
//!
//! ## Crate Position
//!
//! Depends on `todo-core` for the `Task`/`Priority` vocabulary. Any
//! presentation layer sits on top of [`store::TaskStore`].

#![deny(unsafe_code)]

pub mod errors;
pub mod sqlite;
pub mod store;

pub use errors::{Result, StoreError};
pub use sqlite::connection::{ConnectionConfig, ConnectionPool, PooledConnection};
pub use sqlite::migrations::run_migrations;
pub use sqlite::task_repo::{SortDirection, TaskRepo};
pub use store::TaskStore;
pub use store::watch::{Change, TaskQuery, TaskWatcher};
