//! # todo-core
//!
//! Foundation types for the todo workspace.
//!
//! This crate provides the shared vocabulary the storage crate and any
//! presentation layer depend on:
//!
//! - **Task**: [`task::Task`] — the persisted to-do record
//! - **Priority**: [`priority::Priority`] ordered enum with storage-name
//!   and display-label round-trips
//! - **Validation**: [`validate::verify`] and [`validate::task_from_input`]
//!   pure functions (no shared state between screens)
//! - **Errors**: [`errors::TodoError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] for `tracing` setup
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `todo-store`.

#![deny(unsafe_code)]

pub mod errors;
pub mod logging;
pub mod priority;
pub mod task;
pub mod validate;

pub use errors::{Result, TodoError};
pub use priority::Priority;
pub use task::Task;
