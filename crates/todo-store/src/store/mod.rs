//! The pool-owning store façade and its push-based query subscriptions.

pub mod watch;

mod task_store;

pub use task_store::TaskStore;
