//! SQLite persistence layer: connection pooling, migrations, and the
//! stateless task repository.

pub mod connection;
pub mod migrations;
pub mod task_repo;
