//! `SQLite` adapters for task lifecycle persistence.

mod models;
mod repository;
mod schema;

pub use repository::{SCHEMA_SQL, SqliteTaskRepository, TaskSqlitePool};
