//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Unique task number.
    pub task_number: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional comment.
    pub comment: Option<String>,
    /// Assembly count.
    pub assembly_count: i32,
    /// Creator identity.
    pub created_by: String,
    /// Creation timestamp in UTC.
    pub created_at: NaiveDateTime,
    /// Last update timestamp in UTC.
    pub updated_at: NaiveDateTime,
}

/// Insert model for task records; the identifier is assigned by `SQLite`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Unique task number.
    pub task_number: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional comment.
    pub comment: Option<String>,
    /// Assembly count.
    pub assembly_count: i32,
    /// Creator identity.
    pub created_by: String,
    /// Creation timestamp in UTC.
    pub created_at: NaiveDateTime,
    /// Last update timestamp in UTC.
    pub updated_at: NaiveDateTime,
}
