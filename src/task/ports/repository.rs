//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId, TaskNumber, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTaskNumber`] when the task
    /// number is already taken. The store is unchanged on failure.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Stores a batch of new tasks atomically, preserving input order.
    ///
    /// Either every task is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::BatchRowRejected`] naming the
    /// zero-based position of the first task the store refused.
    async fn insert_all(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists the mutable fields of an existing task (comment, assembly
    /// count, status, `updated_at`).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks newest first, optionally restricted to one status.
    ///
    /// Ties on `created_at` are broken by descending identifier.
    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the number of stored tasks.
    async fn count(&self) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same task number already exists.
    #[error("duplicate task number: {0}")]
    DuplicateTaskNumber(TaskNumber),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A batch insert was refused at the given position; nothing was stored.
    #[error("batch rejected at position {index}: {source}")]
    BatchRowRejected {
        /// Zero-based position within the submitted batch.
        index: usize,
        /// Failure reported for that position.
        #[source]
        source: Box<TaskRepositoryError>,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    #[must_use]
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a failure for a position inside a batch insert.
    #[must_use]
    pub fn batch_row(index: usize, source: Self) -> Self {
        Self::BatchRowRejected {
            index,
            source: Box::new(source),
        }
    }
}
