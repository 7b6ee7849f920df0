//! Service layer for task creation, lookup and mutation.

use crate::task::{
    domain::{
        AssemblyCount, DEFAULT_CREATOR, NewTask, ParseTaskStatusError, Task, TaskDomainError,
        TaskId, TaskNumber, TaskPatch, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for creating a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    task_number: String,
    comment: Option<String>,
    assembly_count: Option<i64>,
    created_by: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task number.
    #[must_use]
    pub fn new(task_number: impl Into<String>) -> Self {
        Self {
            task_number: task_number.into(),
            comment: None,
            assembly_count: None,
            created_by: None,
        }
    }

    /// Sets the operator comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the assembly count; defaults to one when never called.
    #[must_use]
    pub const fn with_assembly_count(mut self, assembly_count: i64) -> Self {
        self.assembly_count = Some(assembly_count);
        self
    }

    /// Sets the creator identity; defaults to the service's creator.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    comment: Option<String>,
    assembly_count: Option<i64>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            comment: None,
            assembly_count: None,
            status: None,
        }
    }

    /// Replaces the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Replaces the assembly count.
    #[must_use]
    pub const fn with_assembly_count(mut self, assembly_count: i64) -> Self {
        self.assembly_count = Some(assembly_count);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for a status-only update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTaskStatusRequest {
    task_id: TaskId,
    status: String,
}

impl SetTaskStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The supplied status is not one of the known statuses.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The target task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the HTTP status code a transport layer should report.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Domain(_) | Self::InvalidStatus(_) => 400,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => 404,
            Self::Repository(
                TaskRepositoryError::DuplicateTaskNumber(_)
                | TaskRepositoryError::BatchRowRejected { .. },
            ) => 409,
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    default_creator: Arc<str>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            default_creator: Arc::clone(&self.default_creator),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            default_creator: Arc::from(DEFAULT_CREATOR),
        }
    }

    /// Overrides the creator recorded when a request names none.
    #[must_use]
    pub fn with_default_creator(mut self, creator: impl AsRef<str>) -> Self {
        self.default_creator = Arc::from(creator.as_ref());
        self
    }

    /// Returns the repository the service writes through.
    #[must_use]
    pub const fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validates a create request without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task number is blank
    /// or the assembly count is not positive.
    pub fn prepare(&self, request: CreateTaskRequest) -> TaskLifecycleResult<NewTask> {
        let CreateTaskRequest {
            task_number,
            comment,
            assembly_count,
            created_by,
        } = request;

        let mut new_task = NewTask::new(TaskNumber::new(task_number)?, &*self.clock)
            .with_created_by(created_by.unwrap_or_else(|| self.default_creator.to_string()));
        if let Some(count) = assembly_count {
            new_task = new_task.with_assembly_count(AssemblyCount::new(count)?);
        }
        if let Some(text) = comment {
            new_task = new_task.with_comment(text);
        }
        Ok(new_task)
    }

    /// Creates a new task with status `new`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails or
    /// [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::DuplicateTaskNumber`] when the number is taken.
    #[instrument(skip_all, fields(task_number = %request.task_number))]
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = self.prepare(request)?;
        let task = self.repository.insert(&new_task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Stores validated tasks in one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when any task is refused;
    /// nothing is stored in that case.
    pub async fn create_all(&self, tasks: &[NewTask]) -> TaskLifecycleResult<Vec<Task>> {
        let created = self.repository.insert_all(tasks).await?;
        info!(count = created.len(), "task batch created");
        Ok(created)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn get(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Lists tasks newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] when the filter is not a
    /// known status, or [`TaskLifecycleError::Repository`] on lookup failure.
    pub async fn list(&self, status_filter: Option<&str>) -> TaskLifecycleResult<Vec<Task>> {
        let status = status_filter.map(TaskStatus::try_from).transpose()?;
        Ok(self.repository.list(status).await?)
    }

    /// Applies the supplied fields of a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoFieldsProvided`] (wrapped in
    /// [`TaskLifecycleError::Domain`]) before any lookup when nothing was
    /// supplied, [`TaskLifecycleError::InvalidStatus`] for an unknown status,
    /// and [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[instrument(skip_all, fields(task_id = %request.task_id))]
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let UpdateTaskRequest {
            task_id,
            comment,
            assembly_count,
            status,
        } = request;

        let mut patch = TaskPatch::new();
        if let Some(text) = comment {
            patch = patch.with_comment(text);
        }
        if let Some(count) = assembly_count {
            patch = patch.with_assembly_count(AssemblyCount::new(count)?);
        }
        if let Some(raw_status) = status {
            patch = patch.with_status(TaskStatus::try_from(raw_status.as_str())?);
        }
        if patch.is_empty() {
            return Err(TaskDomainError::NoFieldsProvided.into());
        }

        let mut task = self.get(task_id).await?;
        task.apply(patch, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!("task updated");
        Ok(task)
    }

    /// Sets the task status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for an unknown status and
    /// [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[instrument(skip_all, fields(task_id = %request.task_id, status = %request.status))]
    pub async fn set_status(&self, request: SetTaskStatusRequest) -> TaskLifecycleResult<Task> {
        let status = TaskStatus::try_from(request.status.as_str())?;
        let mut task = self.get(request.task_id).await?;
        task.set_status(status, &*self.clock);
        self.repository.update(&task).await?;
        info!(status = %task.status(), "task status changed");
        Ok(task)
    }
}
