//! Task aggregate root and related task lifecycle types.

use super::{AssemblyCount, ParseTaskStatusError, TaskDomainError, TaskId, TaskNumber};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity recorded as the creator when the caller does not name one.
pub const DEFAULT_CREATOR: &str = "Инженер ПДО";

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been dispatched but work has not started.
    #[default]
    New,
    /// Task is being assembled.
    InProgress,
    /// Task work is temporarily paused.
    Paused,
    /// Task has been completed.
    Done,
    /// Task has been withdrawn.
    Cancelled,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Paused,
        Self::Done,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "done" | "completed" => Ok(Self::Done),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task that has been validated but not yet assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    task_number: TaskNumber,
    status: TaskStatus,
    comment: Option<String>,
    assembly_count: AssemblyCount,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a pending task with default status, count and creator.
    #[must_use]
    pub fn new(task_number: TaskNumber, clock: &impl Clock) -> Self {
        Self {
            task_number,
            status: TaskStatus::New,
            comment: None,
            assembly_count: AssemblyCount::DEFAULT,
            created_by: DEFAULT_CREATOR.to_owned(),
            created_at: clock.utc(),
        }
    }

    /// Sets the operator comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the assembly count.
    #[must_use]
    pub const fn with_assembly_count(mut self, assembly_count: AssemblyCount) -> Self {
        self.assembly_count = assembly_count;
        self
    }

    /// Sets the creator identity.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Returns the task number.
    #[must_use]
    pub const fn task_number(&self) -> &TaskNumber {
        &self.task_number
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the assembly count.
    #[must_use]
    pub const fn assembly_count(&self) -> AssemblyCount {
        self.assembly_count
    }

    /// Returns the creator identity.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materializes the task under a repository-issued identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            task_number: self.task_number,
            status: self.status,
            comment: self.comment,
            assembly_count: self.assembly_count,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Set of fields supplied to a partial update.
///
/// Absent fields are left untouched on the task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    comment: Option<String>,
    assembly_count: Option<AssemblyCount>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Replaces the assembly count.
    #[must_use]
    pub const fn with_assembly_count(mut self, assembly_count: AssemblyCount) -> Self {
        self.assembly_count = Some(assembly_count);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.comment.is_none() && self.assembly_count.is_none() && self.status.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    task_number: TaskNumber,
    status: TaskStatus,
    comment: Option<String>,
    assembly_count: AssemblyCount,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task number.
    pub task_number: TaskNumber,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted comment, if any.
    pub comment: Option<String>,
    /// Persisted assembly count.
    pub assembly_count: AssemblyCount,
    /// Persisted creator identity.
    pub created_by: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_number: data.task_number,
            status: data.status,
            comment: data.comment,
            assembly_count: data.assembly_count,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task number.
    #[must_use]
    pub const fn task_number(&self) -> &TaskNumber {
        &self.task_number
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the assembly count.
    #[must_use]
    pub const fn assembly_count(&self) -> AssemblyCount {
        self.assembly_count
    }

    /// Returns the creator identity.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the supplied fields of a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoFieldsProvided`] when the patch is empty;
    /// the task is left untouched in that case.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if patch.is_empty() {
            return Err(TaskDomainError::NoFieldsProvided);
        }

        let TaskPatch {
            comment,
            assembly_count,
            status,
        } = patch;

        if let Some(new_comment) = comment {
            self.comment = Some(new_comment);
        }
        if let Some(new_count) = assembly_count {
            self.assembly_count = new_count;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        self.touch(clock);
        Ok(())
    }

    /// Sets the lifecycle status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
