//! Domain model for task lifecycle management.
//!
//! The task domain models dispatch task creation, partial updates and
//! status changes while keeping all infrastructure concerns outside of the
//! domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{AssemblyCount, TaskId, TaskNumber};
pub use task::{DEFAULT_CREATOR, NewTask, PersistedTaskData, Task, TaskPatch, TaskStatus};
