//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, SetTaskStatusRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, UpdateTaskRequest,
};
