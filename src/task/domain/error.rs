//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task number is empty after trimming.
    #[error("task number must not be empty")]
    EmptyTaskNumber,

    /// The assembly count is outside the accepted range.
    #[error("invalid assembly count {0}, expected a positive integer")]
    InvalidAssemblyCount(i64),

    /// A partial update carried no fields to apply.
    #[error("no fields to update")]
    NoFieldsProvided,
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
