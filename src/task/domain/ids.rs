//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps an identifier issued by a task repository.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operator-facing task number, unique across all tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNumber(String);

impl TaskNumber {
    /// Creates a validated task number.
    ///
    /// Surrounding whitespace is removed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskNumber`] when nothing remains
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the task number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of assemblies a task covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssemblyCount(u32);

impl AssemblyCount {
    /// Count applied when the caller does not supply one.
    pub const DEFAULT: Self = Self(1);

    /// Creates a validated assembly count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidAssemblyCount`] when the value is
    /// below one or exceeds the largest value the `INTEGER` column stores
    /// (`i32::MAX`).
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        i32::try_from(value)
            .ok()
            .filter(|count| count.is_positive())
            .and_then(|count| u32::try_from(count).ok())
            .map(Self)
            .ok_or(TaskDomainError::InvalidAssemblyCount(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for AssemblyCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AssemblyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
