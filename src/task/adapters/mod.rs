//! Adapter implementations for task persistence ports.

pub mod memory;
pub mod sqlite;
