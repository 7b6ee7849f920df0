//! Step definitions for task status scenarios.

mod given;
mod when;
