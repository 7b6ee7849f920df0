//! Step definitions for spreadsheet import scenarios.

mod given;
mod then;
pub mod world;
