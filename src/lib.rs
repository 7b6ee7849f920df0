//! Warehouse dispatch: production task tracking backend.
//!
//! This crate stores warehouse production tasks, each identified by a unique
//! task number, and tracks them through a small status lifecycle. Tasks can be
//! created one at a time or in bulk from uploaded spreadsheets.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, file formats)
//!
//! # Modules
//!
//! - [`task`]: Task records, persistence and lifecycle operations
//! - [`import`]: Spreadsheet bulk creation and preview
//! - [`config`]: Runtime settings for the `dispatch` binary
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod import;
pub mod task;
pub mod telemetry;
