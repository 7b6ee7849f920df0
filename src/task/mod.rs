//! Task lifecycle management for the dispatch backend.
//!
//! Operators create tasks identified by a unique task number, list and
//! filter them by status, and apply partial updates or status changes. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
