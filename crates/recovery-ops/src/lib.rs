//! Field operations core for vehicle recovery dispatch.
//!
//! The `workflows::compensation` module prices a completed occurrence for the
//! provider who attended it; `workflows::occurrences` turns the loosely typed
//! records kept by the operations desk into the facts the engine consumes.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
