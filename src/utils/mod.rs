//! Utility helpers.
//!
//! - [`db_error`] - PostgreSQL error classification
//! - [`telemetry`] - Tracing subscriber setup

pub mod db_error;
pub mod telemetry;
