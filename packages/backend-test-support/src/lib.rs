//! Shared helpers for the backend's unit and integration tests: one-shot
//! logging setup, problem-details assertions and unique participant ids.

pub mod logging;
pub mod problem_details;
pub mod unique;
