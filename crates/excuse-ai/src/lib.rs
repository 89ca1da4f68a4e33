//! Deterministic excuse scoring and behavioral pattern detection for
//! task-delay tracking.
//!
//! The `workflows::delays` module carries the core: a weighted five-signal
//! authenticity scorer, a cross-submission pattern detector, and the review
//! service tying them to storage and external-analysis ports.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
