//! Delay excuse intake, deterministic scoring, and pattern detection.
//!
//! Every computation in this module is a pure function of its inputs: the
//! engines hold no mutable state, and all context (task, history, external
//! signal) arrives as explicit parameters. The fallible edges, storage and
//! the external text-analysis provider, are traits so the workflow can be
//! exercised against in-memory fakes.

pub mod domain;
pub mod patterns;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod signal;

#[cfg(test)]
mod tests;

pub use domain::{
    DelayAssessment, DelayContext, DelayHistoryEntry, DelayId, DelaySubmission, EmployeeId,
    PatternFlag, RiskLevel, ScoreBreakdown, TaskPriority, TaskSnapshot,
};
pub use patterns::{apply_penalties, PatternDetector};
pub use repository::{AssessmentView, DelayRecord, DelayRepository, RepositoryError};
pub use router::delay_router;
pub use scoring::{
    ScoringConfig, ScoringEngine, HISTORY_WINDOW, MAX_EXTERNAL_SIGNAL, RISK_LOW_THRESHOLD,
    RISK_MEDIUM_THRESHOLD,
};
pub use service::{DelayReviewError, DelayReviewService};
pub use signal::{FixedSignalProvider, NullSignalProvider, SignalError, TextSignalProvider};
