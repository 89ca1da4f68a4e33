use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees submitting delay excuses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for recorded delays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelayId(pub String);

/// Task priority, parsed leniently from free-form labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    /// Case-insensitive parse. Unrecognized values fall back to `Low` and
    /// emit a data-quality warning; scoring never rejects input.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" | "" => Self::Low,
            _ => {
                tracing::warn!(priority = raw, "unrecognized task priority, treating as Low");
                Self::Low
            }
        }
    }
}

/// Risk tier derived from an authenticity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Numeric severity used when comparing tiers over time.
    pub const fn severity(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

/// Minimal description of the late task attached to a delay submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub task_id: String,
    pub title: String,
    /// Free-form priority label; normalized during scoring.
    pub priority: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// An employee's delay excuse as received from the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelaySubmission {
    pub employee_id: EmployeeId,
    pub task: TaskSnapshot,
    pub reason_text: String,
    pub has_proof: bool,
    /// Defaults to the current time when absent; pinned by tests and demos.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// One prior delay by the same employee, as read back from storage.
///
/// Callers supply history newest-first; heuristics that need chronological
/// order reverse explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayHistoryEntry {
    pub reason_text: String,
    pub risk_level: RiskLevel,
    pub score_authenticity: Option<u8>,
    pub submitted_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub is_after_deadline: Option<bool>,
    pub delay_duration_minutes: i64,
}

impl DelayHistoryEntry {
    /// Hours between submission and deadline, when both ends are known.
    /// Negative when the entry was submitted past its deadline.
    pub fn hours_left(&self) -> Option<f64> {
        self.deadline
            .map(|deadline| (deadline - self.submitted_at).num_seconds() as f64 / 3600.0)
    }

    /// Lateness, taken from the recorded flag or inferred from a positive
    /// delay duration when the flag was never stored.
    pub fn was_late(&self) -> bool {
        self.is_after_deadline
            .unwrap_or(self.delay_duration_minutes > 0)
    }
}

/// Fully-resolved inputs for one scoring pass. The review service derives
/// this from a submission and its stored context; tests build it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayContext {
    pub reason_text: String,
    /// Prior delays by this employee, not counting the current submission.
    pub delay_count: u32,
    pub priority: String,
    /// Whole hours until the deadline; negative when already overdue.
    pub hours_left: i64,
    pub has_proof: bool,
    pub is_after_deadline: bool,
    /// Untrusted external contribution; clamped before use.
    pub external_signal: i64,
}

/// Per-signal contributions behind an authenticity score, kept so reviewers
/// can audit how a tier was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub text: u8,
    pub history: u8,
    pub task: u8,
    pub proof: u8,
    pub timing: u8,
    pub external_signal: u8,
    pub total: u8,
    pub risk: RiskLevel,
}

/// Cross-submission behavior flags. The vocabulary is closed: detection can
/// only ever raise these five flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFlag {
    RepeatedExcuse,
    GenericPhraseReuse,
    LateSubmissionPattern,
    RiskEscalation,
    DeadlineEdgeAbuse,
}

impl PatternFlag {
    pub const fn label(self) -> &'static str {
        match self {
            PatternFlag::RepeatedExcuse => "repeated_excuse",
            PatternFlag::GenericPhraseReuse => "generic_phrase_reuse",
            PatternFlag::LateSubmissionPattern => "late_submission_pattern",
            PatternFlag::RiskEscalation => "risk_escalation",
            PatternFlag::DeadlineEdgeAbuse => "deadline_edge_abuse",
        }
    }

    /// Fixed deduction applied when the flag is raised.
    pub const fn penalty(self) -> u8 {
        match self {
            PatternFlag::RepeatedExcuse => 10,
            PatternFlag::GenericPhraseReuse => 5,
            PatternFlag::LateSubmissionPattern => 8,
            PatternFlag::RiskEscalation => 12,
            PatternFlag::DeadlineEdgeAbuse => 6,
        }
    }
}

/// Final outcome of one delay review: the deterministic breakdown, the
/// raised pattern flags, and the post-penalty score and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayAssessment {
    pub delay_id: DelayId,
    pub breakdown: ScoreBreakdown,
    pub flags: BTreeSet<PatternFlag>,
    pub penalty_applied: u8,
    pub final_score: u8,
    /// Inferred blame-shifting measure: `100 - final_score`.
    pub avoidance_score: u8,
    /// Tier re-derived from the final score; may differ from the
    /// pre-penalty tier in `breakdown`.
    pub risk: RiskLevel,
}
