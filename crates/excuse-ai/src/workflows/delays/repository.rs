use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    DelayAssessment, DelayHistoryEntry, DelayId, EmployeeId, ScoreBreakdown, TaskSnapshot,
};

/// Repository record for one reviewed delay: the submission echo plus the
/// full assessment. Storage format stays the adapter's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayRecord {
    pub employee_id: EmployeeId,
    pub task: TaskSnapshot,
    pub reason_text: String,
    pub has_proof: bool,
    pub submitted_at: DateTime<Utc>,
    pub is_after_deadline: bool,
    pub assessment: DelayAssessment,
}

impl DelayRecord {
    pub fn delay_id(&self) -> &DelayId {
        &self.assessment.delay_id
    }

    pub fn assessment_view(&self) -> AssessmentView {
        AssessmentView::from_assessment(&self.assessment)
    }

    /// Convert a stored record into the history shape consumed by the
    /// scoring and pattern engines.
    pub fn to_history_entry(&self) -> DelayHistoryEntry {
        DelayHistoryEntry {
            reason_text: self.reason_text.clone(),
            risk_level: self.assessment.risk,
            score_authenticity: Some(self.assessment.final_score),
            submitted_at: self.submitted_at,
            deadline: self.task.deadline,
            is_after_deadline: Some(self.is_after_deadline),
            delay_duration_minutes: 0,
        }
    }
}

/// Storage abstraction so the review service can be exercised in isolation.
/// `history` returns entries newest-first.
pub trait DelayRepository: Send + Sync {
    fn insert(&self, record: DelayRecord) -> Result<DelayRecord, RepositoryError>;
    fn fetch(&self, id: &DelayId) -> Result<Option<DelayRecord>, RepositoryError>;
    fn history(
        &self,
        employee: &EmployeeId,
        limit: usize,
    ) -> Result<Vec<DelayHistoryEntry>, RepositoryError>;
    /// Count of prior delays by the employee, excluding the submission
    /// currently under review.
    fn delay_count(&self, employee: &EmployeeId) -> Result<u32, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an assessment for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub delay_id: DelayId,
    pub authenticity_score: u8,
    pub avoidance_score: u8,
    pub risk: &'static str,
    pub flags: Vec<&'static str>,
    pub penalty_applied: u8,
    pub breakdown: ScoreBreakdown,
}

impl AssessmentView {
    pub fn from_assessment(assessment: &DelayAssessment) -> Self {
        Self {
            delay_id: assessment.delay_id.clone(),
            authenticity_score: assessment.final_score,
            avoidance_score: assessment.avoidance_score,
            risk: assessment.risk.label(),
            flags: assessment.flags.iter().map(|flag| flag.label()).collect(),
            penalty_applied: assessment.penalty_applied,
            breakdown: assessment.breakdown,
        }
    }
}
