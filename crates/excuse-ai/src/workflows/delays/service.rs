use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{DelayAssessment, DelayContext, DelayId, DelaySubmission};
use super::patterns::{apply_penalties, PatternDetector};
use super::repository::{DelayRecord, DelayRepository, RepositoryError};
use super::scoring::{ScoringConfig, ScoringEngine, HISTORY_WINDOW};
use super::signal::TextSignalProvider;

/// Service composing the scoring engine, pattern detector, and the storage
/// and external-analysis ports.
pub struct DelayReviewService<R, S> {
    repository: Arc<R>,
    signal: Arc<S>,
    engine: ScoringEngine,
    detector: PatternDetector,
}

static DELAY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_delay_id() -> DelayId {
    let id = DELAY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DelayId(format!("delay-{id:06}"))
}

impl<R, S> DelayReviewService<R, S>
where
    R: DelayRepository + 'static,
    S: TextSignalProvider + 'static,
{
    pub fn new(repository: Arc<R>, signal: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            repository,
            signal,
            engine: ScoringEngine::new(config),
            detector: PatternDetector,
        }
    }

    /// Review a delay excuse end to end: derive deadline context, resolve
    /// the external signal, score, detect patterns, apply penalties,
    /// re-classify, and persist the assessment.
    pub fn review(
        &self,
        submission: DelaySubmission,
    ) -> Result<DelayAssessment, DelayReviewError> {
        let submitted_at = submission.submitted_at.unwrap_or_else(Utc::now);
        let (hours_left, is_after_deadline) = deadline_context(&submission, submitted_at);

        let external_signal = match self.signal.assess(&submission.reason_text) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "text signal provider failed, scoring without external signal");
                0
            }
        };

        let delay_count = self.repository.delay_count(&submission.employee_id)?;
        let history = self
            .repository
            .history(&submission.employee_id, HISTORY_WINDOW)?;

        let context = DelayContext {
            reason_text: submission.reason_text.clone(),
            delay_count,
            priority: submission.task.priority.clone(),
            hours_left,
            has_proof: submission.has_proof,
            is_after_deadline,
            external_signal,
        };

        let breakdown = self.engine.score(&context);
        let flags = self.detector.detect(
            &submission.reason_text,
            hours_left,
            is_after_deadline,
            &history,
        );
        let final_score = apply_penalties(breakdown.total, &flags);
        // A penalty can drop the score across a tier boundary, so the tier
        // is always re-derived from the final score.
        let risk = self.engine.config().classify(final_score);

        let assessment = DelayAssessment {
            delay_id: next_delay_id(),
            penalty_applied: breakdown.total - final_score,
            final_score,
            avoidance_score: self.engine.config().max_score() - final_score,
            risk,
            breakdown,
            flags,
        };

        let record = DelayRecord {
            employee_id: submission.employee_id,
            task: submission.task,
            reason_text: submission.reason_text,
            has_proof: submission.has_proof,
            submitted_at,
            is_after_deadline,
            assessment: assessment.clone(),
        };
        self.repository.insert(record)?;

        info!(
            delay_id = %assessment.delay_id.0,
            score = assessment.final_score,
            risk = assessment.risk.label(),
            flags = assessment.flags.len(),
            "delay excuse assessed"
        );

        Ok(assessment)
    }

    /// Fetch a reviewed delay for API responses.
    pub fn get(&self, delay_id: &DelayId) -> Result<DelayRecord, DelayReviewError> {
        let record = self
            .repository
            .fetch(delay_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Whole hours until the task deadline and whether the submission landed
/// past it. A task without a deadline scores as on-time with no urgency,
/// the conservative default.
fn deadline_context(submission: &DelaySubmission, submitted_at: DateTime<Utc>) -> (i64, bool) {
    match submission.task.deadline {
        Some(deadline) => {
            let delta = deadline - submitted_at;
            (delta.num_hours(), delta.num_seconds() < 0)
        }
        None => {
            warn!(
                task_id = %submission.task.task_id,
                "task has no deadline, assuming on-time submission"
            );
            (0, false)
        }
    }
}

/// Error raised by the delay review service.
#[derive(Debug, thiserror::Error)]
pub enum DelayReviewError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
