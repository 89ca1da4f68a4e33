mod config;
pub(crate) mod signals;

pub use config::{
    ScoringConfig, HISTORY_WINDOW, MAX_EXTERNAL_SIGNAL, RISK_LOW_THRESHOLD, RISK_MEDIUM_THRESHOLD,
};

use crate::workflows::delays::domain::{DelayContext, ScoreBreakdown};

/// Stateless engine applying the weighted five-signal rubric.
///
/// Signal weights: text 30, history 20, task context 20, proof 15, timing 15,
/// plus the clamped external signal (at most 15). The raw sum is capped at
/// 100 before classification.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the full authenticity breakdown for one submission. Never
    /// fails: malformed inputs are normalized to conservative defaults.
    pub fn score(&self, context: &DelayContext) -> ScoreBreakdown {
        let text = signals::score_text_quality(&context.reason_text);
        let history = signals::score_delay_history(context.delay_count);
        let task = signals::score_task_context(&context.priority, context.hours_left);
        let proof = signals::score_proof_attachment(context.has_proof);
        let timing = signals::score_timing(context.is_after_deadline);
        let external_signal = signals::clamp_signal(context.external_signal);

        let raw = u32::from(text)
            + u32::from(history)
            + u32::from(task)
            + u32::from(proof)
            + u32::from(timing)
            + u32::from(external_signal);
        let total = raw.min(u32::from(self.config.max_score())) as u8;
        let risk = self.config.classify(total);

        ScoreBreakdown {
            text,
            history,
            task,
            proof,
            timing,
            external_signal,
            total,
            risk,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
