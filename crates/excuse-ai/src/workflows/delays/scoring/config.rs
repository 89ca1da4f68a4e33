use serde::{Deserialize, Serialize};

use crate::workflows::delays::domain::RiskLevel;

/// Scores at or above this threshold classify as Low risk.
pub const RISK_LOW_THRESHOLD: u8 = 75;
/// Scores at or above this threshold (and below the Low threshold) classify
/// as Medium risk; everything below is High.
pub const RISK_MEDIUM_THRESHOLD: u8 = 45;

/// Ceiling on the external text-signal contribution, kept small so a failing
/// or adversarial provider can never dominate the deterministic signals.
pub const MAX_EXTERNAL_SIGNAL: u8 = 15;

/// How many recent submissions the pattern detector inspects.
pub const HISTORY_WINDOW: usize = 5;

const MAX_SCORE: u8 = 100;

/// Rubric thresholds owned by the scoring engine. Change business rules
/// here, nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub risk_low_threshold: u8,
    pub risk_medium_threshold: u8,
}

impl ScoringConfig {
    /// Single source of truth for risk tiers; every classification in the
    /// crate goes through here, including post-penalty re-classification.
    pub fn classify(&self, total: u8) -> RiskLevel {
        if total >= self.risk_low_threshold {
            RiskLevel::Low
        } else if total >= self.risk_medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub const fn max_score(&self) -> u8 {
        MAX_SCORE
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            risk_low_threshold: RISK_LOW_THRESHOLD,
            risk_medium_threshold: RISK_MEDIUM_THRESHOLD,
        }
    }
}
