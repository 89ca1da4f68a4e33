mod heuristics;

use std::collections::BTreeSet;

use crate::workflows::delays::domain::{DelayHistoryEntry, PatternFlag};

/// Stateless detector running the five pattern heuristics independently.
///
/// Each heuristic answers one question about the current submission against
/// the employee's recent history (newest-first, per the storage convention);
/// the true answers become flags in the returned set.
#[derive(Debug, Default, Clone)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(
        &self,
        current_reason: &str,
        hours_left_current: i64,
        is_after_deadline_current: bool,
        history: &[DelayHistoryEntry],
    ) -> BTreeSet<PatternFlag> {
        let mut flags = BTreeSet::new();

        if heuristics::repeated_excuse(current_reason, history) {
            flags.insert(PatternFlag::RepeatedExcuse);
        }
        if heuristics::generic_phrase_reuse(current_reason) {
            flags.insert(PatternFlag::GenericPhraseReuse);
        }
        if heuristics::late_submission_pattern(is_after_deadline_current, history) {
            flags.insert(PatternFlag::LateSubmissionPattern);
        }
        if heuristics::risk_escalation(history) {
            flags.insert(PatternFlag::RiskEscalation);
        }
        if heuristics::deadline_edge_abuse(hours_left_current, history) {
            flags.insert(PatternFlag::DeadlineEdgeAbuse);
        }

        flags
    }
}

/// Subtract the fixed penalty for every raised flag, flooring at zero.
///
/// Callers must re-derive the risk tier from the returned score: a penalty
/// can push a score across a tier boundary.
pub fn apply_penalties(base_score: u8, flags: &BTreeSet<PatternFlag>) -> u8 {
    let penalty: u32 = flags.iter().map(|flag| u32::from(flag.penalty())).sum();
    u32::from(base_score).saturating_sub(penalty) as u8
}
