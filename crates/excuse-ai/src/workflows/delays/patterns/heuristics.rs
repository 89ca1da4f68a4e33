use crate::workflows::delays::domain::DelayHistoryEntry;
use crate::workflows::delays::scoring::signals::GENERIC_PHRASES;

const SIMILARITY_THRESHOLD: f64 = 0.85;
const LATE_FRACTION_THRESHOLD: f64 = 0.7;
const LATE_MIN_HISTORY: usize = 3;
const EDGE_FRACTION_THRESHOLD: f64 = 0.6;
const EDGE_WINDOW_HOURS: f64 = 1.0;

/// Filler phrases beyond the scoring vocabulary that still mark an excuse
/// as boilerplate.
const EXTRA_FILLER_PHRASES: [&str; 2] = ["system problem", "unexpected issue"];

/// Case-insensitive normalized edit-distance ratio in [0, 1].
fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Near-verbatim reuse of any single past excuse. Catches recycled text,
/// not topic overlap.
pub(super) fn repeated_excuse(current: &str, history: &[DelayHistoryEntry]) -> bool {
    history
        .iter()
        .any(|entry| similarity(current, &entry.reason_text) > SIMILARITY_THRESHOLD)
}

/// The current excuse leans on a known filler phrase.
pub(super) fn generic_phrase_reuse(current: &str) -> bool {
    let text = current.to_lowercase();
    if text.is_empty() {
        return false;
    }
    GENERIC_PHRASES
        .iter()
        .chain(EXTRA_FILLER_PHRASES.iter())
        .any(|phrase| text.contains(phrase))
}

/// More than 70% of submissions (current included) landed after the
/// deadline. Requires at least three history entries; fewer is too small a
/// sample to call a habit.
pub(super) fn late_submission_pattern(current_late: bool, history: &[DelayHistoryEntry]) -> bool {
    if history.len() < LATE_MIN_HISTORY {
        return false;
    }

    let late = history.iter().filter(|entry| entry.was_late()).count() + usize::from(current_late);
    let total = history.len() + 1;
    late as f64 / total as f64 > LATE_FRACTION_THRESHOLD
}

/// Recorded risk tiers worsened monotonically over time and ended at Medium
/// or worse. History arrives newest-first, so severity is read in reverse.
pub(super) fn risk_escalation(history: &[DelayHistoryEntry]) -> bool {
    if history.len() < 2 {
        return false;
    }

    let chronological: Vec<u8> = history
        .iter()
        .rev()
        .map(|entry| entry.risk_level.severity())
        .collect();

    let non_decreasing = chronological.windows(2).all(|pair| pair[0] <= pair[1]);
    let first = chronological[0];
    let last = chronological[chronological.len() - 1];

    non_decreasing && last >= 2 && last > first
}

/// Habitual submission inside the final hour before the deadline. History
/// entries without a computable hours-left value are left out; the current
/// submission always participates.
pub(super) fn deadline_edge_abuse(hours_left_current: i64, history: &[DelayHistoryEntry]) -> bool {
    let mut hours: Vec<f64> = vec![hours_left_current as f64];
    hours.extend(history.iter().filter_map(DelayHistoryEntry::hours_left));

    if hours.is_empty() {
        return false;
    }

    let edge = hours
        .iter()
        .copied()
        .filter(|&h| (0.0..=EDGE_WINDOW_HOURS).contains(&h))
        .count();
    edge as f64 / hours.len() as f64 > EDGE_FRACTION_THRESHOLD
}
