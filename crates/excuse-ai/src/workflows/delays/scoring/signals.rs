use super::config::MAX_EXTERNAL_SIGNAL;
use crate::workflows::delays::domain::TaskPriority;

/// Phrases matched as substrings of the lowercased excuse. A specific excuse
/// that happens to contain one is still penalized; each distinct phrase
/// deducts once regardless of repetition.
pub(crate) const GENERIC_PHRASES: [&str; 5] = [
    "not feeling well",
    "network issue",
    "personal reasons",
    "busy schedule",
    "unexpected work",
];

const TEXT_MAX: i32 = 30;
const SHORT_WORD_CUTOFF: usize = 5;
const MEDIUM_WORD_CUTOFF: usize = 10;
const SHORT_PENALTY: i32 = 15;
const MEDIUM_PENALTY: i32 = 8;
const GENERIC_PENALTY: i32 = 5;

/// Score excuse text quality out of 30. Penalizes short responses and known
/// generic phrases. Empty text scores 0.
pub(crate) fn score_text_quality(reason: &str) -> u8 {
    let normalized = reason.trim().to_lowercase();
    if normalized.is_empty() {
        return 0;
    }

    let word_count = normalized.split_whitespace().count();
    let mut score = TEXT_MAX;

    if word_count < SHORT_WORD_CUTOFF {
        score -= SHORT_PENALTY;
    } else if word_count < MEDIUM_WORD_CUTOFF {
        score -= MEDIUM_PENALTY;
    }

    let matched = GENERIC_PHRASES
        .iter()
        .filter(|phrase| normalized.contains(**phrase))
        .count();
    score -= matched as i32 * GENERIC_PENALTY;

    score.max(0) as u8
}

/// Score delay history out of 20. More prior delays, lower score. The step
/// buckets keep the signal explainable to end users; an empty history is a
/// zero count, not a special case.
pub(crate) fn score_delay_history(delay_count: u32) -> u8 {
    match delay_count {
        0 => 20,
        1..=2 => 14,
        3..=5 => 8,
        _ => 3,
    }
}

/// Score task priority and deadline context out of 20.
///
/// High-priority tasks inside 12 hours of deadline take a larger deduction
/// than medium-priority tasks inside 24 hours; low priority never deducts.
pub(crate) fn score_task_context(priority: &str, hours_left: i64) -> u8 {
    let priority = TaskPriority::parse_lenient(priority);

    let mut score: i32 = 20;
    if priority == TaskPriority::High && hours_left < 12 {
        score -= 12;
    } else if priority == TaskPriority::Medium && hours_left < 24 {
        score -= 6;
    }

    score.max(0) as u8
}

/// Score proof attachment out of 15.
pub(crate) fn score_proof_attachment(has_proof: bool) -> u8 {
    if has_proof {
        15
    } else {
        5
    }
}

/// Score submission timing out of 15. Late submissions score lower.
pub(crate) fn score_timing(is_after_deadline: bool) -> u8 {
    if is_after_deadline {
        5
    } else {
        15
    }
}

/// Clamp the untrusted external contribution into `[0, MAX_EXTERNAL_SIGNAL]`.
/// The only point where a non-deterministic input enters the composite.
pub(crate) fn clamp_signal(raw: i64) -> u8 {
    raw.clamp(0, i64::from(MAX_EXTERNAL_SIGNAL)) as u8
}
