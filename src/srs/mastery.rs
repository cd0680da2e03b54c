//! Mastery state machine.
//!
//! Promotion is driven by the persisted correct streak, demotion by the
//! session-scoped wrong streak. A single miss never moves the level.

use super::types::MasteryLevel;

/// Persisted correct answers (including the current one) needed to promote.
pub const PROMOTION_STREAK: u32 = 3;
/// Consecutive wrong answers within a session needed to demote.
pub const DEMOTION_STRIKES: u32 = 2;

pub fn next_level(
    current: MasteryLevel,
    is_correct: bool,
    prior_consecutive_correct: u32,
    session_consecutive_incorrect: u32,
) -> MasteryLevel {
    if is_correct {
        if prior_consecutive_correct.saturating_add(1) >= PROMOTION_STREAK {
            return current.promote();
        }
        return current;
    }

    if session_consecutive_incorrect >= DEMOTION_STRIKES {
        current.demote()
    } else {
        current
    }
}
