//! SpacedRepetitionEngine - unified entry point for a review submission
//!
//! Combines:
//! - Session memory for the two-strike demotion rule
//! - Mastery state machine for the next level
//! - Reactivation rule for long-mastered items
//! - Review scheduler for the next review date
//!
//! The engine never writes item storage; the caller persists the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SrsConfig;

use super::{
    due, mastery, scheduler,
    session_memory::{InMemorySessionStore, SessionMemory, SessionMemoryStats},
    types::{MasteryLevel, ReviewInput, ReviewResult},
};

/// Highest level used for scheduling a reactivated item.
const REFRESHER_LEVEL: MasteryLevel = MasteryLevel::Mature;

pub struct SpacedRepetitionEngine {
    session_memory: Arc<dyn SessionMemory>,
}

impl Default for SpacedRepetitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpacedRepetitionEngine {
    pub fn new() -> Self {
        Self::with_session_memory(Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_session_memory(session_memory: Arc<dyn SessionMemory>) -> Self {
        Self { session_memory }
    }

    pub fn from_config(config: &SrsConfig) -> Self {
        Self::with_session_memory(Arc::new(InMemorySessionStore::with_ttl(
            config.session_ttl(),
        )))
    }

    pub fn session_memory(&self) -> Arc<dyn SessionMemory> {
        Arc::clone(&self.session_memory)
    }

    pub fn calculate(&self, input: &ReviewInput) -> ReviewResult {
        self.calculate_at(input, Utc::now())
    }

    pub fn calculate_at(&self, input: &ReviewInput, now: DateTime<Utc>) -> ReviewResult {
        let item = &input.vocabulary_data;

        let session_incorrect = self.session_memory.record_answer_at(
            &input.user_id,
            &input.vocabulary_id,
            input.is_correct,
            now,
        );

        let new_level = mastery::next_level(
            item.mastery_level,
            input.is_correct,
            item.consecutive_correct,
            session_incorrect,
        );

        let reactivating = due::needs_reactivation(item, now);
        let schedule_level = if reactivating {
            new_level.min(REFRESHER_LEVEL)
        } else {
            new_level
        };

        let next_review = scheduler::next_review_date(schedule_level, item.ease_factor, now);
        let mastery_changed = new_level != item.mastery_level;

        let refreshed_mastery = reactivating && input.is_correct;
        let last_mastered =
            if new_level == MasteryLevel::Mastered && (mastery_changed || refreshed_mastery) {
                Some(now)
            } else {
                item.last_mastered
            };

        let update_needed = mastery_changed
            || item.next_review != Some(next_review)
            || item.last_mastered != last_mastered;

        if mastery_changed {
            debug!(
                user_id = %input.user_id,
                vocabulary_id = %input.vocabulary_id,
                from = %item.mastery_level,
                to = %new_level,
                session_incorrect,
                "mastery level changed"
            );
        } else if reactivating {
            debug!(
                user_id = %input.user_id,
                vocabulary_id = %input.vocabulary_id,
                schedule_level = %schedule_level,
                "reactivated mastered item scheduled on refresher cadence"
            );
        }

        ReviewResult {
            next_review,
            new_mastery_level: new_level,
            mastery_changed,
            consecutive_incorrect_count: session_incorrect,
            update_needed,
            last_mastered,
        }
    }

    pub fn session_memory_stats(&self) -> SessionMemoryStats {
        self.session_memory.stats()
    }

    pub fn clear_user_session_memory(&self, user_id: &str) -> usize {
        self.session_memory.clear_for_user(user_id)
    }

    pub fn clear_all_session_memory(&self) {
        self.session_memory.clear_all();
    }
}
