//! Due evaluation and mastery reactivation.

use chrono::{DateTime, Duration, Utc};

use super::types::{MasteryLevel, VocabularyItem};

pub const REACTIVATION_DAYS: i64 = 90;

/// A MASTERED item untouched by mastery for more than [`REACTIVATION_DAYS`].
pub fn needs_reactivation(item: &VocabularyItem, now: DateTime<Utc>) -> bool {
    item.mastery_level == MasteryLevel::Mastered
        && item
            .last_mastered
            .is_some_and(|mastered_at| now - mastered_at > Duration::days(REACTIVATION_DAYS))
}

pub fn is_due_at(item: &VocabularyItem, now: DateTime<Utc>) -> bool {
    if item.mastery_level == MasteryLevel::New {
        return true;
    }
    if needs_reactivation(item, now) {
        return true;
    }
    match item.next_review {
        Some(next_review) => now >= next_review,
        None => true,
    }
}

pub fn is_due(item: &VocabularyItem) -> bool {
    is_due_at(item, Utc::now())
}

/// Due items ordered for a review queue: unscheduled and NEW items first,
/// then by how long they have been waiting.
pub fn select_due(items: &[VocabularyItem], now: DateTime<Utc>) -> Vec<&VocabularyItem> {
    let mut due: Vec<&VocabularyItem> = items.iter().filter(|item| is_due_at(item, now)).collect();
    due.sort_by_key(|item| match item.mastery_level {
        MasteryLevel::New => None,
        _ => item.next_review,
    });
    due
}
