#![allow(dead_code)]

use chrono::{DateTime, Utc};

use vocab_srs::{ReviewInput, VocabularyItem};

pub const FIXED_TIMESTAMP: i64 = 1_700_000_000;

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXED_TIMESTAMP, 0).expect("valid timestamp")
}

pub fn review(user_id: &str, item: &VocabularyItem, is_correct: bool) -> ReviewInput {
    ReviewInput {
        vocabulary_id: item.id.clone(),
        user_id: user_id.to_string(),
        is_correct,
        vocabulary_data: item.clone(),
    }
}
