//! Spaced-repetition core
//!
//! Contains:
//! - Mastery state machine (promotion on persisted streaks, demotion on session strikes)
//! - Review scheduler (fixed per-level intervals, ease-scaled from MATURE upwards)
//! - Due evaluation including the 90-day mastery reactivation rule
//! - Session memory for consecutive wrong answers per (user, item)
//! - SpacedRepetitionEngine - unified entry point for a review submission

pub mod due;
pub mod mastery;
pub mod scheduler;
pub mod session_memory;
pub mod types;

mod engine;

pub use due::{is_due, is_due_at, needs_reactivation, select_due};
pub use engine::SpacedRepetitionEngine;
pub use session_memory::{InMemorySessionStore, SessionMemory, SessionMemoryEntry, SessionMemoryStats};
pub use types::{
    mastery_level_name, EaseFactor, MasteryLevel, ReviewInput, ReviewResult, VocabularyItem,
};
