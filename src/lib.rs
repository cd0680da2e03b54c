pub mod config;
pub mod logging;
pub mod srs;
pub mod workers;

pub use srs::{
    is_due, mastery_level_name, EaseFactor, MasteryLevel, ReviewInput, ReviewResult,
    SessionMemory, SessionMemoryStats, SpacedRepetitionEngine, VocabularyItem,
};
