use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ordinal mastery of a vocabulary item, NEW (0) through MASTERED (5).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "Option<f64>", into = "u8")]
pub enum MasteryLevel {
    #[default]
    New = 0,
    Learning = 1,
    Young = 2,
    Mature = 3,
    Proficient = 4,
    Mastered = 5,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 6] = [
        Self::New,
        Self::Learning,
        Self::Young,
        Self::Mature,
        Self::Proficient,
        Self::Mastered,
    ];

    /// Clamps any raw integer into [NEW, MASTERED].
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            i64::MIN..=0 => Self::New,
            1 => Self::Learning,
            2 => Self::Young,
            3 => Self::Mature,
            4 => Self::Proficient,
            _ => Self::Mastered,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Learning => "Learning",
            Self::Young => "Young",
            Self::Mature => "Mature",
            Self::Proficient => "Proficient",
            Self::Mastered => "Mastered",
        }
    }

    /// One level up, saturating at MASTERED.
    pub fn promote(self) -> Self {
        Self::from_raw(self as i64 + 1)
    }

    /// One level down, saturating at NEW.
    pub fn demote(self) -> Self {
        Self::from_raw(self as i64 - 1)
    }

    pub fn base_interval_days(self) -> i64 {
        match self {
            Self::New => 1,
            Self::Learning => 3,
            Self::Young => 7,
            Self::Mature => 21,
            Self::Proficient => 60,
            Self::Mastered => 180,
        }
    }
}

impl From<i64> for MasteryLevel {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Option<f64>> for MasteryLevel {
    /// Null or NaN reads as NEW; fractional levels round down before clamping.
    fn from(raw: Option<f64>) -> Self {
        match raw {
            Some(value) if !value.is_nan() => {
                Self::from_raw(value.floor().clamp(-1.0, 6.0) as i64)
            }
            _ => Self::New,
        }
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a raw stored level. Anything that is not an integer in
/// [0, 5] is reported as "Unknown" rather than clamped.
pub fn mastery_level_name(raw: f64) -> &'static str {
    if !raw.is_finite() || raw.fract() != 0.0 || !(0.0..=5.0).contains(&raw) {
        return "Unknown";
    }
    MasteryLevel::from_raw(raw as i64).name()
}

/// Interval multiplier, always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "f64")]
pub struct EaseFactor(f64);

impl EaseFactor {
    /// Non-finite or non-positive input falls back to [`DEFAULT_EASE_FACTOR`].
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(DEFAULT_EASE_FACTOR)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for EaseFactor {
    fn default() -> Self {
        Self(DEFAULT_EASE_FACTOR)
    }
}

impl From<f64> for EaseFactor {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for EaseFactor {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl From<EaseFactor> for f64 {
    fn from(ease: EaseFactor) -> Self {
        ease.0
    }
}

/// Snapshot of a persisted (user, word) learning record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub last_mastered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub consecutive_correct: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub consecutive_incorrect: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub review_count: u32,
    #[serde(default)]
    pub ease_factor: EaseFactor,
}

/// Counters accept null, negative and fractional numbers; anything that is
/// not a non-negative number reads as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) if value.is_finite() && value > 0.0 => value.min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

impl VocabularyItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub vocabulary_id: String,
    pub user_id: String,
    pub is_correct: bool,
    pub vocabulary_data: VocabularyItem,
}

/// Fields the caller should persist after a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub next_review: DateTime<Utc>,
    pub new_mastery_level: MasteryLevel,
    pub mastery_changed: bool,
    pub consecutive_incorrect_count: u32,
    pub update_needed: bool,
    pub last_mastered: Option<DateTime<Utc>>,
}
