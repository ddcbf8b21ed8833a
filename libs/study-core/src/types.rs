//! Core types for the study engines.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

/// One day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Ease factor given to new and reset cards.
pub const INITIAL_EASE: f64 = 2.5;

/// Lower bound for any card's ease factor.
pub const MINIMUM_EASE: f64 = 1.3;

/// Interval given to new, reset and failed cards.
pub const INITIAL_INTERVAL: f64 = 1.0;

/// Longest interval in days a card can be scheduled out (100 years).
pub const MAXIMUM_INTERVAL: f64 = 36_500.0;

/// Stable card identifier.
pub type CardId = i64;

/// Recall quality reported by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Again,
    Hard,
    Good,
    Easy,
    Perfect,
}

impl Quality {
    /// Convert to 5-point numeric value (1-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
            Self::Perfect => 5,
        }
    }

    /// Create from 5-point numeric value.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            5 => Ok(Self::Perfect),
            other => Err(StudyError::InvalidRating(other.into())),
        }
    }

    /// Create from any integer, rejecting values outside 1..=5.
    pub fn from_number(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| StudyError::InvalidRating(value))
            .and_then(Self::from_value)
    }

    /// Good, Easy and Perfect count as a successful recall.
    pub fn is_pass(self) -> bool {
        self >= Self::Good
    }
}

/// A question/answer pair with its scheduling metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    /// Epoch milliseconds; the card is due once this is reached.
    pub next_review: i64,
    pub interval: f64,
    pub ease_factor: f64,
}

impl Card {
    /// Create a card that is due immediately.
    pub fn new(
        id: CardId,
        front: impl Into<String>,
        back: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            next_review: now.timestamp_millis(),
            interval: INITIAL_INTERVAL,
            ease_factor: INITIAL_EASE,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now.timestamp_millis()
    }

    /// Put the card back to its freshly created scheduling state.
    pub fn reset_schedule(&mut self, now: DateTime<Utc>) {
        self.next_review = now.timestamp_millis();
        self.interval = INITIAL_INTERVAL;
        self.ease_factor = INITIAL_EASE;
    }
}

/// Whether a review counted as a pass or a fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Pass,
    Fail,
}

/// Per-lesson counters shared by every practice mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub studied: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl Stats {
    /// Count a graded flashcard review.
    pub fn record_review(&mut self, outcome: ReviewOutcome) {
        self.studied += 1;
        match outcome {
            ReviewOutcome::Pass => self.correct += 1,
            ReviewOutcome::Fail => self.incorrect += 1,
        }
    }

    /// Count a game answer; games do not touch `studied`.
    pub fn record_answer(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A named card collection with its stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    pub cards: Vec<Card>,
    pub stats: Stats,
}

impl Lesson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Next unused card id.
    pub fn next_card_id(&self) -> CardId {
        let ids: Vec<CardId> = self.cards.iter().map(|c| c.id).collect();
        free_card_id(&ids)
    }
}

/// One past the highest id in `taken`, or the lowest unused positive id once
/// the highest id is `i64::MAX`.
pub fn free_card_id(taken: &[CardId]) -> CardId {
    let highest = taken.iter().copied().max().unwrap_or(0);
    if let Some(next) = highest.max(0).checked_add(1) {
        return next;
    }

    let mut positive: Vec<CardId> = taken.iter().copied().filter(|id| *id > 0).collect();
    positive.sort_unstable();
    let mut candidate = 1;
    for id in positive {
        if id == candidate {
            candidate += 1;
        } else if id > candidate {
            break;
        }
    }
    candidate
}

/// Epoch milliseconds `interval` days after `now`, saturating at the end of
/// the representable range.
pub fn review_time(now: DateTime<Utc>, interval: f64) -> i64 {
    let now_ms = now.timestamp_millis();
    let offset = (interval * DAY_MS as f64).round();
    let room = i64::MAX.saturating_sub(now_ms);
    let offset = if offset >= room as f64 { room } else { (offset as i64).max(0) };
    now_ms.saturating_add(offset)
}

/// How long practice engines keep feedback on screen before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDelays {
    pub match_hit_ms: u64,
    pub match_miss_ms: u64,
    pub quiz_advance_ms: u64,
    pub typing_advance_ms: u64,
}

impl Default for DisplayDelays {
    fn default() -> Self {
        Self {
            match_hit_ms: 500,
            match_miss_ms: 1000,
            quiz_advance_ms: 1500,
            typing_advance_ms: 1500,
        }
    }
}

impl DisplayDelays {
    /// All delays set to zero; transitions fire on the next tick.
    pub fn immediate() -> Self {
        Self {
            match_hit_ms: 0,
            match_miss_ms: 0,
            quiz_advance_ms: 0,
            typing_advance_ms: 0,
        }
    }
}

pub(crate) fn millis(ms: u64) -> Duration {
    Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
}
