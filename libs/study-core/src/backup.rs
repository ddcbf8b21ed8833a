//! Backup envelope and card validation.
//!
//! # Format
//! ```json
//! {
//!   "lessons": {
//!     "default": {
//!       "name": "Sample Lesson",
//!       "cards": [{ "id": 1, "front": "Q", "back": "A",
//!                   "nextReview": 1700000000000, "interval": 1, "easeFactor": 2.5 }],
//!       "stats": { "studied": 0, "correct": 0, "incorrect": 0 }
//!     }
//!   },
//!   "currentLessonId": "default",
//!   "exportDate": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Scheduling fields and stats may be omitted; they default to a fresh card.
//! A card without usable `front`/`back` text rejects the whole backup.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};
use crate::types::{
    free_card_id, Card, CardId, Lesson, Stats, INITIAL_EASE, INITIAL_INTERVAL, MAXIMUM_INTERVAL,
    MINIMUM_EASE,
};

/// Id of the lesson created when no data exists yet.
pub const DEFAULT_LESSON_ID: &str = "default";

/// Every lesson plus the one currently selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub lessons: BTreeMap<String, Lesson>,
    pub current_lesson_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Backup {
    /// A single sample lesson with six cards, all due at `now`.
    pub fn sample(now: DateTime<Utc>) -> Self {
        let pairs = [
            ("What is the capital of France?", "Paris"),
            ("What is 15 × 12?", "180"),
            ("Who wrote \"Romeo and Juliet\"?", "William Shakespeare"),
            ("What is the chemical symbol for gold?", "Au"),
            ("How many continents are there?", "7"),
            ("What is the largest planet in the solar system?", "Jupiter"),
        ];
        let mut lesson = Lesson::new("Sample Lesson");
        lesson.cards = pairs
            .iter()
            .zip(1..)
            .map(|((front, back), id)| Card::new(id, *front, *back, now))
            .collect();

        Self {
            lessons: BTreeMap::from([(DEFAULT_LESSON_ID.to_string(), lesson)]),
            current_lesson_id: DEFAULT_LESSON_ID.to_string(),
            export_date: None,
        }
    }
}

/// Card as found in a backup file, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub id: Option<CardId>,
    pub front: Option<String>,
    pub back: Option<String>,
    /// Epoch milliseconds; older exports may carry a fractional part.
    pub next_review: Option<f64>,
    pub interval: Option<f64>,
    pub ease_factor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLesson {
    name: String,
    #[serde(default)]
    cards: Vec<RawCard>,
    #[serde(default)]
    stats: Stats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBackup {
    lessons: BTreeMap<String, RawLesson>,
    current_lesson_id: String,
    #[serde(default)]
    export_date: Option<DateTime<Utc>>,
}

/// Parse and validate a backup document.
pub fn parse(content: &str, now: DateTime<Utc>) -> Result<Backup> {
    let raw: RawBackup = serde_json::from_str(content)?;

    if !raw.lessons.contains_key(&raw.current_lesson_id) {
        return Err(StudyError::UnknownLesson(raw.current_lesson_id));
    }

    let mut lessons = BTreeMap::new();
    for (id, lesson) in raw.lessons {
        let cards = validate_cards(&id, lesson.cards, now)?;
        lessons.insert(
            id,
            Lesson {
                name: lesson.name,
                cards,
                stats: lesson.stats,
            },
        );
    }

    tracing::info!(lessons = lessons.len(), "backup parsed");
    Ok(Backup {
        lessons,
        current_lesson_id: raw.current_lesson_id,
        export_date: raw.export_date,
    })
}

/// Serialize a backup stamped with `now` as its export date.
pub fn to_json(backup: &Backup, now: DateTime<Utc>) -> Result<String> {
    let stamped = Backup {
        export_date: Some(now),
        ..backup.clone()
    };
    Ok(serde_json::to_string_pretty(&stamped)?)
}

/// Turn raw cards into cards, rejecting the list on the first bad entry.
///
/// Missing ids are assigned after the highest id present. Intervals beyond
/// the scheduling cap are clamped to it.
pub fn validate_cards(
    lesson: &str,
    raw: Vec<RawCard>,
    now: DateTime<Utc>,
) -> Result<Vec<Card>> {
    let invalid = |index: usize, reason: &str| StudyError::Validation {
        lesson: lesson.to_string(),
        index,
        reason: reason.to_string(),
    };

    let mut taken: Vec<CardId> = raw.iter().filter_map(|c| c.id).collect();
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(raw.len());

    for (index, card) in raw.into_iter().enumerate() {
        let front = card
            .front
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| invalid(index, "missing front"))?;
        let back = card
            .back
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| invalid(index, "missing back"))?;

        let interval = card.interval.unwrap_or(INITIAL_INTERVAL);
        if !interval.is_finite() || interval <= 0.0 {
            return Err(invalid(index, "interval must be a positive number"));
        }
        let ease_factor = card.ease_factor.unwrap_or(INITIAL_EASE);
        if !ease_factor.is_finite() || ease_factor < MINIMUM_EASE {
            return Err(invalid(index, "ease factor must be at least 1.3"));
        }
        let next_review = match card.next_review {
            Some(ms) if !ms.is_finite() => {
                return Err(invalid(index, "next review must be a number"));
            }
            Some(ms) => ms.floor() as i64,
            None => now.timestamp_millis(),
        };

        let id = match card.id {
            Some(id) => id,
            None => {
                let id = free_card_id(&taken);
                taken.push(id);
                id
            }
        };
        if !seen.insert(id) {
            return Err(invalid(index, &format!("duplicate id {id}")));
        }

        cards.push(Card {
            id,
            front,
            back,
            next_review,
            interval: interval.min(MAXIMUM_INTERVAL),
            ease_factor,
        });
    }

    Ok(cards)
}
