//! Due-card selection and the flashcard review session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::error::{Result, StudyError};
use crate::types::{Card, Lesson, Quality};

/// Cards whose review time has arrived, in store order.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
    cards.iter().filter(|c| c.is_due(now)).collect()
}

pub fn due_count(cards: &[Card], now: DateTime<Utc>) -> usize {
    cards.iter().filter(|c| c.is_due(now)).count()
}

/// Cursor over the due queue plus the front/back flip state.
///
/// The due queue is never cached: it is recomputed from the store on every
/// call, so grading a card (which moves it out of the queue) cannot leave the
/// cursor pointing at a stale entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSession {
    cursor: usize,
    flipped: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Card under the cursor, wrapping if the queue shrank.
    pub fn current<'a>(&self, cards: &'a [Card], now: DateTime<Utc>) -> Option<&'a Card> {
        let due = due_cards(cards, now);
        if due.is_empty() {
            return None;
        }
        Some(due[self.cursor % due.len()])
    }

    /// Toggle between front and back. The card itself is untouched.
    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Grade the current card, write it back to the lesson and move on.
    pub fn rate(
        &mut self,
        algorithm: &dyn SpacedRepetitionAlgorithm,
        lesson: &mut Lesson,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<SchedulingResult> {
        let current = self
            .current(&lesson.cards, now)
            .ok_or(StudyError::NoDueCards)?;
        let result = algorithm.schedule(current, quality, now);

        if let Some(slot) = lesson.cards.iter_mut().find(|c| c.id == result.card.id) {
            *slot = result.card.clone();
        }
        lesson.stats.record_review(result.outcome);
        self.flipped = false;

        // The graded card has left the queue, so the card that followed it now
        // sits at the same position.
        let remaining = due_count(&lesson.cards, now);
        self.cursor = if remaining == 0 {
            0
        } else {
            self.cursor % remaining
        };

        tracing::info!(
            card_id = result.card.id,
            quality = quality.to_value(),
            remaining,
            "review graded"
        );
        Ok(result)
    }

    /// Requeue every card in the lesson and zero its stats.
    pub fn reset_progress(&mut self, lesson: &mut Lesson, now: DateTime<Utc>) {
        for card in &mut lesson.cards {
            card.reset_schedule(now);
        }
        lesson.stats.reset();
        *self = Self::default();
        tracing::info!(lesson = %lesson.name, cards = lesson.cards.len(), "progress reset");
    }
}
