//! Pair-matching game.
//!
//! Up to six cards are split into front and back tiles and shuffled together.
//! The learner picks two tiles at a time; a pair sharing a card id is matched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_cards;
use crate::error::{GameMode, Result, StudyError};
use crate::random::{sample, shuffle, RandomSource};
use crate::timer::Timer;
use crate::types::{millis, Card, CardId, DisplayDelays, Stats};

/// Most cards drawn into one game.
pub const MAX_PAIRS: usize = 6;

/// Fewest cards a game can start with.
pub const MIN_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

/// One face of a card laid out on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pair_id: CardId,
    pub side: Side,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Playing,
    Complete,
}

/// What a tile selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Tile already matched or already selected.
    Ignored,
    /// First tile of a pair picked.
    Selected,
    /// Second tile completed a pair. `completed` is set on the final pair.
    Matched { pair_id: CardId, completed: bool },
    /// Second tile belongs to a different card.
    Mismatched,
}

#[derive(Debug, Clone)]
pub struct MatchGame {
    pool: Vec<Tile>,
    selected: Vec<usize>,
    matched: Vec<CardId>,
    phase: MatchPhase,
    hits: u32,
    misses: u32,
    delays: DisplayDelays,
    clear_selection: Timer<()>,
}

impl MatchGame {
    /// Deal a new board from `cards`.
    pub fn start(
        cards: &[Card],
        delays: DisplayDelays,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        require_cards(GameMode::Match, cards, MIN_CARDS)?;

        let drawn = sample(cards, MAX_PAIRS, rng);
        let mut pool: Vec<Tile> = drawn
            .into_iter()
            .flat_map(|card| {
                [
                    Tile {
                        pair_id: card.id,
                        side: Side::Front,
                        text: card.front,
                    },
                    Tile {
                        pair_id: card.id,
                        side: Side::Back,
                        text: card.back,
                    },
                ]
            })
            .collect();
        shuffle(&mut pool, rng);

        tracing::debug!(tiles = pool.len(), "match game dealt");

        Ok(Self {
            pool,
            selected: Vec::with_capacity(2),
            matched: Vec::new(),
            phase: MatchPhase::Playing,
            hits: 0,
            misses: 0,
            delays,
            clear_selection: Timer::new(),
        })
    }

    /// Throw the board away and deal again. On error the current board stays.
    pub fn restart(&mut self, cards: &[Card], rng: &mut dyn RandomSource) -> Result<()> {
        *self = Self::start(cards, self.delays, rng)?;
        Ok(())
    }

    /// Pick the tile at `index` in the pool.
    pub fn select(
        &mut self,
        index: usize,
        stats: &mut Stats,
        now: DateTime<Utc>,
    ) -> Result<SelectOutcome> {
        let pair_id = self
            .pool
            .get(index)
            .map(|t| t.pair_id)
            .ok_or(StudyError::UnknownTile(index))?;

        // A pick made while the previous pair is still on display clears it first.
        if self.clear_selection.cancel().is_some() {
            self.selected.clear();
        }

        if self.matched.contains(&pair_id) || self.selected.contains(&index) {
            return Ok(SelectOutcome::Ignored);
        }

        self.selected.push(index);
        if self.selected.len() < 2 {
            return Ok(SelectOutcome::Selected);
        }

        let first = self.pool[self.selected[0]].pair_id;
        if first == pair_id {
            self.matched.push(pair_id);
            self.hits += 1;
            stats.record_answer(true);
            self.clear_selection
                .schedule(now, millis(self.delays.match_hit_ms), ());

            let completed = self.matched.len() * 2 == self.pool.len();
            if completed {
                self.phase = MatchPhase::Complete;
                tracing::info!(
                    pairs = self.matched.len(),
                    misses = self.misses,
                    "match game complete"
                );
            }
            Ok(SelectOutcome::Matched { pair_id, completed })
        } else {
            self.misses += 1;
            stats.record_answer(false);
            self.clear_selection
                .schedule(now, millis(self.delays.match_miss_ms), ());
            Ok(SelectOutcome::Mismatched)
        }
    }

    /// Fire the pending selection clear if its delay has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.clear_selection.poll(now).is_some() {
            self.selected.clear();
            return true;
        }
        false
    }

    pub fn pool(&self) -> &[Tile] {
        &self.pool
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn matched(&self) -> &[CardId] {
        &self.matched
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == MatchPhase::Complete
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_selection.is_pending()
    }
}
