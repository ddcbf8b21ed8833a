//! Practice-mode engines.
//!
//! Each engine is an ephemeral state machine over a borrowed card list. They
//! share the lesson's `Stats`, draw cards through a `RandomSource` and hold a
//! single `Timer` for their display delay. `tick` fires that delay.

pub mod match_game;
pub mod quiz;
pub mod typing;

pub use match_game::{MatchGame, MatchPhase, SelectOutcome, Side, Tile};
pub use quiz::QuizGame;
pub use typing::TypingGame;

use serde::{Deserialize, Serialize};

use crate::error::{GameMode, Result, StudyError};
use crate::types::Card;

/// Running score for a quiz or typing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.score += 1;
        }
    }
}

pub(crate) fn require_cards(mode: GameMode, cards: &[Card], required: usize) -> Result<()> {
    if cards.len() < required {
        return Err(StudyError::NotEnoughCards {
            mode,
            required,
            available: cards.len(),
        });
    }
    Ok(())
}
