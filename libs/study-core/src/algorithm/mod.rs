//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Card, Quality, ReviewOutcome};
use chrono::{DateTime, Utc};

pub use sm2::Sm2Lite;

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingResult {
    pub card: Card,
    pub outcome: ReviewOutcome,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the card's next review timing after a rating.
    fn schedule(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> SchedulingResult;
}

/// Schedule a card with the default parameters.
pub fn schedule(card: &Card, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
    Sm2Lite::default().schedule(card, quality, now)
}
