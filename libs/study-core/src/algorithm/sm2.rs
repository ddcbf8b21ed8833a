//! Simplified single-pass SM-2.
//!
//! A pass multiplies the interval by a fixed factor per rating and nudges the
//! ease factor with the SM-2 ease formula. A fail resets the interval to one
//! day and takes a flat penalty off the ease factor. There are no repetition
//! counts or lapses. Intervals stop growing at 100 years.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{
    review_time, Card, Quality, ReviewOutcome, INITIAL_INTERVAL, MAXIMUM_INTERVAL, MINIMUM_EASE,
};
use chrono::{DateTime, Utc};

/// Simplified SM-2 with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2Lite {
    pub minimum_ease: f64,
    pub fail_penalty: f64,
    pub good_multiplier: f64,
    pub easy_multiplier: f64,
    pub perfect_multiplier: f64,
}

impl Default for Sm2Lite {
    fn default() -> Self {
        Self {
            minimum_ease: MINIMUM_EASE,
            fail_penalty: 0.2,
            good_multiplier: 1.2,
            easy_multiplier: 2.0,
            perfect_multiplier: 2.5,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2Lite {
    fn name(&self) -> &'static str {
        "sm2-lite"
    }

    fn schedule(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let (interval, ease_factor, outcome) = if quality.is_pass() {
            (
                (card.interval * self.pass_multiplier(quality)).min(MAXIMUM_INTERVAL),
                (card.ease_factor + ease_delta(quality)).max(self.minimum_ease),
                ReviewOutcome::Pass,
            )
        } else {
            (
                INITIAL_INTERVAL,
                (card.ease_factor - self.fail_penalty).max(self.minimum_ease),
                ReviewOutcome::Fail,
            )
        };

        let next_review = review_time(now, interval);

        tracing::debug!(
            card_id = card.id,
            quality = quality.to_value(),
            interval,
            ease_factor,
            "card scheduled"
        );

        SchedulingResult {
            card: Card {
                next_review,
                interval,
                ease_factor,
                ..card.clone()
            },
            outcome,
        }
    }
}

impl Sm2Lite {
    fn pass_multiplier(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Good => self.good_multiplier,
            Quality::Easy => self.easy_multiplier,
            _ => self.perfect_multiplier,
        }
    }
}

/// SM-2 ease adjustment: +0.1 for 5, 0.0 for 4, -0.14 for 3.
fn ease_delta(quality: Quality) -> f64 {
    let miss = f64::from(5 - quality.to_value());
    0.1 - miss * (0.08 + miss * 0.02)
}
