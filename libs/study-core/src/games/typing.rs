//! Free-typing recall.

use chrono::{DateTime, Utc};

use super::{require_cards, Score};
use crate::error::{GameMode, Result, StudyError};
use crate::matching::{compare_answers, MatchResult, MatchingMode};
use crate::random::{shuffle, RandomSource};
use crate::timer::Timer;
use crate::types::{millis, Card, DisplayDelays, Stats};

#[derive(Debug, Clone)]
pub struct TypingGame {
    question: Card,
    input: String,
    result: Option<MatchResult>,
    score: Score,
    delays: DisplayDelays,
    advance: Timer<()>,
}

impl TypingGame {
    pub fn start(
        cards: &[Card],
        delays: DisplayDelays,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        Ok(Self {
            question: draw_question(cards, rng)?,
            input: String::new(),
            result: None,
            score: Score::default(),
            delays,
            advance: Timer::new(),
        })
    }

    /// Draw a new question. The same card may come up twice in a row.
    pub fn next_question(&mut self, cards: &[Card], rng: &mut dyn RandomSource) -> Result<()> {
        self.question = draw_question(cards, rng)?;
        self.advance.cancel();
        self.input.clear();
        self.result = None;
        Ok(())
    }

    /// Grade `input` against the card's back, ignoring case and surrounding
    /// whitespace. Blank input is ignored and returns `None`.
    pub fn submit(
        &mut self,
        input: &str,
        stats: &mut Stats,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        if self.result.is_some() {
            return Err(StudyError::AlreadyAnswered);
        }

        let result = compare_answers(input, &self.question.back, MatchingMode::CaseInsensitive);
        let correct = result.is_correct;
        self.input = input.to_string();
        self.result = Some(result);
        self.score.record(correct);
        stats.record_answer(correct);
        self.advance
            .schedule(now, millis(self.delays.typing_advance_ms), ());

        tracing::debug!(card_id = self.question.id, correct, "typed answer graded");
        Ok(Some(correct))
    }

    pub fn tick(
        &mut self,
        cards: &[Card],
        rng: &mut dyn RandomSource,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        match self.advance.fires_at() {
            Some(at) if at <= now => {
                self.next_question(cards, rng)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn question(&self) -> &Card {
        &self.question
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Verdict for the current question, once submitted.
    pub fn result(&self) -> Option<bool> {
        self.result.as_ref().map(|r| r.is_correct)
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

fn draw_question(cards: &[Card], rng: &mut dyn RandomSource) -> Result<Card> {
    require_cards(GameMode::Typing, cards, 1)?;
    let mut deck = cards.to_vec();
    shuffle(&mut deck, rng);
    Ok(deck.swap_remove(0))
}
