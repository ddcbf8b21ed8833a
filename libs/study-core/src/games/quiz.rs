//! Multiple-choice quiz.
//!
//! Each question shows a card's front and four backs: the right one and three
//! taken from other cards. Answers are compared exactly, since the learner
//! picks from offered strings rather than typing.

use chrono::{DateTime, Utc};

use super::{require_cards, Score};
use crate::error::{GameMode, Result, StudyError};
use crate::matching::{compare_answers, MatchingMode};
use crate::random::{shuffle, RandomSource};
use crate::timer::Timer;
use crate::types::{millis, Card, DisplayDelays, Stats};

/// Options offered per question.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct QuizGame {
    question: Card,
    options: Vec<String>,
    locked_answer: Option<String>,
    score: Score,
    delays: DisplayDelays,
    advance: Timer<()>,
}

impl QuizGame {
    /// Start a quiz with a zeroed score.
    pub fn start(
        cards: &[Card],
        delays: DisplayDelays,
        rng: &mut dyn RandomSource,
    ) -> Result<Self> {
        let (question, options) = draw_question(cards, rng)?;
        Ok(Self {
            question,
            options,
            locked_answer: None,
            score: Score::default(),
            delays,
            advance: Timer::new(),
        })
    }

    /// Replace the current question, cancelling any pending auto-advance.
    pub fn next_question(&mut self, cards: &[Card], rng: &mut dyn RandomSource) -> Result<()> {
        let (question, options) = draw_question(cards, rng)?;
        self.advance.cancel();
        self.question = question;
        self.options = options;
        self.locked_answer = None;
        Ok(())
    }

    /// Lock in `choice` and grade it. Only one answer per question.
    pub fn answer(&mut self, choice: &str, stats: &mut Stats, now: DateTime<Utc>) -> Result<bool> {
        if self.locked_answer.is_some() {
            return Err(StudyError::AlreadyAnswered);
        }

        let correct = compare_answers(choice, &self.question.back, MatchingMode::Exact).is_correct;
        self.locked_answer = Some(choice.to_string());
        self.score.record(correct);
        stats.record_answer(correct);
        self.advance
            .schedule(now, millis(self.delays.quiz_advance_ms), ());

        tracing::debug!(card_id = self.question.id, correct, "quiz answered");
        Ok(correct)
    }

    /// Move to a new question once the answer has been on display long enough.
    ///
    /// If the lesson no longer has enough cards the error is returned and the
    /// answered question stays up.
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

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn locked_answer(&self) -> Option<&str> {
        self.locked_answer.as_deref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn advance_pending(&self) -> bool {
        self.advance.is_pending()
    }
}

/// Shuffle the lesson, take the first card as the question and the next
/// distinct backs as distractors.
fn draw_question(cards: &[Card], rng: &mut dyn RandomSource) -> Result<(Card, Vec<String>)> {
    require_cards(GameMode::Quiz, cards, OPTION_COUNT)?;

    let mut deck = cards.to_vec();
    shuffle(&mut deck, rng);
    let mut drawn = deck.into_iter();
    let question = drawn.next().ok_or(StudyError::NotEnoughCards {
        mode: GameMode::Quiz,
        required: OPTION_COUNT,
        available: 0,
    })?;

    // Cards sharing a back would duplicate an option.
    let mut options = vec![question.back.clone()];
    for card in drawn {
        if options.len() == OPTION_COUNT {
            break;
        }
        if !options.contains(&card.back) {
            options.push(card.back);
        }
    }
    if options.len() < OPTION_COUNT {
        return Err(StudyError::NotEnoughCards {
            mode: GameMode::Quiz,
            required: OPTION_COUNT,
            available: options.len(),
        });
    }

    shuffle(&mut options, rng);
    Ok((question, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedSequence, ThreadRandom};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn cards(count: i64) -> Vec<Card> {
        let now = Utc::now();
        (1..=count)
            .map(|id| Card::new(id, format!("Q{id}"), format!("A{id}"), now))
            .collect()
    }

    fn quiz(cards: &[Card]) -> QuizGame {
        QuizGame::start(cards, DisplayDelays::default(), &mut FixedSequence::identity()).unwrap()
    }

    #[test]
    fn identity_layout_puts_answer_first() {
        let game = quiz(&cards(5));
        assert_eq!(game.question().id, 1);
        assert_eq!(game.options(), &["A1", "A2", "A3", "A4"]);
        assert_eq!(game.locked_answer(), None);
    }

    #[test]
    fn rotating_source_gives_exact_layout() {
        let mut rotate = FixedSequence::new(vec![0]);
        let game = QuizGame::start(&cards(4), DisplayDelays::default(), &mut rotate).unwrap();
        assert_eq!(game.question().id, 2);
        assert_eq!(game.options(), &["A3", "A4", "A1", "A2"]);
    }

    #[test]
    fn options_always_hold_answer_once() {
        let deck = cards(8);
        let mut rng = ThreadRandom::seeded(11);
        let mut game = QuizGame::start(&deck, DisplayDelays::default(), &mut rng).unwrap();
        for _ in 0..50 {
            let back = game.question().back.clone();
            assert_eq!(game.options().len(), OPTION_COUNT);
            assert_eq!(game.options().iter().filter(|o| **o == back).count(), 1);
            game.next_question(&deck, &mut rng).unwrap();
        }
    }

    #[test]
    fn duplicate_backs_are_not_offered_twice() {
        let mut deck = cards(5);
        deck[1].back = "A1".into();
        let game = quiz(&deck);
        assert_eq!(game.options(), &["A1", "A3", "A4", "A5"]);
    }

    #[test]
    fn refuses_fewer_than_four_cards() {
        let mut rng = FixedSequence::identity();
        let err = QuizGame::start(&cards(3), DisplayDelays::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            StudyError::NotEnoughCards { mode: GameMode::Quiz, required: 4, available: 3 }
        ));
    }

    #[test]
    fn correct_answer_scores() {
        let mut game = quiz(&cards(4));
        let mut stats = Stats::default();
        let back = game.question().back.clone();

        assert!(game.answer(&back, &mut stats, Utc::now()).unwrap());
        assert_eq!(game.score(), Score { score: 1, total: 1 });
        assert_eq!(stats.correct, 1);
        assert_eq!(game.locked_answer(), Some("A1"));
    }

    #[test]
    fn comparison_is_exact() {
        let mut game = quiz(&cards(4));
        let mut stats = Stats::default();

        assert!(!game.answer("a1", &mut stats, Utc::now()).unwrap());
        assert_eq!(game.score(), Score { score: 0, total: 1 });
        assert_eq!(stats.incorrect, 1);
    }

    #[test]
    fn second_answer_is_rejected() {
        let mut game = quiz(&cards(4));
        let mut stats = Stats::default();
        let now = Utc::now();
        game.answer("A2", &mut stats, now).unwrap();

        assert!(matches!(
            game.answer("A1", &mut stats, now),
            Err(StudyError::AlreadyAnswered)
        ));
        assert_eq!(game.score().total, 1);
        assert_eq!(stats, Stats { studied: 0, correct: 0, incorrect: 1 });
    }

    #[test]
    fn advances_after_display_delay() {
        let deck = cards(4);
        let mut game = quiz(&deck);
        let mut stats = Stats::default();
        let mut rng = FixedSequence::new(vec![0]);
        let now = Utc::now();
        game.answer("A1", &mut stats, now).unwrap();

        assert!(!game.tick(&deck, &mut rng, now + Duration::milliseconds(1499)).unwrap());
        assert!(game.tick(&deck, &mut rng, now + Duration::milliseconds(1500)).unwrap());
        assert_eq!(game.locked_answer(), None);
        assert_eq!(game.question().id, 2);
        assert_eq!(game.score(), Score { score: 1, total: 1 });
    }

    #[test]
    fn manual_next_cancels_pending_advance() {
        let deck = cards(4);
        let mut game = quiz(&deck);
        let mut stats = Stats::default();
        let now = Utc::now();
        game.answer("A1", &mut stats, now).unwrap();

        game.next_question(&deck, &mut FixedSequence::identity()).unwrap();
        assert!(!game.advance_pending());
        assert!(!game
            .tick(&deck, &mut FixedSequence::identity(), now + Duration::seconds(10))
            .unwrap());
    }

    #[test]
    fn tick_keeps_question_when_lesson_shrinks() {
        let deck = cards(4);
        let mut game = quiz(&deck);
        let mut stats = Stats::default();
        let now = Utc::now();
        game.answer("A1", &mut stats, now).unwrap();

        let later = now + Duration::seconds(2);
        let result = game.tick(&deck[..2], &mut FixedSequence::identity(), later);
        assert!(result.is_err());
        assert_eq!(game.locked_answer(), Some("A1"));
        assert!(game.advance_pending());
    }
}
