//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from study-core
pub use study_core::types::{Card, CardId, Lesson, ReviewOutcome, Stats};
pub use study_core::{MatchGame, MatchPhase, QuizGame, Score, SelectOutcome, Side, TypingGame};

use study_core::review::due_count;
use study_core::ReviewSession;

// === Lessons ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: String,
    pub name: String,
    pub card_count: usize,
    pub due_count: usize,
    pub stats: Stats,
    pub current: bool,
}

impl LessonSummary {
    pub fn new(id: &str, lesson: &Lesson, current: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: lesson.name.clone(),
            card_count: lesson.cards.len(),
            due_count: due_count(&lesson.cards, now),
            stats: lesson.stats,
            current,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonsResponse {
    pub current_lesson_id: String,
    pub lessons: Vec<LessonSummary>,
}

#[derive(Debug, Deserialize)]
pub struct LessonNameRequest {
    pub name: String,
}

// === Cards ===

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub front: String,
    pub back: String,
}

// === Review ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub card: Option<Card>,
    pub flipped: bool,
    pub due_count: usize,
    pub stats: Stats,
}

impl ReviewView {
    pub fn new(session: &ReviewSession, lesson: &Lesson, now: DateTime<Utc>) -> Self {
        Self {
            card: session.current(&lesson.cards, now).cloned(),
            flipped: session.is_flipped(),
            due_count: due_count(&lesson.cards, now),
            stats: lesson.stats,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    /// 1-5; anything else is rejected as an invalid rating.
    pub quality: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    pub graded: Card,
    pub outcome: ReviewOutcome,
    pub review: ReviewView,
}

// === Match ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileView {
    pub index: usize,
    pub text: String,
    pub side: Side,
    pub matched: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub tiles: Vec<TileView>,
    pub phase: MatchPhase,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub hits: u32,
    pub misses: u32,
}

impl From<&MatchGame> for MatchView {
    fn from(game: &MatchGame) -> Self {
        let tiles = game
            .pool()
            .iter()
            .enumerate()
            .map(|(index, tile)| TileView {
                index,
                text: tile.text.clone(),
                side: tile.side,
                matched: game.matched().contains(&tile.pair_id),
                selected: game.selected().contains(&index),
            })
            .collect();

        Self {
            tiles,
            phase: game.phase(),
            matched_pairs: game.matched().len(),
            total_pairs: game.pool().len() / 2,
            hits: game.hits(),
            misses: game.misses(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectTileRequest {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectTileResponse {
    pub outcome: SelectOutcome,
    pub game: MatchView,
}

// === Quiz ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizView {
    pub question_id: CardId,
    pub prompt: String,
    pub options: Vec<String>,
    pub locked_answer: Option<String>,
    pub score: Score,
}

impl From<&QuizGame> for QuizView {
    fn from(game: &QuizGame) -> Self {
        Self {
            question_id: game.question().id,
            prompt: game.question().front.clone(),
            options: game.options().to_vec(),
            locked_answer: game.locked_answer().map(str::to_string),
            score: game.score(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub choice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
    pub expected: String,
    pub quiz: QuizView,
}

// === Typing ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingView {
    pub question_id: CardId,
    pub prompt: String,
    pub input: String,
    pub result: Option<bool>,
    pub score: Score,
}

impl From<&TypingGame> for TypingView {
    fn from(game: &TypingGame) -> Self {
        Self {
            question_id: game.question().id,
            prompt: game.question().front.clone(),
            input: game.input().to_string(),
            result: game.result(),
            score: game.score(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// `None` when the input was blank and ignored.
    pub correct: Option<bool>,
    /// Revealed once the answer has been graded.
    pub expected: Option<String>,
    pub typing: TypingView,
}
