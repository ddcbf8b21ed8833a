//! Core study library shared by the server and its tests.
//!
//! Provides:
//! - Review scheduling (simplified single-pass SM-2) and due-card selection
//! - Practice engines for pair matching, multiple choice and typing
//! - Answer comparison for quiz and typing modes
//! - Backup envelope parsing with card validation
//! - Shared types (Card, Lesson, Stats, Quality, etc.)

pub mod algorithm;
pub mod backup;
pub mod error;
pub mod games;
pub mod matching;
pub mod random;
pub mod review;
pub mod timer;
pub mod types;

pub use algorithm::{schedule, SchedulingResult, Sm2Lite, SpacedRepetitionAlgorithm};
pub use backup::{Backup, RawCard};
pub use error::{GameMode, Result, StudyError};
pub use games::{MatchGame, MatchPhase, QuizGame, Score, SelectOutcome, Side, Tile, TypingGame};
pub use matching::{compare_answers, MatchResult, MatchingMode};
pub use random::{FixedSequence, RandomSource, ThreadRandom};
pub use review::{due_cards, ReviewSession};
pub use timer::Timer;
pub use types::{Card, CardId, DisplayDelays, Lesson, Quality, ReviewOutcome, Stats};
