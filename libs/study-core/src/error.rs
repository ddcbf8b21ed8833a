//! Error types for study-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Practice mode that refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Match,
    Quiz,
    Typing,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Quiz => "quiz",
            Self::Typing => "typing",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by the scheduling and practice engines.
///
/// Every error is raised before any card or stats mutation, so the caller can
/// show a message and carry on.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("invalid rating {0}: expected a value between 1 and 5")]
    InvalidRating(i64),

    #[error("{mode} needs at least {required} cards, lesson has {available}")]
    NotEnoughCards {
        mode: GameMode,
        required: usize,
        available: usize,
    },

    #[error("invalid card {index} in lesson {lesson}: {reason}")]
    Validation {
        lesson: String,
        index: usize,
        reason: String,
    },

    #[error("unknown lesson {0}")]
    UnknownLesson(String),

    #[error("no cards are due for review")]
    NoDueCards,

    #[error("question already answered")]
    AlreadyAnswered,

    #[error("unknown tile {0}")]
    UnknownTile(usize),

    #[error("malformed backup: {0}")]
    Json(#[from] serde_json::Error),
}
