//! Answer comparison for the quiz and typing modes.

use serde::{Deserialize, Serialize};

/// How a submitted answer is compared to the card's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Byte-for-byte equality. Used by the multiple-choice quiz, where the
    /// submitted text is one of the offered options.
    Exact,
    /// Equality after trimming and lowercasing both sides. Used by typing.
    CaseInsensitive,
}

/// Result of comparing a submitted answer to the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    pub matching_mode: MatchingMode,
    /// Submitted answer as it was compared.
    pub typed_normalized: String,
    /// Correct answer as it was compared.
    pub correct_normalized: String,
}

/// Compare a submitted answer to the correct answer.
pub fn compare_answers(typed: &str, correct: &str, mode: MatchingMode) -> MatchResult {
    let (typed_normalized, correct_normalized) = match mode {
        MatchingMode::Exact => (typed.to_string(), correct.to_string()),
        MatchingMode::CaseInsensitive => (normalize(typed), normalize(correct)),
    };

    MatchResult {
        is_correct: typed_normalized == correct_normalized,
        matching_mode: mode,
        typed_normalized,
        correct_normalized,
    }
}

/// Trim surrounding whitespace and lowercase. Inner whitespace is kept as is.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
