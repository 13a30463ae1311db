//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the answer/progress tracker.
///
/// Parsing itself never errors: a block that does not look like a question
/// is skipped, and every missing field degrades to its documented default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no quiz loaded")]
    NotLoaded,

    #[error("question index {index} out of range (quiz has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("question {number} has no answer key and cannot be scored")]
    NotScorable { number: String },

    #[error("question {number} was already answered")]
    AlreadyAnswered { number: String },
}
