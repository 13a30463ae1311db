//! Core quiz library shared by the web API and GUI front-ends.
//!
//! Provides:
//! - Tolerant markdown parser for multiple-choice medical exam questions
//!   (specialty indexing, block segmentation, field extraction)
//! - Answer/progress tracking for a quiz session (score, per-specialty
//!   breakdown, navigation)
//! - Content-hash keyed cache of parse results
//! - Shared types (Question, ParsedDocument, ParseWarning, etc.)

pub mod cache;
pub mod error;
pub mod parser;
pub mod session;
pub mod types;

pub use cache::{content_hash, DocumentCache};
pub use error::{Result, SessionError};
pub use parser::{parse_document, SpecialtyIndex, UNCATEGORIZED};
pub use session::{
    AnswerRecord, CategoryScore, Direction, LoadOptions, QuizSession, SessionStatus,
    SessionSummary, SAMPLE_CAP,
};
pub use types::{
    ImageRef, ParseWarning, ParsedDocument, Question, QuestionKey, QuestionOption, DEFAULT_PROMPT,
};
