//! Core types for the quiz question model.

use serde::{Deserialize, Serialize};

/// Prompt used when a question block has no separate prompt paragraph.
pub const DEFAULT_PROMPT: &str = "What is the most likely diagnosis?";

/// A single lettered answer option, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// The originally-authored uppercase letter (A, B, C, ...).
    pub letter: char,
    pub text: String,
}

impl QuestionOption {
    pub fn new(letter: char, text: impl Into<String>) -> Self {
        Self {
            letter,
            text: text.into(),
        }
    }
}

/// An image referenced from a question block.
///
/// Extracted from both the custom `[IMAGE: name]` syntax and standard
/// markdown `![alt](path)` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Alt text, or `"View Image"` when the source provided none.
    pub alt_text: String,
    /// File name or URL exactly as authored.
    pub source: String,
}

/// Composite question identity: `(number, title)`.
///
/// Numbers alone may repeat across specialties in malformed documents, so
/// the tracker keys answer state on both fields.
pub type QuestionKey = (String, String);

/// One parsed multiple-choice question. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Numeric label as it appeared in source (not necessarily dense).
    pub number: String,
    /// Text following the number on the header line.
    pub title: String,
    /// The clinical vignette text.
    pub scenario: String,
    /// Text following an `**Investigations:**` marker, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigations: Option<String>,
    /// The question being asked. Defaults to [`DEFAULT_PROMPT`].
    pub prompt: String,
    /// Lettered options in authored order, never resorted.
    pub options: Vec<QuestionOption>,
    /// The letter marked correct. `None` means the question is unscorable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<char>,
    /// Free-text rationale; empty string if not found.
    pub explanation: String,
    /// Nearest preceding specialty header, or `"Uncategorized"`.
    pub specialty: String,
    /// Image references in order of appearance.
    pub images: Vec<ImageRef>,
}

impl Question {
    /// Identity used by the tracker to key answer state.
    pub fn key(&self) -> QuestionKey {
        (self.number.clone(), self.title.clone())
    }

    /// Whether the question can be scored: an answer key was found and it
    /// names one of the parsed options.
    pub fn is_scorable(&self) -> bool {
        match self.answer {
            Some(letter) => self.options.iter().any(|o| o.letter == letter),
            None => false,
        }
    }

    /// Text of the option with the given letter, if present.
    pub fn option_text(&self, letter: char) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.letter == letter)
            .map(|o| o.text.as_str())
    }

    /// Option letters that appear more than once. Non-empty output indicates
    /// a parse defect in the source document, not a reason to drop options.
    pub fn duplicate_letters(&self) -> Vec<char> {
        let mut seen = Vec::new();
        let mut dupes = Vec::new();
        for option in &self.options {
            if seen.contains(&option.letter) {
                if !dupes.contains(&option.letter) {
                    dupes.push(option.letter);
                }
            } else {
                seen.push(option.letter);
            }
        }
        dupes
    }
}

/// Data-quality finding surfaced alongside a parsed document.
///
/// Warnings never block question construction; they exist so callers can
/// log or display source defects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ParseWarning {
    /// The same option letter was authored more than once.
    DuplicateOptionLetter {
        number: String,
        title: String,
        letter: char,
    },
    /// An answer key names a letter with no matching option. The question
    /// is retained but treated as unscorable.
    AnswerWithoutOption {
        number: String,
        title: String,
        letter: char,
    },
}

/// Result of parsing one document: questions in source order plus any
/// data-quality warnings.
///
/// Re-parsing identical input yields a structurally identical value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub questions: Vec<Question>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedDocument {
    /// Total number of questions parsed.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when no block in the document parsed as a question. Callers
    /// present this as "no questions found" rather than an error.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl IntoIterator for ParsedDocument {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}
