//! Markdown question parser.
//!
//! # Format
//! ```markdown
//! ## Cardiology
//!
//! ### 1. Chest pain
//! A 54-year-old man presents with central crushing chest pain.
//!
//! **Investigations:** ECG shows ST elevation.
//!
//! What is the most likely diagnosis?
//!
//! A) STEMI
//! B) Stable angina
//!
//! **Answer:** A
//! **Explanation:** ST elevation indicates STEMI.
//! ```
//!
//! The corpus is human-authored and inconsistent: the investigations and
//! answer markers appear with the colon inside or outside the bold markup,
//! options wrap without blank lines, and some documents never separate
//! options from the prompt. Parsing is therefore tolerant throughout:
//! only a block whose first line is not a `### <number>. <title>` header
//! is skipped.

mod block;
mod patterns;
mod segment;
mod specialty;

pub use patterns::investigation_variants;
pub use segment::{segment, Block, Segments};
pub use specialty::{SpecialtyIndex, UNCATEGORIZED};

use crate::types::{ParseWarning, ParsedDocument};

/// Parse a full markdown document into an ordered question list.
///
/// `filename_hint` is carried only for log events; it plays no part in
/// parsing. A document with zero recognizable questions yields an empty
/// [`ParsedDocument`], never an error; callers surface that as "no
/// questions found". Parsing is pure and synchronous; identical input
/// yields a structurally identical result.
pub fn parse_document(text: &str, filename_hint: &str) -> ParsedDocument {
    let variants = investigation_variants(text);
    if !variants.is_empty() {
        tracing::debug!(
            file = filename_hint,
            sections = variants.values().sum::<usize>(),
            spellings = variants.len(),
            "investigations marker variants"
        );
    }

    let index = SpecialtyIndex::build(text);
    let mut document = ParsedDocument::default();

    for segment in segment(text) {
        let specialty = index.specialty_at(segment.offset);
        let Some(question) = block::parse_block(segment.text, specialty) else {
            continue;
        };
        collect_warnings(&question, &mut document.warnings);
        document.questions.push(question);
    }

    tracing::info!(
        file = filename_hint,
        questions = document.len(),
        warnings = document.warnings.len(),
        "parsed document"
    );

    document
}

/// Record data-quality findings for one question. Findings never block
/// question construction.
fn collect_warnings(question: &crate::types::Question, warnings: &mut Vec<ParseWarning>) {
    for letter in question.duplicate_letters() {
        tracing::warn!(
            number = %question.number,
            title = %question.title,
            letter = %letter,
            "duplicate option letter"
        );
        warnings.push(ParseWarning::DuplicateOptionLetter {
            number: question.number.clone(),
            title: question.title.clone(),
            letter,
        });
    }

    if let Some(letter) = question.answer {
        if question.option_text(letter).is_none() {
            tracing::warn!(
                number = %question.number,
                title = %question.title,
                letter = %letter,
                "answer key names a letter with no matching option"
            );
            warnings.push(ParseWarning::AnswerWithoutOption {
                number: question.number.clone(),
                title: question.title.clone(),
                letter,
            });
        }
    }
}
