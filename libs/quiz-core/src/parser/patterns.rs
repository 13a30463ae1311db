//! Regex extraction strategies for question blocks.
//!
//! Authored markdown comes in several dialects, so each field is extracted
//! by an ordered pipeline: a primary pattern, then a fallback pass. Every
//! function here is pure so the dialect tolerance stays testable in
//! isolation and extensible when a new dialect shows up.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{ImageRef, QuestionOption};

/// Question header: `### <number>. <title>`, applied to the first line of
/// a block.
pub(crate) static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s*(\d+)\.\s*(.*)$").expect("invalid header regex"));

/// Blank-line paragraph boundary between parts.
static PART_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("invalid part boundary regex"));

/// Investigations marker. Both `**Investigations:**` and
/// `**Investigations**:` appear in authored content, as do singular and
/// mixed-case spellings, so the colon may sit inside or outside the bold
/// markup.
static INVESTIGATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*Investigations?(?::\*\*|\*\*:)\s*").expect("invalid investigations regex")
});

/// Option line: a single uppercase letter, `.` or `)`, optional space, text.
static OPTION_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])[.)]\s*(.*)$").expect("invalid option regex"));

/// Answer key: `**Answer:** B`, `**Answer**: B`, `**Ans:** B.` and
/// case variants all resolve to the same letter.
static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*Ans(?:wer)?(?::\*\*|\*\*:)\s*([A-Za-z])\.?").expect("invalid answer regex")
});

/// Explanation body, captured up to a dashed rule, an explicit
/// `**End Explanation**` marker, or end of tail.
static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\*\*(?:Explanation|Rationale)(?::\*\*|\*\*:)\s*(.*?)(?:\n-{3,}|\n\*\*\s*End Explanation\s*\*\*|\z)",
    )
    .expect("invalid explanation regex")
});

/// Custom image syntax: `[IMAGE: filename.jpg]`.
static CUSTOM_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[IMAGE:\s*([^\]]+)\]").expect("invalid image regex"));

/// Standard markdown image syntax: `![alt text](path)`.
static MARKDOWN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("invalid image regex"));

/// Alt text used when an image reference carries none.
const VIEW_IMAGE: &str = "View Image";

/// Split block body into parts on blank-line boundaries, keeping at most
/// five pieces. Content past the fourth boundary stays one combined tail so
/// incidental blank lines inside options or explanations never fragment
/// those sections.
pub(crate) fn split_parts(body: &str) -> Vec<String> {
    PART_BOUNDARY_RE
        .splitn(body, 5)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Split a scenario back into blank-line units for the prompt fallback.
pub(crate) fn split_units(text: &str) -> Vec<String> {
    PART_BOUNDARY_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Find the part containing an investigations marker. Returns the part
/// index and the part's text with the marker stripped.
pub(crate) fn find_investigations(parts: &[String]) -> Option<(usize, String)> {
    for (i, part) in parts.iter().enumerate() {
        if INVESTIGATIONS_RE.is_match(part) {
            let content = INVESTIGATIONS_RE.replace_all(part, "").trim().to_string();
            return Some((i, content));
        }
    }
    None
}

/// Extract lettered options from the tail.
///
/// Primary strategy: one option per line. When fewer than two lines match,
/// fall back to accumulation mode, where a marker line starts a new option
/// and following non-marker lines are continuations of its text. That
/// handles options whose text wraps without a blank-line separator.
pub(crate) fn extract_options(tail: &str) -> Vec<QuestionOption> {
    let options: Vec<QuestionOption> = tail
        .lines()
        .filter_map(|line| match_option_line(line))
        .collect();

    if options.len() >= 2 {
        return options;
    }

    accumulate_options(tail)
}

/// Match one trimmed line against the option-line pattern.
pub(crate) fn match_option_line(line: &str) -> Option<QuestionOption> {
    let caps = OPTION_LINE_RE.captures(line.trim())?;
    let letter = caps.get(1)?.as_str().chars().next()?;
    let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
    Some(QuestionOption { letter, text })
}

/// Multi-line accumulation fallback for wrapped option text.
fn accumulate_options(tail: &str) -> Vec<QuestionOption> {
    let mut options = Vec::new();
    let mut current: Option<(char, Vec<String>)> = None;

    for line in tail.lines() {
        let line = line.trim();
        if let Some(option) = match_option_line(line) {
            if let Some((letter, pieces)) = current.take() {
                options.push(QuestionOption::new(letter, pieces.join(" ").trim()));
            }
            current = Some((option.letter, vec![option.text]));
        } else if let Some((_, pieces)) = current.as_mut() {
            if !line.is_empty() {
                pieces.push(line.to_string());
            }
        }
    }

    if let Some((letter, pieces)) = current {
        options.push(QuestionOption::new(letter, pieces.join(" ").trim()));
    }

    options
}

/// Extract the answer letter from the tail. Absence is not an error; the
/// question simply becomes unscorable.
pub(crate) fn extract_answer(tail: &str) -> Option<char> {
    ANSWER_RE
        .captures(tail)
        .and_then(|caps| caps.get(1)?.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

/// Extract the explanation text from the tail, or empty string.
pub(crate) fn extract_explanation(tail: &str) -> String {
    EXPLANATION_RE
        .captures(tail)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Extract image references from the whole block: custom-syntax matches
/// first, then standard markdown, each in order of appearance. Duplicates
/// are kept; a question may reference the same image twice.
pub(crate) fn extract_images(block: &str) -> Vec<ImageRef> {
    let mut images = Vec::new();

    for caps in CUSTOM_IMAGE_RE.captures_iter(block) {
        images.push(ImageRef {
            alt_text: VIEW_IMAGE.to_string(),
            source: caps[1].trim().to_string(),
        });
    }

    for caps in MARKDOWN_IMAGE_RE.captures_iter(block) {
        let alt = caps[1].trim();
        images.push(ImageRef {
            alt_text: if alt.is_empty() {
                VIEW_IMAGE.to_string()
            } else {
                alt.to_string()
            },
            source: caps[2].trim().to_string(),
        });
    }

    images
}

/// Last-resort option recovery for documents where options were never
/// separated from the prompt by a paragraph break. Option-shaped lines are
/// carved out of the prompt; the rest becomes the revised prompt. Returns
/// `None` when the prompt contains no option lines.
pub(crate) fn split_prompt_options(prompt: &str) -> Option<(String, Vec<QuestionOption>)> {
    let mut options = Vec::new();
    let mut remaining = Vec::new();

    for line in prompt.lines() {
        let line = line.trim();
        match match_option_line(line) {
            Some(option) => options.push(option),
            None => remaining.push(line),
        }
    }

    if options.is_empty() {
        return None;
    }

    Some((remaining.join("\n").trim().to_string(), options))
}

/// Count each distinct spelling of the investigations marker in a document.
/// Useful for diagnosing which dialects a corpus actually contains.
pub fn investigation_variants(text: &str) -> HashMap<String, usize> {
    let mut variants = HashMap::new();
    for m in INVESTIGATIONS_RE.find_iter(text) {
        *variants.entry(m.as_str().trim_end().to_string()).or_insert(0) += 1;
    }
    variants
}
