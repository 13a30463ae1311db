//! Question block segmentation.
//!
//! A block starts at a line matching the question-header pattern
//! (`### <number>. <title>`) and runs to the line before the next such
//! header, or to end of document.

use std::sync::LazyLock;

use regex::Regex;

/// Start-of-block pattern. Anchored to line starts so a `###` sequence in
/// running text does not open a block.
static QUESTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###\s*\d+\.").expect("invalid question start regex"));

/// One question's text span and its start offset in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Lazily yield one [`Block`] per question header in `text`. Documents with
/// no headers yield nothing; trailing content after the last header belongs
/// to the last block.
pub fn segment(text: &str) -> Segments<'_> {
    let starts: Vec<usize> = QUESTION_START_RE.find_iter(text).map(|m| m.start()).collect();
    Segments {
        text,
        starts,
        next: 0,
    }
}

/// Iterator returned by [`segment`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    starts: Vec<usize>,
    next: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = *self.starts.get(self.next)?;
        let end = self
            .starts
            .get(self.next + 1)
            .copied()
            .unwrap_or(self.text.len());
        self.next += 1;
        Some(Block {
            text: &self.text[offset..end],
            offset,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.starts.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}
