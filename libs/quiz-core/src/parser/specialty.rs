//! Specialty section index.
//!
//! Specialty headers are level-2 markdown headings (`## Cardiology`). Each
//! question is labeled with the header in effect at its own offset, so the
//! index is a position-sorted table answered by binary search. Documents may
//! contain hundreds of headers and thousands of questions; the lookup is
//! called once per question during load.

use std::sync::LazyLock;

use regex::Regex;

/// Specialty assigned to questions before the first header.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Level-2 heading. `###` question headers must not match, which the
/// mandatory whitespace after `##` guarantees.
static SPECIALTY_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+?)\s*$").expect("invalid specialty regex"));

/// Position-sorted lookup table from document offset to specialty name.
#[derive(Debug, Clone)]
pub struct SpecialtyIndex {
    /// `(offset, name)` pairs ascending by offset, starting with the
    /// `(0, "Uncategorized")` sentinel floor.
    markers: Vec<(usize, String)>,
}

impl SpecialtyIndex {
    /// Scan a document for specialty headers. Pure function of the text;
    /// duplicate header names each get their own entry.
    pub fn build(text: &str) -> Self {
        let mut markers = vec![(0, UNCATEGORIZED.to_string())];
        for caps in SPECIALTY_HEADER_RE.captures_iter(text) {
            let m = caps.get(0).expect("capture group 0 always present");
            let name = caps[1].trim().to_string();
            markers.push((m.start(), name));
        }
        // find_iter yields matches in position order, so markers are
        // already sorted with the sentinel first.
        Self { markers }
    }

    /// Specialty in effect at `offset`: the name with the greatest indexed
    /// offset that is <= the query.
    pub fn specialty_at(&self, offset: usize) -> &str {
        let idx = self.markers.partition_point(|(start, _)| *start <= offset);
        // idx >= 1 because the sentinel sits at offset 0.
        &self.markers[idx - 1].1
    }

    /// All indexed `(offset, name)` pairs, sentinel included.
    pub fn markers(&self) -> &[(usize, String)] {
        &self.markers
    }
}
