//! Parsed-document cache keyed by content hash.
//!
//! Parsing is deterministic, so a document whose bytes have not changed
//! never needs re-parsing. The cache is an explicit object owned by the
//! caller rather than an ambient global, and the parser stays correct
//! whether or not one is used.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::types::ParsedDocument;

/// SHA-256 hash of document text, lowercase hex.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// In-memory cache of parse results keyed by [`content_hash`].
#[derive(Debug, Clone, Default)]
pub struct DocumentCache {
    entries: HashMap<String, Arc<ParsedDocument>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &str) -> Option<Arc<ParsedDocument>> {
        self.entries.get(hash).cloned()
    }

    pub fn put(&mut self, hash: String, document: ParsedDocument) -> Arc<ParsedDocument> {
        let document = Arc::new(document);
        self.entries.insert(hash, Arc::clone(&document));
        document
    }

    /// Look up by content, parsing on a miss.
    pub fn get_or_parse(&mut self, text: &str, filename_hint: &str) -> Arc<ParsedDocument> {
        let hash = content_hash(text);
        if let Some(cached) = self.get(&hash) {
            tracing::debug!(file = filename_hint, hash = %hash, "cache hit");
            return cached;
        }
        let document = crate::parser::parse_document(text, filename_hint);
        self.put(hash, document)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
