//! Vocabulary construction over a chunk corpus.
//!
//! A [`VocabularyBuilder`] grows while chunks are fed in; [`freeze`]
//! consumes it and yields the immutable [`Vocabulary`] and
//! [`DocumentFrequencies`] used for embedding. Because freezing takes the
//! builder by value, nothing can embed against a still-growing vocabulary.
//!
//! [`freeze`]: VocabularyBuilder::freeze

use std::collections::{HashMap, HashSet};

use crate::tokenize::tokenize;

/// Accumulates terms and per-chunk counts during the build phase.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    index_of: HashMap<String, usize>,
    chunk_counts: HashMap<String, u32>,
    total_chunks: usize,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one chunk's distinct tokens.
    ///
    /// Unseen tokens get the next vocabulary index in order of first
    /// occurrence; each distinct token's chunk counter is incremented
    /// exactly once no matter how often it repeats inside the chunk.
    pub fn add_chunk(&mut self, text: &str) {
        let mut seen = HashSet::new();
        for token in tokenize(text) {
            if !seen.insert(token.clone()) {
                continue;
            }
            let next_index = self.index_of.len();
            self.index_of.entry(token.clone()).or_insert(next_index);
            *self.chunk_counts.entry(token).or_insert(0) += 1;
        }
        self.total_chunks += 1;
    }

    /// Number of chunks fed in so far.
    pub fn total_chunks(&self) -> usize {
        self.total_chunks
    }

    /// Freeze the vocabulary and derive the document-frequency table.
    ///
    /// Only terms seen in more than one chunk are kept in the table;
    /// singleton terms are dropped and later looked up as frequency 1,
    /// which scores the same either way. This matches the observed
    /// behavior of the system being reimplemented and is intentional.
    pub fn freeze(self) -> (Vocabulary, DocumentFrequencies) {
        let counts = self
            .chunk_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();

        (
            Vocabulary {
                index_of: self.index_of,
            },
            DocumentFrequencies {
                counts,
                total_chunks: self.total_chunks,
            },
        )
    }
}

/// Frozen term -> vector-position mapping.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index_of: HashMap<String, usize>,
}

impl Vocabulary {
    /// Vector position of a term, or `None` for out-of-vocabulary terms.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index_of.get(term).copied()
    }

    /// Number of terms, i.e. the dimensionality of embedded vectors.
    pub fn len(&self) -> usize {
        self.index_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_of.is_empty()
    }
}

/// Frozen per-corpus document-frequency table.
#[derive(Debug, Clone)]
pub struct DocumentFrequencies {
    counts: HashMap<String, u32>,
    total_chunks: usize,
}

impl DocumentFrequencies {
    /// Chunk count for a term; absent terms (including dropped singletons)
    /// report 1.
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(1).max(1)
    }

    /// Total number of chunks the corpus was built from.
    pub fn total_chunks(&self) -> usize {
        self.total_chunks
    }
}
