//! In-memory vector index with exact brute-force cosine search.
//!
//! Entries are scored in parallel, then stably sorted so that equal scores
//! keep their insertion order. No approximation, no persistence: the index
//! is rebuilt from scratch whenever the corpus changes.

use rayon::prelude::*;
use serde::Serialize;

/// One indexed chunk: its text and its embedded vector.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub text: String,
    pub vector: Vec<f32>,
}

/// A search result: the chunk text and its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    pub text: &'a str,
    pub score: f32,
}

/// Ordered collection of embedded chunks supporting top-k cosine search.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Store entries in the given order; that order is the tie-break for
    /// equal-similarity results.
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return up to `k` entries ranked by descending cosine similarity.
    ///
    /// Every stored vector is scored (exact search); the sort is stable so
    /// ties keep insertion order. An empty index or `k == 0` yields an
    /// empty result, and `k` beyond the entry count returns everything,
    /// still fully sorted.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit<'_>> {
        if self.entries.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .par_iter()
            .map(|entry| SearchHit {
                text: entry.text.as_str(),
                score: cosine_similarity(query, &entry.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }
}

/// Cosine similarity of two vectors, defined as 0 (never NaN) when either
/// has zero magnitude.
///
/// Stored vectors are pre-normalized, but the true quotient is computed
/// anyway so callers may pass unnormalized queries.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, vector: &[f32]) -> IndexEntry {
        IndexEntry {
            text: text.to_string(),
            vector: vector.to_vec(),
        }
    }

    #[test]
    fn results_sorted_by_descending_similarity() {
        let index = VectorIndex::build(vec![
            entry("far", &[0.0, 1.0]),
            entry("near", &[1.0, 0.0]),
            entry("mid", &[0.7, 0.7]),
        ]);
        let hits = index.search(&[1.0, 0.0], 3);

        let texts: Vec<&str> = hits.iter().map(|h| h.text).collect();
        assert_eq!(texts, ["near", "mid", "far"]);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn ties_preserve_insertion_order() {
        // Three identical vectors: similarity ties across the board.
        let index = VectorIndex::build(vec![
            entry("first", &[1.0, 0.0]),
            entry("second", &[1.0, 0.0]),
            entry("third", &[1.0, 0.0]),
        ]);
        let hits = index.search(&[1.0, 0.0], 3);
        let texts: Vec<&str> = hits.iter().map(|h| h.text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn empty_index_returns_empty_for_any_k() {
        let index = VectorIndex::build(Vec::new());
        assert!(index.search(&[1.0, 0.0], 0).is_empty());
        assert!(index.search(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn k_beyond_entry_count_returns_all_sorted() {
        let index = VectorIndex::build(vec![
            entry("b", &[0.5, 0.5]),
            entry("a", &[1.0, 0.0]),
        ]);
        let hits = index.search(&[1.0, 0.0], 100);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "a");
        assert_eq!(hits[1].text, "b");
    }

    #[test]
    fn k_zero_returns_empty() {
        let index = VectorIndex::build(vec![entry("a", &[1.0])]);
        assert!(index.search(&[1.0], 0).is_empty());
    }

    #[test]
    fn zero_magnitude_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0], &[0.0]), 0.0);

        let index = VectorIndex::build(vec![
            entry("zeroed", &[0.0, 0.0]),
            entry("live", &[1.0, 0.0]),
        ]);
        let hits = index.search(&[0.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score == 0.0));
        // All-tie, so insertion order survives.
        assert_eq!(hits[0].text, "zeroed");
    }

    #[test]
    fn cosine_is_scale_invariant() {
        let a = [3.0, 4.0];
        let b = [0.3, 0.4];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}
