//! Embedding providers turn text into fixed-dimension vectors.
//!
//! [`TfIdfEmbedder`] is the only provider today; the [`EmbeddingProvider`]
//! trait is the seam where a neural encoder could be swapped in without
//! touching the chunker or the vector index.

use std::collections::HashMap;

use crate::{
    tokenize::tokenize,
    vocabulary::{DocumentFrequencies, Vocabulary},
};

/// Capability to embed text into a fixed-dimension vector.
///
/// `embed` takes `&mut self` because providers may maintain internal
/// caches; it must still be deterministic for identical input.
pub trait EmbeddingProvider: Send {
    /// Dimensionality of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// Embed one text into an L2-normalized vector (all-zero when nothing
    /// in the text carries weight).
    fn embed(&mut self, text: &str) -> Vec<f32>;
}

/// Sparse TF-IDF embedder against a frozen vocabulary.
///
/// Each instance owns its IDF cache; nothing is shared across instances,
/// so engines (and tests) stay fully isolated.
#[derive(Debug)]
pub struct TfIdfEmbedder {
    vocabulary: Vocabulary,
    frequencies: DocumentFrequencies,
    idf_cache: HashMap<String, f32>,
}

impl TfIdfEmbedder {
    pub fn new(vocabulary: Vocabulary, frequencies: DocumentFrequencies) -> Self {
        Self {
            vocabulary,
            frequencies,
            idf_cache: HashMap::new(),
        }
    }

    /// Inverse document frequency of a term, memoized per instance.
    ///
    /// `ln(total_chunks / df)` with df clamped to at least 1, so an empty
    /// or singleton-dropped entry never divides by zero.
    fn idf(&mut self, term: &str) -> f32 {
        if let Some(&cached) = self.idf_cache.get(term) {
            return cached;
        }
        let df = self.frequencies.get(term) as f32;
        let value = (self.frequencies.total_chunks() as f32 / df).ln();
        self.idf_cache.insert(term.to_string(), value);
        value
    }
}

impl EmbeddingProvider for TfIdfEmbedder {
    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Embed text as normalized TF-IDF weights.
    ///
    /// Term frequency is the raw count over the total token count of the
    /// text, where the denominator includes out-of-vocabulary tokens even
    /// though they carry no weight of their own. The vocabulary is never
    /// mutated here; unknown tokens are silently ignored.
    fn embed(&mut self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut weights = vec![0.0f32; self.vocabulary.len()];
        if tokens.is_empty() {
            return weights;
        }

        let total_tokens = tokens.len() as f32;
        let mut raw_counts: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            *raw_counts.entry(token.as_str()).or_insert(0) += 1;
        }

        for (term, count) in raw_counts {
            let Some(index) = self.vocabulary.index_of(term) else {
                continue;
            };
            let tf = count as f32 / total_tokens;
            weights[index] = tf * self.idf(term);
        }

        l2_normalize(&mut weights);
        weights
    }
}

/// Scale a vector to unit length, leaving all-zero vectors untouched.
pub(crate) fn l2_normalize(weights: &mut [f32]) {
    let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for w in weights.iter_mut() {
            *w /= norm;
        }
    }
}
