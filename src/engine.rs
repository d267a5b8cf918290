//! Two-corpus retrieval orchestration.
//!
//! The engine owns one vocabulary/frequency/index triple per corpus,
//! built independently so term statistics never leak between them. A
//! question is embedded against each corpus's own frozen state and the
//! retrieved chunks are concatenated into one context string for the
//! downstream generation call.

use serde::Serialize;

use crate::{
    chunking::{ChunkingConfig, chunk_text},
    embedding::{EmbeddingProvider, TfIdfEmbedder},
    error::{Error, Result},
    index::{IndexEntry, VectorIndex},
    vocabulary::VocabularyBuilder,
};

/// Separator between the per-corpus sections of a context string.
const CORPUS_SEPARATOR: &str = "\n\n---\n\n";

/// Separator between chunks within one corpus section.
const CHUNK_SEPARATOR: &str = "\n\n";

/// The fixed corpus names, in query order.
pub const CORPUS_NAMES: [&str; 2] = ["reference", "library"];

struct CorpusState {
    name: &'static str,
    provider: Box<dyn EmbeddingProvider>,
    index: VectorIndex,
}

/// One retrieved chunk, tagged with the corpus it came from.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedChunk {
    pub corpus: &'static str,
    pub text: String,
    pub score: f32,
}

/// Per-corpus index statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub corpus: &'static str,
    pub chunks: usize,
    pub terms: usize,
}

/// Retrieval engine over a reference corpus and a library corpus.
///
/// `initialize` and `query` take `&mut self`, so exclusive borrowing
/// already serializes use of a single instance; wrap the engine in a lock
/// (as [`Assistant`](crate::assistant::Assistant) does) to share it.
///
/// # Examples
///
/// ```
/// use tfidx::engine::RetrievalEngine;
///
/// let mut engine = RetrievalEngine::default();
/// engine
///     .initialize("the cat sat on the mat", "the dog ran in the park")
///     .unwrap();
/// let context = engine.query("where did the cat go", 1).unwrap();
/// assert!(context.contains("cat"));
/// ```
#[derive(Default)]
pub struct RetrievalEngine {
    config: ChunkingConfig,
    corpora: Option<[CorpusState; 2]>,
}

impl RetrievalEngine {
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            config,
            corpora: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.corpora.is_some()
    }

    /// Build both corpus indexes from scratch.
    ///
    /// Each corpus is chunked and gets its own vocabulary, frequency
    /// table, and vector index. State is swapped in only after both
    /// corpora build successfully; on failure the engine stays fully
    /// uninitialized and the caller must re-run `initialize`.
    pub fn initialize(&mut self, reference: &str, library: &str) -> Result<()> {
        // Drop any previous state first: a failed rebuild must leave the
        // engine uninitialized, never serving a stale or partial index.
        self.corpora = None;

        let reference_state =
            build_corpus(CORPUS_NAMES[0], reference, &self.config)?;
        let library_state =
            build_corpus(CORPUS_NAMES[1], library, &self.config)?;

        self.corpora = Some([reference_state, library_state]);
        Ok(())
    }

    /// Retrieve the top chunks for a question from each corpus.
    ///
    /// Corpora are always consulted in the fixed [`CORPUS_NAMES`] order;
    /// within a corpus, chunks come back in rank order.
    pub fn retrieve(
        &mut self,
        question: &str,
        k_per_corpus: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        let corpora = self.corpora.as_mut().ok_or(Error::NotInitialized)?;

        let mut retrieved = Vec::new();
        for corpus in corpora.iter_mut() {
            let query_vector = corpus.provider.embed(question);
            let hits = corpus.index.search(&query_vector, k_per_corpus);
            tracing::debug!(
                corpus = corpus.name,
                hits = hits.len(),
                "retrieved context chunks"
            );
            retrieved.extend(hits.into_iter().map(|hit| RetrievedChunk {
                corpus: corpus.name,
                text: hit.text.to_string(),
                score: hit.score,
            }));
        }
        Ok(retrieved)
    }

    /// Build the concatenated context string for a question.
    ///
    /// Chunks within a corpus are joined by a blank line; the two corpus
    /// sections are divided by a `---` line, reference first.
    pub fn query(
        &mut self,
        question: &str,
        k_per_corpus: usize,
    ) -> Result<String> {
        let retrieved = self.retrieve(question, k_per_corpus)?;

        let sections: Vec<String> = CORPUS_NAMES
            .iter()
            .map(|name| {
                retrieved
                    .iter()
                    .filter(|chunk| chunk.corpus == *name)
                    .map(|chunk| chunk.text.as_str())
                    .collect::<Vec<_>>()
                    .join(CHUNK_SEPARATOR)
            })
            .collect();

        Ok(sections.join(CORPUS_SEPARATOR))
    }

    /// Chunk and term counts per corpus.
    pub fn stats(&self) -> Result<Vec<CorpusStats>> {
        let corpora = self.corpora.as_ref().ok_or(Error::NotInitialized)?;
        Ok(corpora
            .iter()
            .map(|corpus| CorpusStats {
                corpus: corpus.name,
                chunks: corpus.index.len(),
                terms: corpus.provider.dimension(),
            })
            .collect())
    }
}

fn build_corpus(
    name: &'static str,
    text: &str,
    config: &ChunkingConfig,
) -> Result<CorpusState> {
    let chunks = chunk_text(text, config)?;
    if chunks.is_empty() {
        return Err(Error::Initialization(format!("{name} corpus is empty")));
    }

    let mut builder = VocabularyBuilder::new();
    for chunk in &chunks {
        builder.add_chunk(&chunk.text);
    }
    let (vocabulary, frequencies) = builder.freeze();
    if vocabulary.is_empty() {
        return Err(Error::Initialization(format!(
            "{name} corpus contains no word tokens"
        )));
    }

    tracing::info!(
        corpus = name,
        chunks = chunks.len(),
        terms = vocabulary.len(),
        "built corpus index"
    );

    let mut embedder = TfIdfEmbedder::new(vocabulary, frequencies);
    let entries: Vec<IndexEntry> = chunks
        .into_iter()
        .map(|chunk| {
            let vector = embedder.embed(&chunk.text);
            IndexEntry {
                text: chunk.text,
                vector,
            }
        })
        .collect();

    Ok(CorpusState {
        name,
        provider: Box::new(embedder),
        index: VectorIndex::build(entries),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_before_initialize_fails() {
        let mut engine = RetrievalEngine::default();
        assert!(matches!(
            engine.query("anything", 3),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(engine.stats(), Err(Error::NotInitialized)));
    }

    #[test]
    fn empty_corpus_leaves_engine_uninitialized() {
        let mut engine = RetrievalEngine::default();
        let result = engine.initialize("some reference text", "");
        assert!(matches!(result, Err(Error::Initialization(_))));
        assert!(!engine.is_initialized());
        // No partial state: the reference index must not be queryable.
        assert!(matches!(
            engine.query("some reference", 1),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn tokenless_corpus_leaves_engine_uninitialized() {
        let mut engine = RetrievalEngine::default();
        let result = engine.initialize("words here", "... !! ??");
        assert!(matches!(result, Err(Error::Initialization(_))));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn invalid_chunk_config_is_a_config_error() {
        let mut engine = RetrievalEngine::new(ChunkingConfig {
            chunk_size: 10,
            overlap: 10,
        });
        assert!(matches!(
            engine.initialize("abc", "def"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn retry_after_failure_succeeds() {
        let mut engine = RetrievalEngine::default();
        assert!(engine.initialize("cats and dogs", "").is_err());
        engine
            .initialize("cats and dogs", "birds and fish")
            .unwrap();
        assert!(engine.is_initialized());
    }

    #[test]
    fn corpora_are_statistically_independent() {
        let mut engine = RetrievalEngine::default();
        engine
            .initialize("alpha beta gamma", "delta epsilon zeta")
            .unwrap();
        let stats = engine.stats().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].corpus, "reference");
        assert_eq!(stats[1].corpus, "library");
        // Each vocabulary only holds its own corpus's three terms.
        assert_eq!(stats[0].terms, 3);
        assert_eq!(stats[1].terms, 3);
    }

    #[test]
    fn retrieve_reports_fixed_corpus_order() {
        let mut engine = RetrievalEngine::default();
        engine
            .initialize("reference text here", "library text there")
            .unwrap();
        let retrieved = engine.retrieve("text", 1).unwrap();
        let corpora: Vec<&str> = retrieved.iter().map(|c| c.corpus).collect();
        assert_eq!(corpora, ["reference", "library"]);
    }

    #[test]
    fn query_concatenates_sections_with_separator() {
        let mut engine = RetrievalEngine::default();
        engine
            .initialize("reference text here", "library text there")
            .unwrap();
        let context = engine.query("text", 1).unwrap();
        assert!(context.contains("reference text here"));
        assert!(context.contains("library text there"));
        assert!(context.contains("---"));
    }

    #[test]
    fn k_zero_yields_empty_sections() {
        let mut engine = RetrievalEngine::default();
        engine.initialize("one corpus", "other corpus").unwrap();
        assert!(engine.retrieve("corpus", 0).unwrap().is_empty());
    }

    #[test]
    fn failed_reinitialize_discards_previous_state() {
        let mut engine = RetrievalEngine::default();
        engine.initialize("old reference", "old library").unwrap();
        assert!(engine.initialize("new reference", "").is_err());
        assert!(!engine.is_initialized());
        assert!(matches!(
            engine.query("reference", 1),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn reinitialize_rebuilds_from_scratch() {
        let mut engine = RetrievalEngine::default();
        engine.initialize("old reference", "old library").unwrap();
        engine.initialize("new reference", "new library").unwrap();
        let context = engine.query("reference", 1).unwrap();
        assert!(context.contains("new reference"));
        assert!(!context.contains("old"));
    }
}
