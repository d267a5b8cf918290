//! tfidx - an in-memory TF-IDF retrieval engine for grounding chat assistants.
//!
//! tfidx splits long reference documents into overlapping chunks, embeds
//! them as sparse L2-normalized TF-IDF vectors (no external embedding
//! service), and answers exact top-k cosine-similarity queries so a
//! downstream generation call can be grounded with relevant context.
//!
//! # Quick start
//!
//! ```
//! use tfidx::RetrievalEngine;
//!
//! let mut engine = RetrievalEngine::default();
//! engine
//!     .initialize(
//!         "the cat sat on the mat. the cat purred.",
//!         "the dog ran in the park. the dog barked.",
//!     )
//!     .unwrap();
//!
//! let context = engine.query("where did the cat go", 2).unwrap();
//! assert!(context.contains("cat"));
//! ```
//!
//! The engine keeps one vocabulary, document-frequency table, and vector
//! index per corpus; nothing is shared between corpora or persisted to
//! disk. Rebuilding means calling [`RetrievalEngine::initialize`] again.

pub mod assistant;
pub mod chunking;
pub mod cli;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod index;
pub mod tokenize;
pub mod vocabulary;

pub use assistant::{Assistant, Generator};
pub use chunking::{Chunk, ChunkingConfig};
pub use embedding::{EmbeddingProvider, TfIdfEmbedder};
pub use engine::RetrievalEngine;
pub use error::{Error, Result};
pub use index::{SearchHit, VectorIndex};
pub use vocabulary::{DocumentFrequencies, Vocabulary, VocabularyBuilder};
