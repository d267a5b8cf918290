//! Glue between retrieval and the external generation collaborator.
//!
//! The assistant owns the engine behind a lock so discrete chat events can
//! share it safely, builds the grounding prompt from retrieved context,
//! and hands off to a [`Generator`]. This crate never talks to a model
//! service itself; callers supply the generator.

use std::{
    future::Future,
    sync::{Mutex, PoisonError},
};

use crate::{engine::RetrievalEngine, error::Result};

/// Default number of chunks retrieved per corpus for each question.
pub const DEFAULT_CONTEXT_CHUNKS: usize = 3;

/// External text-generation collaborator.
///
/// Implementations wrap whatever model API the host application uses;
/// timeouts and cancellation are the implementer's concern.
pub trait Generator: Send + Sync {
    /// Produce an assistant reply for a question, given a system prompt
    /// that already carries the retrieved context.
    fn generate(
        &self,
        system_prompt: &str,
        question: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// A chat assistant grounding its answers in retrieved context.
pub struct Assistant<G> {
    engine: Mutex<RetrievalEngine>,
    generator: G,
    k_per_corpus: usize,
}

impl<G: Generator> Assistant<G> {
    pub fn new(engine: RetrievalEngine, generator: G) -> Self {
        Self {
            engine: Mutex::new(engine),
            generator,
            k_per_corpus: DEFAULT_CONTEXT_CHUNKS,
        }
    }

    /// Override how many chunks are retrieved per corpus.
    pub fn with_context_chunks(mut self, k_per_corpus: usize) -> Self {
        self.k_per_corpus = k_per_corpus;
        self
    }

    /// (Re)build the engine's indexes from the two corpora.
    pub fn initialize(&self, reference: &str, library: &str) -> Result<()> {
        self.lock_engine().initialize(reference, library)
    }

    /// Answer a question: retrieve context, build the prompt, generate.
    ///
    /// The engine lock is released before awaiting the generator, so a
    /// slow model call never blocks other retrieval work.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let context = self.lock_engine().query(question, self.k_per_corpus)?;
        let prompt = grounding_prompt(&context, question);
        self.generator.generate(&prompt, question).await
    }

    fn lock_engine(&self) -> std::sync::MutexGuard<'_, RetrievalEngine> {
        // A poisoned lock means a panic mid-call; engine state is only
        // ever replaced wholesale, so recovering the guard is sound.
        self.engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Format the system prompt carrying the retrieved context.
fn grounding_prompt(context: &str, question: &str) -> String {
    format!("Context: {context}\n\nQuestion: {question}\n\nAnswer:")
}
