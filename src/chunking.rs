//! Chunking utilities for splitting long documents into overlapping windows.
//!
//! Each window is embedded and indexed separately; the overlap keeps
//! sentences that straddle a window boundary retrievable from at least one
//! side. Windows are measured in characters, not bytes, so multi-byte text
//! never splits inside a code point.

use crate::error::{Error, Result};

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between adjacent windows in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Window size and overlap for [`chunk_text`].
///
/// # Examples
///
/// ```
/// use tfidx::chunking::{ChunkingConfig, DEFAULT_CHUNK_SIZE};
///
/// let config = ChunkingConfig::default();
/// assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Window size in characters.
    pub chunk_size: usize,
    /// Overlap between adjacent windows in characters.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    /// Reject parameter combinations that cannot make progress.
    ///
    /// `chunk_size` must be positive and `overlap` strictly smaller than
    /// `chunk_size`; an overlap at or above the window size would advance
    /// the window start by zero or a negative amount.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than 0".into()));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// A window of text from a larger document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The window's text content.
    pub text: String,
    /// Character offset where this window starts in the source document.
    pub start_offset: usize,
}

/// Split text into overlapping windows.
///
/// Window `i` starts at character `i * (chunk_size - overlap)` and spans
/// `chunk_size` characters; the final window is truncated at the end of the
/// text and generation stops with the first window that reaches it. The
/// returned windows exactly cover the whole text in source order. Empty
/// input yields no chunks.
///
/// # Examples
///
/// ```
/// use tfidx::chunking::{chunk_text, ChunkingConfig};
///
/// let text = "x".repeat(2500);
/// let config = ChunkingConfig { chunk_size: 1000, overlap: 200 };
/// let chunks = chunk_text(&text, &config).unwrap();
///
/// assert_eq!(chunks.len(), 3);
/// let offsets: Vec<usize> = chunks.iter().map(|c| c.start_offset).collect();
/// assert_eq!(offsets, [0, 800, 1600]);
/// ```
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    config.validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    // Map of char index -> byte index for O(1) UTF-8-safe slicing.
    let char_to_byte: Vec<usize> = text
        .char_indices()
        .map(|(byte_idx, _)| byte_idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = char_to_byte.len() - 1;

    let step = config.chunk_size - config.overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + config.chunk_size).min(char_count);
        chunks.push(Chunk {
            text: text[char_to_byte[start]..char_to_byte[end]].to_string(),
            start_offset: start,
        });
        if end == char_count {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
