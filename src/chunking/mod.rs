//! Chunking for tweetstorm.
//!
//! Splits long-form text into sentence segments and groups them into
//! overlapping chunks sized by an approximate token budget (whitespace word
//! count, not a real tokenizer).

pub mod segmenter;
pub mod sliding;
pub mod traits;

pub use sliding::SlidingWindowChunker;
pub use traits::{Chunker, WindowConfig};

use crate::core::Chunk;
use crate::error::Result;

/// Default chunk size in estimated tokens.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Default overlap in estimated tokens.
pub const DEFAULT_OVERLAP: usize = 64;

/// Maximum allowed chunk size in estimated tokens.
pub const MAX_CHUNK_SIZE: usize = 1024;

/// Splits `text` into overlapping chunks.
///
/// Shorthand for [`SlidingWindowChunker`] with the given window.
///
/// # Errors
///
/// Returns [`crate::error::ChunkingError`] if `chunk_size` is zero or above
/// [`MAX_CHUNK_SIZE`], or if `overlap_size` is above [`MAX_CHUNK_SIZE`].
///
/// # Examples
///
/// ```
/// let chunks = tweetstorm::chunking::segment("Hello there. General Kenobi.", 512, 64).unwrap();
/// assert_eq!(chunks.len(), 1);
/// ```
pub fn segment(text: &str, chunk_size: usize, overlap_size: usize) -> Result<Vec<Chunk>> {
    SlidingWindowChunker::with_size_and_overlap(chunk_size, overlap_size).chunk(text, None)
}
