//! Chunk representation.
//!
//! Chunks are the unit of work handed to the generation capability: an
//! ordered run of segments joined by spaces, overlapping the previous chunk.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A bounded-size, overlapping slice of the source text.
///
/// # Examples
///
/// ```
/// use tweetstorm::core::Chunk;
///
/// let chunk = Chunk::new(0, "Hello there, world.".to_string(), 0..1, 3);
/// assert_eq!(chunk.token_estimate, 3);
/// assert!(!chunk.has_overlap);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequential index within the request (0-based).
    pub index: usize,

    /// Chunk text.
    pub content: String,

    /// Range of segment indices this chunk was assembled from.
    pub segments: Range<usize>,

    /// Sum of the token estimates of the covered segments.
    pub token_estimate: usize,

    /// Whether this chunk repeats segments from the previous chunk.
    pub has_overlap: bool,
}

impl Chunk {
    /// Creates a new chunk without overlap.
    #[must_use]
    pub const fn new(
        index: usize,
        content: String,
        segments: Range<usize>,
        token_estimate: usize,
    ) -> Self {
        Self {
            index,
            content,
            segments,
            token_estimate,
            has_overlap: false,
        }
    }

    /// Marks this chunk as overlapping the previous chunk.
    #[must_use]
    pub const fn with_overlap(mut self, has_overlap: bool) -> Self {
        self.has_overlap = has_overlap;
        self
    }
}
