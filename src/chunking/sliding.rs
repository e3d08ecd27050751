//! Sliding-window chunking over sentence segments.
//!
//! Chunks are closed as soon as their token estimate reaches the chunk
//! size. The next chunk starts far enough back to repeat at least `overlap`
//! tokens of the previous one, so the model sees each boundary twice.

use crate::chunking::segmenter::build_segments;
use crate::chunking::traits::{Chunker, WindowConfig};
use crate::core::{Chunk, Segment};
use crate::error::Result;
use tracing::debug;

/// Sentence-aware sliding-window chunker.
///
/// # Examples
///
/// ```
/// use tweetstorm::chunking::{Chunker, SlidingWindowChunker};
///
/// let chunker = SlidingWindowChunker::with_size_and_overlap(4, 2);
/// let chunks = chunker
///     .chunk("One two three. Four five six. Seven eight nine.", None)
///     .unwrap();
/// assert_eq!(chunks[0].content, "One two three. Four five six.");
/// assert_eq!(chunks[1].content, "Four five six. Seven eight nine.");
/// ```
#[derive(Debug, Clone)]
pub struct SlidingWindowChunker {
    config: WindowConfig,
}

impl Default for SlidingWindowChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl SlidingWindowChunker {
    /// Creates a chunker with the default chunk size and overlap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: WindowConfig::new(super::DEFAULT_CHUNK_SIZE, super::DEFAULT_OVERLAP),
        }
    }

    /// Creates a chunker with custom chunk size and overlap.
    #[must_use]
    pub const fn with_size_and_overlap(chunk_size: usize, overlap: usize) -> Self {
        Self {
            config: WindowConfig::new(chunk_size, overlap),
        }
    }

    /// Returns the configured window.
    #[must_use]
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, text: &str, config: Option<&WindowConfig>) -> Result<Vec<Chunk>> {
        let config = config.unwrap_or(&self.config);
        self.validate(config)?;

        let segments = build_segments(text);
        let chunks = window_segments(&segments, config);
        debug!(
            segments = segments.len(),
            chunks = chunks.len(),
            chunk_size = config.chunk_size,
            overlap = config.overlap,
            "chunked text"
        );
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "sliding"
    }

    fn description(&self) -> &'static str {
        "Sentence-aware chunks closed at a token budget, overlapping by a token tail"
    }
}

/// Walks `segments` with a cursor, emitting overlapping chunks.
///
/// The cursor strictly increases on every iteration, so this produces at
/// most `segments.len()` chunks.
fn window_segments(segments: &[Segment], config: &WindowConfig) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut start = 0;
    let mut previous_end = 0;

    while start < segments.len() {
        let mut end = start;
        let mut tokens = 0;
        while end < segments.len() && tokens < config.chunk_size {
            tokens += segments[end].tokens();
            end += 1;
        }

        let content = join_segments(&segments[start..end]);
        if !content.is_empty() {
            let has_overlap = !chunks.is_empty() && start < previous_end;
            chunks.push(
                Chunk::new(chunks.len(), content, start..end, tokens).with_overlap(has_overlap),
            );
        }
        previous_end = end;

        if end >= segments.len() {
            break;
        }

        let next = overlap_start(segments, start, end, config.overlap);
        start = if next == start { start + 1 } else { next };
    }

    chunks
}

/// Finds where the next chunk starts for a chunk covering `start..end`.
///
/// Walks back from the last included segment until at least `overlap`
/// tokens are covered. If the whole chunk is walked without reaching the
/// overlap, the next chunk starts right after this one.
fn overlap_start(segments: &[Segment], start: usize, end: usize, overlap: usize) -> usize {
    let mut tokens = 0;
    for k in (start..end).rev() {
        tokens += segments[k].tokens();
        if tokens >= overlap {
            return k;
        }
    }
    end
}

/// Joins segments with single spaces and trims the result.
fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
