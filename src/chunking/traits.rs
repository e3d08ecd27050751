//! Chunker trait definition.
//!
//! Defines the interface for chunking strategies so the request layer does
//! not depend on one concrete segmenter.

use crate::core::Chunk;
use crate::error::{ChunkingError, Result};

/// Trait for chunking text into overlapping, token-budgeted chunks.
///
/// Implementations must be `Send + Sync` so one chunker can serve
/// concurrent requests. Each chunker must produce deterministic output for
/// the same input and configuration.
///
/// # Examples
///
/// ```
/// use tweetstorm::chunking::{Chunker, SlidingWindowChunker, WindowConfig};
///
/// let chunker = SlidingWindowChunker::new();
/// let text = "Hello, world! ".repeat(20);
/// let chunks = chunker.chunk(&text, Some(&WindowConfig::new(8, 2))).unwrap();
/// assert!(!chunks.is_empty());
/// ```
pub trait Chunker: Send + Sync {
    /// Chunks the input text.
    ///
    /// # Arguments
    ///
    /// * `text` - The input text to chunk.
    /// * `config` - Optional size and overlap overriding the chunker's own.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn chunk(&self, text: &str, config: Option<&WindowConfig>) -> Result<Vec<Chunk>>;

    /// Returns the name of the chunking strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the chunking strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Validates a window configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if chunk size is zero or either size is above the
    /// maximum. The overlap may exceed the chunk size.
    fn validate(&self, config: &WindowConfig) -> Result<()> {
        if config.chunk_size == 0 {
            return Err(ChunkingError::InvalidConfig {
                reason: "chunk_size must be > 0".to_string(),
            }
            .into());
        }
        if config.chunk_size > super::MAX_CHUNK_SIZE {
            return Err(ChunkingError::ChunkTooLarge {
                size: config.chunk_size,
                max: super::MAX_CHUNK_SIZE,
            }
            .into());
        }
        if config.overlap > super::MAX_CHUNK_SIZE {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: config.overlap,
                max: super::MAX_CHUNK_SIZE,
            }
            .into());
        }
        Ok(())
    }
}

/// Token budget for a chunking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Minimum token estimate at which a chunk is closed.
    pub chunk_size: usize,

    /// Minimum token estimate carried over into the next chunk.
    pub overlap: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(super::DEFAULT_CHUNK_SIZE, super::DEFAULT_OVERLAP)
    }
}

impl WindowConfig {
    /// Creates a configuration with the given size and overlap.
    #[must_use]
    pub const fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::SlidingWindowChunker;

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.chunk_size, crate::chunking::DEFAULT_CHUNK_SIZE);
        assert_eq!(config.overlap, crate::chunking::DEFAULT_OVERLAP);
    }

    #[test]
    fn test_validate_zero_chunk_size() {
        let chunker = SlidingWindowChunker::new();
        assert!(chunker.validate(&WindowConfig::new(0, 0)).is_err());
    }

    #[test]
    fn test_validate_overlap_too_large() {
        let chunker = SlidingWindowChunker::new();
        let result = chunker.validate(&WindowConfig::new(50, crate::chunking::MAX_CHUNK_SIZE + 1));
        assert!(matches!(
            result,
            Err(crate::Error::Chunking(ChunkingError::OverlapTooLarge { .. }))
        ));
    }

    #[test]
    fn test_validate_chunk_too_large() {
        let chunker = SlidingWindowChunker::new();
        let result = chunker.validate(&WindowConfig::new(crate::chunking::MAX_CHUNK_SIZE + 1, 0));
        assert!(matches!(
            result,
            Err(crate::Error::Chunking(ChunkingError::ChunkTooLarge { .. }))
        ));
    }

    #[test]
    fn test_validate_valid() {
        let chunker = SlidingWindowChunker::new();
        assert!(chunker.validate(&WindowConfig::new(100, 10)).is_ok());
        assert!(chunker.validate(&WindowConfig::new(1, 0)).is_ok());
        assert!(chunker.validate(&WindowConfig::new(50, 50)).is_ok());
        assert!(chunker.validate(&WindowConfig::new(4, 64)).is_ok());
    }

    /// A minimal chunker that uses all default trait implementations
    struct MinimalChunker;

    impl Chunker for MinimalChunker {
        fn chunk(&self, _text: &str, _config: Option<&WindowConfig>) -> Result<Vec<Chunk>> {
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "minimal"
        }
    }

    #[test]
    fn test_chunker_default_description() {
        assert_eq!(MinimalChunker.description(), "No description available");
    }
}
