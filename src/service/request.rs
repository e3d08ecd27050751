//! Request and response types, and request validation.

use serde::{Deserialize, Serialize};

use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, MAX_CHUNK_SIZE};
use crate::error::ValidationError;

/// Minimum accepted text length, in characters, after trimming.
pub const MIN_TEXT_CHARS: usize = 16;

/// Maximum accepted text length, in characters, after trimming.
pub const MAX_TEXT_CHARS: usize = 4096;

/// Structured request to turn text into posts.
///
/// Missing sizes take the defaults when deserialized.
///
/// # Examples
///
/// ```
/// use tweetstorm::service::ProcessRequest;
///
/// let request: ProcessRequest = serde_json::from_str(r#"{"text": "Hello"}"#).unwrap();
/// assert_eq!(request.chunk_size, 512);
/// assert_eq!(request.overlap_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// The text to be turned into posts.
    pub text: String,

    /// Token budget per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Tokens repeated between consecutive chunks.
    #[serde(default = "default_overlap_size")]
    pub overlap_size: usize,
}

const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

const fn default_overlap_size() -> usize {
    DEFAULT_OVERLAP
}

impl ProcessRequest {
    /// Creates a request with the default chunk and overlap sizes.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP,
        }
    }

    /// Sets the chunk size.
    #[must_use]
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the overlap size.
    #[must_use]
    pub const fn overlap_size(mut self, overlap_size: usize) -> Self {
        self.overlap_size = overlap_size;
        self
    }

    /// Validates the request and returns the trimmed text.
    ///
    /// The two sizes are bounded independently. An overlap at or above the
    /// chunk size is accepted: the chunker then steps forward one segment
    /// per chunk.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for empty, too short or too long text,
    /// or for sizes outside the accepted ranges.
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let text = validate_text(&self.text)?;

        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ValidationError::ChunkSize {
                value: self.chunk_size,
                min: 1,
                max: MAX_CHUNK_SIZE,
            });
        }
        if self.overlap_size > MAX_CHUNK_SIZE {
            return Err(ValidationError::OverlapSize {
                value: self.overlap_size,
                max: MAX_CHUNK_SIZE,
            });
        }

        Ok(text)
    }
}

/// Checks text length bounds and returns the trimmed text.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`] for blank input, otherwise
/// [`ValidationError::TooShort`] or [`ValidationError::TooLong`] when the
/// trimmed length falls outside `MIN_TEXT_CHARS..=MAX_TEXT_CHARS`.
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let len = trimmed.chars().count();
    if len < MIN_TEXT_CHARS {
        return Err(ValidationError::TooShort {
            len,
            min: MIN_TEXT_CHARS,
        });
    }
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }

    Ok(trimmed)
}

/// Response listing the accepted posts in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetListResponse {
    /// Accepted posts in acceptance order.
    pub tweets: Vec<String>,
}

impl From<Vec<String>> for TweetListResponse {
    fn from(tweets: Vec<String>) -> Self {
        Self { tweets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_deserialize_defaults() {
        let request: ProcessRequest =
            serde_json::from_str(r#"{"text": "some text", "chunk_size": 100}"#).unwrap();
        assert_eq!(request.chunk_size, 100);
        assert_eq!(request.overlap_size, DEFAULT_OVERLAP);
    }

    #[test]
    fn test_deserialize_requires_text() {
        assert!(serde_json::from_str::<ProcessRequest>(r#"{"chunk_size": 100}"#).is_err());
    }

    #[test]
    fn test_validate_returns_trimmed_text() {
        let request = ProcessRequest::new("   a sufficiently long text   ");
        assert_eq!(request.validate().unwrap(), "a sufficiently long text");
    }

    #[test_case("" ; "empty")]
    #[test_case("   \n\t  " ; "whitespace only")]
    fn test_validate_empty(text: &str) {
        assert_eq!(validate_text(text), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_min_length_boundary() {
        let exact = "x".repeat(MIN_TEXT_CHARS);
        assert!(validate_text(&exact).is_ok());

        let short = "x".repeat(MIN_TEXT_CHARS - 1);
        assert_eq!(
            validate_text(&short),
            Err(ValidationError::TooShort {
                len: MIN_TEXT_CHARS - 1,
                min: MIN_TEXT_CHARS
            })
        );
    }

    #[test]
    fn test_max_length_boundary() {
        let exact = "x".repeat(MAX_TEXT_CHARS);
        assert!(validate_text(&exact).is_ok());

        let long = "x".repeat(MAX_TEXT_CHARS + 1);
        assert!(matches!(
            validate_text(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 16 two-byte characters.
        let text = "é".repeat(MIN_TEXT_CHARS);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn test_length_measured_after_trimming() {
        let padded = format!("   {}   ", "x".repeat(MIN_TEXT_CHARS - 1));
        assert!(matches!(
            validate_text(&padded),
            Err(ValidationError::TooShort { .. })
        ));
    }

    #[test_case(0 ; "zero")]
    #[test_case(MAX_CHUNK_SIZE + 1 ; "above max")]
    fn test_validate_chunk_size(chunk_size: usize) {
        let request = ProcessRequest::new("a sufficiently long text").chunk_size(chunk_size);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::ChunkSize { .. })
        ));
    }

    #[test_case(32, 64 ; "default overlap above small chunk")]
    #[test_case(1, 64 ; "smallest chunk")]
    #[test_case(64, 64 ; "overlap equal to chunk")]
    #[test_case(16, 0 ; "no overlap")]
    #[test_case(8, MAX_CHUNK_SIZE ; "largest overlap")]
    fn test_overlap_not_tied_to_chunk_size(chunk_size: usize, overlap_size: usize) {
        let request = ProcessRequest::new("a sufficiently long text")
            .chunk_size(chunk_size)
            .overlap_size(overlap_size);
        assert_eq!(request.validate(), Ok("a sufficiently long text"));
    }

    #[test]
    fn test_default_overlap_accepts_whole_chunk_range() {
        let text = "a sufficiently long text";
        for chunk_size in 1..=MAX_CHUNK_SIZE {
            let request: ProcessRequest = serde_json::from_value(serde_json::json!({
                "text": text,
                "chunk_size": chunk_size,
            }))
            .unwrap();
            assert!(request.validate().is_ok(), "chunk_size {chunk_size} rejected");
        }
    }

    #[test]
    fn test_validate_overlap_above_max() {
        let request =
            ProcessRequest::new("a sufficiently long text").overlap_size(MAX_CHUNK_SIZE + 1);
        assert_eq!(
            request.validate(),
            Err(ValidationError::OverlapSize {
                value: MAX_CHUNK_SIZE + 1,
                max: MAX_CHUNK_SIZE
            })
        );
    }

    #[test]
    fn test_response_shape() {
        let response = TweetListResponse::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"tweets":["a","b"]}"#
        );
    }
}
