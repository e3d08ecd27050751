//! Error types for tweetstorm operations.
//!
//! This module provides the error hierarchy, built with `thiserror`, for
//! request validation, chunking, text generation, I/O, and CLI commands.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for tweetstorm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The request was rejected before any processing started.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Chunking-related errors (segmenter configuration).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Generation-related errors (model calls).
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// I/O errors (input files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Returns true if the error was caused by the caller's input rather than
    /// by processing.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Request validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No text, or only whitespace.
    #[error("no text provided")]
    EmptyText,

    /// Text shorter than the minimum length.
    #[error("text too short: {len} characters (minimum {min})")]
    TooShort {
        /// Length of the trimmed text in characters.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// Text longer than the maximum length.
    #[error("text too long: {len} characters (maximum {max})")]
    TooLong {
        /// Length of the trimmed text in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Chunk size outside the accepted range.
    #[error("chunk_size {value} must be between {min} and {max}")]
    ChunkSize {
        /// Requested chunk size.
        value: usize,
        /// Smallest accepted chunk size.
        min: usize,
        /// Largest accepted chunk size.
        max: usize,
    },

    /// Overlap above the accepted maximum.
    #[error("overlap_size {value} must be at most {max}")]
    OverlapSize {
        /// Requested overlap.
        value: usize,
        /// Largest accepted overlap.
        max: usize,
    },
}

/// Chunking-specific errors.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Chunk size exceeds maximum allowed.
    #[error("chunk size {size} exceeds maximum {max}")]
    ChunkTooLarge {
        /// Requested chunk size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Invalid chunk configuration.
    #[error("invalid chunk configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Overlap exceeds the maximum chunk size.
    #[error("overlap {overlap} exceeds maximum {max}")]
    OverlapTooLarge {
        /// Overlap size.
        overlap: usize,
        /// Maximum allowed overlap.
        max: usize,
    },
}

/// Errors raised while calling the generation capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The provider failed the request in a way that may pass on a retry
    /// (transport failure, rate limit, server error).
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider refused the request itself; repeating it cannot help.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The call did not complete in time.
    #[error("generation timed out after {after:?}")]
    Timeout {
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The provider answered without any message content.
    #[error("empty response from model")]
    EmptyResponse,

    /// No API key was configured.
    #[error("missing API key (set MISTRAL_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// The run stopped at a chunk after retries were exhausted.
    #[error("aborted at chunk {chunk_index} after {} accepted posts: {reason}", accepted.len())]
    Aborted {
        /// Index of the chunk that failed.
        chunk_index: usize,
        /// Posts accepted before the failure, in order.
        accepted: Vec<String>,
        /// Description of the final failure.
        reason: String,
    },

    /// Every chunk of the run failed, so no post could be produced.
    #[error("all {chunks} chunks failed: {reason}")]
    AllChunksFailed {
        /// Number of chunks that were attempted.
        chunks: usize,
        /// Description of the last failure.
        reason: String,
    },
}

impl GenerationError {
    /// Returns true if repeating the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::Timeout { .. })
    }
}

/// I/O-specific errors for input handling.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read input.
    #[error("failed to read {path}: {reason}")]
    ReadFailed {
        /// Path to the file, or `<stdin>`.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// Implement From traits for third-party errors

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgument(format!("malformed request: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Command(err.into())
    }
}

#[cfg(feature = "openai")]
impl From<async_openai::error::OpenAIError> for GenerationError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match &err {
            OpenAIError::Reqwest(_) | OpenAIError::StreamError(_) => {
                Self::Provider(err.to_string())
            }
            OpenAIError::ApiError(api) if is_transient_api_error(api) => {
                Self::Provider(err.to_string())
            }
            _ => Self::Rejected(err.to_string()),
        }
    }
}

/// Returns true for API errors a retry may get past: rate limits,
/// overload and server-side failures. Authentication and malformed
/// requests fail the same way every time.
#[cfg(feature = "openai")]
fn is_transient_api_error(err: &async_openai::error::ApiError) -> bool {
    const TRANSIENT_KINDS: [&str; 5] = [
        "server_error",
        "rate_limit",
        "overloaded",
        "service_unavailable",
        "timeout",
    ];
    const TRANSIENT_STATUS: [&str; 5] = ["429", "500", "502", "503", "504"];

    let fields = [err.r#type.as_deref(), err.code.as_deref()];
    let labels = || fields.iter().flatten();
    labels().any(|label| TRANSIENT_KINDS.iter().any(|kind| label.contains(kind)))
        || labels().any(|label| TRANSIENT_STATUS.contains(label))
        || TRANSIENT_STATUS.iter().any(|status| err.message.contains(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config {
            message: "bad config".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad config");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::EmptyText.to_string(), "no text provided");

        let err = ValidationError::TooShort { len: 3, min: 16 };
        assert_eq!(err.to_string(), "text too short: 3 characters (minimum 16)");

        let err = ValidationError::TooLong {
            len: 5000,
            max: 4096,
        };
        assert!(err.to_string().contains("5000"));
        assert!(err.to_string().contains("4096"));

        let err = ValidationError::OverlapSize {
            value: 2048,
            max: 1024,
        };
        assert_eq!(err.to_string(), "overlap_size 2048 must be at most 1024");
    }

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::OverlapTooLarge {
            overlap: 2000,
            max: 1024,
        };
        assert_eq!(err.to_string(), "overlap 2000 exceeds maximum 1024");

        let err = ChunkingError::ChunkTooLarge {
            size: 2000,
            max: 1024,
        };
        assert!(err.to_string().contains("2000"));
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "generation timed out after 30s");

        let err = GenerationError::Timeout {
            after: Duration::from_millis(500),
        };
        assert_eq!(err.to_string(), "generation timed out after 500ms");

        let err = GenerationError::Aborted {
            chunk_index: 2,
            accepted: vec!["a".to_string(), "b".to_string()],
            reason: "provider error: 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "aborted at chunk 2 after 2 accepted posts: provider error: 503"
        );

        let err = GenerationError::AllChunksFailed {
            chunks: 3,
            reason: "request rejected: invalid api key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "all 3 chunks failed: request rejected: invalid api key"
        );
    }

    #[test]
    fn test_generation_error_retryable() {
        assert!(GenerationError::Provider("503".to_string()).is_retryable());
        assert!(
            GenerationError::Timeout {
                after: Duration::from_secs(1)
            }
            .is_retryable()
        );
        assert!(!GenerationError::Rejected("401".to_string()).is_retryable());
        assert!(!GenerationError::EmptyResponse.is_retryable());
        assert!(!GenerationError::MissingApiKey.is_retryable());
    }

    #[test]
    fn test_client_error_classification() {
        let err: Error = ValidationError::EmptyText.into();
        assert!(err.is_client_error());

        let err: Error = GenerationError::EmptyResponse.into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(
            err,
            Error::Command(CommandError::InvalidArgument(_))
        ));
    }

    #[cfg(feature = "openai")]
    mod openai {
        use super::*;
        use async_openai::error::{ApiError, OpenAIError};

        fn api_error(message: &str, kind: Option<&str>, code: Option<&str>) -> OpenAIError {
            OpenAIError::ApiError(ApiError {
                message: message.to_string(),
                r#type: kind.map(str::to_string),
                param: None,
                code: code.map(str::to_string),
            })
        }

        #[test]
        fn test_auth_and_bad_requests_are_not_retried() {
            let unauthorized = api_error("Unauthorized", Some("invalid_request_error"), None);
            let err = GenerationError::from(unauthorized);
            assert!(matches!(err, GenerationError::Rejected(_)));
            assert!(!err.is_retryable());

            let err = GenerationError::from(OpenAIError::InvalidArgument("bad model".to_string()));
            assert!(matches!(err, GenerationError::Rejected(_)));
            assert!(!err.is_retryable());
        }

        #[test]
        fn test_transient_failures_are_retried() {
            let reset = OpenAIError::StreamError("connection reset".to_string());
            assert!(GenerationError::from(reset).is_retryable());

            let limited = api_error("Rate limit exceeded", Some("rate_limited"), None);
            assert!(GenerationError::from(limited).is_retryable());

            let err = GenerationError::from(api_error("Service unavailable", None, Some("503")));
            assert!(err.is_retryable());

            let err = GenerationError::from(api_error("upstream returned 502", None, None));
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn test_io_error_variants() {
        let err = IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: "broken pipe".to_string(),
        };
        assert!(err.to_string().contains("<stdin>"));
        assert!(err.to_string().contains("broken pipe"));

        let err = IoError::FileNotFound {
            path: "/tmp/missing.txt".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.txt");
    }
}
