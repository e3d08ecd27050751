//! Output formatting for CLI commands.
//!
//! Supports text, pretty JSON and newline-delimited JSON output formats.

use crate::core::Chunk;
use crate::error::{Error, GenerationError};
use crate::service::TweetListResponse;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON output.
    Json,
    /// One JSON value per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }

    /// Returns true for the JSON-based formats.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::Ndjson)
    }
}

/// Formats the posts of one response.
///
/// Text output separates posts with a blank line. NDJSON writes one
/// `{"tweet": ...}` object per post.
#[must_use]
pub fn format_tweets(response: &TweetListResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if response.tweets.is_empty() {
                return "No posts generated.\n".to_string();
            }
            let mut output = response.tweets.join("\n\n");
            output.push('\n');
            output
        }
        OutputFormat::Json => format_json(response),
        OutputFormat::Ndjson => {
            #[derive(Serialize)]
            struct TweetLine<'a> {
                tweet: &'a str,
            }
            response
                .tweets
                .iter()
                .map(|tweet| format_json_line(&TweetLine { tweet }))
                .collect()
        }
    }
}

/// Formats per-file results of a batch run.
#[must_use]
pub fn format_batch<P: AsRef<Path>>(
    results: &[(P, Result<TweetListResponse, Error>)],
    format: OutputFormat,
) -> String {
    #[derive(Serialize)]
    struct FileResult<'a> {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tweets: Option<&'a [String]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    let rows: Vec<FileResult<'_>> = results
        .iter()
        .map(|(path, result)| FileResult {
            file: path.as_ref().display().to_string(),
            tweets: result.as_ref().ok().map(|r| r.tweets.as_slice()),
            error: result.as_ref().err().map(ToString::to_string),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for row in &rows {
                let _ = writeln!(output, "== {} ==", row.file);
                match (&row.tweets, &row.error) {
                    (_, Some(error)) => {
                        let _ = writeln!(output, "Error: {error}");
                    }
                    (Some(tweets), None) if !tweets.is_empty() => {
                        for tweet in *tweets {
                            let _ = writeln!(output, "{tweet}\n");
                        }
                    }
                    _ => output.push_str("No posts generated.\n"),
                }
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => format_json(&rows),
        OutputFormat::Ndjson => rows.iter().map(format_json_line).collect(),
    }
}

/// Formats the chunks of a text.
#[must_use]
pub fn format_chunks(chunks: &[Chunk], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{} chunks:", chunks.len());
            let _ = writeln!(
                output,
                "{:<6} {:<8} {:<10} {:<8} Preview",
                "Index", "Tokens", "Segments", "Overlap"
            );
            output.push_str(&"-".repeat(70));
            output.push('\n');

            for chunk in chunks {
                let preview = truncate(&chunk.content.replace('\n', "\\n"), 40);
                let _ = writeln!(
                    output,
                    "{:<6} {:<8} {:<10} {:<8} {}",
                    chunk.index,
                    chunk.token_estimate,
                    format!("{}..{}", chunk.segments.start, chunk.segments.end),
                    if chunk.has_overlap { "yes" } else { "no" },
                    preview
                );
            }
            output
        }
        OutputFormat::Json => format_json(&chunks),
        OutputFormat::Ndjson => chunks.iter().map(format_json_line).collect(),
    }
}

/// Formats an error for display.
///
/// JSON formats produce `{"error": ...}`. An aborted run also lists the
/// posts accepted before the failure under `tweets`. Text output is the
/// error message alone; see [`format_partial_tweets`] for the posts.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    if !format.is_json() {
        return error.to_string();
    }

    #[derive(Serialize)]
    struct ErrorOutput<'a> {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tweets: Option<&'a [String]>,
    }

    serde_json::to_string(&ErrorOutput {
        error: error.to_string(),
        tweets: partial_tweets(error),
    })
    .unwrap_or_else(|_| r#"{"error":"unknown"}"#.to_string())
}

/// Formats the posts an aborted run accepted before it failed, in text mode.
///
/// Returns `None` when the error carries no posts, and in JSON modes, where
/// [`format_error`] already includes them.
#[must_use]
pub fn format_partial_tweets(error: &Error, format: OutputFormat) -> Option<String> {
    if format.is_json() {
        return None;
    }
    partial_tweets(error)
        .filter(|tweets| !tweets.is_empty())
        .map(|tweets| format_tweets(&TweetListResponse::from(tweets.to_vec()), format))
}

fn partial_tweets(error: &Error) -> Option<&[String]> {
    match error {
        Error::Generation(GenerationError::Aborted { accepted, .. }) => Some(accepted.as_slice()),
        _ => None,
    }
}

/// Formats a value as pretty JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    let mut output = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}

/// Formats a value as one compact JSON line.
fn format_json_line<T: Serialize>(value: &T) -> String {
    let mut output = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}

/// Truncates a string to `max_chars` characters with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().take(max_chars).collect()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{head}...")
    }
}
