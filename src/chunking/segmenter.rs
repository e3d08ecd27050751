//! Paragraph and sentence segmentation.
//!
//! Turns raw text into the flat segment sequence the sliding-window chunker
//! walks: every paragraph's sentences in order, each paragraph followed by a
//! paragraph-break marker.

use crate::core::Segment;
use regex::Regex;
use std::sync::OnceLock;

/// Two or more consecutive newlines.
#[allow(clippy::expect_used)]
fn paragraph_regex() -> &'static Regex {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH.get_or_init(|| Regex::new(r"\n{2,}").expect("valid regex"))
}

/// Sentence-terminal punctuation followed by whitespace, or a newline run.
#[allow(clippy::expect_used)]
fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| Regex::new(r"[.!?]\s+|\n+").expect("valid regex"))
}

/// Splits text into paragraphs on blank-line boundaries.
///
/// The text is trimmed first, so leading and trailing blank lines never
/// produce paragraphs of their own.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_regex().split(text.trim()).collect()
}

/// Splits a paragraph into trimmed, non-empty sentences.
///
/// Terminal punctuation stays attached to the sentence it ends.
///
/// # Examples
///
/// ```
/// use tweetstorm::chunking::segmenter::split_sentences;
///
/// let sentences = split_sentences("Quoth the Raven! Nevermore.\nAnd so on");
/// assert_eq!(sentences, vec!["Quoth the Raven!", "Nevermore.", "And so on"]);
/// ```
#[must_use]
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let paragraph = paragraph.trim();
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in sentence_regex().find_iter(paragraph) {
        // Keep the punctuation mark with the sentence it closes.
        let end = if boundary.as_str().starts_with('\n') {
            boundary.start()
        } else {
            boundary.start() + 1
        };
        sentences.push(&paragraph[start..end]);
        start = boundary.end();
    }
    sentences.push(&paragraph[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builds the flat segment sequence for `text`.
///
/// Paragraphs that contain no sentences contribute nothing, not even a
/// marker. Every other paragraph, including the last, is followed by a
/// paragraph-break marker.
#[must_use]
pub fn build_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();

    for paragraph in split_paragraphs(text) {
        let sentences = split_sentences(paragraph);
        if sentences.is_empty() {
            continue;
        }
        segments.extend(sentences.into_iter().map(Segment::sentence));
        segments.push(Segment::paragraph_break());
    }

    segments
}
