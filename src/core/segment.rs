//! Segment representation.
//!
//! Segments are the atomic units chunks are assembled from: either a
//! sentence or a marker standing for a paragraph break.

use serde::{Deserialize, Serialize};

/// Separator text carried by paragraph-break segments.
pub const PARAGRAPH_MARKER: &str = "\n\n";

/// Kind of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// A sentence of source text.
    Sentence,
    /// The boundary between two paragraphs.
    ParagraphBreak,
}

/// A sentence or paragraph-break marker extracted from source text.
///
/// # Examples
///
/// ```
/// use tweetstorm::core::Segment;
///
/// let segment = Segment::sentence("The raven spoke once more.");
/// assert_eq!(segment.tokens(), 5);
///
/// let marker = Segment::paragraph_break();
/// assert_eq!(marker.tokens(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    text: String,
    kind: SegmentKind,
    tokens: usize,
}

impl Segment {
    /// Creates a sentence segment, computing its token estimate.
    #[must_use]
    pub fn sentence(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = estimate_tokens(&text);
        Self {
            text,
            kind: SegmentKind::Sentence,
            tokens,
        }
    }

    /// Creates a paragraph-break marker.
    #[must_use]
    pub fn paragraph_break() -> Self {
        Self {
            text: PARAGRAPH_MARKER.to_string(),
            kind: SegmentKind::ParagraphBreak,
            tokens: 0,
        }
    }

    /// Returns the segment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the segment kind.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the approximate token count.
    #[must_use]
    pub const fn tokens(&self) -> usize {
        self.tokens
    }

    /// Returns true for paragraph-break markers.
    #[must_use]
    pub const fn is_paragraph_break(&self) -> bool {
        matches!(self.kind, SegmentKind::ParagraphBreak)
    }
}

/// Estimates tokens as the number of whitespace-delimited words.
///
/// This is a coarse stand-in for a real tokenizer.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}
