//! Core domain models for tweetstorm.
//!
//! This module contains the fundamental data structures used throughout the
//! pipeline: segments, chunks, and the accepted-post ledger. These are pure
//! domain models with no I/O dependencies.

pub mod chunk;
pub mod ledger;
pub mod segment;

pub use chunk::Chunk;
pub use ledger::PostLedger;
pub use segment::{PARAGRAPH_MARKER, Segment, SegmentKind, estimate_tokens};
