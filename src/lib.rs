//! # Tweetstorm
//!
//! Turns long-form text into a deduplicated, ordered list of short
//! social-media posts.
//!
//! Text is split into sentence-aligned, overlapping chunks sized by an
//! approximate token budget. Each chunk is sent to a text-generation model
//! together with the most recently accepted posts; the model answers with
//! `<tweet>`-tagged candidates, and candidates already accepted earlier in
//! the run are dropped.
//!
//! ## Features
//!
//! - **Chunking**: Sentence and paragraph aware sliding windows with overlap
//! - **Streaming**: Posts are produced lazily as a [`futures_util::Stream`]
//! - **Pluggable models**: Any [`synth::Generator`]; an OpenAI-compatible
//!   client is included behind the `openai` feature
//!
//! ## Example
//!
//! ```
//! use tweetstorm::service::TweetService;
//! use tweetstorm::synth::ScriptedGenerator;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let generator = ScriptedGenerator::new(["<tweet>Rust is fun.</tweet>"]);
//! let response = TweetService::new(&generator)
//!     .process_plaintext("Rust is a language. It is fun to write.")
//!     .await
//!     .unwrap();
//! assert_eq!(response.tweets, vec!["Rust is fun."]);
//! # });
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod service;
pub mod synth;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, PostLedger, Segment, SegmentKind};

// Re-export chunking types
pub use chunking::{Chunker, SlidingWindowChunker, WindowConfig, segment};

// Re-export service types
pub use service::{ProcessRequest, TweetListResponse, TweetService};

// Re-export synthesis types
#[cfg(feature = "openai")]
pub use synth::OpenAiGenerator;
pub use synth::{
    FailurePolicy, Generator, GeneratorConfig, PostSynthesizer, PromptTemplate,
    ScriptedGenerator, SynthesisConfig, ThrottledGenerator, create_generator,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
