//! Request handling.
//!
//! Two operations sit in front of the pipeline: [`TweetService::process`]
//! for structured requests and [`TweetService::process_plaintext`] for raw
//! text. Both validate before any chunking or generation happens and answer
//! with a [`TweetListResponse`].

pub mod process;
pub mod request;

pub use process::TweetService;
pub use request::{
    MAX_TEXT_CHARS, MIN_TEXT_CHARS, ProcessRequest, TweetListResponse, validate_text,
};
