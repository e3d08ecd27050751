//! Input handling for tweetstorm.
//!
//! Reads request text from files or standard input with a size limit and
//! UTF-8 validation.

pub mod reader;

pub use reader::{MAX_INPUT_BYTES, STDIN_MARKER, read_file, read_input, read_stdin};
