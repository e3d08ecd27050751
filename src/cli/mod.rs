//! CLI layer for tweetstorm.
//!
//! Provides the command-line interface using clap, with commands for
//! processing requests, inspecting chunks and managing the prompt template.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
