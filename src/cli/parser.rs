//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::error::{CommandError, Result};
use crate::synth::config::{
    DEFAULT_API_BASE, DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_RETRIES, DEFAULT_MODEL,
};
use crate::synth::{FailurePolicy, GeneratorConfig, SynthesisConfig};

/// Tweetstorm: turn long-form text into a deduplicated list of short posts.
///
/// Text is split into overlapping, sentence-aligned chunks; each chunk is
/// sent to an OpenAI-compatible model together with the posts already
/// written.
#[derive(Parser, Debug)]
#[command(name = "tweetstorm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Model identifier.
    #[arg(long, env = "TWEETSTORM_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "TWEETSTORM_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// API key for the provider.
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Directory holding `instructions.md`.
    #[arg(long, env = "TWEETSTORM_PROMPT_DIR", global = true)]
    pub prompt_dir: Option<PathBuf>,

    /// Timeout for one model call, in seconds.
    #[arg(long, default_value = "60", global = true)]
    pub timeout_secs: u64,

    /// Retries for a failed model call before giving up on a chunk.
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES, global = true)]
    pub max_retries: u32,

    /// What to do when a chunk keeps failing (skip, abort).
    #[arg(long, default_value = "skip", global = true)]
    pub on_error: String,

    /// Number of recent posts shown to the model with each chunk.
    #[arg(long, default_value_t = DEFAULT_HISTORY_WINDOW, global = true)]
    pub history: usize,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a JSON request (`{"text": ..., "chunk_size": ..., "overlap_size": ...}`).
    ///
    /// Reads from stdin when no file is given or the file is `-`.
    Process {
        /// Path to the JSON request.
        request: Option<PathBuf>,
    },

    /// Process raw text with the default chunk and overlap sizes.
    ///
    /// Reads from stdin when no file is given or the file is `-`.
    Plaintext {
        /// Path to the text file.
        file: Option<PathBuf>,
    },

    /// Process several text files concurrently, one request per file.
    Batch {
        /// Text files to process.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Maximum number of model calls in flight across all files.
        #[arg(short = 'j', long, default_value = "4")]
        max_concurrent: usize,
    },

    /// Show the chunks a text would be split into, without calling a model.
    Chunks {
        /// Path to the text file (stdin if omitted).
        file: Option<PathBuf>,

        /// Chunk size in estimated tokens (whitespace-separated words).
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Overlap between chunks in estimated tokens.
        #[arg(long, default_value_t = DEFAULT_OVERLAP)]
        overlap: usize,
    },

    /// Print the instruction template, or write the default one to a directory.
    Prompt {
        /// Write the default template to DIR/instructions.md (never overwrites).
        #[arg(long, value_name = "DIR")]
        write: Option<PathBuf>,
    },
}

impl Cli {
    /// Returns the provider settings from flags and environment.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::default()
            .api_base(self.api_base.as_str())
            .model(self.model.as_str());
        match &self.api_key {
            Some(key) => config.api_key(key.as_str()),
            None => config,
        }
    }

    /// Returns the pipeline settings from flags.
    ///
    /// # Errors
    ///
    /// Returns an error if `--on-error` is not `skip` or `abort`.
    pub fn synthesis_config(&self) -> Result<SynthesisConfig> {
        let policy = FailurePolicy::parse(&self.on_error).ok_or_else(|| {
            CommandError::InvalidArgument(format!(
                "--on-error must be skip or abort, got '{}'",
                self.on_error
            ))
        })?;

        Ok(SynthesisConfig::new()
            .history_window(self.history)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .failure_policy(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tweetstorm").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chunks_defaults() {
        let cli = parse(&["chunks", "input.txt"]);
        match cli.command {
            Commands::Chunks {
                file,
                chunk_size,
                overlap,
            } => {
                assert_eq!(file, Some(PathBuf::from("input.txt")));
                assert_eq!(chunk_size, DEFAULT_CHUNK_SIZE);
                assert_eq!(overlap, DEFAULT_OVERLAP);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_batch_requires_files() {
        assert!(Cli::try_parse_from(["tweetstorm", "batch"]).is_err());
    }

    #[test]
    fn test_synthesis_config_from_flags() {
        let cli = parse(&[
            "plaintext",
            "--history",
            "3",
            "--timeout-secs",
            "5",
            "--max-retries",
            "0",
            "--on-error",
            "abort",
        ]);
        let config = cli.synthesis_config().unwrap();
        assert_eq!(config.history_window, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_invalid_failure_policy() {
        let cli = parse(&["plaintext", "--on-error", "explode"]);
        assert!(cli.synthesis_config().is_err());
    }

    #[test]
    fn test_generator_config_from_flags() {
        let cli = parse(&[
            "plaintext",
            "--api-key",
            "secret",
            "--model",
            "open-mistral-nemo",
            "--api-base",
            "http://localhost:8080/v1",
        ]);
        let config = cli.generator_config();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "open-mistral-nemo");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
    }
}
