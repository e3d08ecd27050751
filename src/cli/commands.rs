//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::chunking::segment;
use crate::cli::output::{OutputFormat, format_batch, format_chunks, format_tweets};
use crate::cli::parser::{Cli, Commands};
use crate::error::{IoError, Result};
use crate::io::{read_file, read_input};
use crate::service::{ProcessRequest, TweetService, validate_text};
use crate::synth::{Generator, PromptTemplate, ThrottledGenerator, create_generator};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use tracing::info;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Process { request } => cmd_process(cli, request.as_deref(), format).await,
        Commands::Plaintext { file } => cmd_plaintext(cli, file.as_deref(), format).await,
        Commands::Batch {
            files,
            max_concurrent,
        } => cmd_batch(cli, files, *max_concurrent, format).await,
        Commands::Chunks {
            file,
            chunk_size,
            overlap,
        } => cmd_chunks(file.as_deref(), *chunk_size, *overlap, format),
        Commands::Prompt { write } => cmd_prompt(cli, write.as_deref(), format),
    }
}

/// Builds a service around `generator` with the prompt and settings from
/// the command line.
fn build_service<'g, G: Generator + ?Sized>(
    cli: &Cli,
    generator: &'g G,
) -> Result<TweetService<'g, G>> {
    Ok(TweetService::new(generator)
        .with_prompt(PromptTemplate::load(cli.prompt_dir.as_deref()))
        .with_config(cli.synthesis_config()?))
}

async fn cmd_process(cli: &Cli, path: Option<&Path>, format: OutputFormat) -> Result<String> {
    let raw = read_input(path)?;
    let request: ProcessRequest = serde_json::from_str(&raw)?;

    // Reject bad input before requiring provider credentials.
    request.validate()?;

    let generator = create_generator(&cli.generator_config())?;
    let service = build_service(cli, generator.as_ref())?;
    let response = service.process(&request).await?;

    Ok(format_tweets(&response, format))
}

async fn cmd_plaintext(cli: &Cli, path: Option<&Path>, format: OutputFormat) -> Result<String> {
    let text = read_input(path)?;
    validate_text(&text)?;

    let generator = create_generator(&cli.generator_config())?;
    let service = build_service(cli, generator.as_ref())?;
    let response = service.process_plaintext(&text).await?;

    Ok(format_tweets(&response, format))
}

async fn cmd_batch(
    cli: &Cli,
    files: &[PathBuf],
    max_concurrent: usize,
    format: OutputFormat,
) -> Result<String> {
    let generator = ThrottledGenerator::new(
        create_generator(&cli.generator_config())?,
        max_concurrent,
    );
    let service = build_service(cli, &generator)?;

    info!(
        files = files.len(),
        max_concurrent,
        model = generator.model(),
        "starting batch"
    );

    // Each file gets its own run; only the permits are shared.
    let runs = files.iter().map(|path| {
        let service = &service;
        async move {
            let result = match read_file(path) {
                Ok(text) => service.process_plaintext(&text).await,
                Err(e) => Err(e),
            };
            (path.clone(), result)
        }
    });
    let results = join_all(runs).await;

    Ok(format_batch(&results, format))
}

fn cmd_chunks(
    path: Option<&Path>,
    chunk_size: usize,
    overlap: usize,
    format: OutputFormat,
) -> Result<String> {
    let text = read_input(path)?;
    let chunks = segment(&text, chunk_size, overlap)?;
    Ok(format_chunks(&chunks, format))
}

fn cmd_prompt(cli: &Cli, write: Option<&Path>, format: OutputFormat) -> Result<String> {
    let Some(dir) = write else {
        let template = PromptTemplate::load(cli.prompt_dir.as_deref());
        return Ok(match format {
            OutputFormat::Text => format!("{}\n", template.instructions().trim_end()),
            OutputFormat::Json | OutputFormat::Ndjson => {
                let result = serde_json::json!({ "instructions": template.instructions() });
                format!("{result}\n")
            }
        });
    };

    let written = PromptTemplate::write_default(dir).map_err(|e| IoError::WriteFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let path = dir.join(crate::synth::prompt::INSTRUCTIONS_FILENAME);
    match format {
        OutputFormat::Text => Ok(if written.is_some() {
            format!("Wrote {}\n", path.display())
        } else {
            format!("{} already exists, left unchanged\n", path.display())
        }),
        OutputFormat::Json | OutputFormat::Ndjson => {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "written": written.is_some(),
            });
            Ok(format!("{result}\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tweetstorm").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_chunks_command() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("input.txt");
        std::fs::write(&file, "One two three. Four five six. Seven eight nine.").unwrap();
        let file = file.to_string_lossy().to_string();

        let output = execute(&cli(&["chunks", &file, "--chunk-size", "4", "--overlap", "2"]))
            .await
            .unwrap();
        assert!(output.starts_with("3 chunks:"));

        let output = execute(&cli(&["--format", "json", "chunks", &file]))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plaintext_validates_before_generator() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("short.txt");
        std::fs::write(&file, "too short").unwrap();

        // No API key is configured, so reaching the generator would fail differently.
        let err = execute(&cli(&["plaintext", &file.to_string_lossy()]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::TooShort { .. })
        ));
    }

    #[tokio::test]
    async fn test_process_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("request.json");
        std::fs::write(&file, "{not json").unwrap();

        let err = execute(&cli(&["process", &file.to_string_lossy()]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed request"));
    }

    #[tokio::test]
    async fn test_prompt_write_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let output = execute(&cli(&["prompt", "--write", &dir])).await.unwrap();
        assert!(output.starts_with("Wrote"));

        let output = execute(&cli(&["prompt", "--write", &dir])).await.unwrap();
        assert!(output.contains("left unchanged"));
    }

    #[tokio::test]
    async fn test_prompt_prints_instructions_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("instructions.md"), "Custom rules.").unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();

        let output = execute(&cli(&["--prompt-dir", &dir, "prompt"])).await.unwrap();
        assert_eq!(output, "Custom rules.\n");
    }
}
