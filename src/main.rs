//! Binary entry point for tweetstorm.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tweetstorm::cli::output::{OutputFormat, format_error, format_partial_tweets};
use tweetstorm::cli::{Cli, execute};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.format);
    tweetstorm::logging::init(cli.verbose);

    match execute(&cli).await {
        Ok(output) => {
            if !output.is_empty() {
                // Handle broken pipe gracefully (e.g., when piped to `head` or `jq`)
                if let Err(e) = write!(io::stdout(), "{output}")
                    && e.kind() != io::ErrorKind::BrokenPipe
                {
                    eprintln!("Error writing to stdout: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let error_output = format_error(&e, format);
            if format.is_json() {
                // JSON errors go to stdout for programmatic parsing
                println!("{error_output}");
            } else {
                // Posts accepted before an abort stay on stdout
                if let Some(partial) = format_partial_tweets(&e, format) {
                    print!("{partial}");
                }
                eprintln!("Error: {error_output}");
            }
            ExitCode::FAILURE
        }
    }
}
