//! File and stdin reading.

use crate::error::{IoError, Result};
use std::io::Read;
use std::path::Path;

/// Largest accepted input, in bytes (1 MiB).
pub const MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// Path value meaning "read standard input".
pub const STDIN_MARKER: &str = "-";

const STDIN_NAME: &str = "<stdin>";

/// Reads input from `path`, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, exceeds
/// [`MAX_INPUT_BYTES`], or is not valid UTF-8.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != STDIN_MARKER => read_file(p),
        _ => read_stdin(),
    }
}

/// Reads a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for missing files and
/// [`IoError::ReadFailed`] for everything else.
///
/// # Examples
///
/// ```no_run
/// use tweetstorm::io::read_file;
///
/// let content = read_file("article.txt").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let file = std::fs::File::open(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    read_limited(file, &path_str)
}

/// Reads all of standard input as UTF-8 text.
///
/// # Errors
///
/// Returns [`IoError::ReadFailed`] if stdin cannot be read, exceeds
/// [`MAX_INPUT_BYTES`], or is not valid UTF-8.
pub fn read_stdin() -> Result<String> {
    read_limited(std::io::stdin().lock(), STDIN_NAME)
}

/// Reads at most [`MAX_INPUT_BYTES`] from `source`.
///
/// One extra byte is requested so oversized input is detected without
/// reading all of it.
fn read_limited<R: Read>(source: R, name: &str) -> Result<String> {
    let mut buffer = Vec::new();
    source
        .take(MAX_INPUT_BYTES + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| IoError::ReadFailed {
            path: name.to_string(),
            reason: e.to_string(),
        })?;

    if buffer.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::ReadFailed {
            path: name.to_string(),
            reason: format!("input too large (max: {MAX_INPUT_BYTES} bytes)"),
        }
        .into());
    }

    String::from_utf8(buffer).map_err(|e| {
        IoError::ReadFailed {
            path: name.to_string(),
            reason: format!("invalid UTF-8: {e}"),
        }
        .into()
    })
}
