//! Instruction template and prompt builder for post generation.
//!
//! The instruction block defines the persona and the formatting and
//! continuity rules. The builder appends the recently accepted posts and the
//! chunk to convert.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use super::extract::wrap_post;

/// Instructions for converting a chunk of text into posts.
pub const DEFAULT_INSTRUCTIONS: &str = "# Role:
You're a literary social media strategist turning long-form writing into an engaging thread of tweets.

# Instructions:
1. ANALYZE the text for its key narrative beats and emotional arc
2. WRITE tweets that carry those beats
3. FORMAT every tweet as: <tweet>[content]</tweet>

# Rules:
- Keep the story moving forward in chronological order from tweet to tweet
- Use simple, vivid language
- Use emojis sparingly
- Use humour where the text allows it
- Put hashtags at the end, mixing broad and niche tags
- Vary the shape of tweets (questions, statements, dialogue)
- Do not repeat yourself unless the original text does
- The text may overlap with the previous output; do not retell what was already covered

# Critical Reminders:
- STRICTLY use the <tweet></tweet> format
- No markdown or other formatting around the tweets
- AVOID reusing phrases or ideas from earlier tweets
- Every tweet must advance the narrative
";

/// Environment variable naming the prompt directory.
pub const PROMPT_DIR_ENV: &str = "TWEETSTORM_PROMPT_DIR";

/// Default prompt directory relative to the user's home.
const DEFAULT_PROMPT_DIR: &str = ".config/tweetstorm/prompts";

/// Filename for the instruction template.
pub const INSTRUCTIONS_FILENAME: &str = "instructions.md";

/// The instruction block used for every chunk prompt.
///
/// Loaded from an external file when available, falling back to the
/// compiled-in default. Use [`PromptTemplate::load`] to resolve the prompt
/// directory from a CLI flag, the environment, or the default path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    instructions: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PromptTemplate {
    /// Creates a template from explicit instructions.
    #[must_use]
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Loads the instructions from the given directory, falling back to the
    /// compiled-in default.
    ///
    /// Resolution order for the directory:
    /// 1. Explicit `prompt_dir` argument (from `--prompt-dir`)
    /// 2. `TWEETSTORM_PROMPT_DIR` environment variable
    /// 3. `~/.config/tweetstorm/prompts/`
    ///
    /// A missing or unreadable file, or one that is blank, uses the default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let resolved_dir = prompt_dir
            .map(PathBuf::from)
            .or_else(|| std::env::var(PROMPT_DIR_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_dir);

        let instructions = resolved_dir
            .map(|dir| dir.join(INSTRUCTIONS_FILENAME))
            .and_then(|path| std::fs::read_to_string(path).ok())
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string());

        Self { instructions }
    }

    /// Returns the compiled-in default without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_INSTRUCTIONS)
    }

    /// Returns the instruction text.
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Writes the compiled-in default to `dir`.
    ///
    /// Creates the directory if needed. An existing file is **not**
    /// overwritten; the returned path is `None` in that case.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_default(dir: &Path) -> std::io::Result<Option<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join(INSTRUCTIONS_FILENAME);
        if path.exists() {
            return Ok(None);
        }
        std::fs::write(&path, DEFAULT_INSTRUCTIONS)?;
        Ok(Some(path))
    }

    /// Returns the default prompt directory under the user's home.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR))
    }

    /// Builds the full prompt for one chunk.
    ///
    /// `recent` is rendered under `# Previous Output:` with each post in its
    /// delimiters; the section is omitted when `recent` is empty.
    #[must_use]
    pub fn build(&self, recent: &[String], chunk: &str) -> String {
        let mut prompt = self.instructions.trim_end().to_string();
        prompt.push_str("\n\n");

        if !recent.is_empty() {
            prompt.push_str("# Previous Output:\n");
            for post in recent {
                let _ = writeln!(prompt, "{}", wrap_post(post));
            }
            prompt.push('\n');
        }

        prompt.push_str("# Text to Convert:\n");
        prompt.push_str(chunk);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_without_history() {
        let prompt = PromptTemplate::defaults().build(&[], "Once upon a midnight dreary.");
        assert!(prompt.starts_with("# Role:"));
        assert!(!prompt.contains("# Previous Output:"));
        assert!(prompt.ends_with("# Text to Convert:\nOnce upon a midnight dreary."));
    }

    #[test]
    fn test_build_with_history() {
        let recent = vec!["first".to_string(), "second".to_string()];
        let prompt = PromptTemplate::new("Rules.").build(&recent, "chunk text");
        assert_eq!(
            prompt,
            "Rules.\n\n# Previous Output:\n<tweet>first</tweet>\n<tweet>second</tweet>\n\n\
             # Text to Convert:\nchunk text"
        );
    }

    #[test]
    fn test_default_instructions_mention_delimiters() {
        assert!(DEFAULT_INSTRUCTIONS.contains("<tweet>[content]</tweet>"));
        assert!(DEFAULT_INSTRUCTIONS.contains("overlap"));
    }

    #[test]
    fn test_load_from_explicit_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(INSTRUCTIONS_FILENAME), "Custom rules.").unwrap();
        let template = PromptTemplate::load(Some(dir.path()));
        assert_eq!(template.instructions(), "Custom rules.");
    }

    #[test]
    fn test_load_falls_back_for_blank_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(INSTRUCTIONS_FILENAME), "  \n").unwrap();
        let template = PromptTemplate::load(Some(dir.path()));
        assert_eq!(template.instructions(), DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn test_load_falls_back_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let template = PromptTemplate::load(Some(dir.path()));
        assert_eq!(template, PromptTemplate::defaults());
    }

    #[test]
    fn test_write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("prompts");

        let written = PromptTemplate::write_default(&target).unwrap();
        assert_eq!(written, Some(target.join(INSTRUCTIONS_FILENAME)));

        std::fs::write(target.join(INSTRUCTIONS_FILENAME), "edited").unwrap();
        assert_eq!(PromptTemplate::write_default(&target).unwrap(), None);
        let content = std::fs::read_to_string(target.join(INSTRUCTIONS_FILENAME)).unwrap();
        assert_eq!(content, "edited");
    }
}
