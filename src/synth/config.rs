//! Configuration for the generation pipeline.

use std::time::Duration;

/// Default number of recent posts shown to the model.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Default timeout for a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of retries after a failed generation call.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default base delay between retries; attempt `n` waits `n` times this.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Default OpenAI-compatible API base (Mistral).
pub const DEFAULT_API_BASE: &str = "https://api.mistral.ai/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Sampling parameters sent with every generation call.
///
/// The defaults favour novelty: full temperature, a narrow nucleus, and
/// penalties against reusing tokens already in the context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
    /// Frequency penalty.
    pub frequency_penalty: f32,
}

impl SamplingParams {
    /// The fixed sampling settings used for post generation.
    pub const DEFAULT: Self = Self {
        temperature: 1.0,
        top_p: 0.5,
        presence_penalty: 1.0,
        frequency_penalty: 0.25,
    };
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What to do with a chunk whose generation call keeps failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure, emit nothing for the chunk, and continue.
    #[default]
    Skip,
    /// Stop the run, reporting the posts accepted so far.
    Abort,
}

impl FailurePolicy {
    /// Parses a policy name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Settings for a [`PostSynthesizer`](super::PostSynthesizer) run.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// Number of most recent accepted posts rendered into each prompt.
    pub history_window: usize,
    /// Timeout for one generation call.
    pub timeout: Duration,
    /// Retries after the first failed attempt for one chunk.
    pub max_retries: u32,
    /// Base delay between retries.
    pub retry_backoff: Duration,
    /// Behaviour once retries are exhausted.
    pub failure_policy: FailurePolicy,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SynthesisConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the history window.
    #[must_use]
    pub const fn history_window(mut self, posts: usize) -> Self {
        self.history_window = posts;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry count.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the retry backoff.
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub const fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Connection settings for an OpenAI-compatible provider.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// API base URL.
    pub api_base: String,
    /// API key, if configured.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the API base.
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
