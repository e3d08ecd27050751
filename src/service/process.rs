//! The two processing operations.

use tracing::info;

use super::request::{ProcessRequest, TweetListResponse, validate_text};
use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, segment};
use crate::error::Result;
use crate::synth::{Generator, PostSynthesizer, PromptTemplate, SynthesisConfig};

/// Validates requests, segments their text and synthesizes posts.
///
/// Invalid requests are rejected before the generator is called.
///
/// # Examples
///
/// ```
/// use tweetstorm::service::TweetService;
/// use tweetstorm::synth::ScriptedGenerator;
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let generator = ScriptedGenerator::new(["<tweet>Short and sweet.</tweet>"]);
/// let service = TweetService::new(&generator);
///
/// let response = service
///     .process_plaintext("A paragraph long enough to pass validation.")
///     .await
///     .unwrap();
/// assert_eq!(response.tweets, vec!["Short and sweet."]);
/// # });
/// ```
#[derive(Debug)]
pub struct TweetService<'g, G: ?Sized> {
    generator: &'g G,
    prompt: PromptTemplate,
    config: SynthesisConfig,
}

impl<'g, G: Generator + ?Sized> TweetService<'g, G> {
    /// Creates a service with the default prompt and configuration.
    #[must_use]
    pub fn new(generator: &'g G) -> Self {
        Self {
            generator,
            prompt: PromptTemplate::defaults(),
            config: SynthesisConfig::default(),
        }
    }

    /// Sets the prompt template.
    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Sets the synthesis configuration.
    #[must_use]
    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// Processes a structured request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) for invalid requests, or a generation
    /// error when the run is aborted.
    pub async fn process(&self, request: &ProcessRequest) -> Result<TweetListResponse> {
        let text = request.validate()?;
        self.run(text, request.chunk_size, request.overlap_size).await
    }

    /// Processes raw text with the default chunk and overlap sizes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) for empty, too short or too long text,
    /// or a generation error when the run is aborted.
    pub async fn process_plaintext(&self, text: &str) -> Result<TweetListResponse> {
        let text = validate_text(text)?;
        self.run(text, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP).await
    }

    async fn run(
        &self,
        text: &str,
        chunk_size: usize,
        overlap_size: usize,
    ) -> Result<TweetListResponse> {
        let chunks = segment(text, chunk_size, overlap_size)?;
        let chunk_count = chunks.len();

        let tweets = self.synthesizer().collect(chunks).await?;
        info!(
            chunks = chunk_count,
            tweets = tweets.len(),
            model = self.generator.model(),
            "processed text"
        );
        Ok(TweetListResponse::from(tweets))
    }

    fn synthesizer(&self) -> PostSynthesizer<'g, G> {
        PostSynthesizer::new(self.generator)
            .with_prompt(self.prompt.clone())
            .with_config(self.config.clone())
    }
}
