//! OpenAI-compatible chat completion client.
//!
//! Any provider speaking the OpenAI chat completion protocol works; the
//! default configuration points at Mistral.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use tracing::debug;

use super::config::{GeneratorConfig, SamplingParams};
use super::generator::Generator;
use crate::error::GenerationError;

/// Generator backed by an OpenAI-compatible chat completion endpoint.
///
/// Each prompt is sent as a single user message with fixed sampling
/// parameters.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    sampling: SamplingParams,
}

impl OpenAiGenerator {
    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingApiKey`] if no non-empty API key is
    /// configured.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(config.api_base.clone())
            .with_api_key(api_key);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
            sampling: SamplingParams::DEFAULT,
        })
    }

    /// Overrides the sampling parameters.
    #[must_use]
    pub const fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(vec![message.into()])
            .temperature(self.sampling.temperature)
            .top_p(self.sampling.top_p)
            .presence_penalty(self.sampling.presence_penalty)
            .frequency_penalty(self.sampling.frequency_penalty)
            .build()?;

        debug!(model = %self.model, prompt_len = prompt.len(), "sending chat completion");

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
