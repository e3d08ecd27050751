//! Post synthesis.
//!
//! Sends each chunk to a text-generation capability together with the
//! recently accepted posts, extracts `<tweet>`-tagged candidates from the
//! response, and filters out candidates that were already accepted.

pub mod config;
pub mod extract;
pub mod generator;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod prompt;

pub use config::{FailurePolicy, GeneratorConfig, SamplingParams, SynthesisConfig};
pub use extract::{POST_CLOSE_TAG, POST_OPEN_TAG, extract_posts};
pub use generator::{Generator, ScriptedGenerator, ThrottledGenerator};
#[cfg(feature = "openai")]
pub use openai::OpenAiGenerator;
pub use pipeline::PostSynthesizer;
pub use prompt::PromptTemplate;

/// Builds the default generator for `config`.
///
/// # Errors
///
/// Returns [`crate::error::GenerationError::MissingApiKey`] when no key is
/// configured, or a configuration error when the crate was built without the
/// `openai` feature.
pub fn create_generator(config: &GeneratorConfig) -> crate::error::Result<Box<dyn Generator>> {
    #[cfg(feature = "openai")]
    {
        Ok(Box::new(OpenAiGenerator::new(config)?))
    }
    #[cfg(not(feature = "openai"))]
    {
        let _ = config;
        Err(crate::error::Error::Config {
            message: "built without the `openai` feature; no generator available".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_generator_requires_key() {
        assert!(create_generator(&GeneratorConfig::default()).is_err());
    }

    #[cfg(feature = "openai")]
    #[test]
    fn test_create_generator_with_key() {
        let config = GeneratorConfig::default().api_key("k").model("mistral-tiny");
        let generator = create_generator(&config).unwrap();
        assert_eq!(generator.model(), "mistral-tiny");
    }
}
