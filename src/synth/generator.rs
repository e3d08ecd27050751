//! The text-generation capability the pipeline depends on.
//!
//! The pipeline only needs `generate(prompt) -> text`. How the call is
//! transported is up to the implementation.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::Semaphore;

use crate::error::GenerationError;

/// An awaitable text-completion capability.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the provider fails or answers
    /// without content.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Returns the model identifier used for completions.
    fn model(&self) -> &str;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for Box<G> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

/// A deterministic generator that replays queued responses.
///
/// Every prompt is recorded. Once the queue is empty, calls return an empty
/// completion. Useful for tests and offline runs.
///
/// # Examples
///
/// ```
/// use tweetstorm::synth::{Generator, ScriptedGenerator};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let generator = ScriptedGenerator::new(["<tweet>hi</tweet>"]);
/// assert_eq!(generator.generate("prompt").await.unwrap(), "<tweet>hi</tweet>");
/// assert_eq!(generator.generate("again").await.unwrap(), "");
/// assert_eq!(generator.prompts(), vec!["prompt", "again"]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Creates a generator answering with `responses` in order.
    #[must_use]
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(responses.into_iter().map(|r| Ok(r.into())))
    }

    /// Creates a generator replaying successes and failures in order.
    #[must_use]
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<String, GenerationError>>,
    {
        Self {
            responses: Mutex::new(results.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Caps the number of in-flight calls to an inner generator.
///
/// Share one instance across concurrent requests to bound the load they put
/// on the provider together.
#[derive(Debug)]
pub struct ThrottledGenerator<G> {
    inner: G,
    permits: Semaphore,
}

impl<G: Generator> ThrottledGenerator<G> {
    /// Wraps `inner`, allowing at most `max_concurrent` calls at once.
    ///
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn new(inner: G, max_concurrent: usize) -> Self {
        Self {
            inner,
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }

    /// Returns the number of calls that could start right now.
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Returns the wrapped generator.
    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: Generator> Generator for ThrottledGenerator<G> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;
        self.inner.generate(prompt).await
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_scripted_replays_in_order() {
        let generator = ScriptedGenerator::from_results([
            Ok("one".to_string()),
            Err(GenerationError::EmptyResponse),
        ]);
        assert_eq!(generator.generate("a").await.unwrap(), "one");
        assert_eq!(
            generator.generate("b").await,
            Err(GenerationError::EmptyResponse)
        );
        assert_eq!(generator.generate("c").await.unwrap(), "");
        assert_eq!(generator.calls(), 3);
        assert_eq!(generator.model(), "scripted");
    }

    #[tokio::test]
    async fn test_boxed_generator_delegates() {
        let generator: Box<dyn Generator> = Box::new(ScriptedGenerator::new(["boxed"]));
        assert_eq!(generator.generate("p").await.unwrap(), "boxed");
        assert_eq!(generator.model(), "scripted");
    }

    /// Counts how many calls overlap in time.
    #[derive(Default)]
    struct SlowGenerator {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Generator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(String::new())
        }

        fn model(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_caps_concurrency() {
        let throttled = ThrottledGenerator::new(SlowGenerator::default(), 2);
        assert_eq!(throttled.available_permits(), 2);

        let calls = (0..6).map(|_| throttled.generate("p"));
        let results = futures_util::future::join_all(calls).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(throttled.inner().peak.load(Ordering::SeqCst), 2);
        assert_eq!(throttled.available_permits(), 2);
        assert_eq!(throttled.model(), "slow");
    }

    #[test]
    fn test_throttle_zero_means_one() {
        let throttled = ThrottledGenerator::new(ScriptedGenerator::default(), 0);
        assert_eq!(throttled.available_permits(), 1);
    }
}
