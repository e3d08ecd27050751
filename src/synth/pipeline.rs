//! The chunk-to-post pipeline.
//!
//! Chunks are processed strictly in order: each prompt shows the model the
//! posts accepted so far, so a chunk cannot be sent before every earlier
//! chunk has been answered.

use futures_util::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use tracing::{debug, warn};

use super::config::{FailurePolicy, SynthesisConfig};
use super::extract::extract_posts;
use super::generator::Generator;
use super::prompt::PromptTemplate;
use crate::core::{Chunk, PostLedger};
use crate::error::{GenerationError, Result};

/// Turns chunks into a deduplicated sequence of posts.
///
/// # Examples
///
/// ```
/// use futures_util::StreamExt;
/// use tweetstorm::core::Chunk;
/// use tweetstorm::synth::{PostSynthesizer, ScriptedGenerator};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let generator = ScriptedGenerator::new(["<tweet>A</tweet><tweet>A</tweet><tweet>B</tweet>"]);
/// let synthesizer = PostSynthesizer::new(&generator);
/// let chunks = vec![Chunk::new(0, "Some text.".to_string(), 0..2, 2)];
///
/// let posts: Vec<_> = synthesizer.synthesize(chunks).collect().await;
/// let posts: Vec<String> = posts.into_iter().map(Result::unwrap).collect();
/// assert_eq!(posts, vec!["A", "B"]);
/// # });
/// ```
#[derive(Debug)]
pub struct PostSynthesizer<'g, G: ?Sized> {
    generator: &'g G,
    prompt: PromptTemplate,
    config: SynthesisConfig,
}

/// State owned by one run of [`PostSynthesizer::synthesize`].
struct RunState {
    chunks: std::vec::IntoIter<Chunk>,
    ledger: PostLedger,
    pending: VecDeque<String>,
    halted: bool,
    succeeded: usize,
    failed: usize,
    last_failure: Option<GenerationError>,
}

impl<'g, G: Generator + ?Sized> PostSynthesizer<'g, G> {
    /// Creates a synthesizer with the default prompt and configuration.
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

    /// Sets the run configuration.
    #[must_use]
    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Produces accepted posts lazily, one at a time, in acceptance order.
    ///
    /// The next chunk is only sent to the model once every post accepted
    /// from the previous chunk has been pulled. The seen set and history are
    /// owned by the returned stream, so each call starts a fresh run.
    ///
    /// With [`FailurePolicy::Abort`] the stream yields a single
    /// [`GenerationError::Aborted`] carrying the posts accepted so far, then
    /// ends. With [`FailurePolicy::Skip`] failed chunks are dropped, but a
    /// run in which every chunk failed ends with
    /// [`GenerationError::AllChunksFailed`].
    pub fn synthesize(&self, chunks: Vec<Chunk>) -> impl Stream<Item = Result<String>> + '_ {
        let state = RunState {
            chunks: chunks.into_iter(),
            ledger: PostLedger::new(),
            pending: VecDeque::new(),
            halted: false,
            succeeded: 0,
            failed: 0,
            last_failure: None,
        };

        stream::unfold(state, move |mut state| async move {
            loop {
                if let Some(post) = state.pending.pop_front() {
                    return Some((Ok(post), state));
                }
                if state.halted {
                    return None;
                }

                let Some(chunk) = state.chunks.next() else {
                    state.halted = true;
                    if state.succeeded > 0 {
                        return None;
                    }
                    let all_failed = state.last_failure.take().map(|err| {
                        GenerationError::AllChunksFailed {
                            chunks: state.failed,
                            reason: err.to_string(),
                        }
                    })?;
                    return Some((Err(all_failed.into()), state));
                };

                match self.process_chunk(&chunk, &mut state.ledger).await {
                    Ok(accepted) => {
                        state.succeeded += 1;
                        state.pending.extend(accepted);
                    }
                    Err(err) => match self.config.failure_policy {
                        FailurePolicy::Skip => {
                            warn!(chunk = chunk.index, error = %err, "skipping chunk");
                            state.failed += 1;
                            state.last_failure = Some(err);
                        }
                        FailurePolicy::Abort => {
                            state.halted = true;
                            let aborted = GenerationError::Aborted {
                                chunk_index: chunk.index,
                                accepted: state.ledger.accepted().to_vec(),
                                reason: err.to_string(),
                            };
                            return Some((Err(aborted.into()), state));
                        }
                    },
                }
            }
        })
    }

    /// Runs the whole pipeline and collects the accepted posts.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Aborted`] under [`FailurePolicy::Abort`]
    /// when a chunk keeps failing; it carries the posts accepted before.
    /// Returns [`GenerationError::AllChunksFailed`] when no chunk succeeded.
    pub async fn collect(&self, chunks: Vec<Chunk>) -> Result<Vec<String>> {
        let mut posts = Vec::new();
        let mut stream = std::pin::pin!(self.synthesize(chunks));
        while let Some(post) = stream.next().await {
            posts.push(post?);
        }
        Ok(posts)
    }

    /// Prompts for one chunk and records the new posts in `ledger`.
    async fn process_chunk(
        &self,
        chunk: &Chunk,
        ledger: &mut PostLedger,
    ) -> std::result::Result<Vec<String>, GenerationError> {
        let prompt = self
            .prompt
            .build(ledger.recent(self.config.history_window), &chunk.content);
        debug!(
            chunk = chunk.index,
            tokens = chunk.token_estimate,
            prompt_len = prompt.len(),
            "generating posts"
        );

        let response = self.generate_with_retry(&prompt, chunk.index).await?;
        let candidates = extract_posts(&response);
        let total = candidates.len();

        let accepted: Vec<String> = candidates
            .into_iter()
            .filter(|post| ledger.accept(post.as_str()))
            .collect();

        debug!(
            chunk = chunk.index,
            candidates = total,
            accepted = accepted.len(),
            "filtered candidates"
        );
        Ok(accepted)
    }

    /// Calls the generator with a timeout, retrying retryable failures.
    async fn generate_with_retry(
        &self,
        prompt: &str,
        chunk_index: usize,
    ) -> std::result::Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            let outcome = tokio::time::timeout(self.config.timeout, self.generator.generate(prompt))
                .await
                .unwrap_or_else(|_| {
                    Err(GenerationError::Timeout {
                        after: self.config.timeout,
                    })
                });

            match outcome {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(chunk = chunk_index, attempt, error = %err, "retrying generation");
                    tokio::time::sleep(self.config.retry_backoff * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
