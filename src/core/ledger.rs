//! Accepted-post bookkeeping for a single run.

use std::collections::HashSet;

/// Seen set plus output sequence for one request.
///
/// Acceptance is exact-string: a post already accepted is rejected on every
/// later attempt, whichever chunk it came from. The output sequence is
/// append-only and keeps first-acceptance order.
///
/// # Examples
///
/// ```
/// use tweetstorm::core::PostLedger;
///
/// let mut ledger = PostLedger::new();
/// assert!(ledger.accept("Hello world"));
/// assert!(!ledger.accept("Hello world"));
/// assert_eq!(ledger.accepted(), ["Hello world"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostLedger {
    seen: HashSet<String>,
    accepted: Vec<String>,
}

impl PostLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `post` unless it was seen before. Returns true if accepted.
    pub fn accept(&mut self, post: impl Into<String>) -> bool {
        let post = post.into();
        if self.seen.contains(&post) {
            return false;
        }
        self.seen.insert(post.clone());
        self.accepted.push(post);
        true
    }

    /// Returns all accepted posts in acceptance order.
    #[must_use]
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    /// Returns the last `n` accepted posts, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.accepted.len().saturating_sub(n);
        &self.accepted[start..]
    }
}
