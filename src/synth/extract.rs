//! Extraction of tagged post candidates from model responses.

use regex::Regex;
use std::sync::OnceLock;

/// Opening delimiter wrapping each post.
pub const POST_OPEN_TAG: &str = "<tweet>";

/// Closing delimiter wrapping each post.
pub const POST_CLOSE_TAG: &str = "</tweet>";

/// Non-greedy match between the delimiters, across lines.
#[allow(clippy::expect_used)]
fn post_regex() -> &'static Regex {
    static POST: OnceLock<Regex> = OnceLock::new();
    POST.get_or_init(|| {
        let pattern = format!(
            "(?s){}(.*?){}",
            regex::escape(POST_OPEN_TAG),
            regex::escape(POST_CLOSE_TAG)
        );
        Regex::new(&pattern).expect("valid regex")
    })
}

/// Extracts post candidates from a response, in order of appearance.
///
/// Each candidate is trimmed; empty ones are dropped. Duplicates are kept,
/// deduplication is the caller's job.
///
/// # Examples
///
/// ```
/// use tweetstorm::synth::extract_posts;
///
/// let posts = extract_posts("noise <tweet> first </tweet>\n<tweet>second\nline</tweet>");
/// assert_eq!(posts, vec!["first", "second\nline"]);
/// ```
#[must_use]
pub fn extract_posts(response: &str) -> Vec<String> {
    post_regex()
        .captures_iter(response)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|post| !post.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wraps a post in the delimiter pair.
#[must_use]
pub fn wrap_post(post: &str) -> String {
    format!("{POST_OPEN_TAG}{post}{POST_CLOSE_TAG}")
}
