//! Hashtag extraction
//!
//! Derives the hashtag list of a post from its text content.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches `#tag` where the tag is ASCII alphanumerics or underscores
static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[A-Za-z0-9_]+").expect("Invalid hashtag regex"));

/// Case-folded key used to compare hashtags.
pub fn normalize_hashtag(tag: &str) -> String {
    tag.to_lowercase()
}

/// Extract `#hashtags` from content text
///
/// Tokens keep their `#` prefix and original casing. The list is deduplicated
/// case-insensitively, the first casing seen wins and order of appearance is
/// kept.
///
/// # Examples
/// ```
/// use social_content::services::extract_hashtags;
///
/// let tags = extract_hashtags("#Rust is great, #rust again and #tokio!");
/// assert_eq!(tags, vec!["#Rust", "#tokio"]);
/// ```
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG_REGEX
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .filter(|tag| seen.insert(normalize_hashtag(tag)))
        .collect()
}
