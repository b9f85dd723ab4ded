//! Search-topic extraction from a free-text query.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

pub const KEYWORD_PROMPT: &str = "Extract the distinct search topics from the user's question \
about FDA regulatory letters. Respond with only a JSON array of short strings, for example \
[\"data integrity\", \"sterility assurance\"].";

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}'\-]*").expect("valid word regex"));

static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array regex"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "all", "an", "and", "any", "are", "as", "at", "be", "by", "did", "do",
        "does", "for", "from", "had", "has", "have", "how", "in", "into", "is", "it", "its",
        "letter", "letters", "me", "of", "on", "or", "show", "that", "the", "their", "there",
        "these", "this", "those", "to", "was", "were", "what", "when", "where", "which", "who",
        "why", "with",
    ]
    .into_iter()
    .collect()
});

/// Parse the model's reply as a JSON array of topics. Returns `None` when the
/// reply holds no usable array, so the caller can fall back.
pub fn parse_keyword_response(content: &str) -> Option<Vec<String>> {
    let candidate = JSON_ARRAY.find(content)?.as_str();
    let parsed: Vec<String> = serde_json::from_str(candidate).ok()?;
    let topics = dedup(parsed.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()));
    if topics.is_empty() {
        None
    } else {
        Some(topics)
    }
}

/// Lowercased words minus stopwords. Falls back to the whole trimmed query
/// when nothing survives.
pub fn naive_keywords(query: &str) -> Vec<String> {
    let words = dedup(
        WORD.find_iter(query)
            .map(|m| m.as_str().to_lowercase())
            .filter(|w| w.chars().count() >= 2 && !STOPWORDS.contains(w.as_str())),
    );
    if words.is_empty() && !query.trim().is_empty() {
        return vec![query.trim().to_string()];
    }
    words
}

fn dedup<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.to_lowercase())).collect()
}
