//! Text normalization shared by the filters and the ranker.

/// Shortest token that is indexed into, or checked against, the token filter.
pub const MIN_TOKEN_LEN: usize = 2;

/// Trim and lower-case, leaving internal whitespace untouched.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalize text for comparison.
///
/// Trims, lower-cases and collapses every run of internal whitespace into a
/// single space.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into whitespace-separated tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Whether a token is long enough to be worth a filter lookup.
pub fn is_indexable_token(token: &str) -> bool {
    char_len(token) >= MIN_TOKEN_LEN
}

/// Length in chars, which is what every distance and score in the crate uses.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
