//! Fuzzy matching for catalog names.
//!
//! This module provides text normalization, Levenshtein and
//! Damerau-Levenshtein distances, and the ranker that turns a query plus a
//! list of names into ranked, deduplicated suggestions.

pub mod edit_distance;
pub mod fuzzy_ranker;
pub mod normalize;

pub use edit_distance::{damerau_levenshtein, levenshtein};
pub use fuzzy_ranker::{
    default_max_distance, rank, suggest, FuzzyMatch, FuzzyRanker, TokenScoring,
    DEFAULT_SUGGESTION_LIMIT,
};
pub use normalize::normalize;
