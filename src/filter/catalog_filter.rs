//! Two-stage bloom filter for catalog names.
//!
//! The name filter answers "might this exact name exist", the token filter
//! answers "might any catalog name contain this word".

use super::bloom::{BloomFilter, DEFAULT_EXPECTED_ITEMS};
use crate::matching::normalize::{is_indexable_token, normalize, tokens};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Average number of tokens assumed per catalog name when sizing the token filter.
pub const TOKENS_PER_NAME: usize = 3;

/// Coarse existence pre-check over catalog names and their tokens.
#[derive(Debug)]
pub struct CatalogFilter {
    name_filter: BloomFilter,
    token_filter: BloomFilter,
    capacity: usize,
    inserted: AtomicUsize,
}

impl CatalogFilter {
    /// Create a filter sized for `expected_names` catalog entries.
    pub fn with_capacity(expected_names: usize) -> Self {
        let capacity = if expected_names == 0 {
            DEFAULT_EXPECTED_ITEMS
        } else {
            expected_names
        };

        Self {
            name_filter: BloomFilter::for_expected_items(expected_names),
            token_filter: BloomFilter::for_expected_items(
                expected_names.saturating_mul(TOKENS_PER_NAME),
            ),
            capacity,
            inserted: AtomicUsize::new(0),
        }
    }

    /// Index a catalog name and each of its tokens of two or more chars.
    pub fn add_item(&self, name: &str) {
        let name = normalize(name);
        self.name_filter.add(&name);
        self.token_filter
            .add_multiple(tokens(&name).filter(|token| is_indexable_token(token)));
        self.inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Index several catalog names.
    pub fn add_items<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_item(name.as_ref());
        }
    }

    /// Whether the query might match a catalog name.
    ///
    /// True if the whole query might be a name, or any query token of two or
    /// more chars might be a name token. A `false` means no catalog name equals
    /// the query or shares a word with it; it does not rule out typo matches.
    pub fn may_match(&self, query: &str) -> bool {
        let query = normalize(query);

        if self.name_filter.may_contain(&query) {
            return true;
        }

        let found = tokens(&query).any(|token| is_indexable_token(token) && self.token_filter.may_contain(token));
        found
    }

    /// Clear both filters.
    pub fn clear(&self) {
        self.name_filter.clear();
        self.token_filter.clear();
        self.inserted.store(0, Ordering::Relaxed);
    }

    /// Number of names this filter was sized for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Names inserted since construction or the last clear.
    pub fn inserted(&self) -> usize {
        self.inserted.load(Ordering::Relaxed)
    }

    /// Whether more names were inserted than the filter was sized for, which
    /// pushes its false positive rate above the design target.
    pub fn is_over_capacity(&self) -> bool {
        self.inserted() > self.capacity
    }

    /// The whole-name filter.
    pub fn name_filter(&self) -> &BloomFilter {
        &self.name_filter
    }

    /// The per-token filter.
    pub fn token_filter(&self) -> &BloomFilter {
        &self.token_filter
    }
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EXPECTED_ITEMS)
    }
}
