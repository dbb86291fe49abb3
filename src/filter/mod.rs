//! Probabilistic pre-filters for catalog queries.
//!
//! [`BloomFilter`] is a generic membership structure over normalized strings;
//! [`CatalogFilter`] pairs a whole-name filter with a per-token filter so a
//! caller can cheaply skip ranking when nothing can match.

pub mod bloom;
pub mod catalog_filter;

pub use bloom::{BloomFilter, DEFAULT_EXPECTED_ITEMS};
pub use catalog_filter::{CatalogFilter, TOKENS_PER_NAME};
