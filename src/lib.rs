//! Catalog Suggest - in-process autocomplete for catalog names.
//!
//! Answers "what did the user mean?" for partial or misspelled queries against
//! a catalog of product names, and cheaply answers "could anything match this
//! at all?" through bloom-filter pre-checks.
//!
//! # Architecture
//!
//! - **matching**: Normalization, edit distances and the fuzzy ranker
//! - **filter**: Bloom filter and the two-stage catalog filter
//! - **search**: The shared search index and its registry
//! - **repositories**: Catalog source abstraction
//! - **services**: Request validation and catalog loading
//! - **error**: Custom error types for the fallible edges
//! - **config**: Configuration management from environment variables
//! - **observability**: Tracing setup and metrics

pub mod config;
pub mod error;
pub mod filter;
pub mod matching;
pub mod observability;
pub mod repositories;
pub mod search;
pub mod services;

pub use config::Config;
pub use error::{CatalogError, ConfigError, SuggestionError};
pub use filter::{BloomFilter, CatalogFilter};
pub use matching::{FuzzyMatch, FuzzyRanker, TokenScoring};
pub use observability::{init_tracing, MetricsTracker, Timer};
pub use repositories::CatalogRepository;
pub use search::{IndexConfig, IndexStats, SearchIndex, SearchRegistry};
pub use services::{SuggestParams, SuggestionService};
