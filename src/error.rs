//! Error types for the catalog suggestion subsystem.
//!
//! The matching core, bloom filters and search index are total and never fail.
//! Errors only appear at the edges: configuration loading, the catalog
//! collaborator, and request validation in the suggestion service.

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors reported by a catalog collaborator while listing names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The backing store could not be reached
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// A page request was rejected
    #[error("Invalid catalog page: {0}")]
    InvalidPage(String),

    /// Generic catalog error
    #[error("Catalog error: {0}")]
    Other(String),
}

/// Errors returned by the suggestion service boundary.
#[derive(Error, Debug)]
pub enum SuggestionError {
    /// Query was empty or only whitespace
    #[error("Search query is required")]
    EmptyQuery,

    /// Query exceeded the configured maximum length
    #[error("Search query too long ({len} characters, max {max})")]
    QueryTooLong { len: usize, max: usize },

    /// Catalog item rejected before indexing
    #[error("Invalid catalog item: {0}")]
    InvalidItem(String),

    /// Loading names from the catalog failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convenience type alias for Results with SuggestionError
pub type SuggestionResult<T> = Result<T, SuggestionError>;
