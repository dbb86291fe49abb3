//! Application service layer.
//!
//! Services validate requests and orchestrate the catalog repository and the
//! search index. They are the boundary request handlers call into.

mod suggestion_service;

pub use suggestion_service::{SuggestParams, SuggestionService};
