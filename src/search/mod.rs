//! Catalog search coordination.
//!
//! This module provides the [`SearchIndex`] the rest of the application
//! talks to, and the [`SearchRegistry`] that owns it.

pub mod search_index;

pub use search_index::{
    IndexConfig, IndexStats, SearchIndex, SearchRegistry, MAX_REBUILD_HEADROOM,
};
