//! Search index coordinating the catalog filter and the fuzzy ranker.
//!
//! The index owns the canonical list of catalog names and a [`CatalogFilter`]
//! behind a single reader/writer lock. Names are stored as shared `Arc<str>`,
//! so a suggestion query copies only pointers under the read lock and ranks
//! that snapshot after the lock is released. A long scan never blocks writers,
//! and a query does not see names added after its snapshot was taken.

use crate::filter::CatalogFilter;
use crate::matching::{FuzzyMatch, FuzzyRanker, TokenScoring};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Largest accepted [`IndexConfig::rebuild_headroom`].
pub const MAX_REBUILD_HEADROOM: f64 = 16.0;

/// Tuning for a [`SearchIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndexConfig {
    /// Token scoring policy for multi-word names
    pub token_scoring: TokenScoring,

    /// Rebuild the filter once incremental additions exceed its sizing
    pub auto_rebuild: bool,

    /// Capacity multiplier applied to the name count when rebuilding, within
    /// `1.0..=MAX_REBUILD_HEADROOM`
    pub rebuild_headroom: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            token_scoring: TokenScoring::default(),
            auto_rebuild: true,
            rebuild_headroom: 2.0,
        }
    }
}

/// Point-in-time counters describing an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Names in the canonical list
    pub names: usize,

    /// Names the current filter was sized for
    pub filter_capacity: usize,

    /// Names inserted into the current filter
    pub filter_inserted: usize,

    /// Filter rebuilds triggered by incremental growth
    pub rebuilds: u64,
}

struct IndexState {
    names: Vec<Arc<str>>,
    filter: CatalogFilter,
    rebuilds: u64,
}

/// In-process autocomplete index over catalog names.
///
/// All operations are total: an empty index answers every query with an
/// empty result.
pub struct SearchIndex {
    state: RwLock<IndexState>,
    ranker: FuzzyRanker,
    config: IndexConfig,
}

impl SearchIndex {
    /// Create an empty index.
    ///
    /// A `rebuild_headroom` outside `1.0..=MAX_REBUILD_HEADROOM` is clamped
    /// into that range; NaN falls back to the default.
    pub fn new(mut config: IndexConfig) -> Self {
        let headroom = sanitize_headroom(config.rebuild_headroom);
        if headroom != config.rebuild_headroom {
            warn!(
                requested = config.rebuild_headroom,
                used = headroom,
                "Rebuild headroom out of range, clamped"
            );
            config.rebuild_headroom = headroom;
        }

        Self {
            state: RwLock::new(IndexState {
                names: Vec::new(),
                filter: CatalogFilter::default(),
                rebuilds: 0,
            }),
            ranker: FuzzyRanker::new(config.token_scoring),
            config,
        }
    }

    /// Replace the whole catalog.
    ///
    /// Builds a new filter sized for exactly `names.len()` entries. Intended
    /// for startup and full reloads.
    pub fn initialize<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Arc<str>> = names
            .into_iter()
            .map(|name| Arc::from(Into::<String>::into(name)))
            .collect();
        let filter = CatalogFilter::with_capacity(names.len());
        filter.add_items(&names);
        let count = names.len();

        {
            let mut state = self.write();
            state.names = names;
            state.filter = filter;
        }

        info!(names = count, "Search index initialized");
    }

    /// Append one name to the catalog.
    ///
    /// The filter is not resized on every call. When `auto_rebuild` is on and
    /// the filter now holds more names than it was sized for, it is rebuilt
    /// from the full list with `rebuild_headroom` spare capacity.
    ///
    /// Outstanding snapshots are never copied, so this is O(1) amortized.
    pub fn add_item(&self, name: impl Into<String>) {
        let name: String = name.into();
        let name: Arc<str> = Arc::from(name);
        let mut state = self.write();

        state.filter.add_item(&name);
        state.names.push(name);

        if self.config.auto_rebuild && state.filter.is_over_capacity() {
            self.rebuild_filter(&mut state);
        }
    }

    /// Cheap existence hint for a query. See [`CatalogFilter::may_match`].
    pub fn may_match(&self, query: &str) -> bool {
        self.read().filter.may_match(query)
    }

    /// Up to `limit` distinct names for `query`, most relevant first.
    ///
    /// A `limit` of 0 means the default of 10.
    pub fn get_suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        let names = self.snapshot();
        let suggestions = self.ranker.suggest(query, names.as_slice(), limit);

        debug!(
            candidates = names.len(),
            results = suggestions.len(),
            "Suggestions computed"
        );

        suggestions
    }

    /// Every qualifying match for `query` with its distance and score.
    ///
    /// A `max_distance` of 0 derives the tolerance from the query length.
    pub fn rank(&self, query: &str, max_distance: usize) -> Vec<FuzzyMatch> {
        let names = self.snapshot();
        self.ranker.rank(query, names.as_slice(), max_distance)
    }

    /// The current name list in insertion order.
    ///
    /// Copies pointers only; the strings are shared with the index.
    pub fn snapshot(&self) -> Vec<Arc<str>> {
        self.read().names.clone()
    }

    /// A copy of the current name list in insertion order.
    pub fn get_all_names(&self) -> Vec<String> {
        self.read().names.iter().map(|name| name.to_string()).collect()
    }

    /// Drop every name and clear the filter.
    pub fn clear(&self) {
        let mut state = self.write();
        state.names.clear();
        state.filter.clear();
        debug!("Search index cleared");
    }

    /// Number of names in the catalog.
    pub fn len(&self) -> usize {
        self.read().names.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current index counters.
    pub fn stats(&self) -> IndexStats {
        let state = self.read();
        IndexStats {
            names: state.names.len(),
            filter_capacity: state.filter.capacity(),
            filter_inserted: state.filter.inserted(),
            rebuilds: state.rebuilds,
        }
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn rebuild_filter(&self, state: &mut IndexState) {
        let capacity = (state.names.len() as f64 * self.config.rebuild_headroom).ceil() as usize;

        let filter = CatalogFilter::with_capacity(capacity);
        filter.add_items(state.names.iter());

        state.filter = filter;
        state.rebuilds += 1;

        info!(
            names = state.names.len(),
            capacity = capacity,
            "Catalog filter rebuilt after incremental growth"
        );
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sanitize_headroom(headroom: f64) -> f64 {
    if headroom.is_nan() {
        IndexConfig::default().rebuild_headroom
    } else {
        headroom.clamp(1.0, MAX_REBUILD_HEADROOM)
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Owner of the one search index an application uses.
///
/// Created at the composition root and passed to whoever needs search.
/// [`SearchRegistry::instance`] builds the index on first use, exactly once
/// even when several threads ask at the same time, and hands out shared
/// handles to it afterwards.
#[derive(Debug, Default)]
pub struct SearchRegistry {
    config: IndexConfig,
    index: OnceCell<Arc<SearchIndex>>,
}

impl SearchRegistry {
    /// Create a registry that will build its index with `config`.
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            index: OnceCell::new(),
        }
    }

    /// The shared index, created on first call.
    pub fn instance(&self) -> Arc<SearchIndex> {
        let index = self.index.get_or_init(|| {
            info!("Creating search index");
            Arc::new(SearchIndex::new(self.config.clone()))
        });
        Arc::clone(index)
    }

    /// Whether the index has been created yet.
    pub fn is_created(&self) -> bool {
        self.index.get().is_some()
    }
}
