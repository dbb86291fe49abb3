//! Suggestion service layer.
//!
//! Request validation and catalog loading around a shared [`SearchIndex`].
//! This is the only layer of the crate that returns errors.

use crate::config::Config;
use crate::error::{SuggestionError, SuggestionResult};
use crate::matching::normalize::char_len;
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::CatalogRepository;
use crate::search::SearchIndex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Parameters of an autocomplete request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestParams {
    /// Text typed so far
    pub query: String,

    /// Maximum number of suggestions (default from config, capped at the configured max)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SuggestParams {
    /// Request suggestions for `query` with the default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }

    /// Set an explicit limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Boundary between request handlers and the search index.
pub struct SuggestionService {
    index: Arc<SearchIndex>,
    repository: Arc<dyn CatalogRepository>,
    config: Config,
    metrics: MetricsTracker,
}

impl SuggestionService {
    /// Create a new suggestion service.
    pub fn new(
        index: Arc<SearchIndex>,
        repository: Arc<dyn CatalogRepository>,
        config: Config,
    ) -> Self {
        Self {
            index,
            repository,
            config,
            metrics: MetricsTracker::new(),
        }
    }

    /// Report into an existing metrics tracker instead of a private one.
    pub fn with_metrics(mut self, metrics: MetricsTracker) -> Self {
        self.metrics = metrics;
        self
    }

    /// The index this service feeds and queries.
    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    /// Metrics recorded by this service.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// The service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load every catalog name and replace the index contents.
    ///
    /// Pages through the repository until a short page comes back. Blank
    /// names are skipped. On error the index keeps its previous contents.
    pub async fn load_catalog(&self) -> SuggestionResult<usize> {
        let timer = Timer::new("load_catalog");
        let page_size = self.config.catalog_page_size.max(1);

        let mut names = Vec::new();
        let mut offset = 0;

        loop {
            let page = match self.repository.list_names(page_size, offset).await {
                Ok(page) => page,
                Err(e) => {
                    let duration_ms = timer.finish_with_status(false);
                    self.metrics.track_catalog_load(duration_ms, 0, false);
                    return Err(e.into());
                }
            };

            let fetched = page.len();
            names.extend(page.into_iter().filter(|name| !name.trim().is_empty()));

            if fetched < page_size {
                break;
            }
            offset += fetched;
        }

        let count = names.len();
        self.index.initialize(names);

        let duration_ms = timer.finish();
        self.metrics.track_catalog_load(duration_ms, count, true);

        Ok(count)
    }

    /// Index a newly created catalog item.
    pub fn item_created(&self, name: &str) -> SuggestionResult<()> {
        if name.trim().is_empty() {
            return Err(SuggestionError::InvalidItem(
                "Item name cannot be empty".to_string(),
            ));
        }

        self.index.add_item(name);
        self.metrics.track_item_added();
        debug!(name = %name, "Catalog item indexed");

        Ok(())
    }

    /// Autocomplete suggestions for a request.
    pub fn suggest(&self, params: SuggestParams) -> SuggestionResult<Vec<String>> {
        let timer = Timer::new("suggest");

        let query = params.query.trim();
        if query.is_empty() {
            return Err(SuggestionError::EmptyQuery);
        }

        let len = char_len(query);
        if len > self.config.max_query_length {
            return Err(SuggestionError::QueryTooLong {
                len,
                max: self.config.max_query_length,
            });
        }

        let limit = self.resolve_limit(params.limit);
        let suggestions = self.index.get_suggestions(query, limit);

        self.metrics
            .track_suggestion_query(timer.finish(), suggestions.len());

        Ok(suggestions)
    }

    /// Cheap existence hint for a query.
    pub fn may_match(&self, query: &str) -> bool {
        let may_match = self.index.may_match(query);
        self.metrics.track_prefilter_check(may_match);
        may_match
    }

    /// Reload the catalog every `interval` in a background task.
    ///
    /// The first reload happens one interval from now. Failures are logged and
    /// retried on the next tick. Returns `None` for a zero interval.
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> Option<JoinHandle<()>> {
        if interval.is_zero() {
            return None;
        }

        let service = Arc::clone(self);
        info!(interval_secs = interval.as_secs(), "Starting catalog refresh task");

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = service.load_catalog().await {
                    warn!(error = %e, "Catalog refresh failed, keeping previous index");
                }
            }
        }))
    }

    /// Start the refresh task using `catalog_refresh_minutes` from config.
    pub fn spawn_configured_refresh(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let minutes = self.config.catalog_refresh_minutes;
        self.spawn_refresh(Duration::from_secs(minutes.saturating_mul(60)))
    }

    fn resolve_limit(&self, limit: Option<usize>) -> usize {
        let limit = match limit {
            None | Some(0) => self.config.default_limit,
            Some(limit) => limit,
        };
        limit.min(self.config.max_limit)
    }
}

impl std::fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionService")
            .field("index", &self.index)
            .field("config", &self.config)
            .finish()
    }
}
