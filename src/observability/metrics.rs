//! Suggestion metrics tracking.
//!
//! Counters are shared atomics, so clones of a [`MetricsTracker`] all report
//! into the same totals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracker for the suggestion subsystem.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    suggestion_queries_total: Arc<AtomicU64>,
    suggestions_returned_total: Arc<AtomicU64>,
    prefilter_checks_total: Arc<AtomicU64>,
    prefilter_rejections_total: Arc<AtomicU64>,
    catalog_loads_total: Arc<AtomicU64>,
    catalog_load_failures_total: Arc<AtomicU64>,
    items_added_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            suggestion_queries_total: Arc::new(AtomicU64::new(0)),
            suggestions_returned_total: Arc::new(AtomicU64::new(0)),
            prefilter_checks_total: Arc::new(AtomicU64::new(0)),
            prefilter_rejections_total: Arc::new(AtomicU64::new(0)),
            catalog_loads_total: Arc::new(AtomicU64::new(0)),
            catalog_load_failures_total: Arc::new(AtomicU64::new(0)),
            items_added_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a suggestion query.
    pub fn track_suggestion_query(&self, duration_ms: u128, result_count: usize) {
        self.suggestion_queries_total.fetch_add(1, Ordering::Relaxed);
        self.suggestions_returned_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::debug!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Suggestion query completed"
        );
    }

    /// Track a pre-filter check.
    pub fn track_prefilter_check(&self, may_match: bool) {
        self.prefilter_checks_total.fetch_add(1, Ordering::Relaxed);

        if !may_match {
            self.prefilter_rejections_total
                .fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Pre-filter rejected query");
        }
    }

    /// Track a full catalog load.
    pub fn track_catalog_load(&self, duration_ms: u128, name_count: usize, success: bool) {
        self.catalog_loads_total.fetch_add(1, Ordering::Relaxed);

        if success {
            tracing::info!(
                duration_ms = duration_ms,
                name_count = name_count,
                "Catalog loaded"
            );
        } else {
            self.catalog_load_failures_total
                .fetch_add(1, Ordering::Relaxed);
            tracing::warn!(duration_ms = duration_ms, "Catalog load failed");
        }
    }

    /// Track an incremental catalog addition.
    pub fn track_item_added(&self) {
        self.items_added_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of suggestion queries.
    pub fn suggestion_queries_total(&self) -> u64 {
        self.suggestion_queries_total.load(Ordering::Relaxed)
    }

    /// Get the total number of suggestions returned.
    pub fn suggestions_returned_total(&self) -> u64 {
        self.suggestions_returned_total.load(Ordering::Relaxed)
    }

    /// Get the total number of pre-filter checks.
    pub fn prefilter_checks_total(&self) -> u64 {
        self.prefilter_checks_total.load(Ordering::Relaxed)
    }

    /// Get the total number of pre-filter rejections.
    pub fn prefilter_rejections_total(&self) -> u64 {
        self.prefilter_rejections_total.load(Ordering::Relaxed)
    }

    /// Get the total number of catalog loads, failed ones included.
    pub fn catalog_loads_total(&self) -> u64 {
        self.catalog_loads_total.load(Ordering::Relaxed)
    }

    /// Get the total number of failed catalog loads.
    pub fn catalog_load_failures_total(&self) -> u64 {
        self.catalog_load_failures_total.load(Ordering::Relaxed)
    }

    /// Get the total number of incrementally added items.
    pub fn items_added_total(&self) -> u64 {
        self.items_added_total.load(Ordering::Relaxed)
    }

    /// Get the pre-filter rejection rate (0.0 to 1.0).
    pub fn prefilter_rejection_rate(&self) -> f64 {
        ratio(
            self.prefilter_rejections_total(),
            self.prefilter_checks_total(),
        )
    }

    /// Get the catalog load failure rate (0.0 to 1.0).
    pub fn catalog_failure_rate(&self) -> f64 {
        ratio(
            self.catalog_load_failures_total(),
            self.catalog_loads_total(),
        )
    }

    /// Get the mean number of suggestions per query.
    pub fn average_suggestions_per_query(&self) -> f64 {
        ratio(
            self.suggestions_returned_total(),
            self.suggestion_queries_total(),
        )
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Suggestion Queries: {}\n\
             Suggestions Returned: {} ({:.2} per query)\n\
             Pre-filter Checks: {}\n\
             Pre-filter Rejections: {} ({:.2}% rejection rate)\n\
             Catalog Loads: {}\n\
             Catalog Load Failures: {} ({:.2}% failure rate)\n\
             Items Added: {}",
            self.suggestion_queries_total(),
            self.suggestions_returned_total(),
            self.average_suggestions_per_query(),
            self.prefilter_checks_total(),
            self.prefilter_rejections_total(),
            self.prefilter_rejection_rate() * 100.0,
            self.catalog_loads_total(),
            self.catalog_load_failures_total(),
            self.catalog_failure_rate() * 100.0,
            self.items_added_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Milliseconds since the timer started, without stopping it.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.elapsed_ms();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }

    /// Finish the timer with a specific status.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.elapsed_ms();

        if success {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
