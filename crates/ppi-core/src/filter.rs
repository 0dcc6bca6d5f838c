#![forbid(unsafe_code)]

//! Filter composition for the search panel.
//!
//! Free-text query edits are debounced (300ms) before dispatch; every
//! other field dispatches immediately on change. Clearing a field stores
//! `None`, never an empty string, so consumers can tell "no constraint"
//! from "empty string constraint".
//!
//! Every dispatch carries a monotonically increasing generation number.
//! Consumers that issue a search per dispatch drop any response whose
//! generation is no longer the latest, the same latest-wins rule the
//! calibration slider applies to inference requests.

use web_time::Instant;

use crate::debounce::DebounceTimer;
use crate::model::SearchFilters;

/// One outbound search dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDispatch {
    pub generation: u64,
    pub filters: SearchFilters,
}

/// State of the search/filter panel.
#[derive(Debug, Default)]
pub struct FilterPanel {
    filters: SearchFilters,
    debounce: DebounceTimer,
    generation: u64,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current criteria (including a query edit still waiting out its
    /// quiet period).
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// The generation of the most recent dispatch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Edit the free-text query. The dispatch is deferred: it is produced
    /// by [`poll`](Self::poll) once 300ms pass with no further edits.
    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.filters.query = normalize(Some(text.to_owned()));
        self.debounce.arm(now);
    }

    /// Produce the pending query dispatch once the quiet period elapses.
    pub fn poll(&mut self, now: Instant) -> Option<FilterDispatch> {
        self.debounce.fire(now).then(|| self.dispatch())
    }

    pub fn set_category(&mut self, category: Option<String>) -> FilterDispatch {
        self.filters.category = normalize(category);
        self.dispatch()
    }

    pub fn set_region(&mut self, region: Option<String>) -> FilterDispatch {
        self.filters.region = normalize(region);
        self.dispatch()
    }

    pub fn set_supplier(&mut self, supplier: Option<String>) -> FilterDispatch {
        self.filters.supplier = normalize(supplier);
        self.dispatch()
    }

    pub fn set_price_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> FilterDispatch {
        self.filters.min_price = min;
        self.filters.max_price = max;
        self.dispatch()
    }

    pub fn set_active_only(&mut self, active_only: Option<bool>) -> FilterDispatch {
        self.filters.active_only = active_only;
        self.dispatch()
    }

    /// Clear every field and dispatch the empty filter set immediately,
    /// discarding any pending query debounce.
    pub fn reset(&mut self) -> FilterDispatch {
        self.filters = SearchFilters::default();
        self.debounce.cancel();
        self.dispatch()
    }

    fn dispatch(&mut self) -> FilterDispatch {
        self.generation += 1;
        tracing::debug!(generation = self.generation, "dispatching search filters");
        FilterDispatch {
            generation: self.generation,
            filters: self.filters.clone(),
        }
    }
}

/// Empty strings collapse to "no constraint".
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
