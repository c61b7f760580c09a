//! Live address search
//!
//! Issues a geocode request for every change of the search term and keeps
//! only the answer to the most recent term. Every term bumps a generation
//! counter; a completion is applied only if its generation is still the
//! current one, so a slow reply to an old term can never overwrite the
//! results of a newer one. Aborting the previous task in [`LiveSearch::submit`]
//! is advisory on top of that check.

use std::fmt;
use std::sync::Arc;

use domain::GeocodedLocation;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeoServicePort;

/// What happened to a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The term was empty; results were cleared without a request
    Cleared,
    /// The results were replaced
    Applied {
        /// Number of results now shown
        count: usize,
    },
    /// The request failed; results were cleared and the error recorded
    Failed,
    /// A newer term superseded this request; its result was dropped
    Discarded,
}

#[derive(Debug, Default)]
struct SearchState {
    generation: u64,
    term: String,
    results: Vec<GeocodedLocation>,
    last_error: Option<ApplicationError>,
    in_flight: Option<JoinHandle<()>>,
}

/// Coordinates geocode requests for a search field
pub struct LiveSearch {
    geo: Arc<dyn GeoServicePort>,
    max_results: Option<u32>,
    state: Mutex<SearchState>,
}

impl fmt::Debug for LiveSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LiveSearch")
            .field("max_results", &self.max_results)
            .field("generation", &state.generation)
            .field("term", &state.term)
            .field("results", &state.results.len())
            .finish_non_exhaustive()
    }
}

impl LiveSearch {
    /// Create a coordinator using the service's default result limit
    #[must_use]
    pub fn new(geo: Arc<dyn GeoServicePort>) -> Self {
        Self {
            geo,
            max_results: None,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Limit the number of candidates per request
    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Results of the most recent completed search
    pub fn results(&self) -> Vec<GeocodedLocation> {
        self.state.lock().results.clone()
    }

    /// Error of the most recent search, if it failed
    pub fn last_error(&self) -> Option<ApplicationError> {
        self.state.lock().last_error.clone()
    }

    /// The term most recently searched for
    pub fn current_term(&self) -> String {
        self.state.lock().term.clone()
    }

    /// Search for `term` and wait for the answer
    ///
    /// Returns [`SearchOutcome::Discarded`] if another term was searched
    /// for while this request was in flight.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> SearchOutcome {
        let Some((generation, term)) = self.begin(term) else {
            return SearchOutcome::Cleared;
        };
        let result = self.geo.geocode(&term, self.max_results).await;
        self.complete(generation, result)
    }

    /// Search for `term` in the background
    ///
    /// The previous background request, if any, is aborted. Use
    /// [`LiveSearch::settle`] to wait for the latest one.
    pub fn submit(self: &Arc<Self>, term: &str) {
        let Some((generation, term)) = self.begin(term) else {
            return;
        };

        let search = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = search.geo.geocode(&term, search.max_results).await;
            search.complete(generation, result);
        });

        let mut state = self.state.lock();
        if state.generation == generation {
            state.in_flight = Some(handle);
        }
    }

    /// Wait for the latest background request to finish
    pub async fn settle(&self) {
        let handle = self.state.lock().in_flight.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Search task failed");
                }
            }
        }
    }

    /// Record a new term, returning its generation if a request is needed
    fn begin(&self, term: &str) -> Option<(u64, String)> {
        let term = term.trim();
        let mut state = self.state.lock();
        state.generation += 1;
        state.term = term.to_string();
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
        }

        if term.is_empty() {
            state.results.clear();
            state.last_error = None;
            debug!("Search term cleared");
            return None;
        }
        Some((state.generation, term.to_string()))
    }

    fn complete(
        &self,
        generation: u64,
        result: Result<Vec<GeocodedLocation>, ApplicationError>,
    ) -> SearchOutcome {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                "Discarding stale search result"
            );
            return SearchOutcome::Discarded;
        }

        match result {
            Ok(results) => {
                let count = results.len();
                debug!(count, term = %state.term, "Search results updated");
                state.results = results;
                state.last_error = None;
                SearchOutcome::Applied { count }
            },
            Err(e) => {
                warn!(error = %e, term = %state.term, "Search failed");
                state.results.clear();
                state.last_error = Some(e);
                SearchOutcome::Failed
            },
        }
    }
}
