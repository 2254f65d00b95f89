//! Search Pipeline
//!
//! Search-as-you-type over the services catalog.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::debouncer::Debouncer;
use super::service_catalog::ServiceCatalog;
use crate::config::Settings;
use crate::domain::{Page, ServiceRecord};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::{Persistence, ReadPrecedence, StateStore};
use crate::presentation::templates;
use crate::shared::error::PageError;

/// Services whose name contains `query`, case-insensitively, in catalog order.
pub fn filter_services(catalog: &[ServiceRecord], query: &str) -> Vec<ServiceRecord> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|s| s.name_matches(&needle))
        .cloned()
        .collect()
}

struct SearchRunner {
    catalog: Arc<ServiceCatalog>,
    store: Arc<StateStore>,
    page: Arc<dyn Page>,
    results_region: String,
    last_search_key: String,
    mirror_ttl: chrono::Duration,
}

impl SearchRunner {
    fn clear(&self) -> Result<(), PageError> {
        self.page.set_html(&self.results_region, "")
    }

    fn run(&self, query: &str) -> Result<Vec<ServiceRecord>, PageError> {
        if query.is_empty() {
            self.clear()?;
            return Ok(Vec::new());
        }

        // Convenience value only; never read back to affect results
        if let Err(e) = self.store.write(
            &self.last_search_key,
            query,
            Persistence::Mirrored {
                ttl: self.mirror_ttl,
            },
        ) {
            warn!(error = %e, "Could not persist last search");
        }

        let results = filter_services(&self.catalog.list(), query);
        self.page
            .set_html(&self.results_region, &templates::search_results(&results))?;
        metrics::record_search_render();
        debug!(query = %query, matches = results.len(), "Search rendered");
        Ok(results)
    }
}

/// Binds one search input to its own debouncer and renders filtered
/// results into the results region.
///
/// Filtering is local. The endpoint only namespaces the persisted
/// last-search value.
pub struct SearchPipeline {
    runner: Arc<SearchRunner>,
    debouncer: Debouncer,
}

impl SearchPipeline {
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        store: Arc<StateStore>,
        page: Arc<dyn Page>,
        settings: &Settings,
    ) -> Self {
        Self {
            runner: Arc::new(SearchRunner {
                catalog,
                store,
                page,
                results_region: settings.regions.search_results.clone(),
                last_search_key: settings.search.last_search_key(),
                mirror_ttl: settings.storage.mirror_ttl(),
            }),
            debouncer: Debouncer::new(settings.search.debounce()),
        }
    }

    /// Handle one input event.
    ///
    /// An empty query cancels any pending search and clears the results
    /// immediately. Anything else is debounced.
    #[instrument(skip(self), level = "debug")]
    pub fn on_input(&self, query: &str) {
        if query.is_empty() {
            self.debouncer.cancel();
            if let Err(e) = self.runner.clear() {
                warn!(error = %e, "Could not clear search results");
            }
            return;
        }

        let runner = Arc::clone(&self.runner);
        let query = query.to_string();
        self.debouncer.schedule(move || {
            if let Err(e) = runner.run(&query) {
                warn!(error = %e, "Search render failed");
            }
        });
    }

    /// Run a search immediately, bypassing the debouncer.
    pub fn run_search(&self, query: &str) -> Result<Vec<ServiceRecord>, PageError> {
        self.runner.run(query)
    }

    /// The last non-empty query persisted for this endpoint.
    pub fn last_search(&self) -> Option<String> {
        self.runner
            .store
            .read(&self.runner.last_search_key, ReadPrecedence::ShortLivedFirst)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
