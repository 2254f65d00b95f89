//! Service Catalog
//!
//! Read-through cache of the services listing.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Page, ServiceRecord};
use crate::infrastructure::storage::{keys, Persistence, ReadPrecedence, StateStore};
use crate::presentation::templates;
use crate::shared::error::PageError;

/// Services listing, seeded with the built-in defaults on first use.
///
/// The first `list` call reads durable storage; if the value is absent,
/// unparseable or empty the defaults are used and persisted. Later calls
/// return the same sequence for the rest of the session.
pub struct ServiceCatalog {
    store: Arc<StateStore>,
    cache: Mutex<Option<Arc<Vec<ServiceRecord>>>>,
}

impl ServiceCatalog {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            cache: Mutex::new(None),
        }
    }

    /// The catalog, never empty.
    pub fn list(&self) -> Arc<Vec<ServiceRecord>> {
        let mut cache = self.cache.lock();
        if let Some(services) = cache.as_ref() {
            return Arc::clone(services);
        }

        let stored: Option<Vec<ServiceRecord>> = self
            .store
            .read_json(keys::SERVICES, ReadPrecedence::DurableOnly);

        let services = match stored {
            Some(services) if !services.is_empty() => {
                debug!(count = services.len(), "Catalog loaded from storage");
                services
            }
            _ => {
                let defaults = ServiceRecord::defaults();
                match self
                    .store
                    .write_json(keys::SERVICES, &defaults, Persistence::DurableOnly)
                {
                    Ok(_) => info!(count = defaults.len(), "Catalog seeded with defaults"),
                    Err(e) => warn!(error = %e, "Could not persist default catalog"),
                }
                defaults
            }
        };

        let services = Arc::new(services);
        *cache = Some(Arc::clone(&services));
        services
    }

    /// Render the catalog as cards into `region`. Returns the card count.
    pub fn render_grid(&self, page: &dyn Page, region: &str) -> Result<usize, PageError> {
        let services = self.list();
        page.set_html(region, &templates::service_cards(&services))?;
        Ok(services.len())
    }
}
