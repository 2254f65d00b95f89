//! Notification Surface
//!
//! Spinners, alerts and toasts rendered into named regions.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::{Fragment, Page};
use crate::presentation::templates::{self, NoticeKind};
use crate::shared::error::PageError;

/// Renders transient UI affordances. Holds no state beyond the page.
#[derive(Clone)]
pub struct NotificationSurface {
    page: Arc<dyn Page>,
    toast_container: String,
    toast_delay: Duration,
}

impl NotificationSurface {
    pub fn new(page: Arc<dyn Page>, settings: &Settings) -> Self {
        Self {
            page,
            toast_container: settings.regions.toast_container.clone(),
            toast_delay: settings.notifications.toast_delay(),
        }
    }

    /// Make sure the toast container exists.
    pub fn ensure_toast_container(&self) {
        self.page.ensure_region(&self.toast_container);
    }

    /// Append a spinner to `region`. The spinner is removed when the
    /// returned guard is dropped, on every exit path.
    pub fn show_spinner(&self, region: &str, id: impl Into<String>) -> Result<SpinnerGuard, PageError> {
        let id = id.into();
        self.page
            .append(region, Fragment::with_id(id.clone(), templates::spinner()))?;
        debug!(region = %region, id = %id, "Spinner shown");
        Ok(SpinnerGuard {
            page: Arc::clone(&self.page),
            id,
        })
    }

    /// Replace `region` with a dismissible alert.
    pub fn show_alert(&self, region: &str, message: &str, kind: NoticeKind) -> Result<(), PageError> {
        self.page.set_html(region, &templates::alert(message, kind))
    }

    /// Append a toast and schedule its dismissal. Returns the toast id.
    ///
    /// Outside a Tokio runtime the toast stays until dismissed explicitly.
    pub fn show_toast(&self, message: &str, kind: NoticeKind) -> Result<String, PageError> {
        self.ensure_toast_container();
        let id = format!("toast-{}", Uuid::new_v4());
        self.page.append(
            &self.toast_container,
            Fragment::with_id(id.clone(), templates::toast(&id, message, kind)),
        )?;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let page = Arc::clone(&self.page);
                let delay = self.toast_delay;
                let toast_id = id.clone();
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    page.remove_fragment(&toast_id);
                });
            }
            Err(_) => warn!(id = %id, "No runtime, toast will not auto-dismiss"),
        }

        debug!(id = %id, kind = kind.as_str(), "Toast shown");
        Ok(id)
    }

    /// Remove a toast before its delay elapses.
    pub fn dismiss_toast(&self, id: &str) -> bool {
        self.page.remove_fragment(id)
    }
}

/// Removes its spinner when dropped.
pub struct SpinnerGuard {
    page: Arc<dyn Page>,
    id: String,
}

impl SpinnerGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.page.remove_fragment(&self.id);
        debug!(id = %self.id, "Spinner removed");
    }
}
