//! Navigation Dispatcher
//!
//! Intercepted link activation: fetch a JSON fragment and dispatch it into
//! the content region.
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> Pending (spinner shown) -> Applied | Rejected | Failed -> Idle
//!                                 \-> Superseded | Stale ---------/
//! ```
//!
//! Every dispatch takes a monotonic sequence number and a cancellation
//! token. Starting a new dispatch cancels the one in flight, and a response
//! is applied only while its sequence number is still the newest issued.
//! The spinner is owned by a drop guard, so it is removed on every path,
//! including cancellation and a panicking handler.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::notifications::NotificationSurface;
use crate::config::Settings;
use crate::domain::Page;
use crate::infrastructure::http::{FetchResponse, Fetcher};
use crate::infrastructure::metrics;
use crate::presentation::templates::NoticeKind;
use crate::shared::error::{NavigationError, PageError};
use crate::shared::sequence::DispatchSequence;

/// Shown when the endpoint reports an error without a message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load content";

/// Shown for every transport or protocol failure.
pub const NAVIGATION_FAILED_MESSAGE: &str = "Navigation failed";

/// Class marking the mobile menu as open.
const MENU_OPEN_CLASS: &str = "show";

/// Body contract of the navigation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NavigationResponse {
    Success {
        html: String,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

impl NavigationResponse {
    /// Judge a raw response. Non-2xx, a body of any other shape, and a
    /// success without markup are protocol failures.
    pub fn parse(response: &FetchResponse) -> Result<Self, NavigationError> {
        if !response.is_success() {
            return Err(NavigationError::Status(response.status));
        }
        let parsed: NavigationResponse = serde_json::from_str(&response.body)
            .map_err(|e| NavigationError::Protocol(e.to_string()))?;
        if matches!(&parsed, NavigationResponse::Success { html } if html.is_empty()) {
            return Err(NavigationError::Protocol(
                "success response without html".into(),
            ));
        }
        Ok(parsed)
    }
}

/// Terminal state of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Markup written to the content region.
    Applied { seq: u64 },
    /// Endpoint answered `status: "error"`; message shown to the user.
    Rejected { seq: u64, message: String },
    /// Transport or protocol failure; generic notice shown.
    Failed { seq: u64, error: NavigationError },
    /// Content region missing; nothing rendered.
    Unrendered { seq: u64, error: PageError },
    /// Cancelled by a newer dispatch before the response arrived.
    Superseded { seq: u64 },
    /// Response arrived after a newer dispatch started; discarded.
    Stale { seq: u64 },
}

impl NavigationOutcome {
    pub fn seq(&self) -> u64 {
        match self {
            NavigationOutcome::Applied { seq }
            | NavigationOutcome::Rejected { seq, .. }
            | NavigationOutcome::Failed { seq, .. }
            | NavigationOutcome::Unrendered { seq, .. }
            | NavigationOutcome::Superseded { seq }
            | NavigationOutcome::Stale { seq } => *seq,
        }
    }

    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Applied { .. } => "applied",
            NavigationOutcome::Rejected { .. } => "rejected",
            NavigationOutcome::Failed { .. } => "failed",
            NavigationOutcome::Unrendered { .. } => "unrendered",
            NavigationOutcome::Superseded { .. } => "superseded",
            NavigationOutcome::Stale { .. } => "stale",
        }
    }
}

#[derive(Debug, Clone)]
struct NavigationRegions {
    content: String,
    header: String,
    mobile_menu: String,
    alerts: String,
}

/// Dispatches navigation responses into the page.
pub struct NavigationDispatcher {
    fetcher: Arc<dyn Fetcher>,
    page: Arc<dyn Page>,
    notifications: NotificationSurface,
    regions: NavigationRegions,
    timeout: Duration,
    sequence: DispatchSequence,
    in_flight: Mutex<Option<(u64, CancellationToken)>>,
}

impl NavigationDispatcher {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        page: Arc<dyn Page>,
        notifications: NotificationSurface,
        settings: &Settings,
    ) -> Self {
        Self {
            fetcher,
            page,
            notifications,
            regions: NavigationRegions {
                content: settings.regions.content.clone(),
                header: settings.regions.header.clone(),
                mobile_menu: settings.regions.mobile_menu.clone(),
                alerts: settings.regions.page_alerts.clone(),
            },
            timeout: settings.navigation.timeout(),
            sequence: DispatchSequence::new(),
            in_flight: Mutex::new(None),
        }
    }

    /// Start a dispatch on the current runtime and return its handle.
    /// Outside a runtime nothing is started and `None` is returned.
    pub fn spawn(
        self: &Arc<Self>,
        href: impl Into<String>,
    ) -> Option<tokio::task::JoinHandle<NavigationOutcome>> {
        let href = href.into();
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(href = %href, "No runtime, navigation dropped");
            return None;
        };
        let dispatcher = Arc::clone(self);
        Some(handle.spawn(async move { dispatcher.navigate(&href).await }))
    }

    /// Run one dispatch to completion.
    #[instrument(skip(self), fields(seq = tracing::field::Empty))]
    pub async fn navigate(&self, href: &str) -> NavigationOutcome {
        let seq = self.sequence.next();
        tracing::Span::current().record("seq", seq);
        let token = self.supersede(seq);

        let _spinner = match self
            .notifications
            .show_spinner(&self.regions.header, format!("nav-spinner-{}", seq))
        {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!(error = %e, "No spinner region");
                None
            }
        };

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = tokio::time::timeout(self.timeout, self.fetcher.get(href)) => Some(result),
        };

        let outcome = match fetched {
            None => NavigationOutcome::Superseded { seq },
            Some(result) => {
                let parsed = match result {
                    Err(_) => Err(NavigationError::Timeout(self.timeout)),
                    Ok(response) => response.and_then(|r| NavigationResponse::parse(&r)),
                };
                self.settle(seq, parsed)
            }
        };

        self.release(seq);
        metrics::record_navigation(outcome.label());
        info!(outcome = outcome.label(), "Navigation settled");
        outcome
    }

    /// Sequence number of the newest dispatch issued.
    pub fn latest_seq(&self) -> u64 {
        self.sequence.latest()
    }

    fn settle(
        &self,
        seq: u64,
        parsed: Result<NavigationResponse, NavigationError>,
    ) -> NavigationOutcome {
        if !self.sequence.is_current(seq) {
            debug!(latest = self.sequence.latest(), "Discarding stale response");
            return NavigationOutcome::Stale { seq };
        }

        match parsed {
            Ok(NavigationResponse::Success { html }) => {
                if let Err(e) = self.page.set_html(&self.regions.content, &html) {
                    error!(error = %e, "Content region missing");
                    return NavigationOutcome::Unrendered { seq, error: e };
                }
                if let Err(e) = self.page.set_class(&self.regions.mobile_menu, MENU_OPEN_CLASS, false) {
                    debug!(error = %e, "No mobile menu to close");
                }
                NavigationOutcome::Applied { seq }
            }
            Ok(NavigationResponse::Error { message }) => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
                warn!(message = %message, "Endpoint reported an error");
                self.notify(&message);
                NavigationOutcome::Rejected { seq, message }
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Navigation failed");
                self.notify(NAVIGATION_FAILED_MESSAGE);
                NavigationOutcome::Failed { seq, error: e }
            }
        }
    }

    fn notify(&self, message: &str) {
        if let Err(e) = self
            .notifications
            .show_alert(&self.regions.alerts, message, NoticeKind::Danger)
        {
            warn!(error = %e, message = %message, "Could not show navigation alert");
        }
    }

    /// Install the token for `seq`, cancelling whatever was in flight.
    fn supersede(&self, seq: u64) -> CancellationToken {
        let token = CancellationToken::new();
        let mut in_flight = self.in_flight.lock();
        if let Some((previous, old)) = in_flight.replace((seq, token.clone())) {
            debug!(previous, "Cancelling in-flight navigation");
            old.cancel();
        }
        token
    }

    fn release(&self, seq: u64) {
        let mut in_flight = self.in_flight.lock();
        if matches!(in_flight.as_ref(), Some((current, _)) if *current == seq) {
            *in_flight = None;
        }
    }
}
