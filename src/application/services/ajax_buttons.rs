//! Simulated AJAX buttons.

use tracing::debug;

use super::notifications::NotificationSurface;
use crate::presentation::templates::NoticeKind;
use crate::shared::error::PageError;

pub const SIMULATED_MESSAGE: &str = "Button clicked (simulated)";

/// Buttons that name a target region and answer with a canned notice.
pub struct AjaxButtons {
    notifications: NotificationSurface,
}

impl AjaxButtons {
    pub fn new(notifications: NotificationSurface) -> Self {
        Self { notifications }
    }

    pub fn activate(&self, target: &str) -> Result<(), PageError> {
        self.notifications
            .show_alert(target, SIMULATED_MESSAGE, NoticeKind::Info)?;
        debug!(target = %target, "Ajax button handled");
        Ok(())
    }
}
