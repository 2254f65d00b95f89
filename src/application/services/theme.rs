//! Theme Toggle
//!
//! Dark mode preference, applied as a class on the root element.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::notifications::NotificationSurface;
use crate::config::Settings;
use crate::domain::{Page, Theme};
use crate::infrastructure::storage::{keys, Persistence, ReadPrecedence, StateStore};
use crate::presentation::templates::NoticeKind;
use crate::shared::error::StorageError;

/// Owns the `darkMode` preference.
///
/// Reads consult the short-lived tier first, then the durable one; a
/// `"true"` in either turns dark mode on. Writes go to both tiers.
pub struct ThemeToggle {
    page: Arc<dyn Page>,
    store: Arc<StateStore>,
    notifications: NotificationSurface,
    ttl: chrono::Duration,
    current: Mutex<Theme>,
}

impl ThemeToggle {
    pub fn new(
        page: Arc<dyn Page>,
        store: Arc<StateStore>,
        notifications: NotificationSurface,
        settings: &Settings,
    ) -> Self {
        Self {
            page,
            store,
            notifications,
            ttl: settings.storage.preference_ttl(),
            current: Mutex::new(Theme::default()),
        }
    }

    /// Apply the stored preference. Dark if either tier says so; absent
    /// means light.
    pub fn init(&self) -> Theme {
        let stored_dark = |precedence| {
            self.store
                .read(keys::DARK_MODE, precedence)
                .map(|v| Theme::from_stored(&v).is_dark())
                .unwrap_or(false)
        };
        let theme = if stored_dark(ReadPrecedence::ShortLivedFirst)
            || stored_dark(ReadPrecedence::DurableOnly)
        {
            Theme::Dark
        } else {
            Theme::Light
        };
        self.apply(theme);
        debug!(theme = %theme, "Theme restored");
        theme
    }

    /// Flip the theme, persist it and confirm with a toast.
    pub fn toggle(&self) -> Theme {
        let theme = {
            let mut current = self.current.lock();
            *current = current.toggled();
            *current
        };
        self.page.set_root_class(Theme::DARK_CLASS, theme.is_dark());

        if let Err(e) = self.persist(theme) {
            warn!(error = %e, "Theme preference not saved");
        }
        if let Err(e) = self
            .notifications
            .show_toast(&format!("Switched to {} Mode", theme.label()), NoticeKind::Info)
        {
            warn!(error = %e, "Could not show theme toast");
        }

        info!(theme = %theme, "Theme toggled");
        theme
    }

    pub fn current(&self) -> Theme {
        *self.current.lock()
    }

    fn apply(&self, theme: Theme) {
        *self.current.lock() = theme;
        self.page.set_root_class(Theme::DARK_CLASS, theme.is_dark());
    }

    fn persist(&self, theme: Theme) -> Result<(), StorageError> {
        self.store
            .write(
                keys::DARK_MODE,
                theme.as_stored(),
                Persistence::Mirrored { ttl: self.ttl },
            )
            .map(|_| ())
    }
}
