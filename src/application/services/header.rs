//! Header Controller
//!
//! Sticky header shading and the mobile/collapsed menus.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::domain::Page;
use crate::shared::error::PageError;

/// Scroll offset past which the header is shaded.
pub const SCROLL_THRESHOLD: f64 = 50.0;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const OPEN_CLASS: &str = "show";

pub struct HeaderController {
    page: Arc<dyn Page>,
    header: String,
    mobile_menu: String,
    navbar_collapse: String,
}

impl HeaderController {
    pub fn new(page: Arc<dyn Page>, settings: &Settings) -> Self {
        Self {
            page,
            header: settings.regions.header.clone(),
            mobile_menu: settings.regions.mobile_menu.clone(),
            navbar_collapse: settings.regions.navbar_collapse.clone(),
        }
    }

    /// Shade the header once the page is scrolled past the threshold.
    pub fn on_scroll(&self, offset: f64) -> Result<bool, PageError> {
        let scrolled = offset > SCROLL_THRESHOLD;
        self.page.set_class(&self.header, SCROLLED_CLASS, scrolled)?;
        Ok(scrolled)
    }

    pub fn open_mobile_menu(&self) -> Result<(), PageError> {
        self.page.set_class(&self.mobile_menu, OPEN_CLASS, true)
    }

    pub fn close_mobile_menu(&self) -> Result<(), PageError> {
        self.page.set_class(&self.mobile_menu, OPEN_CLASS, false)
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.page.has_class(&self.mobile_menu, OPEN_CLASS)
    }

    /// A click anywhere outside the open menu (and not on its opener)
    /// closes it. Returns whether the menu was closed.
    pub fn on_document_click(&self, inside_menu: bool, on_opener: bool) -> bool {
        if inside_menu || on_opener || !self.is_mobile_menu_open() {
            return false;
        }
        match self.close_mobile_menu() {
            Ok(()) => {
                debug!("Mobile menu closed by outside click");
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not close mobile menu");
                false
            }
        }
    }

    /// Flip the collapsed navbar. Returns whether it is now open.
    pub fn toggle_navbar(&self) -> Result<bool, PageError> {
        let open = !self.page.has_class(&self.navbar_collapse, OPEN_CLASS);
        self.page.set_class(&self.navbar_collapse, OPEN_CLASS, open)?;
        Ok(open)
    }
}
