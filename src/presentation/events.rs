//! Client Events
//!
//! User interactions the client reacts to. Each variant maps onto exactly
//! one component; routing happens in [`VetClinic::handle`](crate::startup::VetClinic::handle).

use serde::{Deserialize, Serialize};

/// An interaction coming from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "d")]
pub enum ClientEvent {
    /// Page finished loading
    #[serde(rename = "READY")]
    Ready,

    #[serde(rename = "THEME_TOGGLE")]
    ThemeToggled,

    /// Keystroke in the search input; carries the full current value
    #[serde(rename = "SEARCH_INPUT")]
    SearchInput { query: String },

    /// Activation of an intercepted navigation link
    #[serde(rename = "LINK_ACTIVATE")]
    LinkActivated { href: String },

    #[serde(rename = "FIELD_CHANGE")]
    FieldChanged { name: String, value: String },

    #[serde(rename = "FORM_SUBMIT")]
    FormSubmitted,

    #[serde(rename = "AJAX_BUTTON_CLICK")]
    AjaxButtonClicked { target: String },

    #[serde(rename = "MOBILE_MENU_OPEN")]
    MobileMenuOpened,

    #[serde(rename = "MOBILE_MENU_CLOSE")]
    MobileMenuClosed,

    #[serde(rename = "DOCUMENT_CLICK")]
    DocumentClicked {
        #[serde(default)]
        inside_menu: bool,
        #[serde(default)]
        on_opener: bool,
    },

    #[serde(rename = "NAVBAR_TOGGLE")]
    NavbarToggled,

    #[serde(rename = "SCROLL")]
    Scrolled { offset: f64 },
}

impl ClientEvent {
    /// Get the event name for logging
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientEvent::Ready => "READY",
            ClientEvent::ThemeToggled => "THEME_TOGGLE",
            ClientEvent::SearchInput { .. } => "SEARCH_INPUT",
            ClientEvent::LinkActivated { .. } => "LINK_ACTIVATE",
            ClientEvent::FieldChanged { .. } => "FIELD_CHANGE",
            ClientEvent::FormSubmitted => "FORM_SUBMIT",
            ClientEvent::AjaxButtonClicked { .. } => "AJAX_BUTTON_CLICK",
            ClientEvent::MobileMenuOpened => "MOBILE_MENU_OPEN",
            ClientEvent::MobileMenuClosed => "MOBILE_MENU_CLOSE",
            ClientEvent::DocumentClicked { .. } => "DOCUMENT_CLICK",
            ClientEvent::NavbarToggled => "NAVBAR_TOGGLE",
            ClientEvent::Scrolled { .. } => "SCROLL",
        }
    }
}
