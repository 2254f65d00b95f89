//! Theme preference.

use std::fmt;

/// Visual theme of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Root class applied while the dark theme is active.
    pub const DARK_CLASS: &'static str = "dark";

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse the stored boolean string. Anything but `"true"` is light.
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "true" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Stored representation (`"true"` / `"false"`).
    pub fn as_stored(self) -> &'static str {
        if self.is_dark() {
            "true"
        } else {
            "false"
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
