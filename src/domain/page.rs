//! Page contract.
//!
//! The document markup is an external collaborator. Components address it
//! only through named regions and forms, and never read back their own
//! output except to clear it.

use crate::domain::FormData;
use crate::shared::error::PageError;

/// A piece of markup appended to a region. Fragments with an id can be
/// removed individually later (spinners, toasts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: Option<String>,
    pub html: String,
}

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            id: None,
            html: html.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            html: html.into(),
        }
    }
}

/// Operations the client needs from the document.
///
/// Implementations must be cheap to call from any task; all methods are
/// synchronous because DOM mutation never suspends.
pub trait Page: Send + Sync {
    /// Whether a region with this identifier exists.
    fn has_region(&self, region: &str) -> bool;

    /// Create an empty region if it does not exist yet.
    fn ensure_region(&self, region: &str);

    /// Current markup of a region, `None` if the region is missing.
    fn html(&self, region: &str) -> Option<String>;

    /// Replace the region's markup wholesale.
    fn set_html(&self, region: &str, html: &str) -> Result<(), PageError>;

    /// Append a fragment to the end of a region.
    fn append(&self, region: &str, fragment: Fragment) -> Result<(), PageError>;

    /// Remove a fragment by id from whichever region holds it.
    /// Returns `false` if no such fragment exists.
    fn remove_fragment(&self, id: &str) -> bool;

    /// Add or remove a class on a region.
    fn set_class(&self, region: &str, class: &str, enabled: bool) -> Result<(), PageError>;

    fn has_class(&self, region: &str, class: &str) -> bool;

    /// Add or remove a class on the root document element.
    fn set_root_class(&self, class: &str, enabled: bool);

    fn has_root_class(&self, class: &str) -> bool;

    /// Serialize all named fields of a form.
    fn form_fields(&self, form: &str) -> Result<FormData, PageError>;

    /// Set one field's value. Returns `false` if the form has no such field.
    fn set_field(&self, form: &str, name: &str, value: &str) -> Result<bool, PageError>;

    /// Reset every field of a form to empty.
    fn reset_form(&self, form: &str) -> Result<(), PageError>;

    /// Remove every field-level error marker. Returns how many were cleared.
    fn clear_field_errors(&self, form: &str) -> Result<usize, PageError>;
}
