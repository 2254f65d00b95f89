//! In-memory page.

use std::collections::{BTreeSet, HashMap};

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{FormData, Fragment, Page};
use crate::shared::error::PageError;

#[derive(Debug, Default)]
struct Region {
    fragments: Vec<Fragment>,
    classes: BTreeSet<String>,
}

impl Region {
    fn html(&self) -> String {
        self.fragments.iter().map(|f| f.html.as_str()).collect()
    }
}

#[derive(Debug, Default)]
struct Form {
    /// Fields in document order
    fields: Vec<(String, String)>,
    invalid: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct PageState {
    regions: HashMap<String, Region>,
    root_classes: BTreeSet<String>,
    forms: HashMap<String, Form>,
    /// `set_html` calls per region
    write_counts: HashMap<String, usize>,
}

/// A document held entirely in memory.
///
/// Regions are flat lists of fragments; there is no markup parsing. Used by
/// the headless driver and as the page in tests, where per-region write
/// counters make render counts observable.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    state: Mutex<PageState>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the given (empty) regions.
    pub fn with_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let page = Self::new();
        {
            let mut state = page.state.lock();
            for region in regions {
                state.regions.entry(region.into()).or_default();
            }
        }
        page
    }

    /// Add a form with the given named fields, all empty.
    pub fn add_form(&self, form: &str, fields: &[&str]) {
        let mut state = self.state.lock();
        state.forms.insert(
            form.to_string(),
            Form {
                fields: fields.iter().map(|f| (f.to_string(), String::new())).collect(),
                invalid: BTreeSet::new(),
            },
        );
    }

    /// Flag a field as invalid, as server-rendered markup would.
    pub fn mark_invalid(&self, form: &str, field: &str) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let form_state = state
            .forms
            .get_mut(form)
            .ok_or_else(|| PageError::MissingForm(form.to_string()))?;
        form_state.invalid.insert(field.to_string());
        Ok(())
    }

    pub fn invalid_fields(&self, form: &str) -> Vec<String> {
        self.state
            .lock()
            .forms
            .get(form)
            .map(|f| f.invalid.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of `set_html` writes a region received.
    pub fn write_count(&self, region: &str) -> usize {
        self.state
            .lock()
            .write_counts
            .get(region)
            .copied()
            .unwrap_or(0)
    }

    /// Ids of the fragments currently in a region.
    pub fn fragment_ids(&self, region: &str) -> Vec<String> {
        self.state
            .lock()
            .regions
            .get(region)
            .map(|r| r.fragments.iter().filter_map(|f| f.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether any fragment with this id exists anywhere.
    pub fn contains_fragment(&self, id: &str) -> bool {
        self.state
            .lock()
            .regions
            .values()
            .any(|r| r.fragments.iter().any(|f| f.id.as_deref() == Some(id)))
    }
}

impl Page for HeadlessPage {
    fn has_region(&self, region: &str) -> bool {
        self.state.lock().regions.contains_key(region)
    }

    fn ensure_region(&self, region: &str) {
        self.state.lock().regions.entry(region.to_string()).or_default();
    }

    fn html(&self, region: &str) -> Option<String> {
        self.state.lock().regions.get(region).map(Region::html)
    }

    fn set_html(&self, region: &str, html: &str) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let target = state
            .regions
            .get_mut(region)
            .ok_or_else(|| PageError::MissingRegion(region.to_string()))?;
        target.fragments.clear();
        if !html.is_empty() {
            target.fragments.push(Fragment::new(html));
        }
        *state.write_counts.entry(region.to_string()).or_insert(0) += 1;
        debug!(region = %region, bytes = html.len(), "Region replaced");
        Ok(())
    }

    fn append(&self, region: &str, fragment: Fragment) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let target = state
            .regions
            .get_mut(region)
            .ok_or_else(|| PageError::MissingRegion(region.to_string()))?;
        target.fragments.push(fragment);
        Ok(())
    }

    fn remove_fragment(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        for region in state.regions.values_mut() {
            let before = region.fragments.len();
            region.fragments.retain(|f| f.id.as_deref() != Some(id));
            if region.fragments.len() != before {
                return true;
            }
        }
        false
    }

    fn set_class(&self, region: &str, class: &str, enabled: bool) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let target = state
            .regions
            .get_mut(region)
            .ok_or_else(|| PageError::MissingRegion(region.to_string()))?;
        if enabled {
            target.classes.insert(class.to_string());
        } else {
            target.classes.remove(class);
        }
        Ok(())
    }

    fn has_class(&self, region: &str, class: &str) -> bool {
        self.state
            .lock()
            .regions
            .get(region)
            .is_some_and(|r| r.classes.contains(class))
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut state = self.state.lock();
        if enabled {
            state.root_classes.insert(class.to_string());
        } else {
            state.root_classes.remove(class);
        }
    }

    fn has_root_class(&self, class: &str) -> bool {
        self.state.lock().root_classes.contains(class)
    }

    fn form_fields(&self, form: &str) -> Result<FormData, PageError> {
        let state = self.state.lock();
        let form_state = state
            .forms
            .get(form)
            .ok_or_else(|| PageError::MissingForm(form.to_string()))?;
        Ok(form_state.fields.iter().cloned().collect())
    }

    fn set_field(&self, form: &str, name: &str, value: &str) -> Result<bool, PageError> {
        let mut state = self.state.lock();
        let form_state = state
            .forms
            .get_mut(form)
            .ok_or_else(|| PageError::MissingForm(form.to_string()))?;
        match form_state.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) => {
                *current = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn reset_form(&self, form: &str) -> Result<(), PageError> {
        let mut state = self.state.lock();
        let form_state = state
            .forms
            .get_mut(form)
            .ok_or_else(|| PageError::MissingForm(form.to_string()))?;
        for (_, value) in form_state.fields.iter_mut() {
            value.clear();
        }
        Ok(())
    }

    fn clear_field_errors(&self, form: &str) -> Result<usize, PageError> {
        let mut state = self.state.lock();
        let form_state = state
            .forms
            .get_mut(form)
            .ok_or_else(|| PageError::MissingForm(form.to_string()))?;
        let cleared = form_state.invalid.len();
        form_state.invalid.clear();
        Ok(cleared)
    }
}
