//! # Sortable Selection
//!
//! Ordered multi-select over a fixed option list. Order is user-defined
//! (drag to reorder) and every value appears at most once.

use crate::suggestions::label_matches;
use polaris_parser::SuggestionCandidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableSelection {
    options: Vec<SuggestionCandidate>,
    selected: Vec<String>,
}

impl SortableSelection {
    /// Unknown initial values are dropped and duplicates collapse
    pub fn new<I, S>(options: Vec<SuggestionCandidate>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self {
            options,
            selected: Vec::new(),
        };
        for value in values {
            selection.select(value.as_ref());
        }
        selection
    }

    /// Build from a delimited string such as `"a,b,c"`
    pub fn from_flat(options: Vec<SuggestionCandidate>, flat: &str, separator: &str) -> Self {
        let values = flat
            .split(separator)
            .map(str::trim)
            .filter(|v| !v.is_empty());
        Self::new(options, values)
    }

    pub fn to_flat(&self, separator: &str) -> String {
        self.selected.join(separator)
    }

    /// Append `value`; false when unknown or already selected
    pub fn select(&mut self, value: &str) -> bool {
        if self.is_selected(value) || self.option(value).is_none() {
            return false;
        }
        self.selected.push(value.to_string());
        true
    }

    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|v| v != value);
        self.selected.len() != before
    }

    /// Drag `from` to position `to`; out-of-range indices do nothing
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.selected.len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let value = self.selected.remove(from);
        self.selected.insert(to, value);
        tracing::trace!(from, to, "reordered selection");
        true
    }

    /// Unselected options whose label contains `query`
    pub fn available(&self, query: &str) -> Vec<&SuggestionCandidate> {
        let needle = query.to_lowercase();
        self.options
            .iter()
            .filter(|o| !self.is_selected(&o.value))
            .filter(|o| label_matches(&o.label, &needle))
            .collect()
    }

    pub fn values(&self) -> &[String] {
        &self.selected
    }

    /// Selected options in order, for rendering labels
    pub fn selected_options(&self) -> Vec<&SuggestionCandidate> {
        self.selected
            .iter()
            .filter_map(|value| self.option(value))
            .collect()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    fn option(&self, value: &str) -> Option<&SuggestionCandidate> {
        self.options.iter().find(|o| o.value == value)
    }
}
