//! # Suggestion Matching
//!
//! Decides whether the caret sits in an active `@query` and filters the
//! candidate list for it. Matching is a case-insensitive containment test on
//! labels; candidate order is preserved and already-inserted variables are
//! left out.

use crate::EditorConfig;
use polaris_parser::{split_chars, CursorAnchor, Segment, SuggestionCandidate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Suggestion state at the caret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionMatch {
    pub active: bool,
    pub query: String,
    pub results: Vec<SuggestionCandidate>,

    /// Character offset of the trigger within the anchored text segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_offset: Option<usize>,
}

impl SuggestionMatch {
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Trigger-based candidate matcher
#[derive(Debug, Clone)]
pub struct SuggestionMatcher {
    trigger: char,
    limit: Option<usize>,
}

impl SuggestionMatcher {
    pub fn new(trigger: char) -> Self {
        Self {
            trigger,
            limit: None,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.trigger).with_limit(config.max_suggestions)
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Evaluate the partial token before the caret
    ///
    /// Inactive unless the anchor names a text segment and a trigger precedes
    /// the caret in it with no whitespace in between.
    pub fn find(
        &self,
        segments: &[Segment],
        anchor: &CursorAnchor,
        candidates: &[SuggestionCandidate],
    ) -> SuggestionMatch {
        let Some(segment) = segments
            .iter()
            .find(|s| s.id == anchor.segment_id && s.is_text())
        else {
            return SuggestionMatch::inactive();
        };

        let Some((trigger_offset, query)) =
            find_trigger(&segment.raw_value, anchor.offset, self.trigger)
        else {
            return SuggestionMatch::inactive();
        };

        let selected = selected_values(segments);
        let results = self.filter(&query, candidates, &selected);

        tracing::trace!(query = %query, results = results.len(), "suggestion match");

        SuggestionMatch {
            active: true,
            query,
            results,
            trigger_offset: Some(trigger_offset),
        }
    }

    /// Candidates whose label contains `query`, minus excluded values
    pub fn filter(
        &self,
        query: &str,
        candidates: &[SuggestionCandidate],
        exclude: &HashSet<&str>,
    ) -> Vec<SuggestionCandidate> {
        let needle = query.to_lowercase();

        candidates
            .iter()
            .filter(|c| !exclude.contains(c.value.as_str()))
            .filter(|c| label_matches(&c.label, &needle))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

impl Default for SuggestionMatcher {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Locate the nearest trigger before `caret` (a character offset)
///
/// Returns the trigger's character offset and the query between it and the
/// caret, or `None` when whitespace intervenes or no trigger is present.
pub fn find_trigger(text: &str, caret: usize, trigger: char) -> Option<(usize, String)> {
    let (before, _) = split_chars(text, caret);
    let chars: Vec<char> = before.chars().collect();
    let position = chars.iter().rposition(|c| *c == trigger)?;

    let query: String = chars[position + 1..].iter().collect();
    if query.chars().any(char::is_whitespace) {
        return None;
    }

    Some((position, query))
}

/// Case-insensitive containment; `needle` must already be lowercase
pub fn label_matches(label: &str, needle: &str) -> bool {
    needle.is_empty() || label.to_lowercase().contains(needle)
}

/// Values of variables already present in the segment list
pub fn selected_values(segments: &[Segment]) -> HashSet<&str> {
    segments
        .iter()
        .filter(|s| s.is_variable())
        .map(|s| s.raw_value.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaris_parser::parse;

    fn candidates() -> Vec<SuggestionCandidate> {
        vec![
            SuggestionCandidate::new("Post Title", "post_title"),
            SuggestionCandidate::new("Post Date", "post_date"),
        ]
    }

    fn at_end(segments: &[Segment]) -> CursorAnchor {
        let last = segments.last().unwrap();
        CursorAnchor::new(last.id.clone(), last.char_len())
    }

    #[test]
    fn test_query_filters_by_label() {
        let segments = parse("Read @Titl");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());

        assert!(found.active);
        assert_eq!(found.query, "Titl");
        assert_eq!(found.results, vec![SuggestionCandidate::new("Post Title", "post_title")]);
        assert_eq!(found.trigger_offset, Some(5));
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let segments = parse("@");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());

        assert!(found.active);
        assert_eq!(found.query, "");
        assert_eq!(found.results, candidates());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let segments = parse("@post d");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());
        assert!(!found.active);

        let segments = parse("@DATE");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());
        assert_eq!(found.results.len(), 1);
        assert_eq!(found.results[0].value, "post_date");
    }

    #[test]
    fn test_whitespace_deactivates() {
        let segments = parse("@Post Title");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());
        assert_eq!(found, SuggestionMatch::inactive());
    }

    #[test]
    fn test_no_trigger_is_inactive() {
        let segments = parse("Post");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());
        assert!(!found.active);
        assert!(found.results.is_empty());
    }

    #[test]
    fn test_caret_before_trigger_is_inactive() {
        let segments = parse("ab@Post");
        let anchor = CursorAnchor::new(segments[0].id.clone(), 2);
        let found = SuggestionMatcher::new('@').find(&segments, &anchor, &candidates());
        assert!(!found.active);
    }

    #[test]
    fn test_variable_anchor_is_inactive() {
        let segments = parse("@{post_title}");
        let anchor = CursorAnchor::new(segments[1].id.clone(), 0);
        let found = SuggestionMatcher::new('@').find(&segments, &anchor, &candidates());
        assert!(!found.active);
    }

    #[test]
    fn test_selected_candidates_are_excluded() {
        let segments = parse("{post_title} @");
        let found = SuggestionMatcher::new('@').find(&segments, &at_end(&segments), &candidates());
        assert_eq!(found.results, vec![SuggestionCandidate::new("Post Date", "post_date")]);
    }

    #[test]
    fn test_limit_truncates_in_order() {
        let segments = parse("@post");
        let found = SuggestionMatcher::new('@')
            .with_limit(Some(1))
            .find(&segments, &at_end(&segments), &candidates());
        assert_eq!(found.results, vec![SuggestionCandidate::new("Post Title", "post_title")]);
    }

    #[test]
    fn test_nearest_trigger_wins() {
        assert_eq!(find_trigger("a@b@cd", 6, '@'), Some((3, "cd".to_string())));
        assert_eq!(find_trigger("a@b@cd", 3, '@'), Some((1, "b".to_string())));
    }
}
