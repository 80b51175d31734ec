//! Suggestion filters.
//!
//! Both filters are stable: matches keep the order of the source list, so a
//! deterministic source produces deterministic output.

use kubeline_types::Suggestion;

/// Keeps the suggestions whose text starts with `prefix`.
///
/// An empty prefix keeps everything.
pub fn filter_has_prefix(suggestions: &[Suggestion], prefix: &str, ignore_case: bool) -> Vec<Suggestion> {
    filter_by(suggestions, prefix, ignore_case, |text, needle| text.starts_with(needle))
}

/// Keeps the suggestions whose text contains `fragment`.
///
/// An empty fragment keeps everything.
pub fn filter_contains(suggestions: &[Suggestion], fragment: &str, ignore_case: bool) -> Vec<Suggestion> {
    filter_by(suggestions, fragment, ignore_case, |text, needle| text.contains(needle))
}

/// Case-aware prefix test used where callers match raw strings.
pub fn has_prefix(text: &str, prefix: &str, ignore_case: bool) -> bool {
    if ignore_case {
        text.to_lowercase().starts_with(&prefix.to_lowercase())
    } else {
        text.starts_with(prefix)
    }
}

/// Case-aware substring test used where callers match raw strings.
pub fn contains(text: &str, fragment: &str, ignore_case: bool) -> bool {
    if ignore_case {
        text.to_lowercase().contains(&fragment.to_lowercase())
    } else {
        text.contains(fragment)
    }
}

fn filter_by(suggestions: &[Suggestion], needle: &str, ignore_case: bool, matches: impl Fn(&str, &str) -> bool) -> Vec<Suggestion> {
    if needle.is_empty() {
        return suggestions.to_vec();
    }
    if ignore_case {
        let needle = needle.to_lowercase();
        suggestions
            .iter()
            .filter(|suggestion| matches(&suggestion.text().to_lowercase(), &needle))
            .cloned()
            .collect()
    } else {
        suggestions
            .iter()
            .filter(|suggestion| matches(suggestion.text(), needle))
            .cloned()
            .collect()
    }
}
