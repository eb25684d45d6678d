//! Fuzzy narrowing of suggestion lists.
//!
//! A suggestion matches when every character of the fragment appears in its
//! value in order, ignoring case. Matches keep their original order; there is
//! no scoring.

use crate::suggestion::Suggestion;

/// Whether `needle` is an ordered, case-insensitive subsequence of `haystack`.
pub fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut remaining = haystack.chars().flat_map(char::to_lowercase);
    needle
        .chars()
        .flat_map(char::to_lowercase)
        .all(|wanted| remaining.any(|c| c == wanted))
}

/// Suggestions whose value fuzzy-matches `fragment`. An empty fragment keeps
/// everything.
pub fn filter_fuzzy(suggestions: &[Suggestion], fragment: &str) -> Vec<Suggestion> {
    if fragment.is_empty() {
        return suggestions.to_vec();
    }

    suggestions
        .iter()
        .filter(|s| is_subsequence(&s.value, fragment))
        .cloned()
        .collect()
}
