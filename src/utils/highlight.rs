//! Search term highlighting.

use regex::{Captures, Regex, RegexBuilder};

/// Build a case-insensitive pattern matching any whitespace-separated term
/// of `query`. Returns `None` for a blank query.
pub fn term_pattern(query: &str) -> Option<Regex> {
    let mut terms: Vec<String> = query.split_whitespace().map(regex::escape).collect();
    if terms.is_empty() {
        return None;
    }
    // Longest first so "invoice" wins over "in" at the same position.
    terms.sort_by(|a, b| b.len().cmp(&a.len()));
    terms.dedup();
    RegexBuilder::new(&format!("({})", terms.join("|")))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Wrap every occurrence of a query term with `open`/`close`.
pub fn highlight_terms(text: &str, query: &str, open: &str, close: &str) -> String {
    highlight_with(text, query, |m| format!("{}{}{}", open, m, close))
}

/// Replace every occurrence of a query term with `mark(term)`.
pub fn highlight_with<F>(text: &str, query: &str, mark: F) -> String
where
    F: Fn(&str) -> String,
{
    match term_pattern(query) {
        Some(re) => re
            .replace_all(text, |caps: &Captures| mark(&caps[0]))
            .into_owned(),
        None => text.to_string(),
    }
}
