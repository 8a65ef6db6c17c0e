//! Plain-text rendering of answers with their citations.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::AnswerCitation;

static CITATION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// 1-based citation numbers referenced as `[n]` in `answer`, limited to
/// `count` citations.
pub fn cited_numbers(answer: &str, count: usize) -> BTreeSet<usize> {
    CITATION_MARKER
        .captures_iter(answer)
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .filter(|n| (1..=count).contains(n))
        .collect()
}

/// One reference line: `n. label, p. X`.
pub fn reference_line(number: usize, citation: &AnswerCitation) -> String {
    match citation.page {
        Some(page) => format!("{}. {}, p. {}", number, citation.label(), page),
        None => format!("{}. {}", number, citation.label()),
    }
}

/// Render an answer followed by a numbered reference list.
///
/// Without citations the answer is returned unchanged.
pub fn format_answer(answer: &str, citations: &[AnswerCitation]) -> String {
    if citations.is_empty() {
        return answer.to_string();
    }

    let mut out = String::from(answer);
    out.push_str("\n\nReferences:");
    for (i, citation) in citations.iter().enumerate() {
        out.push('\n');
        out.push_str(&reference_line(i + 1, citation));
        let excerpt = citation.content.trim();
        if !excerpt.is_empty() {
            for line in excerpt.lines() {
                out.push_str("\n   > ");
                out.push_str(line);
            }
        }
    }
    out
}
