//! Canonical search result shapes.

use serde::{Deserialize, Serialize};

/// A single keyword search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matching excerpt.
    pub text: String,
    /// Name of the document the excerpt comes from.
    pub document_name: String,
    /// Relevance in [0, 1].
    pub relevance_score: f64,
    /// 1-based page, when the backend knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// One page of normalized search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl SearchResponse {
    /// The all-zero response used when a search could not be performed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Number of pages needed to show `total` results, `page_size` at a time.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(101, 10), 11);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_empty_response_has_zero_counts() {
        let empty = SearchResponse::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.total, 0);
        assert_eq!(empty.page, 0);
        assert_eq!(empty.page_size, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
