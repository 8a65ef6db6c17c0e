//! Search payload normalization.

use serde_json::Value;

use super::{
    canonicalize, f64_field, page_field, string_field, u32_field, u64_field, unit_score,
    FieldAlias,
};
use crate::models::{total_pages, SearchResponse, SearchResult};

const ENVELOPE_FIELDS: &[FieldAlias] = &[
    FieldAlias {
        canonical: "results",
        aliases: &["results", "items"],
    },
    FieldAlias {
        canonical: "total",
        aliases: &["total", "totalResults", "total_results"],
    },
    FieldAlias {
        canonical: "page",
        aliases: &["page", "currentPage", "current_page"],
    },
    FieldAlias {
        canonical: "pageSize",
        aliases: &["pageSize", "page_size", "limit"],
    },
    FieldAlias {
        canonical: "totalPages",
        aliases: &["totalPages", "total_pages"],
    },
];

const RESULT_FIELDS: &[FieldAlias] = &[
    FieldAlias {
        canonical: "text",
        aliases: &["text", "content", "snippet"],
    },
    FieldAlias {
        canonical: "documentName",
        aliases: &["documentName", "document_name", "document", "source"],
    },
    FieldAlias {
        canonical: "relevanceScore",
        aliases: &["relevanceScore", "relevance_score", "score"],
    },
    FieldAlias {
        canonical: "page",
        aliases: &["page", "page_number"],
    },
];

/// Normalize one page of backend search results.
///
/// `requested_page` and `requested_limit` fill in paging fields the backend
/// left out. `totalPages` is recomputed from `total` and `pageSize` whenever
/// the page size is known, and results beyond the page size are dropped.
pub fn normalize_search(raw: &Value, requested_page: u32, requested_limit: u32) -> SearchResponse {
    let envelope = canonicalize(raw, ENVELOPE_FIELDS);

    let mut results: Vec<SearchResult> = envelope
        .get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_result).collect())
        .unwrap_or_default();

    let page_size = u32_field(&envelope, "pageSize")
        .filter(|size| *size > 0)
        .unwrap_or(requested_limit);
    let page = page_field(&envelope, "page").unwrap_or(requested_page.max(1));
    let total = u64_field(&envelope, "total").unwrap_or(results.len() as u64);

    if page_size > 0 {
        results.truncate(page_size as usize);
    }

    let total_pages = if page_size > 0 {
        total_pages(total, page_size)
    } else {
        u32_field(&envelope, "totalPages").unwrap_or(0)
    };

    SearchResponse {
        results,
        total,
        page,
        page_size,
        total_pages,
    }
}

fn normalize_result(raw: &Value) -> SearchResult {
    let fields = canonicalize(raw, RESULT_FIELDS);
    SearchResult {
        text: string_field(&fields, "text"),
        document_name: string_field(&fields, "documentName"),
        relevance_score: f64_field(&fields, "relevanceScore")
            .map(unit_score)
            .unwrap_or(0.0),
        page: page_field(&fields, "page"),
    }
}
