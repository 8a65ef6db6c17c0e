use tracing::{info, warn};

use super::{failure_message, Completion, SEARCH_ERROR_MESSAGE};
use crate::api::{DocumentApi, SearchQuery};
use crate::local_files::require_text;
use crate::models::SearchResponse;
use crate::normalize::normalize_search;
use crate::store::{SearchEvent, Store};

/// Search the stored documents for `query` and load page `page`.
///
/// A blank query is rejected without touching state. Page and page size are
/// clamped to at least 1.
pub async fn run_search(
    store: &Store,
    api: &dyn DocumentApi,
    query: &str,
    page: u32,
    page_size: u32,
) -> Completion<SearchResponse> {
    let query = match require_text(query) {
        Ok(q) => q.to_string(),
        Err(e) => return Completion::rejected(e),
    };
    let page = page.max(1);
    let page_size = page_size.max(1);

    let ticket = store
        .search
        .begin(SearchEvent::Start {
            query: query.clone(),
            page,
        })
        .await;

    let request = SearchQuery {
        query: query.clone(),
        page,
        limit: page_size,
    };
    match api.search(&request).await {
        Ok(raw) => {
            let response = normalize_search(&raw, page, page_size);
            let total = response.total;
            if !store
                .search
                .settle(ticket, SearchEvent::Succeed(response.clone()))
                .await
            {
                return Completion::Superseded;
            }
            info!("search '{}' page {}: {} result(s)", query, page, total);
            Completion::Succeeded(response)
        }
        Err(e) => {
            warn!("search '{}' failed: {}", query, e);
            let message = failure_message(&e, SEARCH_ERROR_MESSAGE);
            if !store
                .search
                .settle(ticket, SearchEvent::Fail(message.clone()))
                .await
            {
                return Completion::Superseded;
            }
            Completion::Failed(message)
        }
    }
}
