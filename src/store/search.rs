//! Search slice.

use tracing::debug;

use super::{failure_text, Reducer};
use crate::models::{total_pages, LoadingStatus, SearchResponse, SearchResult};

/// Page size shown before the first search completes.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug)]
pub enum SearchEvent {
    /// A search for `query` at `page` was issued.
    Start { query: String, page: u32 },
    Succeed(SearchResponse),
    Fail(String),
    SetQuery(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    query: String,
    results: Vec<SearchResult>,
    current_page: u32,
    page_size: u32,
    total_results: u64,
    total_pages: u32,
    loading: LoadingStatus,
    error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_results: 0,
            total_pages: 0,
            loading: LoadingStatus::Idle,
            error: None,
        }
    }
}

/// Paging position of the current results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Reducer for SearchState {
    type Event = SearchEvent;
    const NAME: &'static str = "search";

    fn reduce(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Start { query, page: _ } => {
                // Previous results stay visible until the new ones arrive.
                self.query = query;
                self.loading = LoadingStatus::Pending;
                self.error = None;
            }
            SearchEvent::Succeed(response) => {
                if !self.loading.is_pending() {
                    debug!("search: ignoring success while {}", self.loading);
                    return;
                }
                if response.page_size > 0 {
                    self.page_size = response.page_size;
                }
                self.results = response.results;
                self.results.truncate(self.page_size as usize);
                self.total_results = response.total;
                self.current_page = response.page.max(1);
                self.total_pages = total_pages(self.total_results, self.page_size);
                self.loading = LoadingStatus::Succeeded;
                self.error = None;
            }
            SearchEvent::Fail(message) => {
                if !self.loading.is_pending() {
                    debug!("search: ignoring failure while {}", self.loading);
                    return;
                }
                self.loading = LoadingStatus::Failed;
                self.error = Some(failure_text(message));
            }
            SearchEvent::SetQuery(query) => self.query = query,
            SearchEvent::Clear => {
                *self = Self {
                    page_size: self.page_size,
                    ..Self::default()
                };
            }
        }
    }

    fn supersedes_in_flight(event: &SearchEvent) -> bool {
        matches!(event, SearchEvent::Clear)
    }
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn loading(&self) -> LoadingStatus {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }

    /// The page to request for "next", if there is one.
    pub fn next_page(&self) -> Option<u32> {
        self.pagination()
            .has_next()
            .then(|| self.current_page + 1)
    }

    /// The page to request for "previous", if there is one.
    pub fn previous_page(&self) -> Option<u32> {
        self.pagination()
            .has_previous()
            .then(|| (self.current_page - 1).min(self.total_pages.max(1)))
    }
}
