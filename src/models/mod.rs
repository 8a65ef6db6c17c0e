//! Data models for docsearch.

mod loading;
mod qa;
mod search;
mod uploader;

pub use loading::LoadingStatus;
pub use qa::{Answer, AnswerCitation, CitationMetadata, INSUFFICIENT_CONTEXT_ANSWER};
pub use search::{total_pages, SearchResponse, SearchResult};
pub use uploader::{
    DeleteAllReport, FileError, ProcessedDocument, RejectedBy, StoredDocument, UploadReport,
    UploadedFileSummary,
};
