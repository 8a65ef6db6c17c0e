//! Orchestration actions.
//!
//! Each action drives one request through its feature's lifecycle:
//! validate the input, emit `start`, call the [`DocumentApi`], normalize the
//! payload, and settle the slot with `succeed` or `fail`. Transport errors
//! never escape an action; they end up as the slice's error message.
//!
//! [`DocumentApi`]: crate::api::DocumentApi

mod library;
mod qa;
mod search;
mod upload;

pub use library::{delete_all_documents, delete_document, load_library};
pub use qa::ask_question;
pub use search::run_search;
pub use upload::{run_upload, upload_pending};

use crate::api::TransportError;
use crate::local_files::ValidationError;

pub const SEARCH_ERROR_MESSAGE: &str = "Error searching documents";
pub const QA_ERROR_MESSAGE: &str = "Error processing the question";
pub const UPLOAD_ERROR_MESSAGE: &str = "Error uploading files";
pub const LIBRARY_ERROR_MESSAGE: &str = "Error loading stored files";
pub const DELETE_ERROR_MESSAGE: &str = "Error deleting files";

/// How an action ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// Input was rejected before any request; state was not touched.
    Rejected(Vec<ValidationError>),
    Succeeded(T),
    /// The request failed; the message is also stored in the slice.
    Failed(String),
    /// A newer request or a clear replaced this one before it finished.
    Superseded,
}

impl<T> Completion<T> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Completion::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Completion::Failed(_))
    }

    pub fn succeeded(self) -> Option<T> {
        match self {
            Completion::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    fn rejected(error: ValidationError) -> Self {
        Completion::Rejected(vec![error])
    }
}

/// Message stored for a failed request: the backend's own message when it
/// sent one, otherwise the feature's fallback.
pub fn failure_message(err: &TransportError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
