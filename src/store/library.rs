//! Slice for documents already stored on the backend.

use tracing::debug;

use super::{failure_text, Reducer};
use crate::models::{LoadingStatus, StoredDocument};

/// Result of a list, delete, or delete-all request.
#[derive(Debug, Clone, Default)]
pub struct LibraryUpdate {
    pub files: Vec<StoredDocument>,
    /// Confirmation text from the backend, if any.
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum LibraryEvent {
    Start,
    Succeed(LibraryUpdate),
    Fail(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    files: Vec<StoredDocument>,
    message: Option<String>,
    loading: LoadingStatus,
    error: Option<String>,
}

impl Reducer for LibraryState {
    type Event = LibraryEvent;
    const NAME: &'static str = "library";

    fn reduce(&mut self, event: LibraryEvent) {
        match event {
            LibraryEvent::Start => {
                self.loading = LoadingStatus::Pending;
                self.error = None;
                self.message = None;
            }
            LibraryEvent::Succeed(update) => {
                if !self.loading.is_pending() {
                    debug!("library: ignoring update while {}", self.loading);
                    return;
                }
                self.files = update.files;
                self.message = update.message;
                self.loading = LoadingStatus::Succeeded;
                self.error = None;
            }
            LibraryEvent::Fail(message) => {
                if !self.loading.is_pending() {
                    debug!("library: ignoring failure while {}", self.loading);
                    return;
                }
                self.loading = LoadingStatus::Failed;
                self.error = Some(failure_text(message));
            }
            LibraryEvent::Clear => *self = Self::default(),
        }
    }

    fn supersedes_in_flight(event: &LibraryEvent) -> bool {
        matches!(event, LibraryEvent::Clear)
    }
}

impl LibraryState {
    pub fn files(&self) -> &[StoredDocument] {
        &self.files
    }

    pub fn find(&self, id: &str) -> Option<&StoredDocument> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn loading(&self) -> LoadingStatus {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
