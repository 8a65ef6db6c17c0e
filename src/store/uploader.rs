//! Upload slice.

use tracing::debug;

use super::{failure_text, Reducer};
use crate::models::{FileError, LoadingStatus, UploadReport, UploadedFileSummary};

#[derive(Debug)]
pub enum UploaderEvent {
    Start,
    Succeed(UploadReport),
    Fail(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploaderState {
    uploaded_files: Vec<UploadedFileSummary>,
    file_errors: Vec<FileError>,
    loading: LoadingStatus,
    error: Option<String>,
}

impl Reducer for UploaderState {
    type Event = UploaderEvent;
    const NAME: &'static str = "uploader";

    fn reduce(&mut self, event: UploaderEvent) {
        match event {
            UploaderEvent::Start => {
                self.loading = LoadingStatus::Pending;
                self.error = None;
                self.file_errors.clear();
            }
            UploaderEvent::Succeed(report) => {
                if !self.loading.is_pending() {
                    debug!("uploader: ignoring success while {}", self.loading);
                    return;
                }
                // Append-only for the lifetime of the session.
                self.uploaded_files.extend(report.summaries());
                self.file_errors = report.errors;
                self.loading = LoadingStatus::Succeeded;
                self.error = None;
            }
            UploaderEvent::Fail(message) => {
                if !self.loading.is_pending() {
                    debug!("uploader: ignoring failure while {}", self.loading);
                    return;
                }
                self.loading = LoadingStatus::Failed;
                self.error = Some(failure_text(message));
            }
            UploaderEvent::Clear => *self = Self::default(),
        }
    }

    fn supersedes_in_flight(event: &UploaderEvent) -> bool {
        matches!(event, UploaderEvent::Clear)
    }
}

impl UploaderState {
    pub fn uploaded_files(&self) -> &[UploadedFileSummary] {
        &self.uploaded_files
    }

    /// Per-file failures from the last upload.
    pub fn file_errors(&self) -> &[FileError] {
        &self.file_errors
    }

    pub fn loading(&self) -> LoadingStatus {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_uploaded_bytes(&self) -> u64 {
        self.uploaded_files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessedDocument, RejectedBy};

    fn report(names: &[&str], failed: &[&str]) -> UploadReport {
        UploadReport {
            documents: names
                .iter()
                .map(|name| ProcessedDocument {
                    filename: name.to_string(),
                    path: format!("/data/{name}"),
                    size: 100,
                    mime_type: "application/pdf".to_string(),
                })
                .collect(),
            errors: failed
                .iter()
                .map(|name| FileError {
                    filename: name.to_string(),
                    error: "corrupt".to_string(),
                    rejected_by: RejectedBy::Server,
                })
                .collect(),
            unreported: Vec::new(),
        }
    }

    fn upload(state: &mut UploaderState, report: UploadReport) {
        state.reduce(UploaderEvent::Start);
        state.reduce(UploaderEvent::Succeed(report));
    }

    #[test]
    fn test_uploaded_files_accumulate() {
        let mut state = UploaderState::default();
        upload(&mut state, report(&["a.pdf"], &[]));
        upload(&mut state, report(&["b.pdf", "c.pdf"], &[]));

        let names: Vec<_> = state.uploaded_files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(state.total_uploaded_bytes(), 300);
    }

    #[test]
    fn test_partial_upload_records_file_errors() {
        let mut state = UploaderState::default();
        upload(&mut state, report(&["a.pdf"], &["b.pdf"]));

        assert_eq!(state.loading(), LoadingStatus::Succeeded);
        assert_eq!(state.uploaded_files().len(), 1);
        assert_eq!(state.file_errors().len(), 1);
        assert_eq!(state.file_errors()[0].filename, "b.pdf");

        state.reduce(UploaderEvent::Start);
        assert!(state.file_errors().is_empty());
    }

    #[test]
    fn test_failure_keeps_uploaded_files() {
        let mut state = UploaderState::default();
        upload(&mut state, report(&["a.pdf"], &[]));
        state.reduce(UploaderEvent::Start);
        state.reduce(UploaderEvent::Fail("Error uploading files".to_string()));

        assert_eq!(state.loading(), LoadingStatus::Failed);
        assert_eq!(state.error(), Some("Error uploading files"));
        assert_eq!(state.uploaded_files().len(), 1);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut state = UploaderState::default();
        upload(&mut state, report(&["a.pdf"], &["b.pdf"]));
        state.reduce(UploaderEvent::Clear);
        assert_eq!(state, UploaderState::default());
        state.reduce(UploaderEvent::Clear);
        assert_eq!(state, UploaderState::default());
    }
}
