//! Upload and document library shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a file the backend has accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileSummary {
    pub name: String,
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// A file the backend processed during an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub filename: String,
    /// Where the backend stored it.
    pub path: String,
    pub size: u64,
    pub mime_type: String,
}

impl ProcessedDocument {
    pub fn summary(&self) -> UploadedFileSummary {
        UploadedFileSummary {
            name: self.filename.clone(),
            size: self.size,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Which side rejected a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectedBy {
    /// Failed local validation; never sent.
    Client,
    /// Sent, but the backend reported an error for it.
    Server,
}

/// A per-file upload error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub filename: String,
    pub error: String,
    pub rejected_by: RejectedBy,
}

/// Normalized result of one upload request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadReport {
    pub documents: Vec<ProcessedDocument>,
    pub errors: Vec<FileError>,
    /// Sent files the backend mentioned in neither list.
    pub unreported: Vec<String>,
}

impl UploadReport {
    /// Some files were processed while others failed.
    pub fn is_partial(&self) -> bool {
        !self.documents.is_empty() && !self.errors.is_empty()
    }

    pub fn summaries(&self) -> Vec<UploadedFileSummary> {
        self.documents.iter().map(ProcessedDocument::summary).collect()
    }
}

/// A document already stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_characters: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Result of a delete-all request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteAllReport {
    pub message: String,
    pub deleted_files: Vec<String>,
    pub total_deleted: u64,
}
