//! Upload and document library normalization.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::api::wire::{IngestPayload, StoredFilePayload, StoredFilesPayload};
use crate::api::UploadPart;
use crate::models::{FileError, ProcessedDocument, RejectedBy, StoredDocument, UploadReport};
use crate::utils::guess_from_path;

/// Turn the backend's per-file ingest results into an [`UploadReport`].
///
/// Files the backend mentions in neither list are collected in
/// `unreported` rather than being counted as processed or failed.
pub fn normalize_ingest(payload: IngestPayload, sent: &[UploadPart]) -> UploadReport {
    let documents: Vec<ProcessedDocument> = payload
        .processed
        .into_iter()
        .map(|file| {
            let part = sent.iter().find(|p| p.filename == file.filename);
            ProcessedDocument {
                mime_type: if file.file_type.is_empty() {
                    part.map(|p| p.mime_type.clone())
                        .unwrap_or_else(|| guess_from_path(Path::new(&file.filename)))
                } else {
                    file.file_type
                },
                size: if file.size_bytes == 0 {
                    part.map(|p| p.size).unwrap_or(0)
                } else {
                    file.size_bytes
                },
                path: file.path,
                filename: file.filename,
            }
        })
        .collect();

    let errors: Vec<FileError> = payload
        .errors
        .into_iter()
        .map(|e| FileError {
            filename: e.filename,
            error: e.error,
            rejected_by: RejectedBy::Server,
        })
        .collect();

    let mentioned: HashSet<&str> = documents
        .iter()
        .map(|d| d.filename.as_str())
        .chain(errors.iter().map(|e| e.filename.as_str()))
        .collect();
    let unreported: Vec<String> = sent
        .iter()
        .filter(|p| !mentioned.contains(p.filename.as_str()))
        .map(|p| p.filename.clone())
        .collect();
    if !unreported.is_empty() {
        warn!(
            "backend did not report a result for {} file(s): {}",
            unreported.len(),
            unreported.join(", ")
        );
    }

    UploadReport {
        documents,
        errors,
        unreported,
    }
}

/// Normalize the backend's stored file list.
pub fn normalize_stored_files(payload: StoredFilesPayload) -> Vec<StoredDocument> {
    payload
        .into_files()
        .into_iter()
        .map(normalize_stored_file)
        .collect()
}

fn normalize_stored_file(file: StoredFilePayload) -> StoredDocument {
    let id = match file.id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    let content_type = file
        .content_type
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| guess_from_path(Path::new(&file.name)));
    StoredDocument {
        id,
        uploaded_at: file.upload_date.as_deref().and_then(parse_upload_date),
        content_type,
        size: file.size,
        num_characters: file.num_characters,
        path: file.path,
        name: file.name,
    }
}

/// Parse RFC 3339 timestamps, or naive ISO timestamps taken as UTC.
fn parse_upload_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
