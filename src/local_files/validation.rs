//! Client-side input validation.
//!
//! Everything here runs before any network call; a rejected input never
//! moves a slice to `pending`.

use thiserror::Error;

use super::CandidateFile;
use crate::utils::{format_size, is_accepted};

/// Input rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("No files to upload")]
    NoFiles,

    #[error("{name}: only PDF and TXT files are allowed (got {mime})")]
    UnsupportedType { name: String, mime: String },

    #[error("{name}: file is too large ({}, max {})", human(.size), human(.limit))]
    TooLarge { name: String, size: u64, limit: u64 },
}

fn human(bytes: &u64) -> String {
    format_size(*bytes)
}

impl ValidationError {
    /// The file this error is about, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            ValidationError::UnsupportedType { name, .. }
            | ValidationError::TooLarge { name, .. } => Some(name),
            ValidationError::EmptyInput | ValidationError::NoFiles => None,
        }
    }
}

/// Trimmed text input, or `EmptyInput` when blank.
pub fn require_text(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyInput)
    } else {
        Ok(trimmed)
    }
}

/// Check one file's type and size.
pub fn validate_file(file: &CandidateFile, max_file_bytes: u64) -> Result<(), ValidationError> {
    if !is_accepted(&file.mime_type) {
        return Err(ValidationError::UnsupportedType {
            name: file.name.clone(),
            mime: file.mime_type.clone(),
        });
    }
    if file.size > max_file_bytes {
        return Err(ValidationError::TooLarge {
            name: file.name.clone(),
            size: file.size,
            limit: max_file_bytes,
        });
    }
    Ok(())
}

/// Split files into those that pass validation and per-file rejections.
pub fn partition_files(
    files: Vec<CandidateFile>,
    max_file_bytes: u64,
) -> (Vec<CandidateFile>, Vec<ValidationError>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for file in files {
        match validate_file(&file, max_file_bytes) {
            Ok(()) => accepted.push(file),
            Err(e) => rejected.push(e),
        }
    }
    (accepted, rejected)
}
