//! Local files offered for upload.

use std::path::{Path, PathBuf};

use crate::api::UploadPart;
use crate::utils::guess_from_path;

/// A local file the user wants to upload, described by its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub mime_type: String,
}

impl CandidateFile {
    pub fn new(name: &str, path: impl Into<PathBuf>, size: u64, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            size,
            mime_type: mime_type.to_string(),
        }
    }

    /// Describe a file on disk; the MIME type is guessed from its extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
            mime_type: guess_from_path(path),
        })
    }

    /// Two candidates are the same file when name and size match.
    pub fn same_file(&self, other: &CandidateFile) -> bool {
        self.name == other.name && self.size == other.size
    }

    pub fn to_part(&self) -> UploadPart {
        UploadPart {
            filename: self.name.clone(),
            mime_type: self.mime_type.clone(),
            path: self.path.clone(),
            size: self.size,
        }
    }
}
