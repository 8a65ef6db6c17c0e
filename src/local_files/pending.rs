//! Files queued locally before upload.
//!
//! Every queued file holds a [`PreviewHandle`] registered with a shared
//! [`PreviewRegistry`]. A handle is released exactly once: on removal, on
//! clear-all, or when its upload completes. Releasing twice is a no-op, and
//! dropping an unreleased handle releases it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use super::validation::{validate_file, ValidationError};
use super::CandidateFile;

/// Tracks which preview handles are still live.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: Mutex<HashSet<Uuid>>,
}

impl PreviewRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn live(&self) -> MutexGuard<'_, HashSet<Uuid>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn acquire(self: &Arc<Self>) -> PreviewHandle {
        let id = Uuid::new_v4();
        self.live().insert(id);
        PreviewHandle {
            id,
            registry: Arc::clone(self),
            released: false,
        }
    }

    /// Number of handles not yet released.
    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    pub fn is_live(&self, id: &Uuid) -> bool {
        self.live().contains(id)
    }
}

/// Preview resource tied to one queued file.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    registry: Arc<PreviewRegistry>,
    released: bool,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the handle. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.registry.live().remove(&self.id);
        debug!("released preview {}", self.id);
        true
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// A client-held file that has not been uploaded yet.
#[derive(Debug)]
pub struct PendingLocalFile {
    pub file: CandidateFile,
    pub preview: PreviewHandle,
}

/// What happened to a batch of files offered to the queue.
#[derive(Debug, Default)]
pub struct AddSummary {
    pub added: usize,
    pub duplicates: Vec<String>,
    pub rejected: Vec<ValidationError>,
}

/// Ordered queue of files awaiting upload.
#[derive(Debug)]
pub struct PendingQueue {
    files: Vec<PendingLocalFile>,
    registry: Arc<PreviewRegistry>,
    max_file_bytes: u64,
}

impl PendingQueue {
    pub fn new(registry: Arc<PreviewRegistry>, max_file_bytes: u64) -> Self {
        Self {
            files: Vec::new(),
            registry,
            max_file_bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &CandidateFile> {
        self.files.iter().map(|p| &p.file)
    }

    /// Queue a file. Returns `Ok(false)` when the same file is already queued.
    pub fn add(&mut self, file: CandidateFile) -> Result<bool, ValidationError> {
        validate_file(&file, self.max_file_bytes)?;
        if self.files.iter().any(|p| p.file.same_file(&file)) {
            return Ok(false);
        }
        let preview = self.registry.acquire();
        self.files.push(PendingLocalFile { file, preview });
        Ok(true)
    }

    pub fn add_all(&mut self, files: impl IntoIterator<Item = CandidateFile>) -> AddSummary {
        let mut summary = AddSummary::default();
        for file in files {
            let name = file.name.clone();
            match self.add(file) {
                Ok(true) => summary.added += 1,
                Ok(false) => summary.duplicates.push(name),
                Err(e) => summary.rejected.push(e),
            }
        }
        summary
    }

    /// Remove the file at `index`, releasing its preview.
    pub fn remove(&mut self, index: usize) -> Option<CandidateFile> {
        if index >= self.files.len() {
            return None;
        }
        let mut removed = self.files.remove(index);
        removed.preview.release();
        Some(removed.file)
    }

    /// Remove every file, releasing all previews.
    pub fn clear(&mut self) {
        for mut pending in self.files.drain(..) {
            pending.preview.release();
        }
    }

    /// Hand the queued files over to an upload, leaving the queue empty.
    pub fn submit(&mut self) -> Submission {
        Submission {
            files: std::mem::take(&mut self.files),
        }
    }
}

/// Files owned by an in-flight upload.
#[derive(Debug)]
pub struct Submission {
    files: Vec<PendingLocalFile>,
}

impl Submission {
    pub fn candidates(&self) -> Vec<CandidateFile> {
        self.files.iter().map(|p| p.file.clone()).collect()
    }

    /// The upload finished; release every preview.
    pub fn complete(mut self) {
        for pending in &mut self.files {
            pending.preview.release();
        }
    }
}
