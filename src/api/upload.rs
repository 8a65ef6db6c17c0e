//! Multipart upload encoding with progress reporting.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::{self, Stream};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio::io::AsyncReadExt;

use super::error::TransportError;

/// Multipart field every file is sent under.
pub const UPLOAD_FIELD: &str = "files";

const CHUNK_SIZE: usize = 64 * 1024;

/// Receives upload progress as a 0-100 percentage.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// A file about to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub filename: String,
    pub mime_type: String,
    pub path: PathBuf,
    pub size: u64,
}

/// `round(loaded * 100 / total)`, or `None` when the total is unknown.
pub fn progress_percent(loaded: u64, total: Option<u64>) -> Option<u8> {
    match total {
        Some(total) if total > 0 => {
            let percent = (loaded as f64 * 100.0 / total as f64).round();
            Some(percent.clamp(0.0, 100.0) as u8)
        }
        _ => None,
    }
}

/// Shared byte counter for all parts of one upload.
#[derive(Clone)]
pub(crate) struct ProgressTracker {
    loaded: Arc<AtomicU64>,
    total: Option<u64>,
    callback: Option<ProgressFn>,
}

impl ProgressTracker {
    pub(crate) fn new(total: Option<u64>, callback: Option<ProgressFn>) -> Self {
        Self {
            loaded: Arc::new(AtomicU64::new(0)),
            total,
            callback,
        }
    }

    pub(crate) fn advance(&self, bytes: u64) {
        let loaded = self.loaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        // Best effort: nothing to report without a known total.
        if let (Some(callback), Some(percent)) =
            (&self.callback, progress_percent(loaded, self.total))
        {
            callback(percent);
        }
    }

    #[cfg(test)]
    pub(crate) fn loaded(&self) -> u64 {
        self.loaded.load(Ordering::Relaxed)
    }
}

/// Total body size, rejecting uploads above `max_body_bytes`.
pub fn check_body_size(parts: &[UploadPart], max_body_bytes: u64) -> Result<u64, TransportError> {
    let total: u64 = parts.iter().map(|p| p.size).sum();
    if total > max_body_bytes {
        return Err(TransportError::RequestConfig(format!(
            "upload of {} bytes exceeds the {} byte limit",
            total, max_body_bytes
        )));
    }
    Ok(total)
}

/// Build the multipart form, streaming each file from disk.
pub(crate) async fn build_form(
    parts: &[UploadPart],
    tracker: &ProgressTracker,
) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in parts {
        let file = tokio::fs::File::open(&part.path).await.map_err(|e| {
            TransportError::RequestConfig(format!("cannot open {}: {}", part.path.display(), e))
        })?;
        let body = Body::wrap_stream(file_chunks(file, tracker.clone()));
        let field = Part::stream_with_length(body, part.size)
            .file_name(part.filename.clone())
            .mime_str(&part.mime_type)?;
        form = form.part(UPLOAD_FIELD, field);
    }
    Ok(form)
}

fn file_chunks(
    file: tokio::fs::File,
    tracker: ProgressTracker,
) -> impl Stream<Item = std::io::Result<Vec<u8>>> + Send + 'static {
    stream::try_unfold((file, tracker), |(mut file, tracker)| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let n = file.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        tracker.advance(n as u64);
        Ok(Some((buf, (file, tracker))))
    })
}
