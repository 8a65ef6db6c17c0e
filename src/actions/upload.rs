use tracing::{info, warn};

use super::{failure_message, Completion, UPLOAD_ERROR_MESSAGE};
use crate::api::{DocumentApi, ProgressFn, UploadPart};
use crate::local_files::{partition_files, CandidateFile, Submission, ValidationError};
use crate::models::{FileError, RejectedBy, UploadReport};
use crate::normalize::normalize_ingest;
use crate::store::{Store, Ticket, UploaderEvent};

/// Upload local files to the backend.
///
/// Files that fail client-side validation are left out of the request and
/// reported in the returned [`UploadReport`] as rejected by the client. When
/// no file survives validation nothing is sent and state is not touched.
///
/// The upload fails as a whole only when the request fails or the backend
/// processed none of the files; otherwise it succeeds, possibly partially.
pub async fn run_upload(
    store: &Store,
    api: &dyn DocumentApi,
    files: Vec<CandidateFile>,
    max_file_bytes: u64,
    progress: Option<ProgressFn>,
) -> Completion<UploadReport> {
    if files.is_empty() {
        return Completion::rejected(ValidationError::NoFiles);
    }
    let (accepted, rejected) = partition_files(files, max_file_bytes);
    if accepted.is_empty() {
        return Completion::Rejected(rejected);
    }
    for e in &rejected {
        warn!("not uploading {}", e);
    }

    let parts: Vec<UploadPart> = accepted.iter().map(CandidateFile::to_part).collect();
    let ticket = store.uploader.begin(UploaderEvent::Start).await;

    let payload = match api.ingest(parts.clone(), progress).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("upload of {} file(s) failed: {}", parts.len(), e);
            let message = failure_message(&e, UPLOAD_ERROR_MESSAGE);
            return settle_failure(store, ticket, message).await;
        }
    };

    let mut report = normalize_ingest(payload, &parts);
    if report.documents.is_empty() && !report.errors.is_empty() {
        let details: Vec<String> = report
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.filename, e.error))
            .collect();
        let message = format!("{} ({})", UPLOAD_ERROR_MESSAGE, details.join("; "));
        return settle_failure(store, ticket, message).await;
    }
    report.errors.extend(rejected.iter().map(|e| FileError {
        filename: e.filename().unwrap_or_default().to_string(),
        error: e.to_string(),
        rejected_by: RejectedBy::Client,
    }));

    if !store
        .uploader
        .settle(ticket, UploaderEvent::Succeed(report.clone()))
        .await
    {
        return Completion::Superseded;
    }
    info!(
        "uploaded {} file(s), {} failed",
        report.documents.len(),
        report.errors.len()
    );
    Completion::Succeeded(report)
}

/// Upload everything taken from a pending queue, releasing the queued
/// files' previews once the upload has finished.
pub async fn upload_pending(
    store: &Store,
    api: &dyn DocumentApi,
    submission: Submission,
    max_file_bytes: u64,
    progress: Option<ProgressFn>,
) -> Completion<UploadReport> {
    let completion = run_upload(
        store,
        api,
        submission.candidates(),
        max_file_bytes,
        progress,
    )
    .await;
    submission.complete();
    completion
}

async fn settle_failure(
    store: &Store,
    ticket: Ticket,
    message: String,
) -> Completion<UploadReport> {
    if !store
        .uploader
        .settle(ticket, UploaderEvent::Fail(message.clone()))
        .await
    {
        return Completion::Superseded;
    }
    Completion::Failed(message)
}
