use tracing::{info, warn};

use super::{failure_message, Completion, DELETE_ERROR_MESSAGE, LIBRARY_ERROR_MESSAGE};
use crate::api::DocumentApi;
use crate::local_files::require_text;
use crate::models::{DeleteAllReport, StoredDocument};
use crate::normalize::normalize_stored_files;
use crate::store::{LibraryEvent, LibraryUpdate, Store, Ticket};

/// Fetch the list of files stored on the backend.
pub async fn load_library(store: &Store, api: &dyn DocumentApi) -> Completion<Vec<StoredDocument>> {
    let ticket = store.library.begin(LibraryEvent::Start).await;
    refresh(store, api, ticket, None).await
}

/// Delete one stored file, then reload the list.
pub async fn delete_document(
    store: &Store,
    api: &dyn DocumentApi,
    id: &str,
) -> Completion<Vec<StoredDocument>> {
    let id = match require_text(id) {
        Ok(id) => id.to_string(),
        Err(e) => return Completion::rejected(e),
    };
    let name = store
        .library
        .read(|s| s.find(&id).map(|d| d.name.clone()))
        .await
        .unwrap_or_else(|| id.clone());

    let ticket = store.library.begin(LibraryEvent::Start).await;
    match api.delete_file(&id).await {
        Ok(payload) => {
            info!("deleted stored file {}", id);
            let message = if payload.message.is_empty() {
                format!("Deleted {}", name)
            } else {
                payload.message
            };
            refresh(store, api, ticket, Some(message)).await
        }
        Err(e) => {
            warn!("delete of {} failed: {}", id, e);
            fail(store, ticket, failure_message(&e, DELETE_ERROR_MESSAGE)).await
        }
    }
}

/// Delete every stored file. The list is emptied without reloading it.
pub async fn delete_all_documents(store: &Store, api: &dyn DocumentApi) -> Completion<DeleteAllReport> {
    let ticket = store.library.begin(LibraryEvent::Start).await;
    match api.delete_all_files().await {
        Ok(payload) => {
            let total_deleted = payload
                .total_deleted
                .unwrap_or(payload.deleted_files.len() as u64);
            let report = DeleteAllReport {
                message: if payload.message.is_empty() {
                    format!("Deleted {} file(s)", total_deleted)
                } else {
                    payload.message
                },
                deleted_files: payload.deleted_files,
                total_deleted,
            };
            let update = LibraryUpdate {
                files: Vec::new(),
                message: Some(report.message.clone()),
            };
            if !store.library.settle(ticket, LibraryEvent::Succeed(update)).await {
                return Completion::Superseded;
            }
            info!("deleted all stored files ({})", report.total_deleted);
            Completion::Succeeded(report)
        }
        Err(e) => {
            warn!("delete-all failed: {}", e);
            fail(store, ticket, failure_message(&e, DELETE_ERROR_MESSAGE)).await
        }
    }
}

async fn refresh(
    store: &Store,
    api: &dyn DocumentApi,
    ticket: Ticket,
    message: Option<String>,
) -> Completion<Vec<StoredDocument>> {
    match api.list_files().await {
        Ok(payload) => {
            let files = normalize_stored_files(payload);
            let update = LibraryUpdate {
                files: files.clone(),
                message,
            };
            if !store.library.settle(ticket, LibraryEvent::Succeed(update)).await {
                return Completion::Superseded;
            }
            info!("{} stored file(s)", files.len());
            Completion::Succeeded(files)
        }
        Err(e) => {
            warn!("listing stored files failed: {}", e);
            fail(store, ticket, failure_message(&e, LIBRARY_ERROR_MESSAGE)).await
        }
    }
}

async fn fail<T>(store: &Store, ticket: Ticket, message: String) -> Completion<T> {
    if !store
        .library
        .settle(ticket, LibraryEvent::Fail(message.clone()))
        .await
    {
        return Completion::Superseded;
    }
    Completion::Failed(message)
}
