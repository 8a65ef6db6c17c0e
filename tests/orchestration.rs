//! Orchestration actions against in-memory backends.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use docsearch::actions::{
    ask_question, delete_all_documents, delete_document, load_library, run_search, run_upload,
    upload_pending, Completion, SEARCH_ERROR_MESSAGE, UPLOAD_ERROR_MESSAGE,
};
use docsearch::api::wire::{IngestError, IngestedFile};
use docsearch::api::{
    DeletePayload, DocumentApi, IngestPayload, ProgressFn, SearchQuery, StoredFilesPayload,
    TransportError, UploadPart,
};
use docsearch::local_files::{CandidateFile, PendingQueue, PreviewRegistry, ValidationError};
use docsearch::models::{LoadingStatus, RejectedBy, INSUFFICIENT_CONTEXT_ANSWER};
use docsearch::store::{QaEvent, QaState, SearchState, UploaderState};
use docsearch::Store;

const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

type Reply<T> = Result<T, TransportError>;

/// Backend fake answering from per-endpoint queues.
#[derive(Default)]
struct FakeApi {
    search: Mutex<VecDeque<Reply<Value>>>,
    ask: Mutex<VecDeque<Reply<Value>>>,
    ingest: Mutex<VecDeque<Reply<IngestPayload>>>,
    list: Mutex<VecDeque<Reply<Value>>>,
    delete: Mutex<VecDeque<Reply<DeletePayload>>>,
    sent_queries: Mutex<Vec<SearchQuery>>,
    sent_parts: Mutex<Vec<Vec<UploadPart>>>,
    calls: AtomicUsize,
}

fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Reply<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::Network("no reply queued".to_string())))
}

impl FakeApi {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn search(&self, query: &SearchQuery) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent_queries.lock().unwrap().push(query.clone());
        next(&self.search)
    }

    async fn ask(&self, _question: &str) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.ask)
    }

    async fn ingest(
        &self,
        parts: Vec<UploadPart>,
        _progress: Option<ProgressFn>,
    ) -> Result<IngestPayload, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent_parts.lock().unwrap().push(parts);
        next(&self.ingest)
    }

    async fn list_files(&self) -> Result<StoredFilesPayload, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.list).map(|v| serde_json::from_value(v).unwrap())
    }

    async fn delete_file(&self, _id: &str) -> Result<DeletePayload, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.delete)
    }

    async fn delete_all_files(&self) -> Result<DeletePayload, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.delete)
    }
}

fn invoice_page() -> Value {
    json!({
        "results": [{"text": "Invoice total 42 EUR", "documentName": "a.pdf", "relevanceScore": 0.87}],
        "total": 1,
        "page": 1,
        "pageSize": 10,
        "totalPages": 1,
    })
}

fn pdf(name: &str) -> CandidateFile {
    CandidateFile::new(name, format!("/tmp/{name}"), 1024, "application/pdf")
}

fn processed(name: &str) -> IngestedFile {
    IngestedFile {
        filename: name.to_string(),
        path: format!("/data/{name}"),
        size_bytes: 1024,
        file_type: "application/pdf".to_string(),
    }
}

fn failed(name: &str, error: &str) -> IngestError {
    IngestError {
        filename: name.to_string(),
        error: error.to_string(),
    }
}

#[tokio::test]
async fn test_search_populates_results_and_paging() {
    let api = FakeApi::default();
    api.search.lock().unwrap().push_back(Ok(invoice_page()));
    let store = Store::new();

    let completion = run_search(&store, &api, "invoice", 1, 10).await;
    assert!(completion.is_succeeded());

    let state = store.search.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Succeeded);
    assert_eq!(state.error(), None);
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].document_name, "a.pdf");
    assert_eq!(state.pagination().total_pages, 1);
}

#[tokio::test]
async fn test_zero_page_and_page_size_are_clamped() {
    let api = FakeApi::default();
    api.search.lock().unwrap().push_back(Ok(json!({
        "results": [
            {"text": "first", "documentName": "a.pdf", "relevanceScore": 0.9},
            {"text": "second", "documentName": "b.pdf", "relevanceScore": 0.8},
        ],
        "total": 2,
    })));
    let store = Store::new();

    let response = run_search(&store, &api, "invoice", 0, 0)
        .await
        .succeeded()
        .unwrap();

    let sent = api.sent_queries.lock().unwrap()[0].clone();
    assert_eq!(sent.page, 1);
    assert_eq!(sent.limit, 1);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.total_pages, 2);
}

#[tokio::test]
async fn test_blank_inputs_are_rejected_without_requests() {
    let api = FakeApi::default();
    let store = Store::new();

    assert_eq!(
        run_search(&store, &api, "   ", 1, 10).await,
        Completion::Rejected(vec![ValidationError::EmptyInput])
    );
    assert!(matches!(
        ask_question(&store, &api, "\n").await,
        Completion::Rejected(_)
    ));
    assert_eq!(api.calls(), 0);
    assert_eq!(store.search.snapshot().await, SearchState::default());
    assert_eq!(store.qa.snapshot().await, QaState::default());
}

#[tokio::test]
async fn test_failed_search_keeps_previous_results() {
    let api = FakeApi::default();
    {
        let mut replies = api.search.lock().unwrap();
        replies.push_back(Ok(invoice_page()));
        replies.push_back(Err(TransportError::Server {
            status: 503,
            message: "Index is rebuilding".to_string(),
        }));
        replies.push_back(Err(TransportError::Network("timed out".to_string())));
    }
    let store = Store::new();

    run_search(&store, &api, "invoice", 1, 10).await;
    let completion = run_search(&store, &api, "invoice", 2, 10).await;
    assert_eq!(completion, Completion::Failed("Index is rebuilding".to_string()));

    let state = store.search.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Failed);
    assert_eq!(state.error(), Some("Index is rebuilding"));
    assert_eq!(state.results().len(), 1);

    run_search(&store, &api, "invoice", 2, 10).await;
    assert_eq!(
        store.search.read(|s| s.error().map(str::to_string)).await,
        Some(SEARCH_ERROR_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_insufficient_context_overrides_answer() {
    let api = FakeApi::default();
    api.ask.lock().unwrap().push_back(Ok(json!({
        "hasEnoughContext": false,
        "answer": "ignored",
        "citations": [{"content": "x", "source": "a.pdf"}],
    })));
    let store = Store::new();

    ask_question(&store, &api, "Who signed it?").await;

    let state = store.qa.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Succeeded);
    assert_eq!(state.answer(), Some(INSUFFICIENT_CONTEXT_ANSWER));
    assert!(state.citations().is_empty());
}

#[tokio::test]
async fn test_answer_without_context_flag_falls_back() {
    let api = FakeApi::default();
    api.ask.lock().unwrap().push_back(Ok(json!({
        "answer": "probably Alice",
        "citations": [{"content": "x", "source": "a.pdf"}],
    })));
    let store = Store::new();

    ask_question(&store, &api, "Who signed it?").await;

    let state = store.qa.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Succeeded);
    assert_eq!(state.answer(), Some(INSUFFICIENT_CONTEXT_ANSWER));
    assert!(state.citations().is_empty());
    assert!(state.lacks_context());
}

#[tokio::test]
async fn test_answer_citations_are_normalized() {
    let api = FakeApi::default();
    api.ask.lock().unwrap().push_back(Ok(json!({
        "answer": "The total is 42 EUR [1].",
        "citations": [
            {"text": "Total: 42 EUR", "document": "invoice.pdf", "relevanceScore": 0.9, "page": 2},
        ],
        "hasEnoughContext": true,
        "confidenceScore": 0.8,
    })));
    let store = Store::new();

    let answer = ask_question(&store, &api, "What is the total?")
        .await
        .succeeded()
        .unwrap();
    assert_eq!(answer.citations[0].content, "Total: 42 EUR");
    assert_eq!(answer.citations[0].source, "invoice.pdf");
    assert_eq!(answer.citations[0].score, Some(0.9));

    let state = store.qa.snapshot().await;
    assert_eq!(state.question(), "What is the total?");
    assert_eq!(state.confidence_score(), Some(0.8));
    assert_eq!(state.citations().len(), 1);
}

#[tokio::test]
async fn test_empty_upload_makes_no_transition() {
    let api = FakeApi::default();
    let store = Store::new();

    let completion = run_upload(&store, &api, Vec::new(), MAX_FILE_BYTES, None).await;
    assert_eq!(completion, Completion::Rejected(vec![ValidationError::NoFiles]));
    assert_eq!(api.calls(), 0);
    assert_eq!(store.uploader.snapshot().await, UploaderState::default());
}

#[tokio::test]
async fn test_upload_with_only_invalid_files_sends_nothing() {
    let api = FakeApi::default();
    let store = Store::new();

    let files = vec![
        CandidateFile::new("scan.png", "/tmp/scan.png", 10, "image/png"),
        CandidateFile::new("dump.txt", "/tmp/dump.txt", 2 * 1024 * 1024 * 1024, "text/plain"),
    ];
    match run_upload(&store, &api, files, MAX_FILE_BYTES, None).await {
        Completion::Rejected(errors) => {
            assert!(matches!(errors[0], ValidationError::UnsupportedType { .. }));
            assert!(matches!(errors[1], ValidationError::TooLarge { .. }));
        }
        other => panic!("unexpected completion: {other:?}"),
    }
    assert_eq!(api.calls(), 0);
    assert_eq!(store.uploader.snapshot().await, UploaderState::default());
}

#[tokio::test]
async fn test_partial_upload_succeeds_with_file_errors() {
    let api = FakeApi::default();
    api.ingest.lock().unwrap().push_back(Ok(IngestPayload {
        processed: vec![processed("a.pdf")],
        errors: vec![failed("b.pdf", "encrypted PDF")],
        total_processed: 1,
        total_errors: 1,
    }));
    let store = Store::new();

    let files = vec![
        pdf("a.pdf"),
        pdf("b.pdf"),
        CandidateFile::new("c.png", "/tmp/c.png", 10, "image/png"),
        CandidateFile::new("dump.txt", "/tmp/dump.txt", 2 * 1024 * 1024 * 1024, "text/plain"),
    ];
    let report = run_upload(&store, &api, files, MAX_FILE_BYTES, None)
        .await
        .succeeded()
        .unwrap();

    let sent: Vec<String> = api.sent_parts.lock().unwrap()[0]
        .iter()
        .map(|p| p.filename.clone())
        .collect();
    assert_eq!(sent, vec!["a.pdf".to_string(), "b.pdf".to_string()]);
    assert!(!sent.iter().any(|name| name == "dump.txt"));

    assert!(report.is_partial());
    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.errors.len(), 3);
    assert_eq!(report.errors[0].rejected_by, RejectedBy::Server);
    assert_eq!(report.errors[1].filename, "c.png");
    assert_eq!(report.errors[1].rejected_by, RejectedBy::Client);
    assert_eq!(report.errors[2].filename, "dump.txt");
    assert_eq!(report.errors[2].rejected_by, RejectedBy::Client);

    let state = store.uploader.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Succeeded);
    assert_eq!(state.error(), None);
    assert_eq!(state.uploaded_files().len(), 1);
    assert_eq!(state.file_errors().len(), 3);
}

#[tokio::test]
async fn test_upload_fails_when_nothing_was_processed() {
    let api = FakeApi::default();
    api.ingest.lock().unwrap().push_back(Ok(IngestPayload {
        processed: Vec::new(),
        errors: vec![failed("a.pdf", "corrupt")],
        total_processed: 0,
        total_errors: 1,
    }));
    let store = Store::new();

    let completion = run_upload(&store, &api, vec![pdf("a.pdf")], MAX_FILE_BYTES, None).await;
    match completion {
        Completion::Failed(message) => {
            assert!(message.starts_with(UPLOAD_ERROR_MESSAGE));
            assert!(message.contains("a.pdf: corrupt"));
        }
        other => panic!("unexpected completion: {other:?}"),
    }
    assert_eq!(
        store.uploader.read(|s| s.loading()).await,
        LoadingStatus::Failed
    );
}

#[tokio::test]
async fn test_upload_pending_releases_previews() {
    let api = FakeApi::default();
    api.ingest.lock().unwrap().push_back(Ok(IngestPayload {
        processed: vec![processed("a.pdf"), processed("b.pdf")],
        ..Default::default()
    }));
    let store = Store::new();
    let registry = PreviewRegistry::new();
    let mut queue = PendingQueue::new(registry.clone(), MAX_FILE_BYTES);
    queue.add_all(vec![pdf("a.pdf"), pdf("b.pdf")]);
    assert_eq!(registry.live_count(), 2);

    let completion = upload_pending(&store, &api, queue.submit(), MAX_FILE_BYTES, None).await;
    assert!(completion.is_succeeded());
    assert_eq!(registry.live_count(), 0);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_library_delete_refreshes_and_delete_all_empties() {
    let api = FakeApi::default();
    {
        let mut lists = api.list.lock().unwrap();
        lists.push_back(Ok(json!([
            {"id": 1, "name": "a.pdf", "size": 10},
            {"id": 2, "name": "b.pdf", "size": 20},
        ])));
        lists.push_back(Ok(json!({"files": [{"id": 2, "name": "b.pdf", "size": 20}]})));
        let mut deletes = api.delete.lock().unwrap();
        deletes.push_back(Ok(DeletePayload {
            success: true,
            ..Default::default()
        }));
        deletes.push_back(Ok(DeletePayload {
            success: true,
            message: "All files deleted".to_string(),
            deleted_files: vec!["b.pdf".to_string()],
            total_deleted: None,
        }));
    }
    let store = Store::new();

    let files = load_library(&store, &api).await.succeeded().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].id, "1");

    delete_document(&store, &api, "1").await;
    let state = store.library.snapshot().await;
    assert_eq!(state.message(), Some("Deleted a.pdf"));
    assert_eq!(state.files().len(), 1);

    let report = delete_all_documents(&store, &api).await.succeeded().unwrap();
    assert_eq!(report.total_deleted, 1);
    let state = store.library.snapshot().await;
    assert!(state.files().is_empty());
    assert_eq!(state.message(), Some("All files deleted"));
    assert_eq!(api.calls(), 4);
}

#[tokio::test]
async fn test_failed_delete_keeps_listing() {
    let api = FakeApi::default();
    api.list.lock().unwrap().push_back(Ok(json!([{"id": "x", "name": "a.pdf"}])));
    api.delete.lock().unwrap().push_back(Err(TransportError::Server {
        status: 404,
        message: "File not found".to_string(),
    }));
    let store = Store::new();

    load_library(&store, &api).await;
    let completion = delete_document(&store, &api, "x").await;
    assert_eq!(completion, Completion::Failed("File not found".to_string()));

    let state = store.library.snapshot().await;
    assert_eq!(state.loading(), LoadingStatus::Failed);
    assert_eq!(state.files().len(), 1);
}

/// Backend whose answers wait until the test opens a gate per input.
#[derive(Default)]
struct GatedApi {
    gates: HashMap<String, Arc<Notify>>,
}

impl GatedApi {
    fn with_gates(names: &[&str]) -> Self {
        Self {
            gates: names
                .iter()
                .map(|n| (n.to_string(), Arc::new(Notify::new())))
                .collect(),
        }
    }

    fn open(&self, name: &str) {
        self.gates[name].notify_one();
    }

    async fn wait(&self, name: &str) {
        if let Some(gate) = self.gates.get(name) {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl DocumentApi for GatedApi {
    async fn search(&self, query: &SearchQuery) -> Result<Value, TransportError> {
        self.wait(&query.query).await;
        Ok(json!({
            "results": [{"text": format!("hit for {}", query.query), "documentName": "a.pdf", "relevanceScore": 0.5}],
            "total": 1,
            "page": 1,
            "pageSize": 10,
        }))
    }

    async fn ask(&self, question: &str) -> Result<Value, TransportError> {
        self.wait(question).await;
        Ok(json!({"answer": "late answer", "citations": []}))
    }

    async fn ingest(
        &self,
        _parts: Vec<UploadPart>,
        _progress: Option<ProgressFn>,
    ) -> Result<IngestPayload, TransportError> {
        Err(TransportError::Network("unused".to_string()))
    }

    async fn list_files(&self) -> Result<StoredFilesPayload, TransportError> {
        Err(TransportError::Network("unused".to_string()))
    }

    async fn delete_file(&self, _id: &str) -> Result<DeletePayload, TransportError> {
        Err(TransportError::Network("unused".to_string()))
    }

    async fn delete_all_files(&self) -> Result<DeletePayload, TransportError> {
        Err(TransportError::Network("unused".to_string()))
    }
}

#[tokio::test]
async fn test_stale_search_response_does_not_overwrite_newer_one() {
    let api = GatedApi::with_gates(&["old", "new"]);
    let store = Store::new();

    let old = run_search(&store, &api, "old", 1, 10);
    let new = run_search(&store, &api, "new", 1, 10);
    let control = async {
        api.open("new");
        while store.search.read(|s| s.loading()).await != LoadingStatus::Succeeded {
            tokio::task::yield_now().await;
        }
        api.open("old");
    };
    let (old, new, ()) = tokio::join!(old, new, control);

    assert_eq!(old, Completion::Superseded);
    assert!(new.is_succeeded());
    let state = store.search.snapshot().await;
    assert_eq!(state.query(), "new");
    assert_eq!(state.results()[0].text, "hit for new");
}

#[tokio::test]
async fn test_answer_arriving_after_clear_is_dropped() {
    let api = GatedApi::with_gates(&["slow question"]);
    let store = Store::new();

    let ask = ask_question(&store, &api, "slow question");
    let control = async {
        while !store.qa.read(|s| s.loading().is_pending()).await {
            tokio::task::yield_now().await;
        }
        store.qa.dispatch(QaEvent::Clear).await;
        api.open("slow question");
    };
    let (completion, ()) = tokio::join!(ask, control);

    assert_eq!(completion, Completion::Superseded);
    assert_eq!(store.qa.snapshot().await, QaState::default());
}
