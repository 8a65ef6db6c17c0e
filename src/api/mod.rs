//! Gateway to the document search backend.
//!
//! [`DocumentApi`] is the seam the orchestration actions talk to: one method
//! per backend endpoint, each returning the raw payload or a
//! [`TransportError`]. [`HttpGateway`] is the reqwest implementation.

pub mod error;
pub mod upload;
pub mod wire;

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::config::ClientConfig;

pub use error::TransportError;
pub use upload::{progress_percent, ProgressFn, UploadPart, UPLOAD_FIELD};
pub use wire::{DeletePayload, IngestPayload, StoredFilesPayload};

use upload::{build_form, check_body_size, ProgressTracker};

const USER_AGENT: &str = concat!("docsearch/", env!("CARGO_PKG_VERSION"));

/// Parameters of a keyword search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    pub limit: u32,
}

/// Backend operations used by the client.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// `GET /search?q=&page=&limit=`
    async fn search(&self, query: &SearchQuery) -> Result<serde_json::Value, TransportError>;

    /// `POST /ask`
    async fn ask(&self, question: &str) -> Result<serde_json::Value, TransportError>;

    /// `POST /ingest` as multipart, one `files` field per part.
    async fn ingest(
        &self,
        parts: Vec<UploadPart>,
        progress: Option<ProgressFn>,
    ) -> Result<IngestPayload, TransportError>;

    /// `GET /ingest/files`
    async fn list_files(&self) -> Result<StoredFilesPayload, TransportError>;

    /// `DELETE /ingest/files/{id}`
    async fn delete_file(&self, id: &str) -> Result<DeletePayload, TransportError>;

    /// `DELETE /ingest/files?confirm=true`
    async fn delete_all_files(&self) -> Result<DeletePayload, TransportError>;
}

/// HTTP implementation of [`DocumentApi`].
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    upload_client: Client,
    base_url: String,
    max_body_bytes: u64,
}

impl HttpGateway {
    /// Create a gateway from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| TransportError::RequestConfig(e.to_string()))?;

        // Uploads get their own client so the long timeout never leaks into
        // ordinary requests.
        let upload_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.upload_timeout())
            .build()
            .map_err(|e| TransportError::RequestConfig(e.to_string()))?;

        Ok(Self {
            client,
            upload_client,
            base_url: config.resolved_base_url().trim_end_matches('/').to_string(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json")
    }

    /// Send a request and decode a 2xx JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        debug!("{} request", label);
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            debug!("{} failed after {:?}: {}", label, start.elapsed(), e);
            TransportError::from(e)
        })?;

        let status = response.status();
        debug!(
            "{} response {} in {}ms",
            label,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(server_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::RequestConfig(format!("invalid {} response: {}", label, e)))
    }
}

/// Build a `Server` error from a non-2xx response.
///
/// The message comes from the body's `message` field when there is one,
/// otherwise from the status text.
async fn server_error(response: Response) -> TransportError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    TransportError::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DocumentApi for HttpGateway {
    async fn search(&self, query: &SearchQuery) -> Result<serde_json::Value, TransportError> {
        let request = self.json_request(Method::GET, "/search").query(&[
            ("q", query.query.clone()),
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ]);
        self.send("search", request).await
    }

    async fn ask(&self, question: &str) -> Result<serde_json::Value, TransportError> {
        let request = self
            .json_request(Method::POST, "/ask")
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "question": question }));
        self.send("ask", request).await
    }

    async fn ingest(
        &self,
        parts: Vec<UploadPart>,
        progress: Option<ProgressFn>,
    ) -> Result<IngestPayload, TransportError> {
        let total = check_body_size(&parts, self.max_body_bytes)?;
        let tracker = ProgressTracker::new(Some(total), progress);
        let form = build_form(&parts, &tracker).await?;

        debug!("uploading {} file(s), {} bytes", parts.len(), total);
        // reqwest sets the multipart content type with its boundary.
        let request = self
            .upload_client
            .post(self.url("/ingest"))
            .header(ACCEPT, "application/json")
            .multipart(form);
        self.send("ingest", request).await
    }

    async fn list_files(&self) -> Result<StoredFilesPayload, TransportError> {
        let request = self.json_request(Method::GET, "/ingest/files");
        self.send("list files", request).await
    }

    async fn delete_file(&self, id: &str) -> Result<DeletePayload, TransportError> {
        let path = format!("/ingest/files/{}", urlencoding::encode(id));
        let request = self.json_request(Method::DELETE, &path);
        self.send("delete file", request).await
    }

    async fn delete_all_files(&self) -> Result<DeletePayload, TransportError> {
        let request = self
            .json_request(Method::DELETE, "/ingest/files")
            .query(&[("confirm", "true")]);
        self.send("delete all files", request).await
    }
}
