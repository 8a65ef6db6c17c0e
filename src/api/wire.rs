//! Raw backend payload shapes.
//!
//! Search and Q&A payloads are read as loose JSON and canonicalized by the
//! normalizers; the ingest endpoints have a fixed contract and are typed here.

use serde::Deserialize;

/// Response of `POST /ingest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestPayload {
    #[serde(rename = "archivos_procesados", default)]
    pub processed: Vec<IngestedFile>,
    #[serde(rename = "errores", default)]
    pub errors: Vec<IngestError>,
    #[serde(rename = "total_procesados", default)]
    pub total_processed: u64,
    #[serde(rename = "total_errores", default)]
    pub total_errors: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestedFile {
    #[serde(rename = "archivo")]
    pub filename: String,
    #[serde(rename = "ruta", default)]
    pub path: String,
    #[serde(rename = "tamano_bytes", default)]
    pub size_bytes: u64,
    #[serde(rename = "tipo", default)]
    pub file_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestError {
    #[serde(rename = "archivo")]
    pub filename: String,
    #[serde(default)]
    pub error: String,
}

/// One entry of `GET /ingest/files`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFilePayload {
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub num_characters: Option<u64>,
    #[serde(default)]
    pub path: Option<String>,
}

/// `GET /ingest/files` answers either with a bare list or a `{files: [...]}` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredFilesPayload {
    List(Vec<StoredFilePayload>),
    Envelope { files: Vec<StoredFilePayload> },
}

impl StoredFilesPayload {
    pub fn into_files(self) -> Vec<StoredFilePayload> {
        match self {
            StoredFilesPayload::List(files) => files,
            StoredFilesPayload::Envelope { files } => files,
        }
    }
}

/// Response of the delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeletePayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted_files: Vec<String>,
    #[serde(default)]
    pub total_deleted: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_payload_reads_backend_field_names() {
        let payload: IngestPayload = serde_json::from_str(
            r#"{
                "archivos_procesados": [
                    {"archivo": "a.pdf", "ruta": "/data/a.pdf", "tamano_bytes": 1200, "tipo": "application/pdf"}
                ],
                "errores": [{"archivo": "b.txt", "error": "empty file"}],
                "total_procesados": 1,
                "total_errores": 1
            }"#,
        )
        .unwrap();
        assert_eq!(payload.processed[0].filename, "a.pdf");
        assert_eq!(payload.processed[0].size_bytes, 1200);
        assert_eq!(payload.errors[0].error, "empty file");
        assert_eq!(payload.total_errors, 1);
    }

    #[test]
    fn test_stored_files_accepts_list_and_envelope() {
        let list: StoredFilesPayload =
            serde_json::from_str(r#"[{"id": 1, "name": "a.pdf", "size": 3}]"#).unwrap();
        assert_eq!(list.into_files().len(), 1);

        let envelope: StoredFilesPayload =
            serde_json::from_str(r#"{"files": [{"id": "x", "name": "a.pdf"}]}"#).unwrap();
        assert_eq!(envelope.into_files()[0].name, "a.pdf");
    }
}
