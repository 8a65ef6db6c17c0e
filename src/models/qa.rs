//! Canonical question-answering shapes.

use serde::{Deserialize, Serialize};

/// Answer shown when the backend reports it lacked context to answer.
pub const INSUFFICIENT_CONTEXT_ANSWER: &str =
    "I could not find enough information in the uploaded documents to answer your question.";

/// Where a citation came from inside the backend index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CitationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u32>,
}

/// An excerpt supporting a generated answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCitation {
    /// The excerpt itself.
    pub content: String,
    /// Title or name of the source document.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Relevance in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CitationMetadata>,
}

impl AnswerCitation {
    /// Best label for the citation's document.
    pub fn label(&self) -> &str {
        match self.document_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.source,
        }
    }
}

/// Normalized answer payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer: String,
    pub citations: Vec<AnswerCitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_enough_context: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl Answer {
    /// The answer substituted when context was insufficient.
    pub fn insufficient_context(confidence_score: Option<f64>) -> Self {
        Self {
            answer: INSUFFICIENT_CONTEXT_ANSWER.to_string(),
            citations: Vec::new(),
            has_enough_context: Some(false),
            confidence_score,
        }
    }

    /// Anything short of an explicit `true` means the backend lacked context.
    pub fn lacks_context(&self) -> bool {
        self.has_enough_context != Some(true)
    }
}
