//! Answer and citation normalization.

use serde_json::Value;

use super::{
    bool_field, canonicalize, f64_field, opt_string_field, page_field, string_field, u32_field,
    unit_score, FieldAlias,
};
use crate::models::{Answer, AnswerCitation, CitationMetadata};

const ANSWER_FIELDS: &[FieldAlias] = &[
    FieldAlias {
        canonical: "answer",
        aliases: &["answer"],
    },
    FieldAlias {
        canonical: "citations",
        aliases: &["citations", "sources"],
    },
    FieldAlias {
        canonical: "hasEnoughContext",
        aliases: &["hasEnoughContext", "has_enough_context"],
    },
    FieldAlias {
        canonical: "confidenceScore",
        aliases: &["confidenceScore", "confidence_score"],
    },
];

const CITATION_FIELDS: &[FieldAlias] = &[
    FieldAlias {
        canonical: "content",
        aliases: &["content", "text"],
    },
    FieldAlias {
        canonical: "source",
        aliases: &["source", "document"],
    },
    FieldAlias {
        canonical: "documentName",
        aliases: &["documentName", "document_name", "document"],
    },
    FieldAlias {
        canonical: "page",
        aliases: &["page", "page_number"],
    },
    FieldAlias {
        canonical: "score",
        aliases: &["score", "relevanceScore", "relevance_score"],
    },
    FieldAlias {
        canonical: "metadata",
        aliases: &["metadata"],
    },
];

const METADATA_FIELDS: &[FieldAlias] = &[
    FieldAlias {
        canonical: "document_id",
        aliases: &["document_id", "documentId"],
    },
    FieldAlias {
        canonical: "chunk_index",
        aliases: &["chunk_index", "chunkIndex"],
    },
];

/// Normalize a backend answer.
///
/// Unless the backend confirms it had enough context, the answer text is
/// replaced by the fixed fallback and citations are dropped. A missing or
/// null flag counts as not enough context.
pub fn normalize_answer(raw: &Value) -> Answer {
    let fields = canonicalize(raw, ANSWER_FIELDS);
    let has_enough_context = bool_field(&fields, "hasEnoughContext");
    let confidence_score = f64_field(&fields, "confidenceScore").map(unit_score);

    if has_enough_context != Some(true) {
        return Answer::insufficient_context(confidence_score);
    }

    let citations = fields
        .get("citations")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_citation).collect())
        .unwrap_or_default();

    Answer {
        answer: string_field(&fields, "answer"),
        citations,
        has_enough_context,
        confidence_score,
    }
}

/// Map one backend citation onto [`AnswerCitation`]. Never fails.
pub fn normalize_citation(raw: &Value) -> AnswerCitation {
    if let Value::String(text) = raw {
        return AnswerCitation {
            content: text.clone(),
            ..Default::default()
        };
    }

    let fields = canonicalize(raw, CITATION_FIELDS);
    AnswerCitation {
        content: string_field(&fields, "content"),
        source: string_field(&fields, "source"),
        document_name: opt_string_field(&fields, "documentName"),
        page: page_field(&fields, "page"),
        score: f64_field(&fields, "score").map(unit_score),
        metadata: fields.get("metadata").and_then(normalize_metadata),
    }
}

fn normalize_metadata(raw: &Value) -> Option<CitationMetadata> {
    let fields = canonicalize(raw, METADATA_FIELDS);
    let metadata = CitationMetadata {
        document_id: opt_string_field(&fields, "document_id"),
        chunk_index: u32_field(&fields, "chunk_index"),
    };
    if metadata == CitationMetadata::default() {
        None
    } else {
        Some(metadata)
    }
}
