use tracing::{info, warn};

use super::{failure_message, Completion, QA_ERROR_MESSAGE};
use crate::api::DocumentApi;
use crate::local_files::require_text;
use crate::models::Answer;
use crate::normalize::normalize_answer;
use crate::store::{QaEvent, Store};

/// Ask a natural-language question about the stored documents.
pub async fn ask_question(store: &Store, api: &dyn DocumentApi, question: &str) -> Completion<Answer> {
    let question = match require_text(question) {
        Ok(q) => q.to_string(),
        Err(e) => return Completion::rejected(e),
    };

    let ticket = store
        .qa
        .begin(QaEvent::Start {
            question: question.clone(),
        })
        .await;

    match api.ask(&question).await {
        Ok(raw) => {
            let answer = normalize_answer(&raw);
            if !store.qa.settle(ticket, QaEvent::Succeed(answer.clone())).await {
                return Completion::Superseded;
            }
            info!(
                "answered with {} citation(s){}",
                answer.citations.len(),
                if answer.lacks_context() {
                    " (insufficient context)"
                } else {
                    ""
                }
            );
            Completion::Succeeded(answer)
        }
        Err(e) => {
            warn!("question failed: {}", e);
            let message = failure_message(&e, QA_ERROR_MESSAGE);
            if !store.qa.settle(ticket, QaEvent::Fail(message.clone())).await {
                return Completion::Superseded;
            }
            Completion::Failed(message)
        }
    }
}
