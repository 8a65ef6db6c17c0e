//! Question-answering slice.

use tracing::debug;

use super::{failure_text, Reducer};
use crate::models::{Answer, AnswerCitation, LoadingStatus};

#[derive(Debug)]
pub enum QaEvent {
    Start { question: String },
    Succeed(Answer),
    Fail(String),
    SetQuestion(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaState {
    question: String,
    answer: Option<String>,
    citations: Vec<AnswerCitation>,
    confidence_score: Option<f64>,
    has_enough_context: Option<bool>,
    loading: LoadingStatus,
    error: Option<String>,
}

impl Reducer for QaState {
    type Event = QaEvent;
    const NAME: &'static str = "qa";

    fn reduce(&mut self, event: QaEvent) {
        match event {
            QaEvent::Start { question } => {
                self.question = question;
                self.loading = LoadingStatus::Pending;
                self.error = None;
            }
            QaEvent::Succeed(answer) => {
                if !self.loading.is_pending() {
                    debug!("qa: ignoring answer while {}", self.loading);
                    return;
                }
                let answer = if answer.lacks_context() {
                    Answer::insufficient_context(answer.confidence_score)
                } else {
                    answer
                };
                self.answer = Some(answer.answer);
                self.citations = answer.citations;
                self.confidence_score = answer.confidence_score;
                self.has_enough_context = answer.has_enough_context;
                self.loading = LoadingStatus::Succeeded;
                self.error = None;
            }
            QaEvent::Fail(message) => {
                if !self.loading.is_pending() {
                    debug!("qa: ignoring failure while {}", self.loading);
                    return;
                }
                self.loading = LoadingStatus::Failed;
                self.error = Some(failure_text(message));
            }
            QaEvent::SetQuestion(question) => self.question = question,
            QaEvent::Clear => *self = Self::default(),
        }
    }

    fn supersedes_in_flight(event: &QaEvent) -> bool {
        matches!(event, QaEvent::Clear)
    }
}

impl QaState {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn citations(&self) -> &[AnswerCitation] {
        &self.citations
    }

    pub fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }

    pub fn has_enough_context(&self) -> Option<bool> {
        self.has_enough_context
    }

    pub fn loading(&self) -> LoadingStatus {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The backend did not confirm it could answer from the documents.
    pub fn lacks_context(&self) -> bool {
        self.has_enough_context == Some(false)
    }
}
