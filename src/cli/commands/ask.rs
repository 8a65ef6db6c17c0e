//! Question command.

use console::style;

use docsearch::actions::{ask_question, Completion};
use docsearch::models::LoadingStatus;
use docsearch::utils::{format_answer, format_score};

use super::helpers::rejection;
use crate::cli::{icons, Context};

pub async fn cmd_ask(ctx: &Context, question: &str) -> anyhow::Result<LoadingStatus> {
    if let Completion::Rejected(errors) = ask_question(&ctx.store, &ctx.api, question).await {
        return Err(rejection(&errors));
    }

    let state = ctx.store.qa.snapshot().await;
    if let Some(error) = state.error() {
        println!("{} {}", icons::error(), error);
        return Ok(state.loading());
    }

    if state.lacks_context() {
        println!("{} {}", icons::warn(), state.answer().unwrap_or_default());
    } else {
        println!(
            "{}",
            format_answer(state.answer().unwrap_or_default(), state.citations())
        );
    }
    if let Some(confidence) = state.confidence_score() {
        println!(
            "\n{}",
            style(format!("Confidence: {}", format_score(confidence))).dim()
        );
    }

    Ok(state.loading())
}
