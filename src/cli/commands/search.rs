//! Search command.

use console::style;

use docsearch::actions::{run_search, Completion};
use docsearch::models::LoadingStatus;
use docsearch::utils::{format_score, highlight_with};

use super::helpers::{one_line, rejection, truncate};
use crate::cli::{icons, Context};

const EXCERPT_CHARS: usize = 240;

pub async fn cmd_search(
    ctx: &Context,
    query: &str,
    page: u32,
    limit: Option<u32>,
) -> anyhow::Result<LoadingStatus> {
    let page_size = limit.unwrap_or(ctx.config.page_size);
    if page_size == 0 {
        anyhow::bail!("--limit must be greater than 0");
    }

    if let Completion::Rejected(errors) =
        run_search(&ctx.store, &ctx.api, query, page, page_size).await
    {
        return Err(rejection(&errors));
    }

    let state = ctx.store.search.snapshot().await;
    if let Some(error) = state.error() {
        println!("{} {}", icons::error(), error);
        return Ok(state.loading());
    }

    let results = state.results();
    if results.is_empty() {
        println!("{} No results for '{}'", icons::warn(), state.query());
        return Ok(state.loading());
    }

    let pagination = state.pagination();
    let first = (pagination.current_page - 1) as u64 * pagination.page_size as u64;
    for (i, result) in results.iter().enumerate() {
        let location = match result.page {
            Some(page) => format!("{}, p. {}", result.document_name, page),
            None => result.document_name.clone(),
        };
        println!(
            "\n{} {} {}",
            style(format!("{}.", first + i as u64 + 1)).bold(),
            style(location).cyan(),
            style(format!("({})", format_score(result.relevance_score))).dim()
        );
        let excerpt = truncate(&one_line(&result.text), EXCERPT_CHARS);
        let marked = highlight_with(&excerpt, state.query(), |term| {
            style(term).yellow().bold().to_string()
        });
        println!("   {}", marked);
    }

    println!(
        "\n{} Page {} of {} ({} results)",
        icons::info(),
        pagination.current_page,
        pagination.total_pages,
        pagination.total_results
    );
    if let Some(previous) = state.previous_page() {
        println!("  {} previous: --page {}", icons::bullet(), previous);
    }
    if let Some(next) = state.next_page() {
        println!("  {} next: --page {}", icons::bullet(), next);
    }

    Ok(state.loading())
}
