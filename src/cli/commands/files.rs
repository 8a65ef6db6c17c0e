//! Stored file commands.

use console::style;

use docsearch::actions::{delete_all_documents, delete_document, load_library, Completion};
use docsearch::models::LoadingStatus;
use docsearch::store::LibraryState;
use docsearch::utils::{format_size, mime_icon};

use super::helpers::{rejection, truncate};
use crate::cli::{icons, Context};

/// List stored files.
pub async fn cmd_files_list(ctx: &Context) -> anyhow::Result<LoadingStatus> {
    load_library(&ctx.store, &ctx.api).await;
    let state = ctx.store.library.snapshot().await;
    print_library(&state);
    Ok(state.loading())
}

/// Delete one stored file and show what remains.
pub async fn cmd_files_delete(ctx: &Context, id: &str) -> anyhow::Result<LoadingStatus> {
    if let Completion::Rejected(errors) = delete_document(&ctx.store, &ctx.api, id).await {
        return Err(rejection(&errors));
    }
    let state = ctx.store.library.snapshot().await;
    print_library(&state);
    Ok(state.loading())
}

/// Delete every stored file.
pub async fn cmd_files_clear(ctx: &Context, yes: bool) -> anyhow::Result<LoadingStatus> {
    if !yes {
        println!(
            "{} This deletes every stored file. Re-run with --yes to confirm.",
            icons::warn()
        );
        return Ok(LoadingStatus::Idle);
    }

    let completion = delete_all_documents(&ctx.store, &ctx.api).await;
    let state = ctx.store.library.snapshot().await;
    if let Some(error) = state.error() {
        println!("{} {}", icons::error(), error);
        return Ok(state.loading());
    }
    if let Completion::Succeeded(report) = completion {
        println!("{} {}", icons::success(), report.message);
        for name in &report.deleted_files {
            println!("  {} {}", icons::bullet(), name);
        }
    }
    Ok(state.loading())
}

fn print_library(state: &LibraryState) {
    if let Some(error) = state.error() {
        println!("{} {}", icons::error(), error);
        return;
    }
    if let Some(message) = state.message() {
        println!("{} {}", icons::success(), message);
    }

    let files = state.files();
    if files.is_empty() {
        println!("{} No stored files", icons::warn());
        return;
    }

    println!("\n{}", style("Stored files").bold());
    println!("{}", "-".repeat(72));
    println!("{:<12} {:<36} {:>10} Uploaded", "ID", "Name", "Size");
    println!("{}", "-".repeat(72));
    for file in files {
        let uploaded = file
            .uploaded_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {} {:<33} {:>10} {}",
            truncate(&file.id, 12),
            mime_icon(&file.content_type),
            truncate(&file.name, 33),
            format_size(file.size),
            uploaded
        );
    }
    println!(
        "\n{} {} file(s), {}",
        icons::info(),
        files.len(),
        format_size(state.total_bytes())
    );
}
