//! Upload command.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use docsearch::actions::{upload_pending, Completion};
use docsearch::api::ProgressFn;
use docsearch::local_files::{CandidateFile, PendingQueue, PreviewRegistry};
use docsearch::models::LoadingStatus;
use docsearch::utils::{format_size, mime_icon};

use super::helpers::rejection;
use crate::cli::{icons, Context};

pub async fn cmd_upload(
    ctx: &Context,
    paths: &[PathBuf],
    show_progress: bool,
) -> anyhow::Result<LoadingStatus> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        match CandidateFile::from_path(path).await {
            Ok(file) => candidates.push(file),
            Err(e) => println!("{} {}: {}", icons::warn(), path.display(), e),
        }
    }

    let mut queue = PendingQueue::new(PreviewRegistry::new(), ctx.config.max_file_bytes);
    let added = queue.add_all(candidates);
    for name in &added.duplicates {
        println!("{} {} is already queued", icons::warn(), name);
    }
    for e in &added.rejected {
        println!("{} {}", icons::error(), e);
    }
    if queue.is_empty() {
        anyhow::bail!("No files to upload");
    }

    let total: u64 = queue.files().map(|f| f.size).sum();
    println!(
        "{} Uploading {} file(s), {}",
        icons::info(),
        queue.len(),
        format_size(total)
    );

    let bar = show_progress.then(progress_bar);
    let progress: Option<ProgressFn> = bar.clone().map(|bar| {
        let callback: ProgressFn = Arc::new(move |percent: u8| bar.set_position(percent as u64));
        callback
    });

    let completion = upload_pending(
        &ctx.store,
        &ctx.api,
        queue.submit(),
        ctx.config.max_file_bytes,
        progress,
    )
    .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let report = match completion {
        Completion::Rejected(errors) => return Err(rejection(&errors)),
        Completion::Succeeded(report) => Some(report),
        Completion::Failed(_) | Completion::Superseded => None,
    };

    let state = ctx.store.uploader.snapshot().await;
    if let Some(error) = state.error() {
        println!("{} {}", icons::error(), error);
        return Ok(state.loading());
    }

    if let Some(report) = report {
        for doc in &report.documents {
            println!(
                "{} {} {} {}",
                icons::success(),
                mime_icon(&doc.mime_type),
                doc.filename,
                style(format_size(doc.size)).dim()
            );
        }
        for name in &report.unreported {
            println!("{} {}: no result from the server", icons::warn(), name);
        }
        if report.is_partial() {
            println!(
                "{} {} of {} file(s) failed",
                icons::warn(),
                report.errors.len(),
                report.errors.len() + report.documents.len()
            );
        }
    }
    for e in state.file_errors() {
        println!(
            "{} {}: {} {}",
            icons::rejected(e.rejected_by),
            e.filename,
            e.error,
            icons::origin_label(e.rejected_by)
        );
    }
    if !state.uploaded_files().is_empty() {
        println!(
            "{} {} file(s) uploaded this session, {}",
            icons::info(),
            state.uploaded_files().len(),
            format_size(state.total_uploaded_bytes())
        );
    }

    Ok(state.loading())
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let template = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}% {wide_msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(template);
    bar.set_message("Uploading...");
    bar
}
