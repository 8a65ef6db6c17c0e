//! CLI parser and dispatch.

mod commands;
mod icons;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docsearch::models::LoadingStatus;
use docsearch::{ClientConfig, HttpGateway, Store};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Search, question answering, and uploads for a document backend")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and DOCSEARCH_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Keyword search over uploaded documents
    Search {
        /// Search query
        query: String,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Results per page (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Ask a question answered from the uploaded documents
    Ask {
        /// The question
        question: String,
    },

    /// Upload PDF or text files
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Manage files stored on the backend
    Files {
        #[command(subcommand)]
        command: FilesCommands,
    },
}

#[derive(Subcommand)]
enum FilesCommands {
    /// List stored files
    List,
    /// Delete one stored file
    Delete {
        /// File ID (see `files list`)
        id: String,
    },
    /// Delete every stored file
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Everything a command needs.
pub(crate) struct Context {
    pub config: ClientConfig,
    pub store: Store,
    pub api: HttpGateway,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
        config.validate()?;
    }
    Ok(config)
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let api = HttpGateway::new(&config)?;
    let ctx = Context {
        config,
        store: Store::new(),
        api,
    };

    let status = match cli.command {
        Commands::Search { query, page, limit } => {
            commands::search::cmd_search(&ctx, &query, page, limit).await?
        }
        Commands::Ask { question } => commands::ask::cmd_ask(&ctx, &question).await?,
        Commands::Upload { paths, quiet } => {
            commands::upload::cmd_upload(&ctx, &paths, !quiet).await?
        }
        Commands::Files { command } => match command {
            FilesCommands::List => commands::files::cmd_files_list(&ctx).await?,
            FilesCommands::Delete { id } => commands::files::cmd_files_delete(&ctx, &id).await?,
            FilesCommands::Clear { yes } => commands::files::cmd_files_clear(&ctx, yes).await?,
        },
    };

    if status == LoadingStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}
