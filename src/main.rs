// This is the entry point of the blog moderation tool.
//
// **Architecture Overview:**
// - `core/` = Business logic (storage-agnostic): blogs, polarity validation, sweeps
// - `infra/` = Implementations of core traits (SQLite, in-memory)
// - `api/` = Resource handlers that turn core results into responses
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Parse the command line
// 4. Run the matching resource handler and print its response as JSON

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "api/api_layer.rs"]
mod api;
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::api::{blog_resource, entry_resource, ApiError, ApiResponse, AppState};
use crate::config::AppConfig;
use crate::core::blogs::{Blog, Emoji, Entry, Polarity};
use crate::infra::blogs::SqliteBlogStore;
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "blog_moderator", about = "Manage blogs and moderate their entries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create, update, inspect or delete blogs
    #[command(subcommand)]
    Blog(BlogCommand),
    /// Create, update, inspect or delete entries
    #[command(subcommand)]
    Entry(EntryCommand),
    /// Purge offending entries from every blog, or from one blog with --blog
    Clean {
        #[arg(long)]
        blog: Option<u64>,
    },
}

#[derive(Subcommand)]
enum BlogCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        handle: String,
        /// positive, negative or unset
        #[arg(long, default_value = "unset")]
        polarity: Polarity,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        handle: String,
        #[arg(long, default_value = "unset")]
        polarity: Polarity,
    },
    List,
    Get {
        id: u64,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand)]
enum EntryCommand {
    Create {
        #[arg(long)]
        blog: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// LIKE, LOVE, HAHA, WOW, SAD or ANGRY
        #[arg(long)]
        emoji: Emoji,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    Update {
        id: u64,
        #[arg(long)]
        blog: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        emoji: Emoji,
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    List {
        /// Only entries of this blog
        #[arg(long)]
        blog: Option<u64>,
    },
    Get {
        id: u64,
    },
    Delete {
        id: u64,
    },
}

fn build_entry(
    id: Option<u64>,
    blog_id: u64,
    title: String,
    content: String,
    emoji: Emoji,
    date: Option<DateTime<Utc>>,
) -> Entry {
    let mut entry = Entry::new(blog_id, title, content, emoji);
    entry.id = id;
    if let Some(date) = date {
        entry.date = date;
    }
    entry
}

/// Print the response (or the error response) as JSON. Returns whether the call succeeded.
fn emit<T: Serialize>(
    state: &AppState,
    result: Result<ApiResponse<T>, ApiError>,
) -> anyhow::Result<bool> {
    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(true)
        }
        Err(err) => {
            tracing::warn!(status = err.status(), "{}", err);
            println!("{}", serde_json::to_string_pretty(&err.to_response(&state.alerts))?);
            Ok(false)
        }
    }
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Blog(cmd) => match cmd {
            BlogCommand::Create {
                name,
                handle,
                polarity,
            } => emit(
                state,
                blog_resource::create_blog(state, Blog::new(name, handle, polarity)).await,
            ),
            BlogCommand::Update {
                id,
                name,
                handle,
                polarity,
            } => {
                let blog = Blog {
                    id: Some(id),
                    ..Blog::new(name, handle, polarity)
                };
                emit(state, blog_resource::update_blog(state, blog).await)
            }
            BlogCommand::List => emit(state, blog_resource::get_all_blogs(state).await),
            BlogCommand::Get { id } => emit(state, blog_resource::get_blog(state, id).await),
            BlogCommand::Delete { id } => emit(state, blog_resource::delete_blog(state, id).await),
        },
        Command::Entry(cmd) => match cmd {
            EntryCommand::Create {
                blog,
                title,
                content,
                emoji,
                date,
            } => {
                let entry = build_entry(None, blog, title, content, emoji, date);
                emit(state, entry_resource::create_entry(state, entry).await)
            }
            EntryCommand::Update {
                id,
                blog,
                title,
                content,
                emoji,
                date,
            } => {
                let entry = build_entry(Some(id), blog, title, content, emoji, date);
                emit(state, entry_resource::update_entry(state, entry).await)
            }
            EntryCommand::List { blog } => {
                emit(state, entry_resource::get_all_entries(state, blog).await)
            }
            EntryCommand::Get { id } => emit(state, entry_resource::get_entry(state, id).await),
            EntryCommand::Delete { id } => {
                emit(state, entry_resource::delete_entry(state, id).await)
            }
        },
        Command::Clean { blog: Some(id) } => {
            emit(state, blog_resource::clean_blog(state, id).await)
        }
        Command::Clean { blog: None } => emit(state, blog_resource::clean_blogs(state).await),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // One SQLite store shared by the blog and moderation services.
    let store = SqliteBlogStore::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open blog database at {}", config.database_url))?;
    tracing::debug!(database_url = %config.database_url, "Blog store ready");

    let state = AppState::new(config.app_name, Arc::new(store));

    if !run(&state, cli.command).await? {
        std::process::exit(1);
    }
    Ok(())
}
