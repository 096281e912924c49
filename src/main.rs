//! HTTP service that searches a GitHub user's public gists with a regular
//! expression.
//!
//! # Usage
//! ```bash
//! gist-search serve                          # Listen on 0.0.0.0:9876
//! gist-search serve --port 8080 --per-page 50
//! ```
//!
//! # Endpoints
//! - `GET /ping` - Liveness check, answers `pong`
//! - `POST /api/v1/search` - Search a user's gists
//!
//! # Test
//! ```bash
//! curl localhost:9876/ping
//! curl -X POST localhost:9876/api/v1/search \
//!      -H 'Content-Type: application/json' \
//!      -d '{"username": "octocat", "pattern": "#!/usr/bin/env"}'
//! ```
//!
//! Matching is anchored at the start of each file. Gists the platform
//! marks as truncated are not searched.
//!
//! CHANGELOG (recent first, max 5 entries)
//! 10/17/2026 - Initial implementation

mod api;
mod config;
mod error;
mod handlers;
mod lister;
mod models;
mod searcher;
mod service;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::api::GitHubClient;
use crate::config::SearchConfig;
use crate::service::GistSearchService;

const DEFAULT_LOG_FILTER: &str = "gist_search=debug,actix_web=info";

#[derive(Parser)]
#[command(name = "gist-search")]
#[command(about = "Search a GitHub user's public gists with a regular expression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "GIST_SEARCH_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(short, long, env = "GIST_SEARCH_PORT", default_value_t = 9876)]
    port: u16,

    /// GitHub REST API base URL
    #[arg(long, env = "GIST_SEARCH_API_BASE", default_value = "https://api.github.com")]
    api_base: String,

    /// Gists requested per listing page (1-100)
    #[arg(long, env = "GIST_SEARCH_PER_PAGE", default_value_t = 100)]
    per_page: u32,

    /// Maximum listing pages fetched per user (raised to reach 3000 gists)
    #[arg(long, env = "GIST_SEARCH_MAX_PAGES", default_value_t = 30)]
    max_pages: u32,

    /// Simultaneous file fetches per search
    #[arg(long, env = "GIST_SEARCH_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Timeout for each call to GitHub, in seconds
    #[arg(long, env = "GIST_SEARCH_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Deadline for a whole search request, in seconds
    #[arg(long, env = "GIST_SEARCH_DEADLINE_SECS", default_value_t = 120)]
    search_deadline_secs: u64,
}

impl ServeArgs {
    fn search_config(&self) -> Result<SearchConfig> {
        let config = SearchConfig::new(
            self.per_page,
            self.max_pages,
            self.concurrency,
            Duration::from_secs(self.search_deadline_secs),
        )?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => cmd_serve(args),
    }
}

fn cmd_serve(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = args.search_config().context("Invalid search configuration")?;
    let client = GitHubClient::new(
        &args.api_base,
        Duration::from_secs(args.request_timeout_secs),
    )
    .context("Failed to create GitHub client")?;
    let service = web::Data::new(GistSearchService::new(Arc::new(client), config));

    tracing::info!(
        host = %args.host,
        port = args.port,
        api_base = %args.api_base,
        "Starting gist-search server"
    );

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Logger::default())
                .app_data(service.clone())
                .configure(handlers::configure_routes)
        })
        .bind((args.host.as_str(), args.port))
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?
        .run()
        .await
        .context("Server error")
    })
}
