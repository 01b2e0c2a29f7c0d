//! CLI administration tool for redis-shortener.
//!
//! Talks to the same store as the server, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Show where a code points (no click is recorded)
//! cargo run --bin admin -- lookup abc123
//!
//! # Show the click count for a code
//! cargo run --bin admin -- clicks abc123
//!
//! # Check store connectivity
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` or `REDIS_ADDR`, `STORE_BACKEND`, `BASE_URL`.

use redis_shortener::application::services::{ClickTracker, LinkService};
use redis_shortener::config::{self, Config};
use redis_shortener::domain::repositories::LinkStore;
use redis_shortener::error::AppError;
use redis_shortener::server::connect_store;
use redis_shortener::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing redis-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Long URL to shorten
        url: String,
    },

    /// Show the URL stored for a code
    Lookup {
        /// Short code
        code: String,
    },

    /// Show the click count for a code
    Clicks {
        /// Short code
        code: String,
    },

    /// Check store connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .init();

    let store = connect_store(&config)
        .await
        .context("Failed to connect to store")?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, store, &url).await?,
        Commands::Lookup { code } => lookup(&config, store, &code).await?,
        Commands::Clicks { code } => clicks(&config, store, &code).await?,
        Commands::Ping => ping(&config, store).await?,
    }

    Ok(())
}

/// Builds the service the HTTP API uses.
///
/// The click queue is never read here: none of the admin commands
/// record clicks.
fn link_service(config: &Config, store: Arc<dyn LinkStore>) -> LinkService {
    let (click_tx, _click_rx) = mpsc::channel(1);
    LinkService::new(
        store,
        Arc::new(RandomCodeGenerator::new()),
        ClickTracker::new(click_tx),
        config.base_url.clone(),
    )
}

async fn shorten(config: &Config, store: Arc<dyn LinkStore>, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let link = link_service(config, store)
        .shorten(url)
        .await
        .map_err(describe)?;

    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", link.short_url.cyan());
    println!("  Target:    {}", link.long_url.bright_black());
    println!();

    Ok(())
}

async fn lookup(config: &Config, store: Arc<dyn LinkStore>, code: &str) -> Result<()> {
    match link_service(config, store).lookup(code).await {
        Ok(url) => {
            println!("  {} → {}", code.bright_yellow(), url.cyan());
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("  No link for code '{code}'").yellow());
        }
        Err(e) => return Err(describe(e)),
    }

    Ok(())
}

async fn clicks(config: &Config, store: Arc<dyn LinkStore>, code: &str) -> Result<()> {
    let count = link_service(config, store)
        .clicks(code)
        .await
        .map_err(describe)?;

    println!(
        "  {}  clicks: {}",
        code.bright_yellow(),
        count.to_string().bright_green().bold()
    );

    Ok(())
}

async fn ping(config: &Config, store: Arc<dyn LinkStore>) -> Result<()> {
    println!("{}", "🔍 Checking store connection...".bright_blue());

    store
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;

    println!(
        "{} ({})",
        "✅ Store connection OK".green().bold(),
        config.store_backend.to_string().bright_black()
    );

    Ok(())
}

fn describe(err: AppError) -> anyhow::Error {
    let info = err.to_error_info();
    anyhow::anyhow!("{}: {}", info.code, info.message)
}
