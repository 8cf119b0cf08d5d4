//! CLI administration tool for shortlink.
//!
//! Works directly on the configured database, without going through the HTTP
//! API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (full validation, including DNS)
//! cargo run --bin admin -- shorten https://example.com/page --days 30
//!
//! # Show a record without counting a click
//! cargo run --bin admin -- expand myurlshortener.live/Ab3dE6gH9
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment variables as the server (`DATABASE_URL`,
//! `BASE_DOMAIN`, expiry bounds, ...).

use shortlink::config::{self, Config};
use shortlink::domain::clock::{Clock, SystemClock};
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::dns::SystemResolver;
use shortlink::infrastructure::persistence::{self, SqliteUrlRepository};
use shortlink::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten
        url: String,

        /// Days until the short URL expires
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Show the record behind a short URL
    Expand {
        /// Short URL, e.g. myurlshortener.live/Ab3dE6gH9
        short_url: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = persistence::connect(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url, days } => shorten(&config, &pool, &url, days).await?,
        Commands::Expand { short_url } => expand(&config, &pool, &short_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn build_state(config: &Config, pool: &SqlitePool) -> AppState {
    AppState::new(
        Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(SystemResolver::new()),
        Arc::new(SystemClock),
        config.short_link_settings(),
    )
}

/// Creates a short URL through the same service the HTTP API uses.
async fn shorten(config: &Config, pool: &SqlitePool, url: &str, days: Option<i64>) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let state = build_state(config, pool);

    match state.shortener.shorten(url, days).await {
        Ok(shortened) => {
            println!("  Original:  {}", url.cyan());
            println!("  Short URL: {}", shortened.short_url.bright_yellow().bold());
            println!("  Expires:   {}", shortened.expiry_date.to_string().bright_white());
            println!();
            println!("{}", "✅ Short URL created".green().bold());
        }
        Err(AppError::DuplicateUrl { short_url }) => {
            println!("{}", "⚠️  URL already shortened".yellow());
            println!("  Short URL: {}", short_url.bright_yellow().bold());
        }
        Err(e) => return Err(e.into()),
    }
    println!();

    Ok(())
}

/// Prints a record without counting a click.
async fn expand(config: &Config, pool: &SqlitePool, short_url: &str) -> Result<()> {
    println!("{}", "🔎 Expand URL".bright_blue().bold());
    println!();

    let state = build_state(config, pool);
    let record = state.resolver.inspect(short_url).await?;

    println!("  Short URL: {}", record.short_url.cyan());
    println!("  Original:  {}", record.original_url.bright_white());
    println!("  Expires:   {}", record.expiry_date.to_string().bright_black());
    println!("  Clicks:    {}", record.clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Displays record, click and expiry totals.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = SqliteUrlRepository::new(Arc::new(pool.clone()));
    let summary = repo.summary(SystemClock.today()).await?;

    println!(
        "  Short URLs: {}",
        summary.records.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:     {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Expired:    {}",
        summary.expired.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
