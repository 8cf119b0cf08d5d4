//! Repository implementations.
//!
//! - [`SqliteUrlRepository`] - Durable storage through an SQLx SQLite pool
//! - [`InMemoryUrlRepository`] - Process-local storage for tests and throwaway runs

pub mod memory_url_repository;
pub mod sqlite_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use sqlite_url_repository::SqliteUrlRepository;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Opens the SQLite pool described by `config` and applies pending migrations.
///
/// The database file is created if missing. In-memory databases are limited to
/// a single connection because every SQLite connection to `:memory:` sees its
/// own private database.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened, or a
/// migration fails.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let in_memory = config.database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options =
        SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(config.db_connect_timeout));
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.db_max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Applies the embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")?;
    Ok(())
}
