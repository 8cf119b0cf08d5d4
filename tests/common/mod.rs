#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use shortlink::config::ShortLinkSettings;
use shortlink::domain::clock::FixedClock;
use shortlink::domain::host_resolver::{HostResolver, ResolveError};
use shortlink::infrastructure::persistence::{self, SqliteUrlRepository};
use shortlink::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::IpAddr;
use std::sync::Arc;

pub const BASE_DOMAIN: &str = "myurlshortener.live/";

/// Resolves every host to one public address, except `*.invalid`.
pub struct StaticResolver;

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        if host.ends_with(".invalid") {
            return Err(ResolveError::LookupFailed("NXDOMAIN".to_string()));
        }
        Ok(vec!["93.184.215.14".parse().unwrap()])
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_today() -> NaiveDate {
    date(2026, 10, 19)
}

/// Fresh in-memory database with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    persistence::migrate(&pool).await.unwrap();
    pool
}

pub async fn create_test_record(
    pool: &SqlitePool,
    original_url: &str,
    short_url: &str,
    expiry_date: NaiveDate,
    clicks: i64,
) {
    sqlx::query(
        "INSERT INTO urls (original_url, short_url, expiry_date, clicks) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(original_url)
    .bind(short_url)
    .bind(expiry_date)
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn clicks_of(pool: &SqlitePool, short_url: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE short_url = ?1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// State over the SQLite repository with a clock pinned to [`test_today`].
pub fn create_test_state(pool: SqlitePool) -> (AppState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(test_today()));
    let repository = Arc::new(SqliteUrlRepository::new(Arc::new(pool)));

    let state = AppState::new(
        repository,
        Arc::new(StaticResolver),
        clock.clone(),
        ShortLinkSettings::default(),
    );

    (state, clock)
}
