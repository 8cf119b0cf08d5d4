mod common;

use chrono::Days;
use shortlink::domain::clock::FixedClock;
use shortlink::prelude::*;
use shortlink::infrastructure::persistence::{InMemoryUrlRepository, SqliteUrlRepository};
use std::sync::Arc;

fn services(repository: Arc<dyn UrlRepository>) -> (AppState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(common::test_today()));
    let state = AppState::new(
        repository,
        Arc::new(common::StaticResolver),
        clock.clone(),
        ShortLinkSettings::default(),
    );
    (state, clock)
}

#[tokio::test]
async fn test_shorten_inspect_resolve_scenario() {
    let (state, _clock) = services(Arc::new(InMemoryUrlRepository::new()));

    let shortened = state
        .shortener
        .shorten("https://example.com/page", Some(30))
        .await
        .unwrap();

    assert!(shortened.short_url.starts_with(common::BASE_DOMAIN));
    assert_eq!(shortened.short_url.len(), 29);
    assert_eq!(
        shortened.expiry_date,
        common::test_today().checked_add_days(Days::new(30)).unwrap()
    );

    let record = state.resolver.inspect(&shortened.short_url).await.unwrap();
    assert_eq!(record.original_url, "https://example.com/page");
    assert_eq!(record.clicks, 0);

    let destination = state.resolver.resolve(&shortened.short_url).await.unwrap();
    assert_eq!(destination, "https://example.com/page");

    let record = state.resolver.inspect(&shortened.short_url).await.unwrap();
    assert_eq!(record.clicks, 1);
}

#[tokio::test]
async fn test_duplicate_submission_reports_first_alias() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = services(Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone()))));

    let first = state
        .shortener
        .shorten("https://example.com/once", None)
        .await
        .unwrap();

    let err = state
        .shortener
        .shorten("https://example.com/once", Some(10))
        .await
        .unwrap_err();

    match err {
        AppError::DuplicateUrl { short_url } => assert_eq!(short_url, first.short_url),
        other => panic!("expected DuplicateUrl, got {other:?}"),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_concurrent_creation_keeps_one_record() {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (state, _clock) = services(repository.clone());

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let shortener = state.shortener.clone();
            tokio::spawn(async move { shortener.shorten("https://example.com/race", None).await })
        })
        .collect();

    let mut created = Vec::new();
    let mut reported = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(shortened) => created.push(shortened.short_url),
            Err(AppError::DuplicateUrl { short_url }) => reported.push(short_url),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created.len(), 1);
    assert!(reported.iter().all(|short_url| short_url == &created[0]));

    let summary = repository.summary(common::test_today()).await.unwrap();
    assert_eq!(summary.records, 1);
}

#[tokio::test]
async fn test_concurrent_creation_keeps_one_sqlite_row() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = services(Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone()))));

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let shortener = state.shortener.clone();
            tokio::spawn(async move {
                shortener
                    .shorten("https://example.com/sqlite-race", None)
                    .await
            })
        })
        .collect();

    let mut created = Vec::new();
    let mut reported = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(shortened) => created.push(shortened.short_url),
            Err(AppError::DuplicateUrl { short_url }) => reported.push(short_url),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created.len(), 1);
    assert_eq!(reported.len(), 19);
    assert!(reported.iter().all(|short_url| short_url == &created[0]));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_sqlite_insert_of_taken_url_names_original_field() {
    let pool = common::create_test_pool().await;
    common::create_test_record(
        &pool,
        "https://example.com/taken",
        "myurlshortener.live/winner123",
        common::date(2027, 1, 1),
        0,
    )
    .await;

    let repository = SqliteUrlRepository::new(Arc::new(pool));
    let err = repository
        .insert(NewUrlRecord {
            original_url: "https://example.com/taken".to_string(),
            short_url: "myurlshortener.live/loser0001".to_string(),
            expiry_date: common::date(2027, 1, 1),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Conflict {
            field: shortlink::error::UniqueField::OriginalUrl,
            ..
        }
    ));
}

#[tokio::test]
async fn test_one_day_link_lifecycle() {
    let (state, clock) = services(Arc::new(InMemoryUrlRepository::new()));

    let shortened = state
        .shortener
        .shorten("https://example.com/brief", Some(1))
        .await
        .unwrap();

    assert!(state.resolver.resolve(&shortened.short_url).await.is_ok());

    clock.set(shortened.expiry_date);
    assert!(state.resolver.resolve(&shortened.short_url).await.is_ok());

    clock.set(shortened.expiry_date.succ_opt().unwrap());
    assert!(matches!(
        state.resolver.resolve(&shortened.short_url).await.unwrap_err(),
        AppError::Expired { .. }
    ));
    assert!(matches!(
        state.resolver.inspect(&shortened.short_url).await.unwrap_err(),
        AppError::Expired { .. }
    ));
}

#[tokio::test]
async fn test_self_referential_url_never_persisted() {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (state, _clock) = services(repository.clone());

    let err = state
        .shortener
        .shorten("http://MYURLSHORTENER.LIVE/abc", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidUrl { .. }));

    let summary = repository.summary(common::test_today()).await.unwrap();
    assert_eq!(summary.records, 0);
}

#[tokio::test]
async fn test_expiry_bounds_checked_before_persistence() {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (state, _clock) = services(repository.clone());

    for days in [0, 1826] {
        let err = state
            .shortener
            .shorten("https://example.com/bounds", Some(days))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    let summary = repository.summary(common::test_today()).await.unwrap();
    assert_eq!(summary.records, 0);
}
