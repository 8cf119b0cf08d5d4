mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use shortlink::routes::app_router;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_router_shorten_then_redirect() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = common::create_test_state(pool);
    let app = app_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::post("/shorten")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "original_url": "https://example.com/routed" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let short_url = body_json(response).await["short_url"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(
            Request::get(format!("/redirect?short_url={short_url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/routed"
    );
}

#[tokio::test]
async fn test_router_trims_trailing_slash() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = common::create_test_state(pool);

    let response = app_router(state)
        .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_router_allows_any_origin() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = common::create_test_state(pool);

    let response = app_router(state)
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "https://frontend.example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_router_unknown_route() {
    let pool = common::create_test_pool().await;
    let (state, _clock) = common::create_test_state(pool);

    let response = app_router(state)
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
