mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::MockConnectInfoLayer;
use snaplink::api::handlers::redirect_handler;

#[tokio::test]
async fn redirect_returns_302_to_original_url() {
    let (state, mut rx, store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::seed_alias(&store, "abc123", "https://example.com/page", 30).await;

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/page");

    let visit = rx.try_recv().unwrap();
    assert_eq!(visit.code, "abc123");
    assert!(visit.referrer.is_none());
    assert!(visit.client_ip.is_some());
}

#[tokio::test]
async fn redirect_captures_referrer() {
    let (state, mut rx, store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::seed_alias(&store, "abc123", "https://example.com", 30).await;

    let response = server
        .get("/abc123")
        .add_header("Referer", "https://google.com")
        .await;

    assert_eq!(response.status_code(), 302);

    let visit = rx.try_recv().unwrap();
    assert_eq!(visit.referrer.as_deref(), Some("https://google.com"));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let (state, mut rx, _store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn expired_alias_is_gone_and_records_nothing() {
    let (state, mut rx, store) = common::create_test_state();
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::seed_alias(&store, "abc123", "https://example.com", -1).await;

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 410);
    assert!(rx.try_recv().is_err());
}
