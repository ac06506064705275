#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use chrono::{Duration, Utc};
use tokio::sync::mpsc;

use snaplink::application::services::AliasService;
use snaplink::domain::entities::NewAlias;
use snaplink::domain::repositories::AliasRepository;
use snaplink::domain::visit_event::VisitEvent;
use snaplink::infrastructure::log_ship::LogShip;
use snaplink::infrastructure::persistence::MemoryAliasRepository;
use snaplink::state::AppState;

pub const BASE_URL: &str = "http://sn.test";

pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<VisitEvent>,
    Arc<MemoryAliasRepository>,
) {
    let store = Arc::new(MemoryAliasRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let alias_service = Arc::new(AliasService::new(
        store.clone() as Arc<dyn AliasRepository>,
        BASE_URL.to_string(),
        30,
    ));

    let state = AppState {
        alias_service,
        visit_tx: tx,
        log_ship: LogShip::disabled(),
    };

    (state, rx, store)
}

/// Seeds an alias directly in the store, expiring `validity_minutes` from now
/// (negative values create an already-expired alias).
pub async fn seed_alias(store: &MemoryAliasRepository, code: &str, url: &str, validity_minutes: i64) {
    let now = Utc::now();

    store
        .create(NewAlias {
            short_code: code.to_string(),
            original_url: url.to_string(),
            created_at: now - Duration::minutes(60),
            expiry_date: now + Duration::minutes(validity_minutes),
        })
        .await
        .unwrap();
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
