//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend, geo resolver, log shipper, and click worker,
//! then runs the Axum server until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::AliasService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::AliasRepository;
use crate::infrastructure::geoip::{GeoResolver, MaxMindGeoResolver, NullGeoResolver};
use crate::infrastructure::log_ship::{Level, LogShip, Stack};
use crate::infrastructure::persistence::{MemoryAliasRepository, PgAliasRepository};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Alias storage (PostgreSQL with migrations, or in-memory fallback)
/// - GeoIP resolver (MaxMind database, or null fallback)
/// - Remote log shipper
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn AliasRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect(database_url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;

            Arc::new(PgAliasRepository::new(Arc::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
            Arc::new(MemoryAliasRepository::new())
        }
    };

    let geo: Arc<dyn GeoResolver> = match &config.geoip_db_path {
        Some(path) => match MaxMindGeoResolver::open(path) {
            Ok(resolver) => {
                tracing::info!("GeoIP enabled ({} database at {path})", resolver.name());
                Arc::new(resolver)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load GeoIP database at {path}: {e}. Click locations will be Unknown."
                );
                Arc::new(NullGeoResolver)
            }
        },
        None => {
            tracing::info!("GeoIP disabled, click locations will be Unknown");
            Arc::new(NullGeoResolver)
        }
    };

    let log_ship = match (&config.log_ship_url, &config.log_ship_token) {
        (Some(url), Some(token)) => {
            tracing::info!("Remote log sink enabled");
            LogShip::start(url.clone(), token.clone(), config.visit_queue_capacity)
        }
        _ => {
            tracing::info!("Remote log sink disabled");
            LogShip::disabled()
        }
    };

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);
    tokio::spawn(run_click_worker(
        visit_rx,
        store.clone(),
        geo,
        log_ship.clone(),
    ));
    tracing::info!("Click worker started");

    let alias_service = Arc::new(AliasService::new(
        store,
        config.base_url.clone(),
        config.default_validity_minutes,
    ));

    let state = AppState {
        alias_service,
        visit_tx,
        log_ship: log_ship.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    log_ship.log(Stack::Backend, Level::Info, "service", "snaplink started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(log_ship))
    .await?;

    Ok(())
}

async fn shutdown_signal(log_ship: LogShip) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }

    tracing::info!("Shutdown signal received");
    log_ship.log(Stack::Backend, Level::Info, "service", "snaplink stopping");
}
