//! Route table.
//!
//! Fixed endpoints take precedence over the `/{code}` capture; the code
//! generator additionally reserves their names as shortcodes.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    create_alias_handler, health_handler, redirect_handler, stats_handler,
};
use crate::middlewares::access_log_mw;
use crate::state::AppState;

/// All routes:
///
/// - `POST /shorturls`        - create a short link
/// - `GET  /shorturls/{code}` - statistics with full click history
/// - `GET  /healthz`          - liveness
/// - `GET  /{code}`           - redirect
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/shorturls", post(create_alias_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .route("/healthz", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log_mw,
        ))
        .with_state(state)
}
