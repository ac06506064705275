//! Handler for short link redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The visit is handed to a bounded channel and processed by the background
/// click worker; the redirect never waits on analytics, and a full queue
/// drops the visit rather than delaying the response.
///
/// # Errors
///
/// Returns 404 for an unknown code and 410 once the alias has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let alias = state.alias_service.resolve(&code).await?;

    let referrer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let visit = VisitEvent::new(code, referrer, Some(addr.ip()));

    if state.visit_tx.try_send(visit).is_err() {
        debug!("visit queue full, click dropped");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, alias.original_url)]))
}
