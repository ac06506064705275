//! Handler for alias statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns full statistics for a short code, including every recorded click.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// Expired aliases still report their history; expiry only stops
/// redirection.
///
/// # Errors
///
/// Returns 404 if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let alias = state.alias_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::from(alias)))
}
