//! Handler for alias creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{CreateAliasRequest, CreateAliasResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Errors
///
/// Returns 400 for an invalid URL, validity, or shortcode and 409 when the
/// requested shortcode is already in use — including the case where a
/// concurrent request reserved it first.
pub async fn create_alias_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateAliasRequest>,
) -> Result<(StatusCode, Json<CreateAliasResponse>), AppError> {
    payload.validate()?;

    let created = state
        .alias_service
        .create_short_url(&payload.url, payload.validity, payload.shortcode)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAliasResponse {
            short_link: created.short_link,
            expiry: created.expiry,
        }),
    ))
}
