//! Alias lifecycle service: creation, resolution, and statistics.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Alias, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Attempts at finding a free auto-generated code before giving up.
const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Result of a successful alias creation.
#[derive(Debug, Clone)]
pub struct CreatedAlias {
    pub short_code: String,
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}

/// Service owning the alias business rules: short-code allocation, expiry,
/// and the read paths for redirection and statistics.
///
/// The uniqueness pre-checks done here are advisory fail-fast optimizations;
/// the store's `create` is the real enforcement point, so a lost creation
/// race surfaces as an ordinary conflict.
pub struct AliasService {
    store: Arc<dyn AliasRepository>,
    base_url: String,
    default_validity_minutes: i64,
}

impl AliasService {
    pub fn new(
        store: Arc<dyn AliasRepository>,
        base_url: String,
        default_validity_minutes: i64,
    ) -> Self {
        Self {
            store,
            base_url,
            default_validity_minutes,
        }
    }

    /// Creates a short link for `url`, valid for `validity_minutes`
    /// (defaulting to the configured validity when omitted).
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an invalid URL, non-positive validity,
    ///   or malformed shortcode
    /// - [`AppError::Conflict`] when the requested shortcode is taken,
    ///   including the case where a concurrent creator wins the race after
    ///   the advisory check passed
    /// - [`AppError::Internal`] when code generation keeps colliding or the
    ///   store fails
    pub async fn create_short_url(
        &self,
        url: &str,
        validity_minutes: Option<i64>,
        shortcode: Option<String>,
    ) -> Result<CreatedAlias, AppError> {
        validate_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let validity = match validity_minutes {
            None => self.default_validity_minutes,
            Some(v) if v <= 0 => {
                return Err(AppError::bad_request(
                    "Validity must be a positive number of minutes",
                    json!({ "validity": v }),
                ));
            }
            Some(v) => v,
        };

        let created_at = Utc::now();
        let expiry_date = created_at + Duration::minutes(validity);

        let code = if let Some(custom) = shortcode {
            validate_custom_code(&custom)?;

            if self.store.find_by_code(&custom).await?.is_some() {
                return Err(AppError::conflict(
                    "Shortcode already in use",
                    json!({ "shortcode": custom }),
                ));
            }

            custom
        } else {
            self.allocate_code().await?
        };

        let alias = self
            .store
            .create(NewAlias {
                short_code: code,
                original_url: url.to_string(),
                created_at,
                expiry_date,
            })
            .await?;

        Ok(CreatedAlias {
            short_link: self.short_link(&alias.short_code),
            short_code: alias.short_code,
            expiry: alias.expiry_date,
        })
    }

    /// Looks up an alias for redirection, enforcing expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Gone`] once `now >= expiry_date`.
    pub async fn resolve(&self, code: &str) -> Result<Alias, AppError> {
        let alias = self
            .store
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if alias.is_expired() {
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code }),
            ));
        }

        Ok(alias)
    }

    /// Looks up an alias for statistics. Expired aliases still resolve;
    /// expiry gates redirection, not observability.
    pub async fn get_stats(&self, code: &str) -> Result<Alias, AppError> {
        self.store
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Constructs the fully-qualified short link for a code.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Picks an unused auto-generated code, retrying on collision.
    async fn allocate_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code();

            if self.store.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique shortcode",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }
}
