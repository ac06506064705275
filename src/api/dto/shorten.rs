//! DTOs for the alias creation endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for shortcode validation.
static SHORTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAliasRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Lifetime in minutes. Defaults to the configured validity when omitted;
    /// zero and negative values are rejected.
    #[validate(range(min = 1, message = "Validity must be a positive number of minutes"))]
    pub validity: Option<i64>,

    /// Optional caller-supplied short code, used exactly as provided.
    #[validate(length(min = 1, max = 32))]
    #[validate(regex(path = "*SHORTCODE_REGEX"))]
    pub shortcode: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAliasResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
