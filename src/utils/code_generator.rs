//! Short code generation and validation.
//!
//! Generated codes come from the system RNG and are URL-safe base64;
//! caller-supplied codes are validated but never rewritten, so what the
//! caller asked for is exactly what gets reserved.

use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

/// Length of random bytes before base64 encoding. 9 bytes encode to a
/// 12-character code.
const CODE_LENGTH_BYTES: usize = 9;

/// Maximum length accepted for caller-supplied codes.
const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Codes reserved for service endpoints to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &["shorturls", "healthz", "health", "api", "stats"];

/// Generates a random URL-safe short code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a caller-supplied short code.
///
/// # Rules
///
/// - Non-empty, at most 32 characters
/// - ASCII letters, digits, hyphens, and underscores only (URL-path-safe)
/// - Not a reserved endpoint name
///
/// Case is preserved; the code is used exactly as provided.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Shortcode must be 1-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Shortcode can only contain letters, digits, hyphens, and underscores",
            json!({ "shortcode": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This shortcode is reserved",
            json!({ "shortcode": code }),
        ));
    }

    Ok(())
}
