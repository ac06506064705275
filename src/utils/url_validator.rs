//! Validation of original URLs submitted for shortening.
//!
//! The URL is stored verbatim once it passes; only syntactic validity and
//! the scheme are checked here.

use url::Url;

/// Errors rejecting a submitted URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs are allowed")]
    UnsupportedScheme,

    #[error("URL must have a host")]
    MissingHost,
}

/// Checks that `input` is a syntactically valid absolute http(s) URL.
///
/// Rejects relative references, scheme-less strings, and dangerous schemes
/// like `javascript:` or `data:`.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedScheme),
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/page?q=1").is_ok());
    }

    #[test]
    fn rejects_relative_references() {
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_url("example.com/page").is_err());
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(UrlValidationError::UnsupportedScheme)
        ));
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("data:text/html,hi").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("").is_err());
    }
}
