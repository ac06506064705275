//! Alias entity representing an expiring short-link mapping.

use chrono::{DateTime, Utc};

use crate::domain::entities::ClickEvent;

/// A short-code to URL mapping with a fixed lifetime and an embedded click log.
///
/// The short code is the primary key; the original URL and both timestamps are
/// immutable after creation. The click log is append-only and owned entirely
/// by the alias.
#[derive(Debug, Clone)]
pub struct Alias {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub clicks: Vec<ClickEvent>,
}

impl Alias {
    /// Returns true once the alias has passed its expiry time.
    ///
    /// Expiry gates redirection only; statistics stay readable.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiry_date
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }
}

/// Input data for creating a new alias.
#[derive(Debug, Clone)]
pub struct NewAlias {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
}

impl NewAlias {
    pub fn into_alias(self) -> Alias {
        Alias {
            short_code: self.short_code,
            original_url: self.original_url,
            created_at: self.created_at,
            expiry_date: self.expiry_date,
            clicks: Vec::new(),
        }
    }
}
