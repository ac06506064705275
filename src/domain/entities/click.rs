//! Click event recorded for each successful redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Referrer label used when the request carried no Referer header.
pub const DIRECT_REFERRER: &str = "Direct";

/// Location label used when geo resolution fails or is unavailable.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// A single entry in an alias's append-only click log.
///
/// Serialized into the alias record as-is, so the field names double as the
/// persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub location: String,
}

impl ClickEvent {
    /// Builds a click event stamped with the current server time.
    ///
    /// A missing referrer becomes [`DIRECT_REFERRER`]; a missing location
    /// becomes [`UNKNOWN_LOCATION`].
    pub fn record(referrer: Option<String>, location: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            referrer: referrer.unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            location: location.unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        }
    }
}
