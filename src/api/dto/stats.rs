//! DTOs for the alias statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Alias, ClickEvent};

/// One recorded click, as returned to API consumers.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub location: String,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            referrer: click.referrer,
            location: click.location,
        }
    }
}

/// Full statistics for one alias, including the complete click history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<Alias> for StatsResponse {
    fn from(alias: Alias) -> Self {
        Self {
            original_url: alias.original_url,
            short_code: alias.short_code,
            created_at: alias.created_at,
            expiry_date: alias.expiry_date,
            total_clicks: alias.clicks.len(),
            clicks: alias.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn counts_and_preserves_click_order() {
        let now = Utc::now();
        let alias = Alias {
            short_code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: now,
            expiry_date: now + Duration::minutes(30),
            clicks: vec![
                ClickEvent::record(Some("first".to_string()), None),
                ClickEvent::record(Some("second".to_string()), None),
            ],
        };

        let response = StatsResponse::from(alias);
        assert_eq!(response.total_clicks, 2);
        assert_eq!(response.clicks[0].referrer, "first");
        assert_eq!(response.clicks[1].referrer, "second");
    }

    #[test]
    fn serializes_camel_case_field_names() {
        let now = Utc::now();
        let alias = Alias {
            short_code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: now,
            expiry_date: now + Duration::minutes(30),
            clicks: Vec::new(),
        };

        let value = serde_json::to_value(StatsResponse::from(alias)).unwrap();
        for key in [
            "originalUrl",
            "shortCode",
            "createdAt",
            "expiryDate",
            "totalClicks",
            "clicks",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
