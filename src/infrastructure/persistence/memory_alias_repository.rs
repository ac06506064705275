//! In-process alias storage.
//!
//! Used by the test suite and as the fallback backend when no database is
//! configured. A single write lock around the map gives the same atomicity
//! the PostgreSQL backend gets from its unique constraint and row-level
//! append.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Alias, ClickEvent, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;

#[derive(Default)]
pub struct MemoryAliasRepository {
    aliases: RwLock<HashMap<String, Alias>>,
}

impl MemoryAliasRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn create(&self, new_alias: NewAlias) -> Result<Alias, AppError> {
        let mut aliases = self.aliases.write().await;

        // Check-and-insert under the write lock: exactly one of any set of
        // concurrent creators for the same code can win.
        if aliases.contains_key(&new_alias.short_code) {
            return Err(AppError::conflict(
                "Shortcode already in use",
                json!({ "shortcode": new_alias.short_code }),
            ));
        }

        let alias = new_alias.into_alias();
        aliases.insert(alias.short_code.clone(), alias.clone());
        Ok(alias)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, AppError> {
        Ok(self.aliases.read().await.get(code).cloned())
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError> {
        let mut aliases = self.aliases.write().await;

        let alias = aliases.get_mut(code).ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;

        alias.clicks.push(click);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn new_alias(code: &str, url: &str) -> NewAlias {
        let now = Utc::now();
        NewAlias {
            short_code: code.to_string(),
            original_url: url.to_string(),
            created_at: now,
            expiry_date: now + Duration::minutes(30),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = MemoryAliasRepository::new();

        repo.create(new_alias("abc123", "https://example.com"))
            .await
            .unwrap();

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://example.com");
        assert!(found.clicks.is_empty());
    }

    #[tokio::test]
    async fn find_unknown_code() {
        let repo = MemoryAliasRepository::new();
        assert!(repo.find_by_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_leaves_original_intact() {
        let repo = MemoryAliasRepository::new();

        repo.create(new_alias("abc123", "https://example.com"))
            .await
            .unwrap();

        let err = repo
            .create(new_alias("abc123", "https://other.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn append_click_keeps_insertion_order() {
        let repo = MemoryAliasRepository::new();
        repo.create(new_alias("abc123", "https://example.com"))
            .await
            .unwrap();

        for referrer in ["first", "second", "third"] {
            repo.append_click(
                "abc123",
                ClickEvent::record(Some(referrer.to_string()), None),
            )
            .await
            .unwrap();
        }

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        let referrers: Vec<&str> = found.clicks.iter().map(|c| c.referrer.as_str()).collect();
        assert_eq!(referrers, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn append_click_to_unknown_code_is_not_found() {
        let repo = MemoryAliasRepository::new();
        let err = repo
            .append_click("missing", ClickEvent::record(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_code_have_one_winner() {
        let repo = Arc::new(MemoryAliasRepository::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(new_alias("abc123", &format!("https://example.com/{i}")))
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_preserved() {
        let repo = Arc::new(MemoryAliasRepository::new());
        repo.create(new_alias("abc123", "https://example.com"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.append_click("abc123", ClickEvent::record(None, None))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found.total_clicks(), 32);
    }
}
