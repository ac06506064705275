//! PostgreSQL implementation of alias storage.
//!
//! One row per alias with the click log embedded as a JSONB array. The
//! unique constraint on `short_code` is the real uniqueness enforcement
//! point for creation races, and appends use JSONB concatenation so that
//! concurrent clicks are serialized by the row lock instead of
//! read-modify-write on the whole record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::entities::{Alias, ClickEvent, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;

pub struct PgAliasRepository {
    pool: Arc<PgPool>,
}

impl PgAliasRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn alias_from_row(row: &PgRow) -> Result<Alias, AppError> {
    let clicks: Value = row.try_get("clicks")?;
    let clicks: Vec<ClickEvent> = serde_json::from_value(clicks).map_err(|e| {
        tracing::error!("corrupt click log in database: {e}");
        AppError::internal("Database error", json!({}))
    })?;

    Ok(Alias {
        short_code: row.try_get("short_code")?,
        original_url: row.try_get("original_url")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        expiry_date: row.try_get::<DateTime<Utc>, _>("expiry_date")?,
        clicks,
    })
}

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn create(&self, new_alias: NewAlias) -> Result<Alias, AppError> {
        let row = sqlx::query(
            r#"
            INSERT INTO aliases (short_code, original_url, created_at, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING short_code, original_url, created_at, expiry_date, clicks
            "#,
        )
        .bind(&new_alias.short_code)
        .bind(&new_alias.original_url)
        .bind(new_alias.created_at)
        .bind(new_alias.expiry_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        alias_from_row(&row)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT short_code, original_url, created_at, expiry_date, clicks
            FROM aliases
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(alias_from_row).transpose()
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError> {
        let click = serde_json::to_value(&click).map_err(|e| {
            tracing::error!("failed to serialize click event: {e}");
            AppError::internal("Database error", json!({}))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE aliases
            SET clicks = clicks || jsonb_build_array($2::jsonb)
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .bind(click)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }
}
