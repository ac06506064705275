//! Repository trait for alias storage.

use async_trait::async_trait;

use crate::domain::entities::{Alias, ClickEvent, NewAlias};
use crate::error::AppError;

/// Storage interface for alias records.
///
/// This is the only shared mutable resource in the service; `create` and
/// `append_click` are its two mutation entry points and both must be atomic
/// at single-record granularity.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryAliasRepository`] - in-process,
///   used in tests and when no database is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Inserts a new alias record.
    ///
    /// Uniqueness of the short code is enforced here, not by the caller's
    /// advisory pre-check: a concurrent creator losing the race gets
    /// [`AppError::Conflict`] and no state is mutated.
    async fn create(&self, new_alias: NewAlias) -> Result<Alias, AppError>;

    /// Point lookup by short code. No side effects.
    async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, AppError>;

    /// Atomically appends one click event to the alias's click log.
    ///
    /// Concurrent appends from different redirects must all be preserved in
    /// arrival order; the log never shrinks.
    ///
    /// Returns [`AppError::NotFound`] if no alias matches `code`.
    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), AppError>;
}
