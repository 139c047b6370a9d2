//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Provides CRUD operations over the `links` relation plus the atomic visit
/// counter used by the redirect path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link and returns the persisted record.
    ///
    /// The storage layer assigns `id`, `created_at`, and the initial zero
    /// click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists. The unique
    /// constraint on `code` is the authoritative arbiter; any caller-side
    /// existence pre-check is only an optimization.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks whether a code is already taken.
    ///
    /// Used by the allocator as a best-effort pre-check before insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Deletes a link by code and returns the deleted record.
    ///
    /// Returns `Ok(None)` if no link matches the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links, newest first.
    ///
    /// Ordered by `created_at` descending, with `id` descending as the
    /// tiebreak so records created in the same instant keep a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Records a visit: increments `clicks` by one and stamps
    /// `last_clicked_at`.
    ///
    /// The increment is a single atomic `clicks = clicks + 1` at the storage
    /// layer, never a read-modify-write in application code, so concurrent
    /// visits are all counted.
    ///
    /// Returns `Ok(false)` if no link matches the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, code: &str) -> Result<bool, AppError>;

    /// Probes storage connectivity. Used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
