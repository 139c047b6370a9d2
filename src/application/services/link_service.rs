//! Link creation, lookup, deletion, and visit recording.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_default_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Maximum random-generation attempts before the allocator gives up.
const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Service orchestrating link operations over a [`LinkRepository`].
///
/// Handles input validation and short-code allocation; all persistence and
/// the uniqueness guarantee live behind the repository.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Creates a short link.
    ///
    /// # Code Allocation
    ///
    /// - If `custom_code` is provided, it is validated and checked for
    ///   existence (conflict error if taken).
    /// - Otherwise a random 6-character code is generated, retrying up to 10
    ///   times on collision before failing.
    ///
    /// The existence checks are best-effort: two concurrent creations can both
    /// pass them for the same code. The database unique constraint is the
    /// arbiter, and an insert-time violation surfaces as
    /// [`AppError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or custom code,
    /// [`AppError::Conflict`] if the code is already taken, and
    /// [`AppError::Exhausted`] when the allocator runs out of attempts.
    pub async fn create_link(
        &self,
        url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&url).map_err(|e| AppError::bad_request(e.to_string()))?;

        let code = match custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;

                if self.repository.exists(&custom).await? {
                    return Err(AppError::conflict("Code already exists"));
                }

                custom
            }
            None => self.allocate_unique_code().await?,
        };

        self.repository.create(NewLink { code, url }).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Deletes a link and returns the deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn delete_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .delete_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list_all().await
    }

    /// Records a visit: bumps the click counter and the last-clicked
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn record_visit(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.record_visit(code).await? {
            return Err(AppError::not_found("Link not found"));
        }

        Ok(())
    }

    /// Probes the storage backend. Used by the health endpoint.
    pub async fn ping_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Generates an unused short code with collision retry.
    ///
    /// Attempts up to [`MAX_ALLOCATION_ATTEMPTS`] times before failing with
    /// [`AppError::Exhausted`], which signals a systemic problem such as a
    /// near-full code space.
    async fn allocate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let code = generate_default_code();

            if !self.repository.exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::exhausted("Failed to generate unique code"))
    }
}
