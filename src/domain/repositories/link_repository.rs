//! Repository trait for short link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link if its code is free.
    ///
    /// The uniqueness check and the insert are a single atomic operation in
    /// the underlying store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortcodeTaken`] if the code already exists.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its exact short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Increments the access counter of an existing link.
    ///
    /// Unknown codes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn record_access(&self, code: &str) -> Result<(), AppError>;

    /// Returns true if the store is reachable.
    async fn health_check(&self) -> bool;
}
