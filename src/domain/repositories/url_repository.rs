//! Repository trait for short URL storage backends.

use async_trait::async_trait;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl, ShortUrl};
use crate::error::AppError;

/// Outcome of saving a URL: first writer wins.
///
/// A second submission of an original URL already in the store is a
/// `Conflict` carrying the record the first writer created, an expected
/// business outcome rather than an error. The proposed short code of the
/// losing submission is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(ShortUrl),
    Conflict(ShortUrl),
}

impl SaveOutcome {
    /// The record carried by either outcome.
    pub fn record(&self) -> &ShortUrl {
        match self {
            SaveOutcome::Created(record) | SaveOutcome::Conflict(record) => record,
        }
    }

    pub fn into_record(self) -> ShortUrl {
        match self {
            SaveOutcome::Created(record) | SaveOutcome::Conflict(record) => record,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SaveOutcome::Conflict(_))
    }
}

/// Storage interface for managing short URLs.
///
/// One implementation is selected at startup from configuration and held as
/// `Arc<dyn UrlRepository>` on [`crate::state::AppState`] for the process
/// lifetime; it is never swapped at runtime. All methods must be safe under
/// concurrent invocation from multiple requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryRepository`]
/// - [`crate::infrastructure::persistence::FileRepository`]
/// - [`crate::infrastructure::persistence::PgUrlRepository`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Saves a new URL mapping, detecting duplicates of the original URL.
    ///
    /// `proposed_code` becomes the record's short code only on the created
    /// path; on conflict the existing record is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on I/O, encoding, or query failure.
    async fn save_url(
        &self,
        original_url: &str,
        proposed_code: &str,
        owner_id: &str,
    ) -> Result<SaveOutcome, AppError>;

    /// Looks up the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if the code was never created
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on query failure.
    async fn get_original_url(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Saves a batch of URLs, one result per input entry in input order.
    ///
    /// Entries whose original URL already exists (including earlier in the
    /// same batch) resolve to the existing short code instead of minting a
    /// new one. The database backend applies the whole batch in one
    /// transaction; the in-memory and file backends apply entries one by one
    /// and leave already-applied entries in place if a later entry fails.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on I/O, encoding, or query failure.
    async fn save_batch(
        &self,
        items: &[BatchItem],
        owner_id: &str,
    ) -> Result<Vec<BatchResult>, AppError>;

    /// Lists all records belonging to one identity, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on query failure.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<OwnedUrl>, AppError>;

    /// Health check against the backing resource.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing file or database is
    /// unreachable. Always succeeds for the in-memory backend.
    async fn ping(&self) -> Result<(), AppError>;
}
