//! In-memory storage backend.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl, ShortUrl};
use crate::domain::repositories::{SaveOutcome, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::index::UrlIndex;
use crate::utils::code_generator::generate_code;

/// Process-lifetime storage backed by [`UrlIndex`] behind a read-write lock.
///
/// The lock is held for the whole check-then-act unit of each write, so two
/// concurrent first-time submissions of the same URL cannot both pass the
/// conflict check. No guard is held across an await point.
pub struct InMemoryRepository {
    index: RwLock<UrlIndex>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(UrlIndex::with_capacity(1024)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, UrlIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UrlIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryRepository {
    async fn save_url(
        &self,
        original_url: &str,
        proposed_code: &str,
        owner_id: &str,
    ) -> Result<SaveOutcome, AppError> {
        let mut index = self.write();

        if let Some(existing) = index.find_by_original(original_url) {
            return Ok(SaveOutcome::Conflict(existing.clone()));
        }

        if index.contains_code(proposed_code) {
            tracing::error!(short_code = proposed_code, "short code collision");
            return Err(AppError::internal("Short code collision", json!({})));
        }

        let record = ShortUrl::new(original_url, proposed_code, owner_id);
        index.insert(record.clone());

        Ok(SaveOutcome::Created(record))
    }

    async fn get_original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .read()
            .find_by_code(short_code)
            .map(|record| record.original_url.clone()))
    }

    async fn save_batch(
        &self,
        items: &[BatchItem],
        owner_id: &str,
    ) -> Result<Vec<BatchResult>, AppError> {
        let mut index = self.write();
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            if let Some(existing) = index.find_by_original(&item.original_url) {
                results.push(BatchResult {
                    correlation_id: item.correlation_id.clone(),
                    short_code: existing.short_code.clone(),
                });
                continue;
            }

            let short_code = generate_code()?;
            let record = ShortUrl::new(&item.original_url, &short_code, owner_id);
            index.insert(record);

            results.push(BatchResult {
                correlation_id: item.correlation_id.clone(),
                short_code,
            });
        }

        Ok(results)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<OwnedUrl>, AppError> {
        Ok(self.read().owned_by(owner_id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
