//! Append-only file storage backend.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl, ShortUrl};
use crate::domain::repositories::{SaveOutcome, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::index::UrlIndex;
use crate::utils::code_generator::generate_code;

/// Durable storage: one JSON record per line, newline-delimited, append-only.
///
/// The file is the source of truth; [`UrlIndex`] is a read cache rebuilt from
/// it at startup. Reads are served entirely from the index. On the write path
/// the record is appended and flushed *before* the index is updated, so a
/// failed append loses that request's data but never leaves file and index
/// inconsistent.
///
/// A single mutex guards both the file handle and the index, making
/// "check reverse index, append, update maps" one atomic unit. The file
/// descriptor is released exactly once when the repository is dropped.
pub struct FileRepository {
    inner: Mutex<FileInner>,
}

struct FileInner {
    file: File,
    index: UrlIndex,
}

impl FileRepository {
    /// Opens (or creates) the storage file and rebuilds the index by scanning
    /// it line by line.
    ///
    /// Empty lines are skipped. A line that fails to decode aborts
    /// initialization entirely: a partially recovered index could silently
    /// violate first-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or any line is
    /// malformed. This is fatal to startup.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .await
            .with_context(|| format!("couldn't open storage file {}", path.display()))?;

        let mut index = UrlIndex::with_capacity(1024);
        let mut lines = BufReader::new(file).lines();

        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("couldn't read storage file {}", path.display()))?
        {
            if line.is_empty() {
                continue;
            }

            let record: ShortUrl = serde_json::from_str(&line)
                .with_context(|| format!("malformed record in {}: {line:?}", path.display()))?;
            index.insert(record);
        }

        let file = lines.into_inner().into_inner();

        tracing::info!(
            path = %path.display(),
            records = index.len(),
            "storage file loaded"
        );

        Ok(Self {
            inner: Mutex::new(FileInner { file, index }),
        })
    }

    /// Appends one newline-terminated JSON line and flushes it.
    async fn append(file: &mut File, record: &ShortUrl) -> Result<(), AppError> {
        let mut line = serde_json::to_vec(record).map_err(|e| {
            tracing::error!(error = %e, "failed to encode record");
            AppError::internal("Storage failure", json!({}))
        })?;
        line.push(b'\n');

        file.write_all(&line).await.map_err(|e| {
            tracing::error!(error = %e, "failed to append to storage file");
            AppError::internal("Storage failure", json!({}))
        })?;
        file.flush().await.map_err(|e| {
            tracing::error!(error = %e, "failed to flush storage file");
            AppError::internal("Storage failure", json!({}))
        })?;

        Ok(())
    }
}

#[async_trait]
impl UrlRepository for FileRepository {
    async fn save_url(
        &self,
        original_url: &str,
        proposed_code: &str,
        owner_id: &str,
    ) -> Result<SaveOutcome, AppError> {
        let mut inner = self.inner.lock().await;

        if let Some(existing) = inner.index.find_by_original(original_url) {
            return Ok(SaveOutcome::Conflict(existing.clone()));
        }

        if inner.index.contains_code(proposed_code) {
            tracing::error!(short_code = proposed_code, "short code collision");
            return Err(AppError::internal("Short code collision", json!({})));
        }

        let record = ShortUrl::new(original_url, proposed_code, owner_id);
        Self::append(&mut inner.file, &record).await?;
        inner.index.insert(record.clone());

        Ok(SaveOutcome::Created(record))
    }

    async fn get_original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .index
            .find_by_code(short_code)
            .map(|record| record.original_url.clone()))
    }

    async fn save_batch(
        &self,
        items: &[BatchItem],
        owner_id: &str,
    ) -> Result<Vec<BatchResult>, AppError> {
        let mut inner = self.inner.lock().await;
        let mut results = Vec::with_capacity(items.len());

        // A failed append aborts the rest of the batch; entries already
        // appended stay applied. There is no rollback for file storage.
        for item in items {
            if let Some(existing) = inner.index.find_by_original(&item.original_url) {
                results.push(BatchResult {
                    correlation_id: item.correlation_id.clone(),
                    short_code: existing.short_code.clone(),
                });
                continue;
            }

            let short_code = generate_code()?;
            let record = ShortUrl::new(&item.original_url, &short_code, owner_id);
            Self::append(&mut inner.file, &record).await?;
            inner.index.insert(record);

            results.push(BatchResult {
                correlation_id: item.correlation_id.clone(),
                short_code,
            });
        }

        Ok(results)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<OwnedUrl>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.index.owned_by(owner_id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let inner = self.inner.lock().await;
        inner.file.metadata().await.map_err(|e| {
            tracing::error!(error = %e, "storage file is not stat-able");
            AppError::internal("Storage failure", json!({}))
        })?;
        Ok(())
    }
}
