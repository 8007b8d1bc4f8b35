//! PostgreSQL storage backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{BatchItem, BatchResult, OwnedUrl, ShortUrl};
use crate::domain::repositories::{SaveOutcome, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

const INSERT_URL: &str = "INSERT INTO urls (uuid, original_url, short_url, user_id) \
     VALUES ($1, $2, $3, $4) ON CONFLICT (original_url) DO NOTHING";

const SELECT_BY_ORIGINAL: &str =
    "SELECT uuid, short_url, original_url, user_id FROM urls WHERE original_url = $1";

/// PostgreSQL repository for short URL storage.
///
/// Unlike the in-memory and file backends, duplicate detection is delegated
/// to the database's unique constraints rather than an in-process index: an
/// insert that affects zero rows means a concurrent writer won the race, and
/// a single bounded re-query returns the winning record.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_by_original(&self, original_url: &str) -> Result<Option<ShortUrl>, AppError> {
        let row: Option<UrlRow> = sqlx::query_as(SELECT_BY_ORIGINAL)
            .bind(original_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(UrlRow::into_record).transpose()
    }
}

/// Raw row shape; `uuid` and `user_id` are CHAR(36) columns holding UUID
/// strings.
#[derive(sqlx::FromRow)]
struct UrlRow {
    uuid: String,
    short_url: String,
    original_url: String,
    user_id: Option<String>,
}

impl UrlRow {
    fn into_record(self) -> Result<ShortUrl, AppError> {
        let id = Uuid::parse_str(self.uuid.trim()).map_err(|e| {
            tracing::error!(error = %e, uuid = %self.uuid, "malformed uuid column");
            AppError::internal("Database error", json!({}))
        })?;

        Ok(ShortUrl {
            id,
            short_code: self.short_url,
            original_url: self.original_url,
            owner_id: self.user_id.map(|v| v.trim().to_string()).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save_url(
        &self,
        original_url: &str,
        proposed_code: &str,
        owner_id: &str,
    ) -> Result<SaveOutcome, AppError> {
        if let Some(existing) = self.find_by_original(original_url).await? {
            return Ok(SaveOutcome::Conflict(existing));
        }

        let record = ShortUrl::new(original_url, proposed_code, owner_id);

        let result = sqlx::query(INSERT_URL)
            .bind(record.id.to_string())
            .bind(&record.original_url)
            .bind(&record.short_code)
            .bind(&record.owner_id)
            .execute(self.pool.as_ref())
            .await?;

        // Zero affected rows: a concurrent request won the race between the
        // pre-check and the insert. One re-query, no retry loop.
        if result.rows_affected() == 0 {
            let existing = self.find_by_original(original_url).await?.ok_or_else(|| {
                tracing::error!(original_url, "row vanished after conflicting insert");
                AppError::internal("Database error", json!({}))
            })?;
            return Ok(SaveOutcome::Conflict(existing));
        }

        Ok(SaveOutcome::Created(record))
    }

    async fn get_original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let original_url: Option<String> =
            sqlx::query_scalar("SELECT original_url FROM urls WHERE short_url = $1")
                .bind(short_code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(original_url)
    }

    async fn save_batch(
        &self,
        items: &[BatchItem],
        owner_id: &str,
    ) -> Result<Vec<BatchResult>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut results = Vec::with_capacity(items.len());
        let mut originals = Vec::with_capacity(items.len());

        for item in items {
            let short_code = generate_code()?;
            let record = ShortUrl::new(&item.original_url, &short_code, owner_id);

            sqlx::query(INSERT_URL)
                .bind(record.id.to_string())
                .bind(&record.original_url)
                .bind(&record.short_code)
                .bind(&record.owner_id)
                .execute(&mut *tx)
                .await?;

            originals.push(item.original_url.clone());
            results.push(BatchResult {
                correlation_id: item.correlation_id.clone(),
                short_code,
            });
        }

        // One follow-up query covers both newly inserted and pre-existing
        // rows; reconciling by original URL maps every request entry to the
        // code actually stored, preserving input order.
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT short_url, original_url FROM urls WHERE original_url = ANY($1)")
                .bind(&originals)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        let stored: HashMap<String, String> = rows
            .into_iter()
            .map(|(short_url, original_url)| (original_url, short_url))
            .collect();

        for (result, item) in results.iter_mut().zip(items) {
            if let Some(short_code) = stored.get(&item.original_url) {
                result.short_code = short_code.clone();
            }
        }

        Ok(results)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<OwnedUrl>, AppError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT short_url, original_url FROM urls WHERE user_id = $1")
                .bind(owner_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows
            .into_iter()
            .map(|(short_code, original_url)| OwnedUrl {
                short_code,
                original_url,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
