//! DTOs for the JSON shorten endpoint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ShortUrl;
use crate::state::AppState;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "Empty URL"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// The stored record as returned to the caller; `short_url` is the full
/// public URL.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub uuid: Uuid,
    pub short_url: String,
    pub original_url: String,
    pub user_id: String,
}

impl ShortUrlResponse {
    pub fn from_record(record: ShortUrl, state: &AppState) -> Self {
        Self {
            uuid: record.id,
            short_url: state.short_url(&record.short_code),
            original_url: record.original_url,
            user_id: record.owner_id,
        }
    }
}
