//! Handler for the batch shorten endpoint.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::batch::{BatchShortenItem, BatchShortenResponse};
use crate::api::middleware::identity::OwnerId;
use crate::domain::entities::BatchItem;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a batch of URLs in one request.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [
///   { "correlation_id": "1", "original_url": "https://a.com" },
///   { "correlation_id": "2", "original_url": "https://b.com" }
/// ]
/// ```
///
/// # Responses
///
/// - `201 Created` with one `{"correlation_id", "short_url"}` entry per
///   input entry, in input order. Entries whose URL was already shortened
///   (including earlier in the same batch) carry the existing short URL.
/// - `400 Bad Request` for an empty batch, a missing field, or an invalid
///   URL.
pub async fn batch_shorten_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Json(payload): Json<Vec<BatchShortenItem>>,
) -> Result<(StatusCode, Json<Vec<BatchShortenResponse>>), AppError> {
    if payload.is_empty() {
        return Err(AppError::bad_request(
            "Empty batch",
            json!({ "reason": "batch request cannot be empty" }),
        ));
    }
    for item in &payload {
        item.validate()?;
    }

    let items: Vec<BatchItem> = payload
        .into_iter()
        .map(|item| BatchItem {
            correlation_id: item.correlation_id,
            original_url: item.original_url,
        })
        .collect();

    let results = state.repository.save_batch(&items, &owner_id).await?;

    let body = results
        .into_iter()
        .map(|result| BatchShortenResponse {
            correlation_id: result.correlation_id,
            short_url: state.short_url(&result.short_code),
        })
        .collect();

    Ok((StatusCode::CREATED, Json(body)))
}
