//! Handlers for the shorten endpoints.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortUrlResponse};
use crate::api::middleware::identity::OwnerId;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::generate_code;

/// Shortens a long URL submitted as a plain-text body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Responses
///
/// - `201 Created` with the full short URL as plain text
/// - `409 Conflict` with the pre-existing short URL when the original URL
///   was already shortened (first writer wins)
/// - `400 Bad Request` for an empty or malformed URL
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    body: String,
) -> Result<Response, AppError> {
    let original_url = body.trim();

    if original_url.is_empty() {
        return Err(AppError::bad_request("Empty URL", json!({})));
    }
    Url::parse(original_url)
        .map_err(|_| AppError::bad_request("Invalid URL format", json!({ "url": original_url })))?;

    let proposed_code = generate_code()?;
    let outcome = state
        .repository
        .save_url(original_url, &proposed_code, &owner_id)
        .await?;

    let status = if outcome.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::CREATED
    };
    let short_url = state.short_url(&outcome.record().short_code);

    Ok((status, short_url).into_response())
}

/// Shortens a long URL submitted as JSON.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Responses
///
/// - `201 Created` with the stored record
///   (`{"uuid", "short_url", "original_url", "user_id"}`)
/// - `409 Conflict` with the pre-existing record
/// - `400 Bad Request` for invalid JSON or an invalid URL
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let proposed_code = generate_code()?;
    let outcome = state
        .repository
        .save_url(&payload.url, &proposed_code, &owner_id)
        .await?;

    let status = if outcome.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::CREATED
    };
    let body = ShortUrlResponse::from_record(outcome.into_record(), &state);

    Ok((status, Json(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrl;
    use crate::domain::repositories::{MockUrlRepository, SaveOutcome};
    use std::sync::Arc;

    fn state_with(mock: MockUrlRepository) -> AppState {
        AppState::new(Arc::new(mock), "http://localhost:8080", "test-secret")
    }

    fn owner() -> Extension<OwnerId> {
        Extension(OwnerId("user-1".to_string()))
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409_with_existing_code() {
        let existing = ShortUrl::new("https://example.com", "abc123", "user-1");
        let mut mock = MockUrlRepository::new();
        mock.expect_save_url()
            .returning(move |_, _, _| Ok(SaveOutcome::Conflict(existing.clone())));

        let response = shorten_text_handler(
            State(state_with(mock)),
            owner(),
            "https://example.com".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_internal() {
        let mut mock = MockUrlRepository::new();
        mock.expect_save_url()
            .returning(|_, _, _| Err(AppError::internal("Storage failure", json!({}))));

        let result = shorten_text_handler(
            State(state_with(mock)),
            owner(),
            "https://example.com".to_string(),
        )
        .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_invalid_url_never_reaches_storage() {
        let mut mock = MockUrlRepository::new();
        mock.expect_save_url().never();

        let result =
            shorten_text_handler(State(state_with(mock)), owner(), "not a url".to_string()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
