//! Handler for the per-identity URL listing.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::user_urls::UserUrlResponse;
use crate::api::middleware::identity::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every URL shortened by the calling identity.
///
/// # Endpoint
///
/// `GET /api/user/urls`
///
/// # Responses
///
/// - `200 OK` with `[{"short_url", "original_url"}]`, order unspecified
/// - `204 No Content` when the identity owns no records
pub async fn user_urls_handler(
    State(state): State<AppState>,
    Extension(OwnerId(owner_id)): Extension<OwnerId>,
) -> Result<Response, AppError> {
    let urls = state.repository.list_by_owner(&owner_id).await?;

    if urls.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<UserUrlResponse> = urls
        .into_iter()
        .map(|url| UserUrlResponse {
            short_url: state.short_url(&url.short_code),
            original_url: url.original_url,
        })
        .collect();

    Ok(Json(body).into_response())
}
