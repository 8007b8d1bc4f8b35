//! Storage health check handler.

use axum::{extract::State, http::StatusCode};

use crate::error::AppError;
use crate::state::AppState;

/// Verifies that the configured storage backend is reachable.
///
/// # Endpoint
///
/// `GET /ping`
///
/// # Responses
///
/// - `200 OK` when the backend answers
/// - `500 Internal Server Error` when it does not
pub async fn ping_handler(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.repository.ping().await?;
    Ok(StatusCode::OK)
}
