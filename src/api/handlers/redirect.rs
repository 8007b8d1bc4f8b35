//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - `307 Temporary Redirect` to the original URL
/// - `404 Not Found` for a code that was never created
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let code = code.trim();

    match state.repository.get_original_url(code).await? {
        Some(original_url) => Ok(Redirect::temporary(&original_url)),
        None => Err(AppError::not_found(
            "Unknown short code",
            json!({ "short_code": code }),
        )),
    }
}
