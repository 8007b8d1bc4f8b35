//! Short code generation.
//!
//! Codes are 20 hex characters from 10 bytes of OS entropy. The generator
//! itself guarantees no uniqueness; collision handling is the storage
//! layer's concern.

use serde_json::json;

use crate::error::AppError;

/// Random bytes per code; hex encoding doubles the length.
const CODE_LENGTH_BYTES: usize = 10;

/// Generates a URL-safe short code from the OS secure random source.
///
/// # Errors
///
/// A failure of the random source fails the request with
/// [`AppError::Internal`] rather than the process. Proceeding with zeroed
/// bytes would mint a colliding, guessable code, so there is no fallback.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        tracing::error!(error = %e, "system random source failure");
        AppError::internal("Failed to generate short code", json!({}))
    })?;

    Ok(hex::encode(buffer))
}
