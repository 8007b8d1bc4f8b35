//! DTO for the per-identity URL listing endpoint.

use serde::Serialize;

/// One record owned by the calling identity; `short_url` is the full public
/// URL.
#[derive(Debug, Serialize)]
pub struct UserUrlResponse {
    pub short_url: String,
    pub original_url: String,
}
