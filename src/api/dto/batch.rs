//! DTOs for the batch shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One entry of a batch shorten request. The request body is a bare JSON
/// array of these.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchShortenItem {
    #[validate(length(min = 1, message = "correlation_id cannot be empty"))]
    pub correlation_id: String,

    #[validate(length(min = 1, message = "original_url cannot be empty"))]
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// One entry of the batch response, in input order; `short_url` is the full
/// public URL.
#[derive(Debug, Serialize)]
pub struct BatchShortenResponse {
    pub correlation_id: String,
    pub short_url: String,
}
