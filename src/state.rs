use std::sync::Arc;

use crate::domain::repositories::UrlRepository;

/// Shared application state injected into every handler.
///
/// The repository is selected once at startup from configuration and never
/// swapped at runtime; handlers own no persistent state of their own.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn UrlRepository>,
    pub cookie_secret: String,
    base_url: String,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        base_url: impl Into<String>,
        cookie_secret: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            cookie_secret: cookie_secret.into(),
            base_url,
        }
    }

    /// Full public URL for a short code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }
}
