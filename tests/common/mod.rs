#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use urlcut::domain::repositories::UrlRepository;
use urlcut::infrastructure::persistence::InMemoryRepository;
use urlcut::routes::app_router;
use urlcut::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

/// A server over a fresh in-memory store, persisting cookies across
/// requests so one server acts as one browser identity.
pub fn make_server() -> TestServer {
    server_with(Arc::new(InMemoryRepository::new()))
}

/// A server over a caller-supplied store. Two servers sharing one store
/// behave as two browsers against the same backend.
pub fn server_with(repository: Arc<dyn UrlRepository>) -> TestServer {
    let state = AppState::new(repository, BASE_URL, "test-secret");
    let mut server = TestServer::new(app_router(state)).unwrap();
    server.save_cookies();
    server
}

/// Strips the base address from a full short URL, leaving the code.
pub fn code_of(short_url: &str) -> String {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("unexpected short URL '{short_url}'"))
        .to_string()
}
