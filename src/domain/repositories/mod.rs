//! Storage contract for the domain layer.
//!
//! [`UrlRepository`] is the single capability interface implemented by every
//! backend. The concrete implementations live in
//! [`crate::infrastructure::persistence`]; a mock is auto-generated via
//! `mockall` for unit tests.

pub mod url_repository;

pub use url_repository::{SaveOutcome, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
