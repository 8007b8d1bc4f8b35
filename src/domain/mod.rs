//! Domain layer containing the core data model and storage contract.
//!
//! - [`entities`] - The `ShortUrl` record and batch/listing value types
//! - [`repositories`] - The `UrlRepository` trait implemented by each backend
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Backend implementations live in
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
