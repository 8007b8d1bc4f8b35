//! Core domain entities.
//!
//! Entities are plain data structures without business logic. [`ShortUrl`] is
//! the persisted unit; the batch and listing types are the value types flowing
//! through [`crate::domain::repositories::UrlRepository`].

pub mod short_url;

pub use short_url::{BatchItem, BatchResult, OwnedUrl, ShortUrl};
