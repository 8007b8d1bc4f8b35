//! Data Transfer Objects for the HTTP surface.
//!
//! DTOs keep JSON shapes out of the domain layer; `short_url` fields in
//! responses always carry the full public URL, not the bare code.

pub mod batch;
pub mod shorten;
pub mod user_urls;
