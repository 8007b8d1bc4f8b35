//! HTTP layer: request/response handling.
//!
//! Translates HTTP requests into storage calls and storage outcomes into
//! HTTP responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Identity cookie and request tracing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
