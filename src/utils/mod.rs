//! Helper functions shared across the application.
//!
//! - [`code_generator`] - Random short code generation

pub mod code_generator;
