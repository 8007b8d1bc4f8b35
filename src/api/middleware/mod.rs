//! Request processing middleware.

pub mod identity;
pub mod trace;
