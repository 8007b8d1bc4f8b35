//! HTTP request handlers.
//!
//! Each handler extracts its inputs, makes exactly one storage call, and
//! maps the outcome to an HTTP response.

pub mod batch;
pub mod ping;
pub mod redirect;
pub mod shorten;
pub mod user_urls;

pub use batch::batch_shorten_handler;
pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_handler, shorten_text_handler};
pub use user_urls::user_urls_handler;
