//! Storage backend implementations.
//!
//! Each backend implements [`crate::domain::repositories::UrlRepository`]:
//!
//! - [`InMemoryRepository`] - two hash maps behind a read-write lock
//! - [`FileRepository`] - append-only JSON-lines file plus an in-memory index
//! - [`PgUrlRepository`] - PostgreSQL with unique constraints as the conflict
//!   source of truth
//!
//! The in-memory and file backends share [`index::UrlIndex`], the paired
//! primary map and reverse index.

pub mod file_repository;
pub mod index;
pub mod memory_repository;
pub mod pg_repository;

pub use file_repository::FileRepository;
pub use index::UrlIndex;
pub use memory_repository::InMemoryRepository;
pub use pg_repository::PgUrlRepository;
