//! Persistence backends for Mentora.
//!
//! Two stores live here behind the traits defined in `mentora-core`:
//! user profiles (`ProfileStore`) and the per-user chat log
//! (`HistoryStore`). The SQLite backend is the production default;
//! the in-memory backend serves tests and ephemeral sessions.

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
