//! Data persistence
//!
//! Storage backends, the favorite entry type, and the favorites store.

pub mod favorites;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::FavoritesStore;
pub use storage::{config_dir, FileStore, KeyValueStore, MemoryStore};
pub use types::{now_millis, AddOutcome, FavoriteEntry, RemoveOutcome};
