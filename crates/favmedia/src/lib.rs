//! Favmedia
//!
//! A bounded, newest-first list of favorite media URLs persisted through a
//! key-value store, plus the URL classifier used to tag new entries.

pub mod config;
pub mod data;
pub mod error;
pub mod lifecycle;
pub mod media;

pub use config::StoreConfig;
pub use data::{
    AddOutcome, FavoriteEntry, FavoritesStore, FileStore, KeyValueStore, MemoryStore,
    RemoveOutcome,
};
pub use error::{AppError, Result};
pub use lifecycle::Registrations;
pub use media::{classify, MediaType};
