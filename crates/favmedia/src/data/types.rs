//! Common data types for persistence
//!
//! The stored entry record and the outcomes returned by store mutations.

use crate::media::MediaType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// =============================================================================
// FavoriteEntry
// =============================================================================

/// One saved media item
///
/// Serialized as `{"url", "type", "timestamp"}`, the field names used by
/// existing payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Media URL, unique within a list
    pub url: String,
    /// Classified media kind
    #[serde(rename = "type", alias = "mediaType", default)]
    pub media_type: MediaType,
    /// When the entry was added (ms since epoch)
    #[serde(rename = "timestamp", alias = "createdAt", default)]
    pub created_at: u64,
}

impl FavoriteEntry {
    /// Create an entry stamped with the current time
    pub fn new(url: impl Into<String>, media_type: MediaType) -> Self {
        Self::with_timestamp(url, media_type, now_millis())
    }

    pub fn with_timestamp(url: impl Into<String>, media_type: MediaType, created_at: u64) -> Self {
        Self {
            url: url.into(),
            media_type,
            created_at,
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of `FavoritesStore::add`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
    /// The list already holds `capacity` entries
    LimitReached { capacity: usize },
    PersistFailed,
    /// Empty URL; nothing was read or written
    InvalidUrl,
}

impl AddOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOutcome::Added => write!(f, "Added to favorites"),
            AddOutcome::AlreadyExists => write!(f, "Already in favorites"),
            AddOutcome::LimitReached { capacity } => {
                write!(f, "Favorites limit of {} reached", capacity)
            }
            AddOutcome::PersistFailed => write!(f, "Failed to save favorites"),
            AddOutcome::InvalidUrl => write!(f, "Cannot add an empty URL"),
        }
    }
}

/// Result of `FavoritesStore::remove`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    PersistFailed,
}

impl RemoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RemoveOutcome::Removed)
    }
}

impl fmt::Display for RemoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveOutcome::Removed => write!(f, "Removed from favorites"),
            RemoveOutcome::PersistFailed => write!(f, "Failed to save favorites"),
        }
    }
}
