//! Favorites management
//!
//! Every operation reads the full snapshot from storage, works on a local
//! copy, and writes the full snapshot back. Nothing is cached between calls,
//! so a failed write leaves the last persisted list as the only state.

use crate::config::StoreConfig;
use crate::data::storage::KeyValueStore;
use crate::data::types::{AddOutcome, FavoriteEntry, RemoveOutcome};
use crate::error::{AppError, Result};
use crate::media::{classify, MediaType};
use std::collections::HashSet;

/// Bounded, deduplicated, newest-first favorites list over a key-value store
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Store with the default key and capacity
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current list, newest first
    ///
    /// Never fails. A missing, unreadable, or undecodable snapshot yields an
    /// empty list; the cause is logged.
    pub fn load(&self) -> Vec<FavoriteEntry> {
        match self.read() {
            Ok(list) => list,
            Err(e) => {
                log::warn!("favmedia: failed to read '{}': {}", self.config.key, e);
                Vec::new()
            }
        }
    }

    /// Read-only view for display surfaces; same as `load`
    pub fn list(&self) -> Vec<FavoriteEntry> {
        self.load()
    }

    /// Add a URL at the front of the list
    pub fn add(&self, url: &str, media_type: MediaType) -> AddOutcome {
        if url.is_empty() {
            return AddOutcome::InvalidUrl;
        }

        // Only a storage read error aborts here; a corrupt payload reads as empty
        let mut list = match self.read() {
            Ok(list) => list,
            Err(e) => {
                log::error!(
                    "favmedia: not adding {}, failed to read '{}': {}",
                    url,
                    self.config.key,
                    e
                );
                return AddOutcome::PersistFailed;
            }
        };

        if list.iter().any(|f| f.url == url) {
            return AddOutcome::AlreadyExists;
        }

        if list.len() >= self.config.capacity {
            return AddOutcome::LimitReached {
                capacity: self.config.capacity,
            };
        }

        list.insert(0, FavoriteEntry::new(url, media_type));

        if !self.persist(&list) {
            return AddOutcome::PersistFailed;
        }

        log::debug!("favmedia: added {} ({})", url, media_type);
        AddOutcome::Added
    }

    /// Add with a type given as a string (`"gif"`, `"image"`, anything else
    /// becomes `unknown`)
    pub fn add_str(&self, url: &str, media_type: &str) -> AddOutcome {
        self.add(url, MediaType::parse(media_type))
    }

    /// Classify the URL, then add it
    ///
    /// Callers that used a plain `add(url)` with an implied `gif` type get
    /// the classified type here instead; pass `MediaType::Gif` to `add` to
    /// keep the old behavior.
    pub fn add_classified(&self, url: &str) -> AddOutcome {
        self.add(url, classify(url))
    }

    /// Remove every entry with this URL
    ///
    /// Removing an absent URL still rewrites the snapshot and reports
    /// `Removed`.
    pub fn remove(&self, url: &str) -> RemoveOutcome {
        let mut list = match self.read() {
            Ok(list) => list,
            Err(e) => {
                log::error!(
                    "favmedia: not removing {}, failed to read '{}': {}",
                    url,
                    self.config.key,
                    e
                );
                return RemoveOutcome::PersistFailed;
            }
        };

        let before = list.len();
        list.retain(|f| f.url != url);

        if !self.persist(&list) {
            return RemoveOutcome::PersistFailed;
        }

        log::debug!("favmedia: removed {} ({} entries)", url, before - list.len());
        RemoveOutcome::Removed
    }

    /// Get an entry by URL
    pub fn get(&self, url: &str) -> Option<FavoriteEntry> {
        self.load().into_iter().find(|f| f.url == url)
    }

    /// Check if a URL is favorited
    pub fn contains(&self, url: &str) -> bool {
        self.load().iter().any(|f| f.url == url)
    }

    /// Entries of one media type, in stored order
    pub fn list_by_type(&self, media_type: MediaType) -> Vec<FavoriteEntry> {
        self.load()
            .into_iter()
            .filter(|f| f.media_type == media_type)
            .collect()
    }

    /// Get number of favorites
    pub fn count(&self) -> usize {
        self.load().len()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn is_full(&self) -> bool {
        self.count() >= self.config.capacity
    }

    /// Snapshot from storage, brought back to the list invariants
    ///
    /// Errors only when the storage read itself fails; undecodable bytes
    /// count as no data.
    fn read(&self) -> Result<Vec<FavoriteEntry>> {
        let content = match self.storage.get(&self.config.key) {
            Ok(Some(c)) if !c.trim().is_empty() => c,
            Ok(_) => return Ok(Vec::new()),
            Err(AppError::Decode(e)) => {
                log::warn!(
                    "favmedia: '{}' could not be decoded, treating as empty: {}",
                    self.config.key,
                    e
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<Vec<FavoriteEntry>>(&content) {
            Ok(list) => Ok(self.sanitize(list)),
            Err(e) => {
                log::warn!(
                    "favmedia: '{}' is not a valid favorites list, treating as empty: {}",
                    self.config.key,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Drop empty URLs, keep the first (newest) of any duplicate URL, and
    /// truncate to capacity
    fn sanitize(&self, list: Vec<FavoriteEntry>) -> Vec<FavoriteEntry> {
        let total = list.len();
        let mut seen = HashSet::with_capacity(total);
        let mut clean: Vec<FavoriteEntry> = list
            .into_iter()
            .filter(|f| !f.url.is_empty() && seen.insert(f.url.clone()))
            .collect();

        if clean.len() < total {
            log::warn!(
                "favmedia: dropped {} empty or duplicate entries from '{}'",
                total - clean.len(),
                self.config.key
            );
        }

        if clean.len() > self.config.capacity {
            log::warn!(
                "favmedia: '{}' holds {} entries, keeping the newest {}",
                self.config.key,
                clean.len(),
                self.config.capacity
            );
            clean.truncate(self.config.capacity);
        }

        clean
    }

    /// Write the full list; false (and logged) on any failure
    fn persist(&self, list: &[FavoriteEntry]) -> bool {
        let content = match serde_json::to_string(list) {
            Ok(c) => c,
            Err(e) => {
                log::error!("favmedia: failed to encode favorites: {}", e);
                return false;
            }
        };

        match self.storage.set(&self.config.key, &content) {
            Ok(()) => true,
            Err(e) => {
                log::error!("favmedia: failed to save '{}': {}", self.config.key, e);
                false
            }
        }
    }
}
