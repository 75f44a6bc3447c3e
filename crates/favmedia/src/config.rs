//! Configuration constants for favmedia

/// Application metadata
pub mod app {
    /// Application name (used for the config directory)
    pub const NAME: &str = "favmedia";
}

/// Favorites list configuration
pub mod favorites {
    /// Key the favorites snapshot is stored under
    pub const STORAGE_KEY: &str = "favoriteMedia";

    /// Maximum number of entries kept in the list
    pub const MAX_FAVORITES: usize = 100;
}

/// Per-store settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key for the snapshot
    pub key: String,
    /// Maximum list length (never below 1)
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: favorites::STORAGE_KEY.to_string(),
            capacity: favorites::MAX_FAVORITES,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.key, "favoriteMedia");
        assert_eq!(config.capacity, 100);
    }

    #[test]
    fn test_capacity_clamped() {
        let config = StoreConfig::new().with_capacity(0);
        assert_eq!(config.capacity, 1);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new().with_key("gifs").with_capacity(5);
        assert_eq!(config.key, "gifs");
        assert_eq!(config.capacity, 5);
    }
}
