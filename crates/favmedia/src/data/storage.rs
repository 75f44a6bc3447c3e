//! Storage layer
//!
//! Key-value persistence for serialized snapshots. Each key holds one
//! UTF-8 text value that is replaced whole on every write.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Single-value-per-key text storage
///
/// `get` never fails on a missing key; it returns `Ok(None)`. `set` replaces
/// the whole value and reports failure as an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// FileStore - one file per key in a directory
// =============================================================================

/// Stores each key as `<dir>/<key>.json`
///
/// Writes go to a temporary sibling first and are renamed over the target,
/// so a reader sees either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

/// Suffix for temporary files, unique per write within the process
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileStore {
    /// Store rooted at an explicit directory (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing a key
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(&self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        create_dir_if_needed(&self.dir)?;

        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .dir
            .join(format!(".{}.json.{}.{}.tmp", key, std::process::id(), n));

        replace_file(&tmp, &path, value)
    }
}

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

/// Keys become file names, so they must be a single plain path component
fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(AppError::Storage(format!("Invalid storage key {:?}", key)));
    }
    Ok(())
}

fn create_dir_if_needed(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("Permission denied: cannot create directory {:?}", path)
                }
                ErrorKind::NotFound => {
                    format!("Cannot create directory {:?}: parent path does not exist", path)
                }
                _ => format!("Failed to create directory {:?}: {}", path, e),
            };
            Err(AppError::Storage(msg))
        }
    }
}

/// Read a value file
///
/// Bytes that are not UTF-8 come back as `AppError::Decode`, keeping them
/// apart from I/O failures.
fn read_file(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return match e.kind() {
                ErrorKind::NotFound => Ok(None),
                ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
                    "Permission denied: cannot read {:?}",
                    path
                ))),
                _ => Err(AppError::Storage(format!("Failed to read {:?}: {}", path, e))),
            };
        }
    };

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| AppError::Decode(format!("{:?} is not valid UTF-8: {}", path, e)))
}

/// Write `content` to `tmp`, flush it to disk, and rename it over `path`
///
/// `tmp` is removed again if any step fails.
fn replace_file(tmp: &Path, path: &Path, content: &str) -> Result<()> {
    let result = write_synced(tmp, content).and_then(|()| {
        fs::rename(tmp, path).map_err(|e| {
            AppError::Storage(format!("Failed to replace {:?}: {}", path, e))
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(tmp);
    }
    result
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let written = File::create(path).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });

    written.map_err(|e| {
        let msg = match e.kind() {
            ErrorKind::PermissionDenied => {
                format!("Permission denied: cannot write to {:?}", path)
            }
            ErrorKind::NotFound => {
                format!("Cannot write to {:?}: parent directory does not exist", path)
            }
            ErrorKind::ReadOnlyFilesystem => {
                format!("Cannot write to {:?}: filesystem is read-only", path)
            }
            ErrorKind::StorageFull => format!("Cannot write to {:?}: no space left", path),
            _ => format!("Failed to write to {:?}: {}", path, e),
        };
        AppError::Storage(msg)
    })
}

// =============================================================================
// MemoryStore - in-process map
// =============================================================================

/// In-memory store
///
/// Clones share the same map, which lets a test reopen "the same storage"
/// from a second handle. Access is serialized per store by a mutex.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail until turned off again
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Write a raw value, bypassing the failure switch
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.lock().insert(key.into(), value.into());
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!(
                "Write rejected for key '{}'",
                key
            )));
        }
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
