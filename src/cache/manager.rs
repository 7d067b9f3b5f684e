//! Cache manager for persisting weekly menus to disk
//!
//! Provides a `CacheManager` that stores one `MenuEntrySet` per cache key as a JSON
//! file. Stored weeks never expire; the caller decides when a week must be re-fetched.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::MenuEntrySet;
use crate::week::CacheKey;

/// Wrapper struct for cached menus stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached entries
    entries: T,
    /// When the entries were cached
    cached_at: DateTime<Utc>,
}

/// Manages reading and writing cached menus to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache directory
/// (`~/.cache/bandeco/` on Linux), one file per `<week>r<restaurant>` key.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Uses `~/.cache/bandeco/` on Linux, or equivalent XDG path on other platforms.
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "bandeco")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Used for the `--cache-dir` option and in tests.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory where cache files are stored
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given key
    pub fn cache_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes a week's entries under the given key, replacing any previous file
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn store(&self, key: &CacheKey, entries: &MenuEntrySet) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            entries,
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads a week's entries for the given key
    ///
    /// Returns `None` if the file is missing, unreadable or cannot be parsed, so a
    /// damaged cache behaves exactly like an empty one.
    pub fn load(&self, key: &CacheKey) -> Option<MenuEntrySet> {
        let path = self.cache_path(key);
        tracing::debug!(path = %path.display(), "attempting to open cache");

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(error = %e, "cache miss");
                return None;
            }
        };
        match serde_json::from_str::<CacheEntry<MenuEntrySet>>(&content) {
            Ok(entry) => {
                tracing::debug!(cached_at = %entry.cached_at, "cache hit");
                Some(entry.entries)
            }
            Err(e) => {
                tracing::debug!(error = %e, "cache miss");
                None
            }
        }
    }
}
