//! JSON cache file
//!
//! Persists the lookup cache as one flat JSON object mapping lookup key to
//! formatted result. A missing or empty file reads as an empty cache. Writes
//! replace the file contents wholesale.

use crate::core::traits::CacheStore;
use crate::types::AddressError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default cache file name used by the CLI
pub const DEFAULT_CACHE_FILE: &str = "address_cache.json";

/// Cache store backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonCacheFile {
    path: PathBuf,
}

impl JsonCacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCacheFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonCacheFile {
    fn load(&self) -> Result<BTreeMap<String, String>, AddressError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AddressError::IoError {
                    message: format!(
                        "Failed to read cache file '{}': {}",
                        self.path.display(),
                        e
                    ),
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AddressError::cache_corrupt(&self.path.display().to_string(), &e.to_string())
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), AddressError> {
        let json = serde_json::to_string(entries).map_err(|e| AddressError::IoError {
            message: format!("Failed to serialize cache: {}", e),
        })?;

        fs::write(&self.path, json).map_err(|e| AddressError::IoError {
            message: format!(
                "Failed to write cache file '{}': {}",
                self.path.display(),
                e
            ),
        })
    }
}
