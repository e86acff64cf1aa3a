//! Favorites-aware registry cache
//!
//! The registry is persisted as one pretty-printed JSON list. Every save
//! rewrites the whole file through a temporary sibling and a rename, so an
//! interrupted write leaves the previous file intact.
//!
//! There is no version marker. Every field except `filename` has a serde
//! default and unknown fields are ignored, which lets additive schema changes
//! read older files.

use crate::error::{FuzzMenuError, Result};
use crate::logging;
use crate::registry::Registry;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Registry cache file
#[derive(Debug, Clone)]
pub struct RegistryCache {
    path: PathBuf,
}

impl RegistryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the last saved registry. `Ok(None)` when there is no cache yet.
    pub fn load(&self) -> Result<Option<Registry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| FuzzMenuError::CacheCorrupt(self.path.clone(), e))
    }

    /// Like [`load`](Self::load), but a corrupt or unreadable file counts as missing
    pub fn load_or_none(&self) -> Option<Registry> {
        match self.load() {
            Ok(registry) => registry,
            Err(e) => {
                logging::warn("CACHE", &format!("ignoring cache: {}", e));
                None
            }
        }
    }

    /// Write the whole registry
    pub fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(registry)?;
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        logging::debug(
            "CACHE",
            &format!("saved {} applications to {}", registry.len(), self.path.display()),
        );
        Ok(())
    }

    /// Delete the cache file, dropping all favorite state with it
    pub fn flush(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                logging::info("CACHE", &format!("flushed {}", self.path.display()));
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::app;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(dir.path().join("registry.json"));
        assert!(!cache.exists());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(dir.path().join("nested/registry.json"));
        let registry = Registry::new(vec![
            app("a.desktop", "A", &["Utility"], true),
            app("b.desktop", "B", &["Network", "Chat"], false),
        ]);

        cache.save(&registry).unwrap();
        assert!(cache.exists());
        assert_eq!(cache.load().unwrap(), Some(registry));
        assert!(!dir.path().join("nested/registry.json.tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(dir.path().join("registry.json"));
        cache
            .save(&Registry::new(vec![app("a.desktop", "A", &[], false)]))
            .unwrap();
        cache.save(&Registry::default()).unwrap();
        assert_eq!(cache.load().unwrap(), Some(Registry::default()));
    }

    #[test]
    fn corrupt_file_is_reported_then_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = RegistryCache::new(&path);
        assert!(matches!(cache.load(), Err(FuzzMenuError::CacheCorrupt(_, _))));
        assert!(cache.load_or_none().is_none());
    }

    #[test]
    fn flush_removes_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(dir.path().join("registry.json"));
        cache.save(&Registry::default()).unwrap();
        cache.flush().unwrap();
        assert!(!cache.exists());
        cache.flush().unwrap();
    }
}
