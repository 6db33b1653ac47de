//! Collection lookup by prefix, with a pluggable parsed-collection cache.
//!
//! A [`Registry`] maps prefixes to JSON files, either from an explicit list
//! or by scanning a directory for `<prefix>.json`. Parsed collections are
//! kept in a [`CollectionCache`] keyed by prefix and reused until the
//! source file's modification time changes.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::{IconError, Result};

// ============================================================================
// Cache
// ============================================================================

/// Storage for parsed collections.
///
/// `get` must only return an entry stored with the same `modified` time.
pub trait CollectionCache: Send + Sync {
    fn get(&self, prefix: &str, modified: SystemTime) -> Option<Arc<Collection>>;
    fn put(&self, prefix: &str, modified: SystemTime, collection: Arc<Collection>);
}

/// In-process cache holding the latest parse of each collection.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (SystemTime, Arc<Collection>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CollectionCache for MemoryCache {
    fn get(&self, prefix: &str, modified: SystemTime) -> Option<Arc<Collection>> {
        let entries = self.entries.read().ok()?;
        entries
            .get(prefix)
            .filter(|(stamp, _)| *stamp == modified)
            .map(|(_, collection)| Arc::clone(collection))
    }

    fn put(&self, prefix: &str, modified: SystemTime, collection: Arc<Collection>) {
        // A poisoned lock only costs us the cache entry.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(prefix.to_owned(), (modified, collection));
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Prefix to collection file mapping.
pub struct Registry {
    sources: BTreeMap<String, PathBuf>,
    cache: Box<dyn CollectionCache>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Builds a registry from `config` with an in-memory cache.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_cache(config, MemoryCache::new())
    }

    /// Builds a registry from `config` backed by `cache`.
    ///
    /// Fails when `icons_dir` is set but cannot be read.
    pub fn with_cache(config: &Config, cache: impl CollectionCache + 'static) -> Result<Self> {
        let mut sources = match &config.icons_dir {
            Some(dir) => scan_dir(dir)?,
            None => BTreeMap::new(),
        };
        for (prefix, path) in &config.collections {
            sources.insert(prefix.clone(), path.clone());
        }
        tracing::info!("registered {} icon collections", sources.len());

        Ok(Self {
            sources,
            cache: Box::new(cache),
        })
    }

    /// Registered prefixes in sorted order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn source(&self, prefix: &str) -> Option<&Path> {
        self.sources.get(prefix).map(PathBuf::as_path)
    }

    /// Modification time of the collection file, for `Last-Modified` style headers.
    pub fn modified(&self, prefix: &str) -> Result<SystemTime> {
        let path = self.path(prefix)?;
        modified_time(path)
    }

    /// Returns the parsed collection for `prefix`, loading it if the cached
    /// copy is missing or stale.
    pub fn collection(&self, prefix: &str) -> Result<Arc<Collection>> {
        let path = self.path(prefix)?;
        let modified = modified_time(path)?;

        if let Some(collection) = self.cache.get(prefix, modified) {
            tracing::trace!("cache hit for {}", prefix);
            return Ok(collection);
        }

        tracing::debug!("loading collection {} from {}", prefix, path.display());
        let text = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        let collection = Arc::new(Collection::from_json(&text, Some(prefix))?);
        self.cache.put(prefix, modified, Arc::clone(&collection));
        Ok(collection)
    }

    fn path(&self, prefix: &str) -> Result<&Path> {
        self.source(prefix)
            .ok_or_else(|| IconError::UnknownCollection(prefix.to_owned()))
    }
}

fn modified_time(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| IconError::io(path, e))
}

/// Finds `<prefix>.json` files, skipping names that start with `.` or `_`
/// and names with more than one dot.
fn scan_dir(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut sources = BTreeMap::new();
    let entries = std::fs::read_dir(dir).map_err(|e| IconError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| IconError::io(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(prefix) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if prefix.is_empty() || prefix.starts_with('_') || prefix.contains('.') {
            continue;
        }
        sources.insert(prefix.to_owned(), path.clone());
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FOO: &str = r#"{"prefix":"foo","icons":{"bar":{"body":"<bar />"}}}"#;

    fn icons_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.json"), FOO).unwrap();
        fs::write(dir.path().join("_hidden.json"), FOO).unwrap();
        fs::write(dir.path().join(".dot.json"), FOO).unwrap();
        fs::write(dir.path().join("notes.txt"), "not json").unwrap();
        fs::write(dir.path().join("foo.bak.json"), FOO).unwrap();
        dir
    }

    #[test]
    fn scans_directory() {
        let dir = icons_dir();
        let registry = Registry::new(&Config::new().with_icons_dir(dir.path())).unwrap();
        assert_eq!(registry.prefixes().collect::<Vec<_>>(), vec!["foo"]);

        let collection = registry.collection("foo").unwrap();
        assert_eq!(collection.prefix(), "foo");
        assert!(collection.contains("bar"));
    }

    #[test]
    fn explicit_collections_win() {
        let dir = icons_dir();
        let other = dir.path().join("other.data");
        fs::write(&other, r#"{"prefix":"foo","icons":{"baz":{"body":"<baz />"}}}"#).unwrap();

        let config = Config::new()
            .with_icons_dir(dir.path())
            .with_collection("foo", &other);
        let registry = Registry::new(&config).unwrap();
        assert_eq!(registry.source("foo"), Some(other.as_path()));
        assert!(registry.collection("foo").unwrap().contains("baz"));
    }

    #[test]
    fn unknown_prefix() {
        let registry = Registry::new(&Config::new()).unwrap();
        let err = registry.collection("nope").unwrap_err();
        assert!(matches!(err, IconError::UnknownCollection(_)));
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().with_icons_dir(dir.path().join("missing"));
        assert!(matches!(Registry::new(&config), Err(IconError::Io { .. })));
    }

    #[test]
    fn cached_until_modified() {
        let dir = icons_dir();
        let registry = Registry::new(&Config::new().with_icons_dir(dir.path())).unwrap();

        let first = registry.collection("foo").unwrap();
        let second = registry.collection("foo").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn memory_cache_checks_timestamp() {
        let cache = MemoryCache::new();
        let collection = Arc::new(Collection::from_json(FOO, None).unwrap());
        let stamp = SystemTime::UNIX_EPOCH;

        cache.put("foo", stamp, Arc::clone(&collection));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("foo", stamp).is_some());
        assert!(cache.get("foo", SystemTime::now()).is_none());
        assert!(cache.get("bar", stamp).is_none());
    }

    #[test]
    fn mismatched_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.json"), r#"{"icons":{"bar-baz":{"body":""}}}"#).unwrap();
        let registry = Registry::new(&Config::new().with_icons_dir(dir.path())).unwrap();
        assert!(matches!(registry.collection("foo"), Err(IconError::NotLoaded(_))));
    }
}
