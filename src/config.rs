//! Serializable configuration for the collection registry and formatter.
//!
//! # Example
//!
//! ```
//! use icon_render::Config;
//!
//! let config = Config::new()
//!     .with_icons_dir("/srv/icons/json")
//!     .with_collection("custom", "/srv/icons/custom.json")
//!     .with_callback("Iconify.addCollection");
//!
//! let json = config.to_json().unwrap();
//! let restored = Config::from_json(&json).unwrap();
//! assert_eq!(restored.callback, "Iconify.addCollection");
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};
use crate::output::DEFAULT_CALLBACK;

/// Settings for locating collections and formatting bulk output.
///
/// # JSON Format
///
/// ```json
/// {
///   "iconsDir": "/srv/icons/json",
///   "collections": { "custom": "/srv/icons/custom.json" },
///   "callback": "SimpleSVG._loaderCallback"
/// }
/// ```
///
/// Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory scanned for `<prefix>.json` collection files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons_dir: Option<PathBuf>,

    /// Explicit prefix to file mappings. These win over the directory scan.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub collections: BTreeMap<String, PathBuf>,

    /// Callback used for `js` output when the request names none.
    pub callback: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icons_dir: None,
            collections: BTreeMap::new(),
            callback: DEFAULT_CALLBACK.to_owned(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icons_dir = Some(dir.into());
        self
    }

    pub fn with_collection(mut self, prefix: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.collections.insert(prefix.into(), path.into());
        self
    }

    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = callback.into();
        self
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        Ok(Self::from_json(&text)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
