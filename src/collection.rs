//! Collection loading and normalization.
//!
//! A collection document looks like this:
//!
//! ```json
//! {
//!   "prefix": "mdi",
//!   "icons": { "home": { "body": "<path d=\"...\"/>" } },
//!   "aliases": { "house": { "parent": "home" } },
//!   "width": 24,
//!   "height": 24
//! }
//! ```
//!
//! Loading does two things once, up front: top-level numeric and boolean
//! attributes are pushed down into every icon that lacks them, and when the
//! document carries no `prefix`, the caller's expected prefix is stripped
//! from every key.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{IconError, Result};
use crate::icon::{AliasData, IconData};

/// Separator between a collection prefix and an icon name.
pub const PREFIX_SEPARATOR: char = '-';

/// A loaded, normalized icon collection.
///
/// Keys of `icons` and `aliases` never include the prefix. A `Collection`
/// is immutable once built and can be shared across threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    prefix: String,
    icons: IndexMap<String, IconData>,
    aliases: IndexMap<String, AliasData>,
}

impl Collection {
    /// Parses and normalizes a collection from JSON text.
    ///
    /// `expected_prefix` is only consulted when the document has no `prefix`
    /// of its own. Any malformed input yields [`IconError::NotLoaded`].
    pub fn from_json(json: &str, expected_prefix: Option<&str>) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| IconError::NotLoaded(format!("invalid JSON: {e}")))?;
        Self::from_value(value, expected_prefix)
    }

    /// Normalizes an already parsed collection document.
    pub fn from_value(value: Value, expected_prefix: Option<&str>) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(not_loaded("document is not an object"));
        };

        let raw_icons = match root.remove("icons") {
            Some(Value::Object(icons)) => icons,
            Some(_) => return Err(not_loaded("`icons` is not a mapping")),
            None => return Err(not_loaded("document has no `icons`")),
        };
        let raw_aliases = match root.remove("aliases") {
            Some(Value::Object(aliases)) => aliases,
            Some(Value::Null) | None => Map::new(),
            Some(_) => return Err(not_loaded("`aliases` is not a mapping")),
        };
        let declared_prefix = match root.remove("prefix") {
            Some(Value::String(prefix)) => prefix,
            _ => String::new(),
        };

        let defaults = shared_defaults(root)?;

        let mut icons = IndexMap::with_capacity(raw_icons.len());
        for (name, raw) in raw_icons {
            let mut icon: IconData = serde_json::from_value(raw)
                .map_err(|e| IconError::NotLoaded(format!("invalid icon {name:?}: {e}")))?;
            icon.fill_defaults(&defaults);
            icons.insert(name, icon);
        }

        let mut aliases = IndexMap::with_capacity(raw_aliases.len());
        for (name, raw) in raw_aliases {
            let alias: AliasData = serde_json::from_value(raw)
                .map_err(|e| IconError::NotLoaded(format!("invalid alias {name:?}: {e}")))?;
            aliases.insert(name, alias);
        }

        if !declared_prefix.is_empty() {
            return Ok(Self {
                prefix: declared_prefix,
                icons,
                aliases,
            });
        }

        let Some(prefix) = expected_prefix.filter(|p| !p.is_empty()) else {
            return Err(not_loaded("document has no prefix and none was expected"));
        };

        let icons = strip_keys(icons, prefix)?;
        let mut aliases = strip_keys(aliases, prefix)?;
        for alias in aliases.values_mut() {
            alias.parent = strip_prefix(&alias.parent, prefix)
                .ok_or_else(|| unprefixed(&alias.parent, prefix))?
                .to_owned();
        }

        Ok(Self {
            prefix: prefix.to_owned(),
            icons,
            aliases,
        })
    }

    /// Builds a collection from already normalized parts.
    pub fn from_parts(
        prefix: impl Into<String>,
        icons: IndexMap<String, IconData>,
        aliases: IndexMap<String, AliasData>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            icons,
            aliases,
        }
    }

    /// Returns the collection prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the raw icon records.
    pub fn icon_data(&self) -> &IndexMap<String, IconData> {
        &self.icons
    }

    /// Returns the raw alias records.
    pub fn alias_data(&self) -> &IndexMap<String, AliasData> {
        &self.aliases
    }

    /// Returns true if `name` is an icon or an alias in this collection.
    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Returns the number of icons plus aliases.
    pub fn len(&self) -> usize {
        self.icons.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty() && self.aliases.is_empty()
    }
}

/// Extracts the document-wide icon attributes from what remains of the root.
fn shared_defaults(mut root: Map<String, Value>) -> Result<IconData> {
    root.retain(|_, value| value.is_number() || value.is_boolean());
    let defaults: IconData = serde_json::from_value(Value::Object(root))
        .map_err(|e| IconError::NotLoaded(format!("invalid shared attribute: {e}")))?;
    Ok(defaults)
}

fn strip_keys<T>(items: IndexMap<String, T>, prefix: &str) -> Result<IndexMap<String, T>> {
    items
        .into_iter()
        .map(|(key, item)| match strip_prefix(&key, prefix) {
            Some(stripped) => Ok((stripped.to_owned(), item)),
            None => Err(unprefixed(&key, prefix)),
        })
        .collect()
}

/// Strips `prefix-` from `key`, requiring a non-empty remainder.
fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix(PREFIX_SEPARATOR)
        .filter(|rest| !rest.is_empty())
}

fn not_loaded(reason: &str) -> IconError {
    tracing::debug!("rejecting collection: {}", reason);
    IconError::NotLoaded(reason.to_owned())
}

fn unprefixed(key: &str, prefix: &str) -> IconError {
    tracing::debug!("rejecting collection: {:?} lacks prefix {:?}", key, prefix);
    IconError::NotLoaded(format!("{key:?} is not prefixed with \"{prefix}{PREFIX_SEPARATOR}\""))
}
