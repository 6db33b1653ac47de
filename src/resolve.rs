//! Icon and alias resolution.
//!
//! [`Collection::icon`] walks an alias chain down to its icon and returns a
//! complete [`IconRecord`]. [`Collection::icons`] copies the raw records a
//! client needs to resolve a set of names on its own.

use indexmap::IndexMap;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::{IconError, Result};
use crate::icon::{AliasData, IconData, IconRecord};

/// Maximum number of parent hops followed from an alias.
///
/// Cyclic chains never reach an icon within this bound and resolve as not found.
pub const MAX_ALIAS_DEPTH: usize = 5;

/// Raw icon and alias records selected from a collection.
///
/// Serializes to the bulk JSON format. An empty `aliases` map is omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IconSubset {
    pub prefix: String,
    pub icons: IndexMap<String, IconData>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, AliasData>,
}

impl IconSubset {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            ..Self::default()
        }
    }

    /// Returns true if `name` was already copied as an icon or alias.
    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Returns true if no icons were copied.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl Collection {
    /// Resolves an icon or alias to a complete record.
    ///
    /// Alias overrides are folded onto their ancestors (see
    /// [`IconData::merge_from`]) and defaults are applied once at the end.
    pub fn icon(&self, name: &str) -> Result<IconRecord> {
        if let Some(icon) = self.icon_data().get(name) {
            return Ok(icon.clone().into_record());
        }

        let alias = self
            .alias_data()
            .get(name)
            .ok_or_else(|| IconError::NotFound(name.to_owned()))?;

        let mut merged = alias.overrides.clone();
        let mut parent = alias.parent.as_str();

        for _ in 0..MAX_ALIAS_DEPTH {
            if let Some(icon) = self.icon_data().get(parent) {
                merged.merge_from(icon);
                return Ok(merged.into_record());
            }
            let Some(next) = self.alias_data().get(parent) else {
                tracing::debug!("alias {:?} points at missing {:?}", name, parent);
                return Err(IconError::NotFound(name.to_owned()));
            };
            tracing::trace!("alias {:?}: following {:?}", name, parent);
            merged.merge_from(&next.overrides);
            parent = &next.parent;
        }

        tracing::debug!("alias {:?} exceeds {} hops", name, MAX_ALIAS_DEPTH);
        Err(IconError::NotFound(name.to_owned()))
    }

    /// Copies the raw records needed to render `names`.
    ///
    /// Each alias brings its ancestors along. Names that do not resolve are
    /// dropped without error; check [`IconSubset::is_empty`] for a miss.
    pub fn icons<I, S>(&self, names: I) -> IconSubset
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut subset = IconSubset::new(self.prefix());
        for name in names {
            let name = name.as_ref();
            if !self.copy_into(name, 0, &mut subset) {
                tracing::debug!("dropping unresolved name {:?}", name);
            }
        }
        subset
    }

    /// Copies `name` and its ancestors. Nothing is copied unless the chain
    /// ends at an icon within the hop bound.
    fn copy_into(&self, name: &str, depth: usize, subset: &mut IconSubset) -> bool {
        if subset.contains(name) {
            return true;
        }
        if depth > MAX_ALIAS_DEPTH {
            return false;
        }
        if let Some(icon) = self.icon_data().get(name) {
            subset.icons.insert(name.to_owned(), icon.clone());
            return true;
        }
        let Some(alias) = self.alias_data().get(name) else {
            return false;
        };
        if !self.copy_into(&alias.parent, depth + 1, subset) {
            return false;
        }
        subset.aliases.insert(name.to_owned(), alias.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> Collection {
        Collection::from_value(
            json!({
                "prefix": "foo",
                "icons": {
                    "icon1": { "body": "<icon1 />" },
                    "icon2": {
                        "body": "<icon2 />",
                        "rotate": 3,
                        "hFlip": true,
                        "vFlip": true,
                        "top": -3
                    },
                    "icon3": { "body": "<icon3 />" },
                    "icon4": { "body": "<icon4 />", "width": 30, "left": -10, "top": -5 }
                },
                "aliases": {
                    "alias1": { "parent": "icon1", "rotate": 1 },
                    "alias2": {
                        "parent": "icon2",
                        "rotate": 2,
                        "hFlip": true,
                        "width": 30,
                        "height": 28
                    },
                    "alias3": { "parent": "missing-icon" },
                    "alias4": { "parent": "alias5" },
                    "alias5": { "parent": "alias4" }
                },
                "width": 20,
                "height": 20
            }),
            None,
        )
        .unwrap()
    }

    /// Builds `chain0 -> chain1 -> ... -> chain{depth-1} -> base`.
    fn chain(depth: usize) -> Collection {
        let mut icons = IndexMap::new();
        icons.insert("base".to_owned(), IconData::new("<base />"));
        let mut aliases = IndexMap::new();
        for i in 0..depth {
            let parent = if i + 1 == depth {
                "base".to_owned()
            } else {
                format!("chain{}", i + 1)
            };
            aliases.insert(format!("chain{i}"), AliasData::new(parent, IconData::default().with_rotate(1)));
        }
        Collection::from_parts("test", icons, aliases)
    }

    #[test]
    fn direct_icon_gets_defaults() {
        let record = collection().icon("icon4").unwrap();
        assert_eq!(record.body, "<icon4 />");
        assert_eq!(record.left, -10.0);
        assert_eq!(record.top, -5.0);
        assert_eq!(record.width, 30.0);
        assert_eq!(record.height, 20.0);
        assert_eq!(record.inline_top, -5.0);
        assert_eq!(record.inline_height, 20.0);
        assert_eq!(record.vertical_align, -0.125);
    }

    #[test]
    fn simple_alias() {
        let record = collection().icon("alias1").unwrap();
        assert_eq!(record.body, "<icon1 />");
        assert_eq!(record.rotate, 1);
        assert_eq!((record.width, record.height), (20.0, 20.0));
    }

    #[test]
    fn alias_overrides_win_and_transforms_merge() {
        let record = collection().icon("alias2").unwrap();
        assert_eq!(record.body, "<icon2 />");
        assert_eq!(record.left, 0.0);
        assert_eq!(record.top, -3.0);
        assert_eq!(record.width, 30.0);
        assert_eq!(record.height, 28.0);
        assert_eq!(record.inline_top, -3.0);
        assert_eq!(record.inline_height, 28.0);
        assert_eq!(record.rotate, 5);
        assert!(!record.h_flip);
        assert!(record.v_flip);
        assert_eq!(record.vertical_align, -0.143);
    }

    #[test]
    fn broken_and_cyclic_aliases_are_not_found() {
        let collection = collection();
        assert!(matches!(collection.icon("alias3"), Err(IconError::NotFound(_))));
        assert!(matches!(collection.icon("alias4"), Err(IconError::NotFound(_))));
        assert!(matches!(collection.icon("whatever"), Err(IconError::NotFound(_))));
    }

    #[test]
    fn chain_depth_bound() {
        let ok = chain(MAX_ALIAS_DEPTH).icon("chain0").unwrap();
        assert_eq!(ok.rotate, MAX_ALIAS_DEPTH as i32);

        assert!(matches!(
            chain(MAX_ALIAS_DEPTH + 1).icon("chain0"),
            Err(IconError::NotFound(_))
        ));
    }

    #[test]
    fn stacked_rotations_accumulate() {
        let mut icons = IndexMap::new();
        icons.insert("icon".to_owned(), IconData::new("<i />"));
        let mut aliases = IndexMap::new();
        aliases.insert("outer".to_owned(), AliasData::new("inner", IconData::default().with_rotate(3)));
        aliases.insert("inner".to_owned(), AliasData::new("icon", IconData::default().with_rotate(2)));
        let collection = Collection::from_parts("x", icons, aliases);

        let record = collection.icon("outer").unwrap();
        assert_eq!(record.rotate.rem_euclid(4), 1);
    }

    #[test]
    fn bulk_copies_raw_records() {
        let subset = collection().icons(["icon1", "icon3", "unknown"]);
        assert_eq!(subset.prefix, "foo");
        let names: Vec<_> = subset.icons.keys().map(String::as_str).collect();
        assert_eq!(names, ["icon1", "icon3"]);
        assert_eq!(subset.icons["icon1"], IconData::new("<icon1 />").with_size(20.0, 20.0));
        assert!(subset.aliases.is_empty());
    }

    #[test]
    fn bulk_alias_pulls_in_parent() {
        let subset = collection().icons(["icon20", "alias1", "alias1"]);
        let names: Vec<_> = subset.icons.keys().map(String::as_str).collect();
        assert_eq!(names, ["icon1"]);
        assert_eq!(
            subset.aliases["alias1"],
            AliasData::new("icon1", IconData::default().with_rotate(1))
        );
    }

    #[test]
    fn bulk_drops_broken_chains() {
        let subset = collection().icons(["alias3", "alias4", "alias10"]);
        assert!(subset.is_empty());
        assert!(subset.aliases.is_empty());

        let subset = chain(MAX_ALIAS_DEPTH + 1).icons(["chain0"]);
        assert!(subset.is_empty());
        assert!(subset.aliases.is_empty());

        let subset = chain(MAX_ALIAS_DEPTH).icons(["chain0"]);
        assert_eq!(subset.icons.len(), 1);
        assert_eq!(subset.aliases.len(), MAX_ALIAS_DEPTH);
    }

    #[test]
    fn bulk_json_shape() {
        let json = serde_json::to_string(&collection().icons(["icon3"])).unwrap();
        assert_eq!(
            json,
            r#"{"prefix":"foo","icons":{"icon3":{"body":"<icon3 />","width":20,"height":20}}}"#
        );
    }
}
