//! Icon attribute types.
//!
//! A collection stores icons as partial [`IconData`] records: only the
//! attributes the source document spelled out (plus the collection-wide
//! defaults copied in at load time). Aliases are [`AliasData`]: a parent name
//! and a partial set of overrides. Resolution turns either into a complete
//! [`IconRecord`] with every attribute populated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default icon width and height when neither the icon nor the collection sets one.
pub const DEFAULT_SIZE: f64 = 16.0;

/// Vertical alignment for icons designed on a 16px grid.
pub const VERTICAL_ALIGN_16: f64 = -0.125;

/// Vertical alignment for icons designed on a 14px grid.
pub const VERTICAL_ALIGN_14: f64 = -0.143;

// ============================================================================
// IconData
// ============================================================================

/// Partial icon attributes, as stored in a collection document.
///
/// Serializes to the collection JSON format: camelCase names, absent
/// attributes omitted, integral numbers written as JSON integers. Keys with
/// no typed field (`hidden`, `palette`, ...) are kept in `extra` and written
/// back unchanged.
///
/// ```json
/// { "body": "<path d=\"...\"/>", "width": 24, "height": 24, "hFlip": true }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconData {
    /// Inner SVG markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Left edge of the viewBox.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub left: Option<f64>,

    /// Top edge of the viewBox.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub top: Option<f64>,

    /// Width of the viewBox.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub width: Option<f64>,

    /// Height of the viewBox.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub height: Option<f64>,

    /// Rotation in quarter turns. Whole-number floats such as `1.0` are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "quarter_turns")]
    pub rotate: Option<i32>,

    /// Mirror around the vertical axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,

    /// Mirror around the horizontal axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,

    /// Top edge of the viewBox when rendered inline with text.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub inline_top: Option<f64>,

    /// Height of the viewBox when rendered inline with text.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub inline_height: Option<f64>,

    /// CSS `vertical-align` in em for inline rendering.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "number")]
    pub vertical_align: Option<f64>,

    /// Attributes without a typed field, passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IconData {
    /// Creates icon data holding only a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Sets width and height.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the rotation in quarter turns.
    pub fn with_rotate(mut self, rotate: i32) -> Self {
        self.rotate = Some(rotate);
        self
    }

    /// Sets the flip flags.
    pub fn with_flip(mut self, h_flip: bool, v_flip: bool) -> Self {
        self.h_flip = Some(h_flip);
        self.v_flip = Some(v_flip);
        self
    }

    /// Copies every attribute of `defaults` that this record lacks.
    ///
    /// `body` is never taken from defaults.
    pub fn fill_defaults(&mut self, defaults: &IconData) {
        fill(&mut self.left, defaults.left);
        fill(&mut self.top, defaults.top);
        fill(&mut self.width, defaults.width);
        fill(&mut self.height, defaults.height);
        fill(&mut self.rotate, defaults.rotate);
        fill(&mut self.h_flip, defaults.h_flip);
        fill(&mut self.v_flip, defaults.v_flip);
        fill(&mut self.inline_top, defaults.inline_top);
        fill(&mut self.inline_height, defaults.inline_height);
        fill(&mut self.vertical_align, defaults.vertical_align);
        fill_extra(&mut self.extra, &defaults.extra);
    }

    /// Folds a less specific ancestor (parent alias or icon) beneath this record.
    ///
    /// Missing attributes are inherited. Present ones stay as they are, except
    /// `rotate`, which is summed, and the flips, which toggle.
    pub fn merge_from(&mut self, ancestor: &IconData) {
        if self.body.is_none() {
            self.body.clone_from(&ancestor.body);
        }
        fill(&mut self.left, ancestor.left);
        fill(&mut self.top, ancestor.top);
        fill(&mut self.width, ancestor.width);
        fill(&mut self.height, ancestor.height);
        fill(&mut self.inline_top, ancestor.inline_top);
        fill(&mut self.inline_height, ancestor.inline_height);
        fill(&mut self.vertical_align, ancestor.vertical_align);

        self.rotate = match (self.rotate, ancestor.rotate) {
            // Only the value modulo 4 matters, so wrapping keeps it exact.
            (Some(own), Some(inherited)) => Some(own.wrapping_add(inherited)),
            (own, inherited) => own.or(inherited),
        };
        self.h_flip = toggle(self.h_flip, ancestor.h_flip);
        self.v_flip = toggle(self.v_flip, ancestor.v_flip);
        fill_extra(&mut self.extra, &ancestor.extra);
    }

    /// Applies the default attribute rules and returns a complete record.
    pub fn into_record(self) -> IconRecord {
        let top = self.top.unwrap_or(0.0);
        let height = self.height.unwrap_or(DEFAULT_SIZE);
        IconRecord {
            body: self.body.unwrap_or_default(),
            left: self.left.unwrap_or(0.0),
            top,
            width: self.width.unwrap_or(DEFAULT_SIZE),
            height,
            rotate: self.rotate.unwrap_or(0),
            h_flip: self.h_flip.unwrap_or(false),
            v_flip: self.v_flip.unwrap_or(false),
            inline_top: self.inline_top.unwrap_or(top),
            inline_height: self.inline_height.unwrap_or(height),
            vertical_align: self
                .vertical_align
                .unwrap_or_else(|| default_vertical_align(height)),
        }
    }
}

fn fill<T: Copy>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn fill_extra(extra: &mut Map<String, Value>, from: &Map<String, Value>) {
    for (key, value) in from {
        if !extra.contains_key(key) {
            extra.insert(key.clone(), value.clone());
        }
    }
}

fn toggle(own: Option<bool>, inherited: Option<bool>) -> Option<bool> {
    match (own, inherited) {
        (Some(own), Some(inherited)) => Some(own != inherited),
        (own, inherited) => own.or(inherited),
    }
}

/// Picks the inline vertical alignment from the icon height.
///
/// Heights divisible by 7 but not by 8 are assumed to be drawn on a 14px grid.
pub fn default_vertical_align(height: f64) -> f64 {
    let height = height.trunc() as i64;
    if height % 7 == 0 && height % 8 != 0 {
        VERTICAL_ALIGN_14
    } else {
        VERTICAL_ALIGN_16
    }
}

// ============================================================================
// AliasData
// ============================================================================

/// An alias: another icon or alias plus attribute overrides.
///
/// Serialized flat, with the overrides next to `parent`:
///
/// ```json
/// { "parent": "arrow-left", "hFlip": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasData {
    /// Name of the icon or alias this one derives from.
    pub parent: String,

    /// Attributes that replace or combine with the parent's.
    #[serde(flatten)]
    pub overrides: IconData,
}

impl AliasData {
    pub fn new(parent: impl Into<String>, overrides: IconData) -> Self {
        Self {
            parent: parent.into(),
            overrides,
        }
    }
}

// ============================================================================
// IconRecord
// ============================================================================

/// A fully resolved icon with every attribute populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    /// Inner SVG markup.
    pub body: String,
    /// Left edge of the viewBox.
    pub left: f64,
    /// Top edge of the viewBox.
    pub top: f64,
    /// Width of the viewBox.
    pub width: f64,
    /// Height of the viewBox.
    pub height: f64,
    /// Rotation in quarter turns, not yet reduced modulo 4.
    pub rotate: i32,
    /// Mirror around the vertical axis.
    pub h_flip: bool,
    /// Mirror around the horizontal axis.
    pub v_flip: bool,
    /// Top edge of the inline viewBox.
    pub inline_top: f64,
    /// Height of the inline viewBox.
    pub inline_height: f64,
    /// CSS `vertical-align` in em for inline rendering.
    pub vertical_align: f64,
}

impl IconRecord {
    /// Resolves a standalone icon body with default attributes.
    pub fn from_body(body: impl Into<String>) -> Self {
        IconData::new(body).into_record()
    }
}

// ============================================================================
// Number serialization
// ============================================================================

/// Writes whole numbers as JSON integers so `24.0` round-trips as `24`.
mod number {
    use serde::{Deserialize, Deserializer, Serializer};

    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.fract() == 0.0 && v.abs() < MAX_EXACT => serializer.serialize_i64(*v as i64),
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Option::<f64>::deserialize(deserializer)
    }
}

/// Rotation in quarter turns, read from any whole JSON number.
mod quarter_turns {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_i32(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        let Some(value) = Option::<f64>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
            return Err(D::Error::custom(format!("rotate must be a whole number, got {value}")));
        }
        Ok(Some(value as i32))
    }
}
