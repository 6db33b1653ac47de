//! Render parameters and their query-string parsing.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Dimension
// ============================================================================

/// A requested width or height.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Use the viewBox size for this axis.
    Auto,
    /// Unitless number of user units.
    Number(f64),
    /// Any other CSS length, such as `1em` or `100%`.
    Text(String),
}

impl Dimension {
    pub fn em(value: f64) -> Self {
        Self::Text(format!("{}em", super::format_number(value)))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for Dimension {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        Ok(match s.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(s.to_owned()),
        })
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(dimension) => dimension,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Number(value) => f.write_str(&super::format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// Alignment
// ============================================================================

/// Horizontal placement of the icon inside the rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the icon inside the rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Content alignment inside the rendered box, written as `preserveAspectRatio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    /// `left`, `center` or `right`.
    pub horizontal: HAlign,
    /// `top`, `middle` or `bottom`.
    pub vertical: VAlign,
    /// Crop to fill the box instead of fitting inside it.
    pub slice: bool,
}

impl Alignment {
    /// Parses a comma-separated keyword list such as `left,bottom,slice`.
    ///
    /// Unknown keywords are ignored; later keywords override earlier ones.
    pub fn parse(value: &str) -> Self {
        let mut align = Self::default();
        for token in split_tokens(value) {
            match token.as_str() {
                "left" => align.horizontal = HAlign::Left,
                "center" => align.horizontal = HAlign::Center,
                "right" => align.horizontal = HAlign::Right,
                "top" => align.vertical = VAlign::Top,
                "middle" => align.vertical = VAlign::Middle,
                "bottom" => align.vertical = VAlign::Bottom,
                "slice" | "crop" => align.slice = true,
                "meet" => align.slice = false,
                _ => {}
            }
        }
        align
    }

    /// Returns the `preserveAspectRatio` attribute value.
    pub fn preserve_aspect_ratio(&self) -> String {
        let x = match self.horizontal {
            HAlign::Left => "xMin",
            HAlign::Center => "xMid",
            HAlign::Right => "xMax",
        };
        let y = match self.vertical {
            VAlign::Top => "YMin",
            VAlign::Middle => "YMid",
            VAlign::Bottom => "YMax",
        };
        let scale = if self.slice { "slice" } else { "meet" };
        format!("{x}{y} {scale}")
    }
}

// ============================================================================
// RenderParams
// ============================================================================

/// Caller-supplied customizations applied on top of an icon's own attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderParams {
    /// Requested `width` attribute; derived from `height` when absent.
    pub width: Option<Dimension>,
    /// Requested `height` attribute; derived from `width` when absent.
    pub height: Option<Dimension>,
    /// Replacement for `currentColor` in the icon body.
    pub color: Option<String>,
    /// Extra rotation in quarter turns, added to the icon's own.
    pub rotate: i32,
    /// Toggles the icon's horizontal flip.
    pub h_flip: bool,
    /// Toggles the icon's vertical flip.
    pub v_flip: bool,
    /// Placement inside the box when its aspect ratio differs from the icon's.
    pub align: Alignment,
    /// Use the inline box and add a `vertical-align` style.
    pub inline: bool,
    /// Append a transparent rectangle covering the viewBox.
    pub debug_box: bool,
}

impl RenderParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from query-string pairs.
    ///
    /// Recognized keys: `width`, `height`, `color`, `rotate`, `flip`, `hFlip`,
    /// `vFlip`, `align`, `inline` and `box`. Anything else is ignored, as are
    /// empty values.
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "width" => params.width = Some(Dimension::from(value)),
                "height" => params.height = Some(Dimension::from(value)),
                "color" => params.color = Some(value.to_owned()),
                "rotate" => params.rotate = params.rotate.wrapping_add(parse_rotation(value)),
                "flip" => params.apply_flip(value),
                "hFlip" => params.h_flip ^= is_truthy(value),
                "vFlip" => params.v_flip ^= is_truthy(value),
                "align" => params.align = Alignment::parse(value),
                "inline" => params.inline = is_truthy(value),
                "box" => params.debug_box = is_truthy(value),
                _ => {}
            }
        }
        params
    }

    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_rotate(mut self, quarter_turns: i32) -> Self {
        self.rotate = quarter_turns;
        self
    }

    pub fn with_flip(mut self, value: &str) -> Self {
        self.apply_flip(value);
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Toggles flips from a `horizontal`/`vertical` keyword list.
    fn apply_flip(&mut self, value: &str) {
        for token in split_tokens(value) {
            match token.as_str() {
                "horizontal" => self.h_flip = !self.h_flip,
                "vertical" => self.v_flip = !self.v_flip,
                _ => {}
            }
        }
    }
}

/// Converts a rotation value to quarter turns.
///
/// Accepts plain quarter turns (`1`), degrees (`90deg`) and percent of a full
/// turn (`25%`); degrees and percent round to the nearest quarter turn.
/// Anything unparseable is no rotation.
pub fn parse_rotation(value: &str) -> i32 {
    let value = value.trim();
    let split = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (c == '-' && i == 0)))
        .map_or(value.len(), |(i, _)| i);
    let (number, unit) = value.split_at(split);

    let step = match unit {
        "" => return leading_integer(number),
        "deg" => 90.0,
        "%" => 25.0,
        _ => return 0,
    };
    let amount = leading_integer(number) as f64;
    (amount / step).round() as i32
}

/// Parses the integer part of a numeric string, ignoring any fraction.
fn leading_integer(number: &str) -> i32 {
    let integer = number.split('.').next().unwrap_or_default();
    integer.parse().unwrap_or(0)
}

pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

fn split_tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
}
