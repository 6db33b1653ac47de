//! ViewBox, transform and dimension math.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::format_number;
use super::params::Dimension;
use crate::icon::IconRecord;

/// Decimal places kept when one dimension is derived from the other.
const PRECISION: f64 = 100.0;

const SNAP: f64 = 1_000_000.0;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9.]*[0-9]+[0-9.]*").expect("valid number pattern"));

// ============================================================================
// ViewBox
// ============================================================================

/// An SVG viewBox in user units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewBox {
    /// Minimum x coordinate.
    pub left: f64,
    /// Minimum y coordinate.
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the icon's regular box, or its inline box when `inline` is set.
    pub fn for_icon(icon: &IconRecord, inline: bool) -> Self {
        if inline {
            Self::new(icon.left, icon.inline_top, icon.width, icon.inline_height)
        } else {
            Self::new(icon.left, icon.top, icon.width, icon.height)
        }
    }

    /// Swaps the horizontal and vertical axes, as a quarter turn does.
    pub fn swap_axes(&mut self) {
        std::mem::swap(&mut self.left, &mut self.top);
        std::mem::swap(&mut self.width, &mut self.height);
    }

    /// Height divided by width.
    pub fn aspect_ratio(&self) -> f64 {
        ratio(self.height, self.width)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.left),
            format_number(self.top),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        1.0
    } else {
        numerator / denominator
    }
}

// ============================================================================
// Transforms
// ============================================================================

/// Builds the `transform` for the wrapper group and adjusts `view_box` to match.
///
/// Flips are applied in the icon's own coordinates first, then the
/// rotation. A flip on both axes is the same as a half turn. Returns `None`
/// when the combined transform is the identity.
pub fn compose_transform(
    view_box: &mut ViewBox,
    rotate: i32,
    h_flip: bool,
    v_flip: bool,
) -> Option<String> {
    let mut rotate = rotate;
    let mut steps: Vec<String> = Vec::new();

    match (h_flip, v_flip) {
        (true, true) => rotate += 2,
        (true, false) => {
            steps.push(format!(
                "translate({} {})",
                format_number(view_box.width + view_box.left),
                format_number(0.0 - view_box.top)
            ));
            steps.push("scale(-1 1)".to_owned());
            view_box.left = 0.0;
            view_box.top = 0.0;
        }
        (false, true) => {
            steps.push(format!(
                "translate({} {})",
                format_number(0.0 - view_box.left),
                format_number(view_box.height + view_box.top)
            ));
            steps.push("scale(1 -1)".to_owned());
            view_box.left = 0.0;
            view_box.top = 0.0;
        }
        (false, false) => {}
    }

    let rotate = rotate.rem_euclid(4);
    let rotation = match rotate {
        1 => {
            let pivot = format_number(view_box.height / 2.0 + view_box.top);
            Some(format!("rotate(90 {pivot} {pivot})"))
        }
        2 => Some(format!(
            "rotate(180 {} {})",
            format_number(view_box.width / 2.0 + view_box.left),
            format_number(view_box.height / 2.0 + view_box.top)
        )),
        3 => {
            let pivot = format_number(view_box.width / 2.0 + view_box.left);
            Some(format!("rotate(-90 {pivot} {pivot})"))
        }
        _ => None,
    };
    if let Some(rotation) = rotation {
        steps.insert(0, rotation);
    }

    if rotate % 2 == 1 {
        view_box.swap_axes();
    }

    if steps.is_empty() {
        None
    } else {
        Some(steps.join(" "))
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Scales `size` by `ratio`, rounding up to two decimals.
///
/// Numbers inside text values are scaled in place, so `1em` at ratio 1.2
/// becomes `1.2em`. `auto` passes through.
pub fn scale_dimension(size: &Dimension, ratio: f64) -> Dimension {
    if ratio == 1.0 {
        return size.clone();
    }
    match size {
        Dimension::Auto => Dimension::Auto,
        Dimension::Number(value) => Dimension::Number(round_up(value * ratio)),
        Dimension::Text(text) => {
            let scaled = NUMBER.replace_all(text, |caps: &Captures| match caps[0].parse::<f64>() {
                Ok(value) => format_number(round_up(value * ratio)),
                Err(_) => caps[0].to_owned(),
            });
            Dimension::Text(scaled.into_owned())
        }
    }
}

fn round_up(value: f64) -> f64 {
    // Snap away float noise first so 10.000000000000002 stays 10.
    let scaled = (value * PRECISION * SNAP).round() / SNAP;
    scaled.ceil() / PRECISION
}

/// Works out the final `width` and `height` attribute values.
///
/// With neither given, the height is `1em`. A single concrete value derives
/// the other from the box's aspect ratio. `auto` with no concrete partner
/// means the box size itself.
pub fn resolve_dimensions(
    width: Option<&Dimension>,
    height: Option<&Dimension>,
    view_box: &ViewBox,
) -> (Dimension, Dimension) {
    let concrete_width = width.filter(|d| !d.is_auto());
    let concrete_height = height.filter(|d| !d.is_auto());

    match (concrete_width, concrete_height) {
        (Some(w), Some(h)) => (w.clone(), h.clone()),
        (Some(w), None) => (w.clone(), scale_dimension(w, view_box.aspect_ratio())),
        (None, Some(h)) => (
            scale_dimension(h, ratio(view_box.width, view_box.height)),
            h.clone(),
        ),
        (None, None) if width.is_none() && height.is_none() => {
            let h = Dimension::em(1.0);
            (scale_dimension(&h, ratio(view_box.width, view_box.height)), h)
        }
        (None, None) => (
            Dimension::Number(view_box.width),
            Dimension::Number(view_box.height),
        ),
    }
}
