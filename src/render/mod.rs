//! SVG rendering of resolved icons.
//!
//! [`render`] turns an [`IconRecord`] and a set of [`RenderParams`] into the
//! attributes and inner markup of a standalone `<svg>` element:
//!
//! 1. Pick the regular or inline box.
//! 2. Combine the icon's rotation and flips with the requested ones and
//!    build the wrapper `<g transform>` (see [`geometry::compose_transform`]).
//! 3. Resolve `width`/`height` from the (possibly rotated) box.
//! 4. Rewrite ids, substitute `currentColor` and wrap the body.

pub mod geometry;
pub mod ids;
pub mod params;

pub use geometry::ViewBox;
pub use params::{Alignment, Dimension, HAlign, RenderParams, VAlign};

use std::fmt;

use crate::icon::IconRecord;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Style that forces a compositing layer; avoids subpixel blurring in some browsers.
const ROTATE_RESET_STYLE: &str =
    "-ms-transform: rotate(360deg); -webkit-transform: rotate(360deg); transform: rotate(360deg);";

// ============================================================================
// RenderedSvg
// ============================================================================

/// Attributes and inner markup of a rendered icon.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSvg {
    /// Attributes in output order, excluding the namespace declarations.
    pub attributes: Vec<(&'static str, String)>,
    /// Icon markup after id rewriting, color substitution and transforms.
    pub body: String,
}

impl RenderedSvg {
    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Assembles the complete `<svg>` document.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RenderedSvg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"<svg xmlns="{SVG_NAMESPACE}" xmlns:xlink="{XLINK_NAMESPACE}""#)?;
        for (name, value) in &self.attributes {
            write!(f, r#" {name}="{value}""#)?;
        }
        write!(f, ">{}</svg>", self.body)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders `icon` with the given customizations.
pub fn render(icon: &IconRecord, params: &RenderParams) -> RenderedSvg {
    let mut view_box = ViewBox::for_icon(icon, params.inline);

    let transform = geometry::compose_transform(
        &mut view_box,
        icon.rotate.wrapping_add(params.rotate),
        icon.h_flip != params.h_flip,
        icon.v_flip != params.v_flip,
    );

    let (width, height) =
        geometry::resolve_dimensions(params.width.as_ref(), params.height.as_ref(), &view_box);

    let mut style = String::new();
    if params.inline && icon.vertical_align != 0.0 {
        style.push_str(&format!(
            "vertical-align: {}em;",
            format_number(icon.vertical_align)
        ));
    }
    style.push_str(ROTATE_RESET_STYLE);

    let mut body = ids::replace_ids(&icon.body);
    if let Some(color) = &params.color {
        body = body.replace("currentColor", color);
    }
    if let Some(transform) = transform {
        body = format!(r#"<g transform="{transform}">{body}</g>"#);
    }
    if params.debug_box {
        body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="rgba(0, 0, 0, 0)" />"#,
            format_number(view_box.left),
            format_number(view_box.top),
            format_number(view_box.width),
            format_number(view_box.height)
        ));
    }

    RenderedSvg {
        attributes: vec![
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("style", style),
            ("preserveAspectRatio", params.align.preserve_aspect_ratio()),
            ("viewBox", view_box.to_string()),
        ],
        body,
    }
}

/// Formats a number the way SVG attributes want it: no trailing `.0`, no `-0`.
pub fn format_number(value: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    format!("{}", value + 0.0)
}
