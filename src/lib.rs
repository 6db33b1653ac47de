//! icon-render: icon collection resolution and SVG rendering
//!
//! This crate loads icon collections (JSON documents of icon bodies,
//! dimensions and aliases), resolves alias chains into complete icon
//! records, and renders them as standalone SVG documents with size,
//! color, rotation, flip and alignment customizations.
//!
//! # Example
//!
//! ```
//! use icon_render::{Collection, RenderParams, render};
//!
//! let collection = Collection::from_json(
//!     r#"{
//!         "prefix": "demo",
//!         "icons": { "arrow": { "body": "<path d=\"M0 0h20v24z\" fill=\"currentColor\"/>" } },
//!         "aliases": { "arrow-down": { "parent": "arrow", "rotate": 1 } },
//!         "width": 20,
//!         "height": 24
//!     }"#,
//!     None,
//! )
//! .unwrap();
//!
//! let icon = collection.icon("arrow-down").unwrap();
//! let svg = render(&icon, &RenderParams::new().with_color("red"));
//!
//! assert_eq!(svg.attribute("viewBox"), Some("0 0 24 20"));
//! assert!(svg.body.contains("fill=\"red\""));
//! ```
//!
//! # Serving requests
//!
//! [`Registry`] finds collections by prefix and caches parsed documents;
//! [`OutputFormatter`] turns a request into a response body:
//!
//! ```no_run
//! use icon_render::{Config, Format, OutputFormatter, Registry};
//!
//! let config = Config::new().with_icons_dir("/srv/icons/json");
//! let registry = Registry::new(&config).unwrap();
//! let formatter = OutputFormatter::new(&config).unwrap();
//!
//! let collection = registry.collection("mdi").unwrap();
//! let response = formatter
//!     .query(&collection, "home", Format::Svg, [("height", "24"), ("color", "red")])
//!     .unwrap();
//! println!("{}", response.body);
//! ```

mod collection;
mod config;
mod error;
mod icon;
mod output;
mod registry;
mod render;
mod resolve;

pub use collection::{Collection, PREFIX_SEPARATOR};
pub use config::Config;
pub use error::{IconError, Result};
pub use icon::{
    AliasData, DEFAULT_SIZE, IconData, IconRecord, VERTICAL_ALIGN_14, VERTICAL_ALIGN_16,
    default_vertical_align,
};
pub use output::{
    BULK_QUERY, DEFAULT_CALLBACK, Format, OutputFormatter, Response, validate_callback,
};
pub use registry::{CollectionCache, MemoryCache, Registry};
pub use render::geometry::{compose_transform, resolve_dimensions, scale_dimension};
pub use render::ids::replace_ids;
pub use render::params::parse_rotation;
pub use render::{
    Alignment, Dimension, HAlign, RenderParams, RenderedSvg, VAlign, ViewBox, format_number,
    render,
};
pub use resolve::{IconSubset, MAX_ALIAS_DEPTH};
