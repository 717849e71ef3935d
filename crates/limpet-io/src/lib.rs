#![forbid(unsafe_code)]

//! File adapters around the `limpet` placement engine.
//!
//! - [`xml`] loads scenes from and saves results to the XML exchange format.
//! - [`render`] draws a scene and its placement as SVG, optionally rasterized to PNG.

pub mod error;
pub mod render;
pub mod xml;

pub use error::{LoadError, RenderError, SaveError};
pub use render::{ImageFormat, RenderOptions, scene_to_svg, svg_to_png, write_image};
pub use xml::{load_scene, parse_scene, result_to_xml, save_result};
