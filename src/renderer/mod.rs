//! SVG renderer for key cells
//!
//! This module accumulates the drawn primitives of a sheet and produces
//! the final SVG document.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{KeyRenderer, SvgBuilder};
