//! Procedural microphone app icon.
//!
//! [`render`] draws the icon for an [`IconStyle`] at any size from
//! [`MIN_SIZE`] to [`MAX_SIZE`]; [`resize`] makes the Lanczos-downscaled
//! copy and [`write_icon_set`] writes both as PNG.

pub mod cli;
pub mod color;
pub mod error;
pub mod filter;
pub mod icon;
pub mod logging;
pub mod output;
pub mod preview;
pub mod raster;
pub mod style;
pub mod types;

pub use color::Color;
pub use error::Error;
pub use icon::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, SECONDARY_SIZE, arc_points, render, render_default, resize};
pub use output::{IconSet, write_icon_set};
pub use style::{IconStyle, Preset};
pub use types::{Canvas, Mask};
