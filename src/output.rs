// Thin I/O wrapper: render once, then write the full-size and downscaled PNGs.
// Rendering finishes before the first byte is written, so a failed render
// never leaves a half-written icon set behind.

use crate::error::Error;
use crate::icon::{SECONDARY_SIZE, render, resize};
use crate::style::IconStyle;
use image::{ImageError, ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

pub const FULL_NAME: &str = "icon.png";
pub const SECONDARY_NAME: &str = "icon_256.png";

/// Where the icon set ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    pub full: PathBuf,
    pub secondary: PathBuf,
}

/// Render `style` at `size`, downscale to [`SECONDARY_SIZE`], write both
/// into `dir` (created if missing).
pub fn write_icon_set(dir: &Path, size: u32, style: &IconStyle) -> Result<IconSet, Error> {
    let full = render(size, style)?;
    let small = resize(&full, SECONDARY_SIZE)?;

    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let set = IconSet { full: dir.join(FULL_NAME), secondary: dir.join(SECONDARY_NAME) };
    save_png(&full, &set.full)?;
    log::info!("icon saved: {size}x{size} PNG -> {}", set.full.display());
    save_png(&small, &set.secondary)?;
    log::info!("also saved {SECONDARY_SIZE}x{SECONDARY_SIZE} version -> {}", set.secondary.display());
    Ok(set)
}

/// Encode as PNG. I/O failures keep the path; everything else is an encode error.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), Error> {
    img.save_with_format(path, ImageFormat::Png).map_err(|e| match e {
        ImageError::IoError(io) => Error::io(path, io),
        other => Error::Encode(other),
    })
}
