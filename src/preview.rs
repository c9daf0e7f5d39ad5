// On-screen preview of a rendered icon.
// Visual: a window shows the icon over a grey checkerboard, so transparent
// corners read as transparent. ESC or closing the window ends the preview.

use crate::error::Error;
use image::RgbaImage;
use minifb::{Key, Window, WindowOptions};

const CHECKER_LIGHT: u32 = 0xCC;
const CHECKER_DARK: u32 = 0x99;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the icon.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Window(e.to_string()))?;
        window.set_target_fps(30);
        Ok(Self { window })
    }

    /// Push 0x00RRGGBB pixels to the screen.
    pub fn present(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), Error> {
        self.window
            .update_with_buffer(pixels, width, height)
            .map_err(|e| Error::Window(e.to_string()))
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }
}

/// Composite `img` over a checkerboard of `cell`-pixel squares and pack as
/// 0x00RRGGBB for the window.
pub fn flatten_onto_checker(img: &RgbaImage, cell: u32) -> Vec<u32> {
    let cell = cell.max(1);
    img.enumerate_pixels()
        .map(|(x, y, px)| {
            let [r, g, b, a] = px.0;
            let bg = if ((x / cell) + (y / cell)) % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK };
            let a = a as u32;
            let mix = |c: u8| (c as u32 * a + bg * (255 - a) + 127) / 255;
            (mix(r) << 16) | (mix(g) << 8) | mix(b)
        })
        .collect()
}

/// Show `img` until the window is closed or ESC is pressed.
pub fn show(img: &RgbaImage, title: &str) -> Result<(), Error> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let pixels = flatten_onto_checker(img, 16);
    let mut drawer = Drawer::new(title, w, h)?;
    log::info!("previewing {w}x{h} icon; press ESC to close");
    while drawer.is_open() && !drawer.esc_pressed() {
        drawer.present(&pixels, w, h)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn transparent_pixels_show_the_checkerboard() {
        let img = RgbaImage::new(4, 2);
        let out = flatten_onto_checker(&img, 2);
        assert_eq!(out[0], 0x00CC_CCCC);
        assert_eq!(out[2], 0x0099_9999);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn opaque_pixels_pass_through() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([79, 195, 247, 255]));
        let out = flatten_onto_checker(&img, 1);
        assert!(out.iter().all(|&p| p == 0x004F_C3F7));
    }
}
