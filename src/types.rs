// Core pixel containers shared by the raster, filter and icon modules.

use crate::color::Color;
use image::{Rgba, RgbaImage};

/// One RGBA layer. Every layer of an icon has the canvas dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pub width: usize,     // pixels per row
    pub height: usize,    // rows
    pub pixels: Vec<u32>, // each entry is 0xAARRGGBB, straight alpha
}

impl Canvas {
    /// Fully transparent layer.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.to_argb(); width * height] }
    }

    #[inline]
    pub fn same_size(&self, other: &Canvas) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::from_argb(self.pixels[y * self.width + x])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color.to_argb();
    }

    pub fn into_image(self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width as u32, self.height as u32);
        for (px, &argb) in img.pixels_mut().zip(self.pixels.iter()) {
            let c = Color::from_argb(argb);
            *px = Rgba([c.r, c.g, c.b, c.a]);
        }
        img
    }
}

/// Single-channel coverage in 0..=255; 255 = keep, 0 = clip away.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>, // length = width * height
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_transparent() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.pixels.len(), 12);
        assert!(c.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn into_image_keeps_channel_order() {
        let mut c = Canvas::new(2, 2);
        c.set(1, 0, Color::rgba(10, 20, 30, 40));
        let img = c.into_image();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, [10, 20, 30, 40]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0, 0]);
    }
}
