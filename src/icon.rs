//! The icon renderer.
//!
//! `render` draws one [`IconStyle`] onto a square canvas: panel, glow, body
//! (capsule + stand), then decorative marks, each composited over the
//! previous with source-over. `resize` produces the secondary size.

use crate::error::Error;
use crate::filter::{clip_alpha, composite_over, gaussian_blur, put_alpha, rounded_rect_mask, vertical_gradient};
use crate::raster::{
    LineCap, RoundedRect, draw_line, draw_polyline, fill_circle, fill_rounded_rect, stroke_rounded_rect,
};
use crate::style::{Background, Capsule, DESIGN_SIZE, Foot, Glow, IconStyle, Marks, Stand};
use crate::types::{Canvas, Mask};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::f32::consts::PI;

/// Smallest canvas the layout is drawn at.
pub const MIN_SIZE: u32 = 64;
/// Largest canvas accepted; one layer at this size is 1 GiB.
pub const MAX_SIZE: u32 = 16384;
/// Full-resolution output size.
pub const DEFAULT_SIZE: u32 = 512;
/// Size of the downscaled copy.
pub const SECONDARY_SIZE: u32 = 256;

/// Maps design units to canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Scale(f32);

impl Scale {
    #[inline]
    fn len(self, v: f32) -> f32 {
        v * self.0
    }

    #[inline]
    fn pt(self, (x, y): (f32, f32)) -> (f32, f32) {
        (x * self.0, y * self.0)
    }
}

/// Render `style` at `size x size` pixels.
/// Visual: the finished icon, panel corners see-through, everything else opaque.
pub fn render(size: u32, style: &IconStyle) -> Result<RgbaImage, Error> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(Error::InvalidDimension { size, min: MIN_SIZE, max: MAX_SIZE });
    }
    style.validate()?;
    let n = size as usize;
    let k = Scale(size as f32 / DESIGN_SIZE);

    let silhouette = RoundedRect::new(0.0, 0.0, n as f32, n as f32, k.len(style.corner_radius));
    let mask = rounded_rect_mask(n, n, &silhouette);

    let mut icon = background(n, &style.background, &mask)?;
    log::debug!("background done ({n}x{n})");

    if let Some(glow) = &style.glow {
        let layer = glow_layer(n, k, &style.capsule, glow, &mask)?;
        composite_over(&mut icon, &layer)?;
        log::debug!("glow composited (sigma {:.1}px)", k.len(glow.sigma));
    }

    let mut body = Canvas::new(n, n);
    draw_capsule(&mut body, k, &style.capsule);
    draw_stand(&mut body, k, style.capsule.center_x, &style.stand);
    composite_over(&mut icon, &body)?;
    log::debug!("body composited");

    let mut marks = Canvas::new(n, n);
    draw_marks(&mut marks, k, &style.marks);
    composite_over(&mut icon, &marks)?;
    log::debug!("marks composited");

    Ok(icon.into_image())
}

/// Render the default (studio) style.
pub fn render_default(size: u32) -> Result<RgbaImage, Error> {
    render(size, &IconStyle::studio())
}

/// Resample to `new_size x new_size` with a Lanczos (a = 3) kernel.
/// Visual: same picture, softer edges when shrunk; no hard stair-steps.
pub fn resize(image: &RgbaImage, new_size: u32) -> Result<RgbaImage, Error> {
    if !(1..=MAX_SIZE).contains(&new_size) {
        return Err(Error::InvalidDimension { size: new_size, min: 1, max: MAX_SIZE });
    }
    Ok(imageops::resize(image, new_size, new_size, FilterType::Lanczos3))
}

/// Polyline approximation of a half arc: `segments + 1` samples at
/// `theta = i * pi / segments`, `(cx + r cos theta, baseline - h sin theta)`.
/// Visual (once stroked): the U-shaped cradle under the microphone.
pub fn arc_points(cx: f32, baseline: f32, half_width: f32, height: f32, segments: u32) -> Vec<(f32, f32)> {
    (0..=segments)
        .map(|i| {
            let theta = PI * i as f32 / segments as f32;
            (cx + half_width * theta.cos(), baseline - height * theta.sin())
        })
        .collect()
}

/// Visual: the rounded dark tile everything else sits on.
fn background(n: usize, bg: &Background, mask: &Mask) -> Result<Canvas, Error> {
    let mut layer = match *bg {
        Background::Gradient { top, bottom } => vertical_gradient(n, n, top, bottom),
        Background::Flat { fill, overlay_top, overlay_bottom } => {
            let mut base = Canvas::filled(n, n, fill);
            composite_over(&mut base, &vertical_gradient(n, n, overlay_top, overlay_bottom))?;
            base
        }
    };
    put_alpha(&mut layer, mask)?;
    Ok(layer)
}

fn capsule_rect(k: Scale, cap: &Capsule) -> RoundedRect {
    let half = k.len(cap.width) * 0.5;
    let cx = k.len(cap.center_x);
    let top = k.len(cap.top);
    RoundedRect::new(cx - half, top, cx + half, top + k.len(cap.height), half)
}

/// Visual: a soft halo hugging the capsule, fading out before the panel edge.
fn glow_layer(n: usize, k: Scale, cap: &Capsule, glow: &Glow, mask: &Mask) -> Result<Canvas, Error> {
    let mut layer = Canvas::new(n, n);
    fill_rounded_rect(&mut layer, &capsule_rect(k, cap).outset(k.len(glow.spread)), glow.color);
    let mut blurred = gaussian_blur(&layer, k.len(glow.sigma));
    clip_alpha(&mut blurred, mask)?;
    Ok(blurred)
}

/// Visual: the microphone head, plus the reflection stripe and grille slots if set.
fn draw_capsule(fb: &mut Canvas, k: Scale, cap: &Capsule) {
    let rect = capsule_rect(k, cap);
    match cap.stroke {
        Some(width) => stroke_rounded_rect(fb, &rect, k.len(width), cap.color),
        None => fill_rounded_rect(fb, &rect, cap.color),
    }

    let r = rect.radius;
    if let Some(hl) = &cap.highlight {
        // Straight section only, so lines never poke out of the domes.
        let (y0, y1) = (rect.y0 + r, rect.y1 - r);
        for i in 0..hl.lines {
            let fade = 1.0 - i as f32 / hl.lines as f32;
            let alpha = (hl.start_alpha as f32 * fade).round() as u8;
            let x = rect.x0 + k.len(hl.offset + hl.spacing * i as f32);
            draw_line(fb, (x, y0), (x, y1), k.len(hl.line_width), LineCap::Butt, hl.color.with_alpha(alpha));
        }
    }

    if let Some(grille) = &cap.grille {
        let cx = (rect.x0 + rect.x1) * 0.5;
        let dome_cy = rect.y0 + r;
        for &dy in &grille.offsets {
            let dy = k.len(dy);
            if dy.abs() >= r {
                continue;
            }
            let half = (r * r - dy * dy).sqrt() * grille.scale;
            let y = dome_cy + dy;
            draw_line(fb, (cx - half, y), (cx + half, y), k.len(grille.line_width), LineCap::Butt, grille.color);
        }
    }
}

/// Visual: the cradle arc, the stem and the foot under it.
fn draw_stand(fb: &mut Canvas, k: Scale, center_x: f32, stand: &Stand) {
    let cx = k.len(center_x);
    let stroke = k.len(stand.stroke);
    let baseline = k.len(stand.arc_bottom);
    let arc = arc_points(
        cx,
        baseline,
        k.len(stand.arc_half_width),
        k.len(stand.arc_bottom - stand.arc_top),
        stand.segments,
    );
    draw_polyline(fb, &arc, stroke, LineCap::Round, stand.color);
    draw_line(fb, (cx, baseline), (cx, k.len(stand.stem_bottom)), stroke, LineCap::Butt, stand.color);

    match &stand.foot {
        Foot::Chevron { points, width } => {
            // Flat ends, like two separate strokes meeting at the apex.
            let pts = points.map(|p| k.pt(p));
            draw_polyline(fb, &pts, k.len(*width), LineCap::Butt, stand.color);
        }
        Foot::Bar { y, half_width, thickness } => {
            let (y, half) = (k.len(*y), k.len(*half_width));
            draw_line(fb, (cx - half, y), (cx + half, y), k.len(*thickness), LineCap::Round, stand.color);
        }
    }
}

/// Visual: the sound motif below the stand (waveform bars or fading chevrons).
fn draw_marks(fb: &mut Canvas, k: Scale, marks: &Marks) {
    match marks {
        Marks::Waveform { color, width, bars } => {
            let w = k.len(*width);
            for bar in bars {
                let (top, bottom) = (k.pt((bar.x, bar.top)), k.pt((bar.x, bar.bottom)));
                draw_line(fb, top, bottom, w, LineCap::Butt, *color);
                // Caps
                fill_circle(fb, top.0, top.1, w * 0.5, *color);
                fill_circle(fb, bottom.0, bottom.1, w * 0.5, *color);
            }
        }
        Marks::Chevrons { color, width, y, half_width, half_height, centers, alphas } => {
            for (&x, &alpha) in centers.iter().zip(alphas.iter()) {
                let glyph = [
                    k.pt((x - half_width, y - half_height)),
                    k.pt((x + half_width, *y)),
                    k.pt((x - half_width, y + half_height)),
                ];
                draw_polyline(fb, &glyph, k.len(*width), LineCap::Round, color.with_alpha(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn alpha(img: &RgbaImage, x: u32, y: u32) -> u8 {
        img.get_pixel(x, y).0[3]
    }

    fn px(img: &RgbaImage, x: u32, y: u32) -> Color {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        Color::rgba(r, g, b, a)
    }

    #[test]
    fn rejects_sizes_below_minimum() {
        assert!(matches!(render_default(0), Err(Error::InvalidDimension { size: 0, .. })));
        assert!(matches!(render_default(63), Err(Error::InvalidDimension { size: 63, min: 64, .. })));
        assert!(render_default(MIN_SIZE).is_ok());
    }

    #[test]
    fn rejects_sizes_above_maximum_without_allocating() {
        for size in [MAX_SIZE + 1, 1 << 20, u32::MAX] {
            assert!(matches!(
                render_default(size),
                Err(Error::InvalidDimension { size: s, max: MAX_SIZE, .. }) if s == size
            ));
        }
        let small = render_default(MIN_SIZE).unwrap();
        assert!(matches!(resize(&small, u32::MAX), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn render_validates_styles_built_in_code() {
        let mut style = IconStyle::studio();
        style.stand.segments = 0;
        assert!(matches!(render(128, &style), Err(Error::Style(_))));
    }

    #[test]
    fn every_valid_size_is_square_opaque_center_clear_corners() {
        for style in [IconStyle::studio(), IconStyle::signal()] {
            for s in [64u32, 100, 257, 512] {
                let img = render(s, &style).unwrap();
                assert_eq!(img.dimensions(), (s, s));
                assert_eq!(alpha(&img, s / 2, s / 2), 255, "center at {s}");
                for (x, y) in [(0, 0), (s - 1, 0), (0, s - 1), (s - 1, s - 1)] {
                    assert_eq!(alpha(&img, x, y), 0, "corner ({x},{y}) at {s}");
                }
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_default(512).unwrap(), render_default(512).unwrap());
        let signal = IconStyle::signal();
        assert_eq!(render(512, &signal).unwrap(), render(512, &signal).unwrap());
    }

    #[test]
    fn studio_capsule_is_outlined_not_filled() {
        let img = render_default(512).unwrap();
        assert_eq!(px(&img, 256, 105), Color::WHITE); // top of the outline
        let bg = Color::rgb(26, 26, 46).lerp(Color::rgb(22, 33, 62), 180.0 / 512.0);
        assert_eq!(px(&img, 256, 180), bg); // hollow middle shows the gradient
    }

    #[test]
    fn studio_waveform_is_cyan() {
        let img = render_default(512).unwrap();
        assert_eq!(px(&img, 256, 420), Color::rgb(79, 195, 247));
        // Round cap reaches above the bar's top endpoint.
        assert_eq!(px(&img, 256, 391), Color::rgb(79, 195, 247));
    }

    #[test]
    fn studio_foot_ends_flat_at_its_endpoints() {
        let img = render_default(512).unwrap();
        assert_eq!(px(&img, 238, 380), Color::WHITE); // on the left stroke
        // Just past the (220, 390) endpoint along the stroke direction.
        let bg = Color::rgb(26, 26, 46).lerp(Color::rgb(22, 33, 62), 391.0 / 512.0);
        assert_eq!(px(&img, 217, 391), bg);
        assert_eq!(px(&img, 294, 391), bg);
    }

    #[test]
    fn glow_lights_up_the_panel_beside_the_capsule() {
        let with = IconStyle::signal();
        let mut without = with.clone();
        without.glow = None;
        let lit = render(512, &with).unwrap();
        let dark = render(512, &without).unwrap();
        let (a, b) = (px(&lit, 200, 180), px(&dark, 200, 180));
        assert_ne!(a, b);
        assert!(a.b > b.b, "glow is cyan, so blue rises");
        // Far from the capsule the glow has faded out.
        assert_eq!(px(&lit, 256, 490), px(&dark, 256, 490));
    }

    #[test]
    fn highlight_brightens_and_grille_darkens_capsule() {
        let img = render(512, &IconStyle::signal()).unwrap();
        let body = Color::rgb(236, 240, 246);
        assert!(px(&img, 224, 180).r > body.r);
        let slot = px(&img, 256, 144);
        assert!(slot.r < body.r && slot.g < body.g && slot.b < body.b);
    }

    #[test]
    fn arc_has_fine_segments() {
        let size = 512.0;
        let k = size / DESIGN_SIZE;
        let pts = arc_points(256.0 * k, 320.0 * k, 80.0 * k, 80.0 * k, 40);
        assert_eq!(pts.len(), 41);
        for w in pts.windows(2) {
            let (dx, dy) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
            assert!((dx * dx + dy * dy).sqrt() < size / 10.0);
        }
        let (first, mid, last) = (pts[0], pts[20], pts[40]);
        assert!((first.0 - 336.0).abs() < 1e-3 && (first.1 - 320.0).abs() < 1e-3);
        assert!((mid.0 - 256.0).abs() < 1e-3 && (mid.1 - 240.0).abs() < 1e-3);
        assert!((last.0 - 176.0).abs() < 1e-3 && (last.1 - 320.0).abs() < 1e-3);
    }

    #[test]
    fn resize_produces_requested_size() {
        let full = render_default(512).unwrap();
        let small = resize(&full, SECONDARY_SIZE).unwrap();
        assert_eq!(small.dimensions(), (256, 256));
        assert!(matches!(resize(&full, 0), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn down_then_up_keeps_opaque_corner_region_visible() {
        let full = render_default(512).unwrap();
        let back = resize(&resize(&full, 256).unwrap(), 512).unwrap();
        for y in 2..96 {
            for x in 2..96 {
                // Only pixels comfortably inside the silhouette.
                if alpha(&full, x - 2, y - 2) == 255 {
                    assert!(alpha(&back, x, y) > 0, "pixel ({x},{y}) vanished");
                }
            }
        }
    }
}
