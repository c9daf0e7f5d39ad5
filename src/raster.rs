// Software rasterizer for the handful of primitives the icon needs.
// All fills are aliased: a pixel is covered when its center (x + 0.5, y + 0.5)
// lies inside the shape. Covered pixels are alpha-blended over the layer.
// Visual: crisp, stair-stepped edges; no shape is anti-aliased.

use crate::color::Color;
use crate::filter::over;
use crate::types::Canvas;

/// End treatment for stroked lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,  // ends flush with the endpoints
    Round, // half-disc past each endpoint
}

/// Axis-aligned rectangle whose corners are circular arcs of `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub radius: f32,
}

impl RoundedRect {
    /// Radius is clamped to half the shorter side.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, radius: f32) -> Self {
        let max_r = ((x1 - x0).min(y1 - y0) * 0.5).max(0.0);
        Self { x0, y0, x1, y1, radius: radius.clamp(0.0, max_r) }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        if px < self.x0 || px > self.x1 || py < self.y0 || py > self.y1 {
            return false;
        }
        let r = self.radius;
        // Nearest point on the inner (radius-shrunk) rectangle.
        let cx = px.clamp(self.x0 + r, self.x1 - r);
        let cy = py.clamp(self.y0 + r, self.y1 - r);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= r * r
    }

    /// Shrink every edge by `d`. None when nothing is left.
    pub fn inset(&self, d: f32) -> Option<RoundedRect> {
        let (x0, y0, x1, y1) = (self.x0 + d, self.y0 + d, self.x1 - d, self.y1 - d);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(RoundedRect::new(x0, y0, x1, y1, (self.radius - d).max(0.0)))
    }

    /// Grow every edge (and the radius) by `d`.
    pub fn outset(&self, d: f32) -> RoundedRect {
        RoundedRect::new(self.x0 - d, self.y0 - d, self.x1 + d, self.y1 + d, self.radius + d)
    }
}

/// Blend one color over the pixel at (x,y) if it is inside bounds.
/// Visual: the exact pixel at (x,y) takes on (or is tinted by) the color.
#[inline]
fn blend_pixel(fb: &mut Canvas, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = over(fb.pixels[idx], color.to_argb());
}

/// Scan the bounding box and blend `color` wherever `covers` says so.
fn fill_where(
    fb: &mut Canvas,
    (x0, y0, x1, y1): (f32, f32, f32, f32),
    color: Color,
    covers: impl Fn(f32, f32) -> bool,
) {
    if color.a == 0 {
        return;
    }
    let xs = (x0.floor() as i32).max(0);
    let ys = (y0.floor() as i32).max(0);
    let xe = (x1.ceil() as i32).min(fb.width as i32);
    let ye = (y1.ceil() as i32).min(fb.height as i32);
    for y in ys..ye {
        for x in xs..xe {
            if covers(x as f32 + 0.5, y as f32 + 0.5) {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Solid axis-aligned rectangle.
/// Visual: a flat block of color with square corners.
pub fn fill_rect(fb: &mut Canvas, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    fill_where(fb, (x0, y0, x1, y1), color, |px, py| {
        px >= x0 && px <= x1 && py >= y0 && py <= y1
    });
}

/// Visual: a solid pill or tile, depending on how large the radius is.
pub fn fill_rounded_rect(fb: &mut Canvas, rect: &RoundedRect, color: Color) {
    fill_where(fb, (rect.x0, rect.y0, rect.x1, rect.y1), color, |px, py| rect.contains(px, py));
}

/// Outline drawn inward from the edge: the ring between `rect` and `rect`
/// shrunk by `width`.
/// Visual: a hollow capsule; the layer below shows through the middle.
pub fn stroke_rounded_rect(fb: &mut Canvas, rect: &RoundedRect, width: f32, color: Color) {
    let inner = rect.inset(width);
    fill_where(fb, (rect.x0, rect.y0, rect.x1, rect.y1), color, |px, py| {
        rect.contains(px, py) && !inner.is_some_and(|i| i.contains(px, py))
    });
}

/// Visual: a solid dot; used for the round ends of the waveform bars.
pub fn fill_circle(fb: &mut Canvas, cx: f32, cy: f32, radius: f32, color: Color) {
    let r2 = radius * radius;
    fill_where(fb, (cx - radius, cy - radius, cx + radius, cy + radius), color, |px, py| {
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= r2
    });
}

/// Is (px,py) within `half` of the segment a-b?
fn segment_covers(a: (f32, f32), b: (f32, f32), half: f32, cap: LineCap, px: f32, py: f32) -> bool {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 { ((px - a.0) * dx + (py - a.1) * dy) / len2 } else { 0.0 };
    if cap == LineCap::Butt && (len2 == 0.0 || !(0.0..=1.0).contains(&t)) {
        return false;
    }
    let t = t.clamp(0.0, 1.0);
    let (nx, ny) = (a.0 + dx * t - px, a.1 + dy * t - py);
    nx * nx + ny * ny <= half * half
}

/// Thick straight line between two points.
/// Visual: a bar `width` pixels across, flat or rounded at the ends per `cap`.
pub fn draw_line(fb: &mut Canvas, a: (f32, f32), b: (f32, f32), width: f32, cap: LineCap, color: Color) {
    draw_polyline(fb, &[a, b], width, cap, color);
}

/// Thick polyline. Segments are unioned before blending, so a translucent
/// color is not darkened where consecutive segments overlap.
/// Visual: one continuous stroke, e.g. the stand's curve or a `>` glyph.
pub fn draw_polyline(fb: &mut Canvas, points: &[(f32, f32)], width: f32, cap: LineCap, color: Color) {
    if points.len() < 2 || width <= 0.0 {
        return;
    }
    let half = width * 0.5;
    let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for &(x, y) in points {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    fill_where(fb, (x0 - half, y0 - half, x1 + half, y1 + half), color, |px, py| {
        points
            .windows(2)
            .any(|seg| segment_covers(seg[0], seg[1], half, cap, px, py))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn alpha_at(fb: &Canvas, x: usize, y: usize) -> u8 {
        fb.get(x, y).a
    }

    #[test]
    fn rounded_rect_excludes_corners() {
        let rr = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 20.0);
        assert!(rr.contains(50.0, 50.0));
        assert!(rr.contains(20.0, 0.5));
        assert!(!rr.contains(1.0, 1.0));
        assert!(!rr.contains(99.0, 99.0));
        assert!(!rr.contains(101.0, 50.0));
    }

    #[test]
    fn radius_is_clamped_to_half_side() {
        let rr = RoundedRect::new(0.0, 0.0, 40.0, 100.0, 80.0);
        assert_eq!(rr.radius, 20.0);
    }

    #[test]
    fn inset_past_center_is_empty() {
        let rr = RoundedRect::new(0.0, 0.0, 10.0, 10.0, 5.0);
        assert!(rr.inset(5.0).is_none());
        assert_eq!(rr.inset(2.0).unwrap().radius, 3.0);
    }

    #[test]
    fn stroke_leaves_interior_empty() {
        let mut fb = Canvas::new(64, 64);
        let rr = RoundedRect::new(8.0, 8.0, 56.0, 56.0, 10.0);
        stroke_rounded_rect(&mut fb, &rr, 4.0, RED);
        assert_eq!(alpha_at(&fb, 32, 9), 255); // on the top edge
        assert_eq!(alpha_at(&fb, 32, 32), 0); // hollow middle
        assert_eq!(alpha_at(&fb, 2, 2), 0);
    }

    #[test]
    fn fill_circle_covers_disc_only() {
        let mut fb = Canvas::new(32, 32);
        fill_circle(&mut fb, 16.0, 16.0, 7.0, RED);
        assert_eq!(fb.get(16, 16), RED);
        assert_eq!(alpha_at(&fb, 16, 9), 255);
        assert_eq!(alpha_at(&fb, 16, 4), 0);
        assert_eq!(alpha_at(&fb, 10, 10), 0); // diagonal, outside radius
    }

    #[test]
    fn butt_line_stops_at_endpoints_round_does_not() {
        let mut butt = Canvas::new(40, 20);
        draw_line(&mut butt, (10.0, 10.0), (30.0, 10.0), 6.0, LineCap::Butt, RED);
        assert_eq!(alpha_at(&butt, 20, 10), 255);
        assert_eq!(alpha_at(&butt, 8, 10), 0);

        let mut round = Canvas::new(40, 20);
        draw_line(&mut round, (10.0, 10.0), (30.0, 10.0), 6.0, LineCap::Round, RED);
        assert_eq!(alpha_at(&round, 8, 10), 255);
    }

    #[test]
    fn translucent_polyline_is_blended_once_at_joints() {
        let mut fb = Canvas::new(40, 40);
        let half_red = RED.with_alpha(128);
        let pts = [(5.0, 20.0), (20.0, 20.0), (35.0, 20.0)];
        draw_polyline(&mut fb, &pts, 8.0, LineCap::Round, half_red);
        assert_eq!(fb.get(20, 20), half_red);
        assert_eq!(fb.get(10, 20), half_red);
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut fb = Canvas::new(16, 16);
        fill_rect(&mut fb, -10.0, -10.0, 4.0, 4.0, RED);
        fill_circle(&mut fb, 40.0, 40.0, 5.0, RED);
        assert_eq!(alpha_at(&fb, 0, 0), 255);
        assert_eq!(alpha_at(&fb, 15, 15), 0);
    }
}
