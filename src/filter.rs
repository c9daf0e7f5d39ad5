// Whole-layer operations: gradients, rounded-rect masks, blur, compositing.
// Every function that takes two layers checks they share dimensions.
// Visual effects provided here:
//   - the dark panel with its top-to-bottom color shift
//   - rounded, see-through panel corners
//   - the soft halo behind the microphone

use crate::color::Color;
use crate::error::Error;
use crate::raster::RoundedRect;
use crate::types::{Canvas, Mask};

/// Source-over for one straight-alpha 0xAARRGGBB pixel.
/// For an opaque destination this is `src * srcA + dst * (1 - srcA)`.
/// Visual: a half-transparent stroke tints what is under it instead of hiding it.
#[inline]
pub fn over(dst: u32, src: u32) -> u32 {
    let sa8 = src >> 24;
    if sa8 == 0 {
        return dst;
    }
    if sa8 == 255 {
        return src;
    }
    let s = Color::from_argb(src);
    let d = Color::from_argb(dst);
    let sa = s.a as f32 / 255.0;
    let da = d.a as f32 / 255.0;
    let dw = da * (1.0 - sa); // destination weight
    let oa = sa + dw;
    let mix = |sc: u8, dc: u8| ((sc as f32 * sa + dc as f32 * dw) / oa).round().clamp(0.0, 255.0) as u8;
    Color::rgba(
        mix(s.r, d.r),
        mix(s.g, d.g),
        mix(s.b, d.b),
        (oa * 255.0).round().clamp(0.0, 255.0) as u8,
    )
    .to_argb()
}

/// Composite `src` over `dst` in place.
/// Visual: the upper layer appears on top; its transparent parts show the lower one.
pub fn composite_over(dst: &mut Canvas, src: &Canvas) -> Result<(), Error> {
    if !dst.same_size(src) {
        return Err(Error::LayerSize(format!(
            "composite: {}x{} over {}x{}",
            src.width, src.height, dst.width, dst.height
        )));
    }
    for (d, &s) in dst.pixels.iter_mut().zip(src.pixels.iter()) {
        *d = over(*d, s);
    }
    Ok(())
}

/// Vertical linear gradient, one color per scanline, `t = y / height`.
/// Channels truncate toward zero, so row 0 is exactly `top` and the last
/// row lands within one unit of `bottom`.
/// Visual: horizontal bands too fine to see, fading from `top` down to `bottom`.
pub fn vertical_gradient(width: usize, height: usize, top: Color, bottom: Color) -> Canvas {
    let mut layer = Canvas::new(width, height);
    for (y, row) in layer.pixels.chunks_exact_mut(width.max(1)).enumerate() {
        let t = y as f32 / height as f32;
        row.fill(top.lerp(bottom, t).to_argb());
    }
    layer
}

/// 255 where the pixel center lies inside `rect`, 0 elsewhere.
/// Visual: nothing by itself; it is the stencil for the panel shape.
pub fn rounded_rect_mask(width: usize, height: usize, rect: &RoundedRect) -> Mask {
    let mut mask = Mask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if rect.contains(x as f32 + 0.5, y as f32 + 0.5) {
                mask.alpha[y * width + x] = 255;
            }
        }
    }
    mask
}

/// Replace the alpha channel of `layer` with `mask`.
/// Visual: the square layer becomes a rounded tile with hard-edged corners.
pub fn put_alpha(layer: &mut Canvas, mask: &Mask) -> Result<(), Error> {
    if mask.width != layer.width || mask.height != layer.height {
        return Err(Error::LayerSize("put_alpha: mask dimension mismatch".into()));
    }
    for (px, &a) in layer.pixels.iter_mut().zip(mask.alpha.iter()) {
        *px = (*px & 0x00FF_FFFF) | ((a as u32) << 24);
    }
    Ok(())
}

/// Multiply the alpha channel of `layer` by `mask`, clipping it to the
/// mask's silhouette.
/// Visual: anything outside the panel vanishes; inside keeps its own fade.
pub fn clip_alpha(layer: &mut Canvas, mask: &Mask) -> Result<(), Error> {
    if mask.width != layer.width || mask.height != layer.height {
        return Err(Error::LayerSize("clip_alpha: mask dimension mismatch".into()));
    }
    for (px, &m) in layer.pixels.iter_mut().zip(mask.alpha.iter()) {
        let a = (*px >> 24) * m as u32 / 255;
        *px = (*px & 0x00FF_FFFF) | (a << 24);
    }
    Ok(())
}

// ---------------------- premultiplied helpers for blurring ----------------------

#[inline]
fn premultiply(px: u32) -> [u32; 4] {
    let c = Color::from_argb(px);
    let a = c.a as u32;
    // Rounded c * a / 255
    let pm = |v: u8| (v as u32 * a + 127) / 255;
    [pm(c.r), pm(c.g), pm(c.b), a]
}

#[inline]
fn unpremultiply([r, g, b, a]: [u32; 4]) -> u32 {
    if a == 0 {
        return 0;
    }
    let un = |v: u32| ((v * 255 + a / 2) / a).min(255) as u8;
    Color::rgba(un(r), un(g), un(b), a.min(255) as u8).to_argb()
}

/// One sliding-window box blur pass over premultiplied RGBA, horizontal
/// then vertical. Edges are extended so borders do not fade to black.
/// Visual: a square smear; three of them in a row look round.
fn box_blur_pm(src: &[[u32; 4]], tmp: &mut [[u32; 4]], dst: &mut [[u32; 4]], w: usize, h: usize, radius: usize) {
    let r = radius as i32;
    let win = (2 * r + 1) as u32;
    let (wi, hi) = (w as i32, h as i32);
    let avg = |s: [u32; 4]| s.map(|v| (v + win / 2) / win);

    // Pass 1: rows, src -> tmp
    for y in 0..h {
        let row = y * w;
        let p0 = src[row];
        let mut sum = p0.map(|v| v * (r as u32 + 1));
        for x in 1..=r {
            let p = src[row + x.min(wi - 1) as usize];
            for c in 0..4 {
                sum[c] += p[c];
            }
        }
        for x in 0..wi {
            tmp[row + x as usize] = avg(sum);
            let p_sub = src[row + (x - r).max(0) as usize];
            let p_add = src[row + (x + r + 1).min(wi - 1) as usize];
            for c in 0..4 {
                sum[c] = sum[c] + p_add[c] - p_sub[c];
            }
        }
    }

    // Pass 2: columns, tmp -> dst
    for x in 0..w {
        let p0 = tmp[x];
        let mut sum = p0.map(|v| v * (r as u32 + 1));
        for y in 1..=r {
            let p = tmp[y.min(hi - 1) as usize * w + x];
            for c in 0..4 {
                sum[c] += p[c];
            }
        }
        for y in 0..hi {
            dst[y as usize * w + x] = avg(sum);
            let p_sub = tmp[(y - r).max(0) as usize * w + x];
            let p_add = tmp[(y + r + 1).min(hi - 1) as usize * w + x];
            for c in 0..4 {
                sum[c] = sum[c] + p_add[c] - p_sub[c];
            }
        }
    }
}

/// Box radii whose three successive passes approximate a Gaussian of `sigma`.
pub fn gaussian_box_radii(sigma: f32) -> [usize; 3] {
    const PASSES: f32 = 3.0;
    let s2 = 12.0 * sigma * sigma;
    let ideal = (s2 / PASSES + 1.0).sqrt();
    let mut wl = ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal = (s2 - PASSES * wlf * wlf - 4.0 * PASSES * wlf - 3.0 * PASSES) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round() as i32;
    let mut radii = [0usize; 3];
    for (i, r) in radii.iter_mut().enumerate() {
        let size = if (i as i32) < m { wl } else { wu };
        *r = ((size - 1) / 2) as usize;
    }
    radii
}

/// Approximate Gaussian blur (three box passes) of a whole layer.
/// Visual: hard edges melt into a soft, round falloff about `2 * sigma` wide.
pub fn gaussian_blur(layer: &Canvas, sigma: f32) -> Canvas {
    if sigma <= 0.0 || layer.width == 0 || layer.height == 0 {
        return layer.clone();
    }
    let (w, h) = (layer.width, layer.height);
    let mut a: Vec<[u32; 4]> = layer.pixels.iter().map(|&p| premultiply(p)).collect();
    let mut tmp = vec![[0u32; 4]; w * h];
    let mut b = vec![[0u32; 4]; w * h];
    for radius in gaussian_box_radii(sigma) {
        box_blur_pm(&a, &mut tmp, &mut b, w, h, radius);
        std::mem::swap(&mut a, &mut b);
    }
    Canvas { width: w, height: h, pixels: a.into_iter().map(unpremultiply).collect() }
}
