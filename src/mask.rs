// Mask renderer: turns this frame's ray hits into thick translucent strokes.
// Visual: overlapping strokes pile up into a soft "lit" fan around the cursor;
// where the fan is dense the top image shows almost fully.

use crate::emitter::Hit;
use crate::types::Mask;
use vek::Vec2;

/// Stroke look for one ray segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub alpha: f32,  // per-stroke opacity in [0,1]
    pub weight: f32, // stroke thickness in pixels (round caps)
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { alpha: 150.0 / 255.0, weight: 5.0 }
    }
}

/// Clear the mask to 0 (nothing revealed).
pub fn clear_mask(mask: &mut Mask) {
    for a in &mut mask.alpha { *a = 0.0; }
}

/// Stroke one segment per hit, from the emitter to the hit point.
/// Visual: no hits -> the mask stays empty and only the base image shows.
pub fn render_hits<'a>(
    mask: &mut Mask,
    origin: Vec2<f32>,
    hits: impl IntoIterator<Item = &'a Hit>,
    style: &StrokeStyle,
) -> usize {
    let mut strokes = 0;
    for hit in hits {
        stroke_segment(mask, origin, hit.point, style);
        strokes += 1;
    }
    strokes
}

/// x-interval where `lo <= coef * x + offset <= hi`.
#[inline]
fn slab(coef: f32, offset: f32, lo: f32, hi: f32) -> Option<(f32, f32)> {
    if coef.abs() < 1e-9 {
        return if offset >= lo && offset <= hi {
            Some((f32::NEG_INFINITY, f32::INFINITY))
        } else {
            None
        };
    }
    let a = (lo - offset) / coef;
    let b = (hi - offset) / coef;
    Some((a.min(b), a.max(b)))
}

/// Rasterize one round-capped stroke (a capsule) with source-over alpha.
///
/// A pixel is covered when its centre is inside the capsule. The capsule is convex,
/// so each scanline is one span: the union of the body span and the two cap spans.
pub fn stroke_segment(mask: &mut Mask, from: Vec2<f32>, to: Vec2<f32>, style: &StrokeStyle) {
    if mask.width == 0 || mask.height == 0 || style.weight <= 0.0 || style.alpha <= 0.0 {
        return;
    }
    let r = style.weight * 0.5;
    let r2 = r * r;
    let s = style.alpha.min(1.0);

    let delta = to - from;
    let len = delta.magnitude();
    // Unit direction + normal; None for a zero-length segment (just a dot).
    let axis = if len > 1e-6 {
        let d = delta / len;
        Some((d, Vec2::new(-d.y, d.x)))
    } else {
        None
    };

    let top = from.y.min(to.y) - r;
    let bottom = from.y.max(to.y) + r;
    if bottom < 0.0 || top >= mask.height as f32 {
        return;
    }
    let y_start = top.floor().max(0.0) as usize;
    let y_end = (bottom.ceil() as usize).min(mask.height - 1);

    for y in y_start..=y_end {
        let yc = y as f32 + 0.5;
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;

        // Round caps.
        for c in [from, to] {
            let dy = yc - c.y;
            if dy * dy <= r2 {
                let half = (r2 - dy * dy).sqrt();
                lo = lo.min(c.x - half);
                hi = hi.max(c.x + half);
            }
        }

        // Body: within r of the axis and between the two ends.
        if let Some((d, n)) = axis {
            let dy = yc - from.y;
            let across = slab(n.x, -from.x * n.x + dy * n.y, -r, r);
            let along = slab(d.x, -from.x * d.x + dy * d.y, 0.0, len);
            if let (Some((a0, a1)), Some((b0, b1))) = (across, along) {
                let (l, h) = (a0.max(b0), a1.min(b1));
                if l <= h {
                    lo = lo.min(l);
                    hi = hi.max(h);
                }
            }
        }

        if lo > hi {
            continue;
        }
        let x_last = (hi - 0.5).floor();
        if x_last < 0.0 {
            continue;
        }
        let x_start = (lo - 0.5).ceil().max(0.0) as usize;
        let x_end = (x_last as usize).min(mask.width - 1);
        if x_start > x_end {
            continue;
        }

        let row = y * mask.width;
        for a in &mut mask.alpha[row + x_start..=row + x_end] {
            *a = s + *a * (1.0 - s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(mask: &Mask, x: usize, y: usize) -> f32 {
        mask.alpha[y * mask.width + x]
    }

    #[test]
    fn horizontal_stroke_covers_its_thickness() {
        let mut mask = Mask::new(64, 32);
        let style = StrokeStyle::default();
        stroke_segment(&mut mask, Vec2::new(10.0, 10.5), Vec2::new(30.0, 10.5), &style);

        assert!((at(&mask, 20, 10) - style.alpha).abs() < 1e-6);
        assert!((at(&mask, 20, 12) - style.alpha).abs() < 1e-6); // 2.0 px off axis
        assert_eq!(at(&mask, 20, 13), 0.0);                      // 3.0 px off axis
        assert_eq!(at(&mask, 20, 20), 0.0);
        // Round cap reaches 2.5 px past the end, but not 3.5.
        assert!(at(&mask, 32, 10) > 0.0);
        assert_eq!(at(&mask, 33, 10), 0.0);
    }

    #[test]
    fn diagonal_stroke_hits_its_midpoint_only_near_axis() {
        let mut mask = Mask::new(64, 64);
        let style = StrokeStyle::default();
        stroke_segment(&mut mask, Vec2::new(5.5, 5.5), Vec2::new(50.5, 50.5), &style);
        assert!(at(&mask, 28, 28) > 0.0);
        assert!(at(&mask, 29, 27) > 0.0);
        assert_eq!(at(&mask, 35, 20), 0.0);
        assert_eq!(at(&mask, 60, 60), 0.0);
    }

    #[test]
    fn overlapping_strokes_compound_alpha() {
        let mut mask = Mask::new(40, 20);
        let style = StrokeStyle::default();
        let (a, b) = (Vec2::new(5.0, 10.5), Vec2::new(35.0, 10.5));
        stroke_segment(&mut mask, a, b, &style);
        stroke_segment(&mut mask, a, b, &style);

        let s = style.alpha;
        let expected = s + s * (1.0 - s);
        assert!((at(&mask, 20, 10) - expected).abs() < 1e-6);
        assert!(at(&mask, 20, 10) <= 1.0);
    }

    #[test]
    fn zero_length_stroke_is_a_dot() {
        let mut mask = Mask::new(100, 100);
        let p = Vec2::new(50.5, 50.5);
        stroke_segment(&mut mask, p, p, &StrokeStyle::default());
        assert!(at(&mask, 50, 50) > 0.0);
        assert!(at(&mask, 52, 50) > 0.0);
        assert_eq!(at(&mask, 54, 50), 0.0);
    }

    #[test]
    fn offscreen_strokes_are_clipped() {
        let mut mask = Mask::new(16, 16);
        let style = StrokeStyle::default();
        stroke_segment(&mut mask, Vec2::new(-100.0, -100.0), Vec2::new(-50.0, -40.0), &style);
        assert!(!mask.any());
        // Crosses the whole mask and beyond on both sides.
        stroke_segment(&mut mask, Vec2::new(-100.0, 8.5), Vec2::new(100.0, 8.5), &style);
        assert!(at(&mask, 0, 8) > 0.0);
        assert!(at(&mask, 15, 8) > 0.0);
    }

    #[test]
    fn no_hits_leave_mask_clear() {
        let mut mask = Mask::new(32, 32);
        let none: [Hit; 0] = [];
        let n = render_hits(&mut mask, Vec2::new(16.0, 16.0), &none, &StrokeStyle::default());
        assert_eq!(n, 0);
        assert!(!mask.any());
    }

    #[test]
    fn one_stroke_per_hit_and_clear_resets() {
        let mut mask = Mask::new(64, 64);
        let hits = [
            Hit { point: Vec2::new(60.0, 32.0), distance: 28.0 },
            Hit { point: Vec2::new(32.0, 2.0), distance: 30.0 },
        ];
        let n = render_hits(&mut mask, Vec2::new(32.0, 32.0), &hits, &StrokeStyle::default());
        assert_eq!(n, 2);
        assert!(at(&mask, 50, 32) > 0.0);
        assert!(at(&mask, 32, 10) > 0.0);
        assert_eq!(at(&mask, 5, 60), 0.0);

        clear_mask(&mut mask);
        assert!(!mask.any());
    }
}
