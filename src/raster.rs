// Line drawing into the marker grid.
// Segments are clipped to the grid before stepping, so callers can hand in
// arbitrary coordinates and the cost stays bounded by the grid size.

use crate::types::{Point, RasterGrid};

/// Pixel coordinates are clamped to this magnitude before clipping.
const COORD_LIMIT: i64 = 1 << 32;

/// Float coordinate to pixel: nearest, ties away from zero.
/// NaN has no pixel; infinities saturate to `COORD_LIMIT`.
#[inline]
fn to_pixel(v: f32) -> Option<i64> {
    if v.is_nan() {
        return None;
    }
    Some((v.round() as i64).clamp(-COORD_LIMIT, COORD_LIMIT))
}

/// Liang-Barsky clip of the segment to `[0, w-1] x [0, h-1]`.
/// Returns the clipped integer endpoints, or None when the segment misses the grid.
fn clip_to_grid(w: usize, h: usize, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(i64, i64, i64, i64)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (xmax, ymax) = ((w - 1) as i64, (h - 1) as i64);
    let inside = |x: i64, y: i64| (0..=xmax).contains(&x) && (0..=ymax).contains(&y);
    if inside(x0, y0) && inside(x1, y1) {
        return Some((x0, y0, x1, y1));
    }

    let (fx0, fy0) = (x0 as f64, y0 as f64);
    let (dx, dy) = (x1 as f64 - fx0, y1 as f64 - fy0);
    let (fxmax, fymax) = (xmax as f64, ymax as f64);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, fx0), (dx, fxmax - fx0), (-dy, fy0), (dy, fymax - fy0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel to this edge and outside it
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        let x = (fx0 + t * dx).round().clamp(0.0, fxmax) as i64;
        let y = (fy0 + t * dy).round().clamp(0.0, fymax) as i64;
        (x, y)
    };
    let (cx0, cy0) = at(t0);
    let (cx1, cy1) = at(t1);
    Some((cx0, cy0, cx1, cy1))
}

/// Draw a 1-pixel line between (x0,y0) and (x1,y1) using Bresenham.
/// A zero-length segment plots its single pixel.
pub fn draw_line(grid: &mut RasterGrid, x0: i64, y0: i64, x1: i64, y1: i64, marker: u8) {
    let Some((mut x0, mut y0, x1, y1)) = clip_to_grid(grid.width(), grid.height(), x0, y0, x1, y1) else {
        return;
    };
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        grid.put(x0, y0, marker);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Segment between two float points.
pub fn draw_segment(grid: &mut RasterGrid, a: Point, b: Point, marker: u8) {
    if let (Some(x0), Some(y0), Some(x1), Some(y1)) = (to_pixel(a.x), to_pixel(a.y), to_pixel(b.x), to_pixel(b.y)) {
        draw_line(grid, x0, y0, x1, y1, marker);
    }
}

/// Every pixel back to 0.
pub fn clear(grid: &mut RasterGrid) {
    grid.clear();
}

/// Connect consecutive points. Fewer than 2 points draws nothing.
pub fn draw_polyline(grid: &mut RasterGrid, points: &[Point], marker: u8) {
    if points.len() < 2 {
        return;
    }
    for pair in points.windows(2) {
        draw_segment(grid, pair[0], pair[1], marker);
    }
}

/// Like `draw_polyline`, plus the edge from the last point back to the first.
pub fn draw_closed_polyline(grid: &mut RasterGrid, points: &[Point], marker: u8) {
    if points.len() < 2 {
        return;
    }
    draw_polyline(grid, points, marker);
    draw_segment(grid, points[points.len() - 1], points[0], marker);
}
