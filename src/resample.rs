// Arc-length resampling of a polyline treated as a closed loop.

use crate::error::{Error, Result};
use crate::scratch;
use crate::types::Point;

/// Segments shorter than this are treated as this long when interpolating.
const MIN_SEGMENT: f64 = 1e-9;

/// `m` points evenly spaced by path length around the closed loop
/// `points[0] -> ... -> points[n-1] -> points[0]`.
///
/// Output sample `i` sits at arc length `i * total / m`, so the first sample is
/// `points[0]` and the loop is not repeated at the end; see `snap_closed`.
pub fn resample_closed(points: &[Point], m: usize) -> Result<Vec<Point>> {
    let n = points.len();
    if n < 2 {
        return Err(Error::Degenerate("resampling needs at least 2 points"));
    }
    if m < 2 {
        return Err(Error::Degenerate("resampling needs at least 2 output samples"));
    }

    // cumulative[j] = arc length at points[j]; cumulative[n] closes the loop
    let mut cumulative: Vec<f64> = scratch::with_capacity(n + 1, "arc lengths")?;
    cumulative.push(0.0);
    let mut total = 0.0f64;
    for j in 0..n {
        total += points[j].distance(points[(j + 1) % n]) as f64;
        cumulative.push(total);
    }

    let mut out = scratch::with_capacity(m, "resampled points")?;
    let mut seg = 0usize;
    for i in 0..m {
        let target = total * i as f64 / m as f64;
        while seg + 1 < n && cumulative[seg + 1] < target {
            seg += 1;
        }
        let a = points[seg % n];
        let b = points[(seg + 1) % n];
        let seg_len = (cumulative[seg + 1] - cumulative[seg]).max(MIN_SEGMENT);
        let t = ((target - cumulative[seg]) / seg_len).clamp(0.0, 1.0) as f32;
        out.push(a + (b - a) * t);
    }
    Ok(out)
}

/// Force the last sample onto the first so the loop closes exactly.
pub fn snap_closed(points: &mut [Point]) {
    if let [first, .., last] = points {
        *last = *first;
    }
}
