// Truncated real Fourier series over the column-height signal.
// Direct O(N·K) sums on purpose; K is small and N is one grid row.

use crate::error::{Error, Result};
use crate::raster;
use crate::scratch;
use crate::signal;
use crate::types::{MARKER_ORIGINAL, MARKER_RECONSTRUCTION, Point, RasterGrid};
use std::f64::consts::PI;

/// `y(n) = a0 + Σ a[k-1]·cos(2πkn/N) + b[k-1]·sin(2πkn/N)`
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCoefficients {
    pub a0: f64,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl SeriesCoefficients {
    pub fn terms(&self) -> usize {
        self.a.len()
    }
}

/// At least one term, at most Nyquist.
pub fn clamp_terms(requested: usize, n: usize) -> usize {
    requested.min(n / 2).max(1)
}

/// Fit `clamp_terms(k, signal.len())` harmonics to `signal`.
pub fn fit(signal: &[f32], k: usize) -> Result<SeriesCoefficients> {
    let n = signal.len();
    if n == 0 {
        return Err(Error::Degenerate("series fit needs a nonempty signal"));
    }
    let k = clamp_terms(k, n);

    let a0 = signal.iter().map(|&f| f as f64).sum::<f64>() / n as f64;

    let scale = 2.0 / n as f64;
    let mut a = scratch::with_capacity(k, "cosine coefficients")?;
    let mut b = scratch::with_capacity(k, "sine coefficients")?;
    for harmonic in 1..=k {
        let step = 2.0 * PI * harmonic as f64 / n as f64;
        let (mut ak, mut bk) = (0.0, 0.0);
        for (i, &f) in signal.iter().enumerate() {
            let (sin, cos) = (step * i as f64).sin_cos();
            ak += f as f64 * cos;
            bk += f as f64 * sin;
        }
        a.push(scale * ak);
        b.push(scale * bk);
    }
    Ok(SeriesCoefficients { a0, a, b })
}

/// Evaluate the series at `n` samples. Non-finite samples come out as 0.
pub fn reconstruct(n: usize, coeffs: &SeriesCoefficients) -> Result<Vec<f32>> {
    let mut out = scratch::with_capacity(n, "reconstructed signal")?;
    for i in 0..n {
        let mut y = coeffs.a0;
        for (idx, (ak, bk)) in coeffs.a.iter().zip(&coeffs.b).enumerate() {
            let arg = 2.0 * PI * (idx + 1) as f64 * i as f64 / n as f64;
            y += ak * arg.cos() + bk * arg.sin();
        }
        out.push(if y.is_finite() { y as f32 } else { 0.0 });
    }
    Ok(out)
}

/// Extract the column signal from `grid`, fit `terms` harmonics and redraw the
/// grid with the original signal (MARKER_ORIGINAL) under the approximation
/// (MARKER_RECONSTRUCTION).
///
/// The grid is untouched unless every working buffer was allocated.
pub fn fit_and_render(grid: &mut RasterGrid, terms: usize) -> Result<SeriesCoefficients> {
    if grid.is_empty() {
        return Err(Error::Degenerate("series render needs a nonzero grid"));
    }
    scratch::checked_mul(grid.width(), grid.height(), "raster grid bytes")?;

    let width = grid.width();
    let input = signal::extract(grid)?;
    let coeffs = fit(&input, terms)?;
    let output = reconstruct(width, &coeffs)?;
    log::debug!("Series fit: N={} K={} a0={:.2}", width, coeffs.terms(), coeffs.a0);

    raster::clear(grid);
    draw_signal(grid, &input, MARKER_ORIGINAL);
    draw_signal(grid, &output, MARKER_RECONSTRUCTION);
    Ok(coeffs)
}

/// One line segment per pair of neighbouring columns.
fn draw_signal(grid: &mut RasterGrid, signal: &[f32], marker: u8) {
    for (x, pair) in signal.windows(2).enumerate() {
        raster::draw_segment(
            grid,
            Point::new(x as f32, pair[0]),
            Point::new((x + 1) as f32, pair[1]),
            marker,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wave(n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / n as f64;
                (100.0 + 30.0 * (3.0 * t).sin() + 10.0 * (5.0 * t).cos()) as f32
            })
            .collect()
    }

    #[test]
    fn term_count_is_clamped() {
        assert_eq!(clamp_terms(0, 512), 1);
        assert_eq!(clamp_terms(5, 512), 5);
        assert_eq!(clamp_terms(1000, 512), 256);
        assert_eq!(clamp_terms(3, 1), 1);
    }

    #[test]
    fn recovers_known_coefficients() {
        let coeffs = fit(&wave(256), 8).unwrap();
        assert_eq!(coeffs.terms(), 8);
        assert_abs_diff_eq!(coeffs.a0, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(coeffs.b[2], 30.0, epsilon = 1e-4);
        assert_abs_diff_eq!(coeffs.a[4], 10.0, epsilon = 1e-4);
        for k in [0, 1, 3, 5, 6, 7] {
            assert_abs_diff_eq!(coeffs.a[k], 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn sinusoid_round_trips() {
        let n = 512;
        let original = wave(n);
        let coeffs = fit(&original, 6).unwrap();
        let rebuilt = reconstruct(n, &coeffs).unwrap();
        let max_err = original
            .iter()
            .zip(&rebuilt)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-3, "max error {max_err}");
    }

    #[test]
    fn non_finite_samples_become_zero() {
        let coeffs = SeriesCoefficients { a0: f64::INFINITY, a: vec![0.0], b: vec![0.0] };
        assert_eq!(reconstruct(4, &coeffs).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn empty_signal_is_rejected() {
        assert!(fit(&[], 3).is_err());
    }

    #[test]
    fn render_draws_both_layers() {
        let mut grid = RasterGrid::new(64, 64).unwrap();
        raster::draw_line(&mut grid, 0, 10, 63, 50, 255);
        let coeffs = fit_and_render(&mut grid, 3).unwrap();
        assert_eq!(coeffs.terms(), 3);

        let raw = grid.as_raw();
        assert!(raw.contains(&MARKER_ORIGINAL));
        assert!(raw.contains(&MARKER_RECONSTRUCTION));
        assert!(!raw.contains(&255));
    }

    #[test]
    fn render_rejects_empty_grid() {
        let mut grid = RasterGrid::new(0, 0).unwrap();
        assert!(fit_and_render(&mut grid, 3).is_err());
    }
}
