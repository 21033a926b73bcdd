// Elliptic Fourier descriptors of a closed curve.
//
// The resampled curve is read as complex samples `z_m = x_m + i·y_m`. The
// centroid is split off and kept in the k = 0 slot; every other slot holds
//
//     c_k = (1/M) Σ_m (z_m − z̄) · e^{−i·2πkm/M},   k ∈ [−K, K] \ {0}
//
// Each ±k pair traces one ellipse; their sum traces the approximation:
//
//     z(t) = z̄ + Σ_{k=1..K} c_k·e^{+i·2πkt} + c_{−k}·e^{−i·2πkt},   t ∈ [0, 1)
//
// With this convention a counter-clockwise circle (in x-right, y-up axes)
// lands entirely in c_{+1}, a clockwise one in c_{−1}.

use crate::config::DescriptorConfig;
use crate::error::{Error, Result};
use crate::raster;
use crate::resample;
use crate::scratch;
use crate::types::{MARKER_ORIGINAL, MARKER_RECONSTRUCTION, Point, RasterGrid};
use num_complex::Complex64;
use std::f64::consts::PI;

/// `2K + 1` coefficients, indexed by frequency `k ∈ [−K, K]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptors {
    terms: usize,
    coeffs: Vec<Complex64>,
}

/// Largest K with `2K + 1 <= m`.
pub fn clamp_terms(requested: usize, m: usize) -> usize {
    requested.min(m.saturating_sub(1) / 2)
}

impl Descriptors {
    /// Centroid plus `clamp_terms(k, points.len())` harmonic pairs.
    pub fn compute(points: &[Point], k: usize) -> Result<Self> {
        let m = points.len();
        if m < 2 {
            return Err(Error::Degenerate("descriptors need at least 2 points"));
        }
        let terms = clamp_terms(k, m);

        let mut samples: Vec<Complex64> = scratch::with_capacity(m, "descriptor samples")?;
        samples.extend(points.iter().map(|p| Complex64::new(p.x as f64, p.y as f64)));
        let centroid = samples.iter().sum::<Complex64>() / m as f64;
        for z in samples.iter_mut() {
            *z -= centroid;
        }

        let mut coeffs = scratch::filled(2 * terms + 1, Complex64::new(0.0, 0.0), "descriptors")?;
        coeffs[terms] = centroid;
        for freq in 1..=terms as i64 {
            for k in [freq, -freq] {
                let step = -2.0 * PI * k as f64 / m as f64;
                let sum: Complex64 = samples
                    .iter()
                    .enumerate()
                    .map(|(i, z)| z * Complex64::from_polar(1.0, step * i as f64))
                    .sum();
                coeffs[(terms as i64 + k) as usize] = sum / m as f64;
            }
        }
        Ok(Self { terms, coeffs })
    }

    /// Number of harmonic pairs (K).
    pub fn terms(&self) -> usize {
        self.terms
    }

    pub fn centroid(&self) -> Point {
        let c = self.coeffs[self.terms];
        Point::new(c.re as f32, c.im as f32)
    }

    /// Coefficient at frequency `k`; zero outside `[−K, K]`. `k = 0` is the centroid.
    pub fn coefficient(&self, k: i64) -> Complex64 {
        if k.unsigned_abs() as usize > self.terms {
            return Complex64::new(0.0, 0.0);
        }
        self.coeffs[(self.terms as i64 + k) as usize]
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.coeffs
    }

    /// Walk the approximated curve at `num_samples` evenly spaced parameters.
    /// A non-finite sample falls back to the centroid.
    pub fn reconstruct(&self, num_samples: usize) -> Result<Vec<Point>> {
        let centroid = self.coeffs[self.terms];
        let mut out = scratch::with_capacity(num_samples, "reconstructed curve")?;
        for r in 0..num_samples {
            let t = r as f64 / num_samples as f64;
            let mut z = centroid;
            for k in 1..=self.terms as i64 {
                let angle = 2.0 * PI * k as f64 * t;
                z += self.coefficient(k) * Complex64::from_polar(1.0, angle)
                    + self.coefficient(-k) * Complex64::from_polar(1.0, -angle);
            }
            if !z.is_finite() {
                z = centroid;
            }
            out.push(Point::new(z.re as f32, z.im as f32));
        }
        Ok(out)
    }
}

/// Close the stroke, resample it, fit descriptors and redraw the grid with
/// the resampled stroke (MARKER_ORIGINAL) and the approximation
/// (MARKER_RECONSTRUCTION), both as closed loops.
///
/// The grid is untouched unless every working buffer was allocated.
pub fn fit_and_render(
    grid: &mut RasterGrid,
    stroke: &[Point],
    config: &DescriptorConfig,
) -> Result<Descriptors> {
    if stroke.len() < 2 {
        return Err(Error::Degenerate("descriptor render needs at least 2 points"));
    }
    if grid.is_empty() {
        return Err(Error::Degenerate("descriptor render needs a nonzero grid"));
    }

    let density = stroke
        .len()
        .clamp(config.min_sample_density, config.max_sample_density.max(config.min_sample_density));
    let mut resampled = resample::resample_closed(stroke, density)?;
    resample::snap_closed(&mut resampled);

    let descriptors = Descriptors::compute(&resampled, config.terms)?;
    let samples = scratch::checked_mul(density, config.curve_density.max(1), "reconstruction samples")?;
    let curve = descriptors.reconstruct(samples)?;
    log::debug!(
        "Descriptor fit: {} stroke points -> M={} K={} ({} output samples)",
        stroke.len(),
        density,
        descriptors.terms(),
        samples
    );

    raster::clear(grid);
    raster::draw_closed_polyline(grid, &resampled, MARKER_ORIGINAL);
    raster::draw_closed_polyline(grid, &curve, MARKER_RECONSTRUCTION);
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn circle(m: usize, cx: f32, cy: f32, r: f32) -> Vec<Point> {
        (0..m)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / m as f64;
                Point::new(cx + r * a.cos() as f32, cy + r * a.sin() as f32)
            })
            .collect()
    }

    /// Distance from `p` to the boundary of the axis-aligned square [0, side]².
    fn distance_to_square(p: Point, side: f32) -> f32 {
        let inside = p.x >= 0.0 && p.x <= side && p.y >= 0.0 && p.y <= side;
        if inside {
            p.x.min(side - p.x).min(p.y).min(side - p.y)
        } else {
            let dx = (-p.x).max(p.x - side).max(0.0);
            let dy = (-p.y).max(p.y - side).max(0.0);
            (dx * dx + dy * dy).sqrt()
        }
    }

    fn max_square_deviation(terms: usize) -> f32 {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let mut resampled = resample::resample_closed(&square, 128).unwrap();
        resample::snap_closed(&mut resampled);
        let d = Descriptors::compute(&resampled, terms).unwrap();
        d.reconstruct(512)
            .unwrap()
            .into_iter()
            .map(|p| distance_to_square(p, 1.0))
            .fold(0.0f32, f32::max)
    }

    #[test]
    fn term_count_keeps_2k_plus_1_within_m() {
        assert_eq!(clamp_terms(12, 128), 12);
        assert_eq!(clamp_terms(100, 128), 63);
        assert_eq!(clamp_terms(5, 4), 1);
        assert_eq!(clamp_terms(5, 2), 0);
        assert_eq!(clamp_terms(100, 65), 32);
        assert_eq!(clamp_terms(100, 5), 2);
        for m in 2..40 {
            let k = clamp_terms(usize::MAX, m);
            assert!(2 * k + 1 <= m);
            // and no larger K would fit
            assert!(2 * (k + 1) + 1 > m);
        }
    }

    #[test]
    fn centroid_sits_in_the_zero_slot() {
        let d = Descriptors::compute(&circle(64, 10.0, -4.0, 3.0), 4).unwrap();
        assert_eq!(d.as_slice().len(), 9);
        assert_abs_diff_eq!(d.centroid().x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(d.centroid().y, -4.0, epsilon = 1e-4);
        assert_eq!(d.coefficient(0), d.as_slice()[4]);
    }

    #[test]
    fn circle_lives_in_the_first_harmonic() {
        let r = 5.0;
        let d = Descriptors::compute(&circle(128, 20.0, 30.0, r), 6).unwrap();
        assert_abs_diff_eq!(d.coefficient(1).re, r as f64, epsilon = 1e-4);
        assert_abs_diff_eq!(d.coefficient(1).im, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(d.coefficient(-1).norm(), 0.0, epsilon = 1e-4);
        for k in 2..=6 {
            assert_abs_diff_eq!(d.coefficient(k).norm(), 0.0, epsilon = 1e-4);
            assert_abs_diff_eq!(d.coefficient(-k).norm(), 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn clockwise_circle_lives_in_minus_one() {
        let mut pts = circle(128, 0.0, 0.0, 2.0);
        pts.reverse();
        let d = Descriptors::compute(&pts, 3).unwrap();
        assert_abs_diff_eq!(d.coefficient(-1).norm(), 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(d.coefficient(1).norm(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn circle_round_trips() {
        let (cx, cy, r) = (100.0, 80.0, 40.0);
        let pts = circle(96, cx, cy, r);
        let d = Descriptors::compute(&pts, 1).unwrap();
        let rebuilt = d.reconstruct(96).unwrap();
        for (p, q) in pts.iter().zip(&rebuilt) {
            assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-3);
            assert_abs_diff_eq!(p.y, q.y, epsilon = 1e-3);
        }
        for p in d.reconstruct(1000).unwrap() {
            assert_abs_diff_eq!(p.distance(Point::new(cx, cy)), r, epsilon = 1e-3);
        }
    }

    #[test]
    fn square_low_order_fit_stays_near_the_boundary() {
        // K = 2 keeps only the k = 1 ellipse of a square (its next harmonic is
        // k = −3), so the fit is close to a circle: corners are cut by ~0.1.
        let coarse = max_square_deviation(2);
        assert!(coarse < 0.12, "K=2 deviation {coarse}");

        let fine = max_square_deviation(8);
        assert!(fine < 0.05, "K=8 deviation {fine}");
        assert!(fine < coarse);
    }

    #[test]
    fn rejects_too_few_points() {
        assert!(Descriptors::compute(&[Point::new(1.0, 1.0)], 3).is_err());
        let mut grid = RasterGrid::new(16, 16).unwrap();
        let config = DescriptorConfig::default();
        assert!(fit_and_render(&mut grid, &[Point::new(1.0, 1.0)], &config).is_err());
    }

    #[test]
    fn render_draws_both_closed_layers() {
        let mut grid = RasterGrid::new(128, 128).unwrap();
        let stroke = circle(40, 64.0, 64.0, 30.0);
        let config = DescriptorConfig { terms: 4, ..DescriptorConfig::default() };
        let d = fit_and_render(&mut grid, &stroke, &config).unwrap();
        assert_eq!(d.terms(), 4);

        let raw = grid.as_raw();
        assert!(raw.contains(&MARKER_RECONSTRUCTION));
        assert!(raw.iter().all(|&p| p == 0 || p == MARKER_ORIGINAL || p == MARKER_RECONSTRUCTION));
        // nothing near the centre of the ring
        assert_eq!(grid.get(64, 64), Some(0));
    }
}
