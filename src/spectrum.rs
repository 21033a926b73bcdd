// Magnitude spectrum of the whole grid, drawn back into the grid.
// Separable naive DFT (rows, then columns), log-compressed, normalized to
// 0..255 and quadrant-swapped so the zero frequency sits in the middle.

use crate::error::{Error, Result};
use crate::scratch;
use crate::types::RasterGrid;
use num_complex::Complex64;
use std::f64::consts::PI;

/// `e^{−i·2π·j/n}` for `j` in `0..n`.
fn twiddles(n: usize) -> Result<Vec<Complex64>> {
    let mut table = scratch::with_capacity(n, "twiddle table")?;
    table.extend((0..n).map(|j| Complex64::from_polar(1.0, -2.0 * PI * j as f64 / n as f64)));
    Ok(table)
}

/// Forward DFT of `input` into `output` (same length as `table`).
fn dft(input: &[Complex64], output: &mut [Complex64], table: &[Complex64]) {
    let n = table.len();
    for (k, out) in output.iter_mut().enumerate() {
        let mut sum = Complex64::new(0.0, 0.0);
        for (i, x) in input.iter().enumerate() {
            sum += x * table[(k * i) % n];
        }
        *out = sum;
    }
}

/// Replace the grid with its centered log-magnitude spectrum.
pub fn magnitude_spectrum(grid: &mut RasterGrid) -> Result<()> {
    if grid.is_empty() {
        return Err(Error::Degenerate("spectrum needs a nonzero grid"));
    }
    let (w, h) = (grid.width(), grid.height());
    let len = scratch::checked_mul(w, h, "spectrum size")?;
    // (k * i) indexes the twiddle tables
    scratch::checked_mul(w.max(h), w.max(h), "twiddle index")?;

    let zero = Complex64::new(0.0, 0.0);
    let mut freq = scratch::filled(len, zero, "spectrum")?;
    let mut line_in = scratch::filled(w.max(h), zero, "spectrum line")?;
    let mut line_out = scratch::filled(w.max(h), zero, "spectrum line")?;
    let mut magnitude = scratch::filled(len, 0.0f64, "spectrum magnitude")?;
    let row_table = twiddles(w)?;
    let col_table = twiddles(h)?;

    let raw = grid.as_raw();
    for y in 0..h {
        for x in 0..w {
            line_in[x] = Complex64::new(raw[y * w + x] as f64 / 255.0, 0.0);
        }
        dft(&line_in[..w], &mut line_out[..w], &row_table);
        freq[y * w..(y + 1) * w].copy_from_slice(&line_out[..w]);
    }
    for x in 0..w {
        for y in 0..h {
            line_in[y] = freq[y * w + x];
        }
        dft(&line_in[..h], &mut line_out[..h], &col_table);
        for y in 0..h {
            freq[y * w + x] = line_out[y];
        }
    }

    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for (m, z) in magnitude.iter_mut().zip(&freq) {
        *m = z.norm().ln_1p();
        lo = lo.min(*m);
        hi = hi.max(*m);
    }
    let range = if hi > lo { hi - lo } else { 1.0 };

    // write shifted: frequency (kx, ky) lands at ((kx + w/2) % w, (ky + h/2) % h)
    let pixels = grid.as_raw_mut();
    for ky in 0..h {
        for kx in 0..w {
            let v = ((magnitude[ky * w + kx] - lo) / range * 255.0).round().clamp(0.0, 255.0);
            let (sx, sy) = ((kx + w / 2) % w, (ky + h / 2) % h);
            pixels[sy * w + sx] = v as u8;
        }
    }
    log::debug!("Spectrum {}x{}: log-magnitude range [{:.3}, {:.3}]", w, h, lo, hi);
    Ok(())
}
