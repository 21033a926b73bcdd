// Core types shared by capture, rasterizer and both Fourier engines.

use crate::error::{Error, Result};
use crate::scratch;
use image::{GrayImage, Luma};
use std::ops::{Add, Mul, Sub};

/// Marker for the reconstructed (approximated) curve.
pub const MARKER_RECONSTRUCTION: u8 = 1;
/// Marker for the original / source curve drawn next to the reconstruction.
pub const MARKER_ORIGINAL: u8 = 2;
/// Marker for the live stroke while it is being drawn.
pub const MARKER_STROKE: u8 = 255;

/// A 2D sample in grid/window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, s: f32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// What the window shows each frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

/// One byte per pixel: 0 = empty, anything else is a marker.
/// Visual: unseen directly; the host maps markers to colors when presenting.
pub struct RasterGrid {
    image: GrayImage,
}

impl RasterGrid {
    /// Allocate an all-zero grid. The byte count is overflow-checked first.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = scratch::checked_mul(width as usize, height as usize, "raster grid")?;
        let raw = scratch::filled(len, 0u8, "raster grid")?;
        Self::from_raw(width, height, raw)
    }

    /// Wrap caller-provided pixel bytes (row-major, `width * height` long).
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        if raw.len() as u64 != width as u64 * height as u64 {
            return Err(Error::Degenerate("raster bytes do not match width * height"));
        }
        GrayImage::from_raw(width, height, raw)
            .map(|image| Self { image })
            .ok_or(Error::Degenerate("raster bytes do not match width * height"))
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Pixel value, or None outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x as u32, y as u32)[0])
    }

    /// Set a pixel; coordinates outside the grid are ignored.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, marker: u8) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, Luma([marker]));
    }

    /// Every pixel back to 0.
    pub fn clear(&mut self) {
        self.image.fill(0);
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a + b, Point::new(5.0, 8.0));
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
    }

    #[test]
    fn grid_put_ignores_out_of_bounds() {
        let mut grid = RasterGrid::new(4, 4).unwrap();
        grid.put(-1, 0, 9);
        grid.put(4, 0, 9);
        grid.put(0, 4, 9);
        grid.put(2, 3, 9);
        assert_eq!(grid.as_raw().iter().filter(|&&p| p != 0).count(), 1);
        assert_eq!(grid.get(2, 3), Some(9));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(RasterGrid::from_raw(4, 4, vec![0; 15]).is_err());
        assert!(RasterGrid::from_raw(4, 4, vec![0; 17]).is_err());
        assert!(RasterGrid::from_raw(4, 4, vec![0; 16]).is_ok());
    }
}
