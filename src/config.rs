// Tunables for capture and both Fourier engines.
//
// Everything has a default, so a missing TOML file (or a missing section in
// one) falls back to the values below.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Width and height of the square raster grid (power of two)
    pub grid_size: u32,
    pub capture: CaptureConfig,
    pub series: SeriesConfig,
    pub descriptors: DescriptorConfig,
}

/// Pointer capture
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Samples closer than this to the last accepted point are dropped
    pub min_distance: f32,
    /// Hard cap on stroke length (0 = unlimited)
    pub max_points: usize,
    /// Capacity reserved up front when a stroke starts
    pub reserve_hint: usize,
}

/// 1D real Fourier series over the column-height signal
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub terms: usize,
}

/// 2D elliptic Fourier descriptors over the closed stroke
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub terms: usize,
    pub min_sample_density: usize,
    pub max_sample_density: usize,
    /// Reconstruction samples per resampled input sample
    pub curve_density: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: 512,
            capture: CaptureConfig::default(),
            series: SeriesConfig::default(),
            descriptors: DescriptorConfig::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { min_distance: 1.0, max_points: 10_000, reserve_hint: 1024 }
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self { terms: 5 }
    }
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            terms: 12,
            min_sample_density: 64,
            max_sample_density: 1024,
            curve_density: 4,
        }
    }
}

impl Config {
    /// Load and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file means defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        log::info!("Using config: {}", path.display());
        Self::from_file(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 || !self.grid_size.is_power_of_two() {
            return Err(Error::Config(format!(
                "grid_size must be a nonzero power of two, got {}",
                self.grid_size
            )));
        }
        let min_distance = self.capture.min_distance;
        if min_distance.is_nan() || min_distance < 0.0 {
            return Err(Error::Config("capture.min_distance must be >= 0".into()));
        }
        let d = &self.descriptors;
        if d.min_sample_density < 2 || d.min_sample_density > d.max_sample_density {
            return Err(Error::Config(format!(
                "descriptor sample density range [{}, {}] is invalid",
                d.min_sample_density, d.max_sample_density
            )));
        }
        if d.curve_density == 0 {
            return Err(Error::Config("descriptors.curve_density must be >= 1".into()));
        }
        Ok(())
    }
}
