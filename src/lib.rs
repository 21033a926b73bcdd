// Freehand stroke -> truncated Fourier approximation.
//
// Pipeline:
//   capture (pointer events) -> point_buffer (the one live stroke)
//     -> raster + signal -> series       (1D real series over column heights)
//     -> resample        -> descriptors  (2D elliptic descriptors, closed loop)
//   and both engines redraw the raster grid with the original curve at
//   MARKER_ORIGINAL and the approximation at MARKER_RECONSTRUCTION.

pub mod capture;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod point_buffer;
pub mod raster;
pub mod resample;
pub mod scratch;
pub mod series;
pub mod signal;
pub mod spectrum;
pub mod types;

pub use capture::{Button, CaptureController, CaptureState, PointerEvent};
pub use config::Config;
pub use descriptors::Descriptors;
pub use error::{Error, Result};
pub use point_buffer::PointBuffer;
pub use series::SeriesCoefficients;
pub use types::{FrameBuffer, Point, RasterGrid};
