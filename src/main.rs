// What you SEE:
// • Hold Left Mouse and draw a stroke (black).
// • Let go: the stroke is replaced by its Fourier approximation (red) drawn
//   over the curve it was fitted to (blue).
// • 1 = 1D series over column heights, 2 = 2D elliptic descriptors (closed
//   loop), S = magnitude spectrum of the stroke. C clears. ESC quits.

mod draw;

use draw::{blit_gray, blit_markers, Drawer};
use fourier_sketch::types::MARKER_STROKE;
use fourier_sketch::{descriptors, raster, series, spectrum};
use fourier_sketch::{CaptureController, Config, Error, FrameBuffer, Point, RasterGrid};
use minifb::Key;
use std::time::{Duration, Instant};

const CONFIG_PATH: &str = "fourier_sketch.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Series,
    Descriptors,
    Spectrum,
}

/// Run one approximation pass over `stroke` into `work`.
/// Ok(false) means the stroke is too short to approximate and `work` is untouched.
/// On error `work` may hold the rasterized stroke; nothing else is touched.
fn approximate(view: View, stroke: &[Point], config: &Config, work: &mut RasterGrid) -> Result<bool, Error> {
    if stroke.len() < 2 {
        return Ok(false);
    }
    match view {
        View::Series => {
            raster::clear(work);
            raster::draw_polyline(work, stroke, MARKER_STROKE);
            series::fit_and_render(work, config.series.terms)?;
        }
        View::Descriptors => {
            descriptors::fit_and_render(work, stroke, &config.descriptors)?;
        }
        View::Spectrum => {
            raster::clear(work);
            raster::draw_polyline(work, stroke, MARKER_STROKE);
            spectrum::magnitude_spectrum(work)?;
        }
    }
    Ok(true)
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load_or_default(CONFIG_PATH)?;
    config.validate()?;
    let size = config.grid_size;

    /* --- Window + buffers ---
       Visual: window opens, light gray, ready to draw on. */
    let mut drawer = Drawer::new("Fourier Sketch", size as usize, size as usize)?;
    let mut screen = FrameBuffer {
        width: size as usize,
        height: size as usize,
        pixels: vec![0u32; size as usize * size as usize],
    };
    // `live` shows the stroke while drawing and doubles as scratch for a pass;
    // `approx` holds the last successful approximation.
    let mut live = RasterGrid::new(size, size)?;
    let mut approx = RasterGrid::new(size, size)?;
    let mut capture = CaptureController::new(&config.capture);

    let mut view = View::Series;
    let mut have_approx = false;
    let mut recompute = false;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    log::info!("Drawing on a {size}x{size} grid; 1/2/S switch views, C clears");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Keys */
        for (key, next) in [(Key::Key1, View::Series), (Key::Key2, View::Descriptors), (Key::S, View::Spectrum)] {
            if drawer.pressed_once(key) && view != next {
                view = next;
                recompute = true;
                log::info!("View: {view:?}");
            }
        }
        if drawer.pressed_once(Key::C) {
            capture.clear();
            have_approx = false;
        }

        /* 2) Pointer -> stroke. A stroke that just ended gets approximated. */
        let was_drawing = capture.is_drawing();
        for event in drawer.pointer_events() {
            if let Err(e) = capture.handle_event(event) {
                log::warn!("Capture stopped early: {e}");
            }
        }
        if was_drawing && !capture.is_drawing() {
            recompute = true;
        }

        /* 3) Approximation pass (only between strokes) */
        if recompute && !capture.is_drawing() {
            recompute = false;
            let started = Instant::now();
            match approximate(view, capture.stroke().as_slice(), &config, &mut live) {
                Ok(true) => {
                    std::mem::swap(&mut live, &mut approx);
                    have_approx = true;
                    log::debug!("{view:?} pass took {:?}", started.elapsed());
                }
                // a click without a drag replaced the last stroke; drop its approximation
                Ok(false) => have_approx = false,
                Err(e) => log::warn!("{view:?} approximation did not update: {e}"),
            }
        }

        /* 4) Compose the frame.
           Visual: live stroke while drawing, otherwise the last approximation. */
        if capture.is_drawing() || !have_approx {
            raster::clear(&mut live);
            raster::draw_polyline(&mut live, capture.stroke().as_slice(), MARKER_STROKE);
            blit_markers(&live, &mut screen);
        } else if view == View::Spectrum {
            blit_gray(&approx, &mut screen);
        } else {
            blit_markers(&approx, &mut screen);
        }

        /* 5) Present to the window. */
        drawer.present(&screen)?;

        /* 6) FPS, once per second */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Vec<Point> {
        (0..40)
            .map(|i| {
                let a = std::f32::consts::TAU * i as f32 / 40.0;
                Point::new(32.0 + 20.0 * a.cos(), 32.0 + 20.0 * a.sin())
            })
            .collect()
    }

    #[test]
    fn single_click_has_nothing_to_approximate() {
        let config = Config::default();
        let mut work = RasterGrid::new(64, 64).unwrap();
        raster::draw_line(&mut work, 0, 0, 63, 63, MARKER_STROKE);
        let before = work.as_raw().to_vec();
        for view in [View::Series, View::Descriptors, View::Spectrum] {
            assert!(!approximate(view, &[Point::new(5.0, 5.0)], &config, &mut work).unwrap());
            assert!(!approximate(view, &[], &config, &mut work).unwrap());
        }
        assert_eq!(work.as_raw(), &before[..]);
    }

    #[test]
    fn every_view_approximates_a_drawn_stroke() {
        let config = Config::default();
        for view in [View::Series, View::Descriptors, View::Spectrum] {
            let mut work = RasterGrid::new(64, 64).unwrap();
            assert!(approximate(view, &ring(), &config, &mut work).unwrap());
            assert!(work.as_raw().iter().any(|&p| p != 0), "{view:?} left the grid empty");
        }
    }
}
