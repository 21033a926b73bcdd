// Window + pointer input + presenting raster grids.
// Visual effects provided here:
// 1) A window sized to the raster grid.
// 2) Mouse state turned into press / move / release events for the capture.
// 3) Marker grids painted with a small palette, spectrum grids in grayscale.

use fourier_sketch::types::{MARKER_ORIGINAL, MARKER_RECONSTRUCTION, MARKER_STROKE};
use fourier_sketch::{Button, Error, FrameBuffer, PointerEvent, RasterGrid};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

const BACKGROUND: u32 = 0x00_C8_C8_C8;     // light gray
const STROKE: u32 = 0x00_00_00_00;         // black
const ORIGINAL: u32 = 0x00_30_60_D0;       // blue
const RECONSTRUCTION: u32 = 0x00_D0_30_30; // red
const OTHER_MARKER: u32 = 0x00_60_60_60;

pub struct Drawer {
    window: Window,                 // the on-screen window you see
    left_down: bool,                // button state seen last frame
    right_down: bool,
    last_pos: Option<(f32, f32)>,
}

impl Drawer {
    /// Create a window the size of the raster grid.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, left_down: false, right_down: false, last_pos: None })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// True once per key press (no auto-repeat).
    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// minifb only exposes polled state, so compare against last frame and
    /// emit the edges: button down -> Press, up -> Release, moved -> Move.
    pub fn pointer_events(&mut self) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) else {
            return events;
        };

        if self.last_pos != Some((x, y)) {
            events.push(PointerEvent::Move { x, y });
            self.last_pos = Some((x, y));
        }

        let left = self.window.get_mouse_down(MouseButton::Left);
        let right = self.window.get_mouse_down(MouseButton::Right);
        for (now, before, button) in [
            (left, &mut self.left_down, Button::Primary),
            (right, &mut self.right_down, Button::Secondary),
        ] {
            match (*before, now) {
                (false, true) => events.push(PointerEvent::Press { x, y, button }),
                (true, false) => events.push(PointerEvent::Release { x, y, button }),
                _ => {}
            }
            *before = now;
        }
        events
    }
}

/// Paint a marker grid: each marker value gets its own color.
/// Visual: black live stroke, blue original, red approximation on light gray.
pub fn blit_markers(grid: &RasterGrid, fb: &mut FrameBuffer) {
    for (dst, px) in fb.pixels.iter_mut().zip(grid.image().pixels()) {
        *dst = match px[0] {
            0 => BACKGROUND,
            MARKER_RECONSTRUCTION => RECONSTRUCTION,
            MARKER_ORIGINAL => ORIGINAL,
            MARKER_STROKE => STROKE,
            _ => OTHER_MARKER,
        };
    }
}

/// Paint a grid as plain grayscale.
/// Visual: the spectrum view, bright center = low frequencies.
pub fn blit_gray(grid: &RasterGrid, fb: &mut FrameBuffer) {
    for (dst, px) in fb.pixels.iter_mut().zip(grid.image().pixels()) {
        let v = px[0] as u32;
        *dst = (v << 16) | (v << 8) | v;
    }
}
