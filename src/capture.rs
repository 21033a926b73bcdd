// Turns pointer events into the one live stroke.
// Idle --primary press--> Drawing --primary release / cap / append failure--> Idle

use crate::config::CaptureConfig;
use crate::error::Result;
use crate::point_buffer::PointBuffer;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// One discrete pointer event in grid/window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f32, y: f32, button: Button },
    Move { x: f32, y: f32 },
    Release { x: f32, y: f32, button: Button },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

pub struct CaptureController {
    stroke: PointBuffer,
    state: CaptureState,
    min_distance: f32,
    max_points: usize, // 0 = unlimited
    reserve_hint: usize,
}

impl CaptureController {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            stroke: PointBuffer::new(config.max_points),
            state: CaptureState::Idle,
            min_distance: config.min_distance,
            max_points: config.max_points,
            reserve_hint: config.reserve_hint,
        }
    }

    /// Feed one event. An Err means the stroke stopped early because storage
    /// could not grow; the points captured so far stay usable.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Press { x, y, button: Button::Primary } => self.begin_stroke(Point::new(x, y)),
            PointerEvent::Move { x, y } if self.state == CaptureState::Drawing => {
                self.try_add_point(Point::new(x, y))
            }
            PointerEvent::Release { button: Button::Primary, .. } => {
                self.state = CaptureState::Idle;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn begin_stroke(&mut self, p: Point) -> Result<()> {
        // only one stroke at a time
        self.stroke.clear();
        self.state = CaptureState::Drawing;
        if let Err(e) = self.stroke.reserve(self.reserve_hint) {
            log::warn!("Could not reserve stroke storage: {e}");
            self.state = CaptureState::Idle;
            return Err(e);
        }
        log::info!("Stroke started at ({:.1}, {:.1})", p.x, p.y);
        self.try_add_point(p)
    }

    fn try_add_point(&mut self, p: Point) -> Result<()> {
        if self.max_points != 0 && self.stroke.len() >= self.max_points {
            log::info!("Stroke capped at {} points", self.stroke.len());
            self.state = CaptureState::Idle;
            return Ok(());
        }
        if let Some(last) = self.stroke.last() {
            if last.distance(p) < self.min_distance {
                return Ok(());
            }
        }
        if let Err(e) = self.stroke.push(p) {
            log::warn!("Stroke stopped after {} points: {e}", self.stroke.len());
            self.state = CaptureState::Idle;
            return Err(e);
        }
        Ok(())
    }

    /// Discard the stroke and go back to Idle.
    pub fn clear(&mut self) {
        self.stroke.clear();
        self.state = CaptureState::Idle;
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == CaptureState::Drawing
    }

    pub fn stroke(&self) -> &PointBuffer {
        &self.stroke
    }
}
