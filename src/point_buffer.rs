// Growable, capacity-bounded point storage for the one live stroke.
// Capacity is tracked explicitly so growth is deterministic: start at
// BASE_CAPACITY, double until large enough, never exceed the hard cap.

use crate::error::{Error, Result};
use crate::types::Point;

/// First allocation when the buffer is empty.
pub const BASE_CAPACITY: usize = 128;

/// Capacity to grow to from `current` so that `desired` fits: start at
/// BASE_CAPACITY, double, fall back to exactly `desired` once doubling would
/// pass `max_cap`, then clamp to `hard_cap` (0 = unlimited).
/// Expects `desired <= max_cap`.
fn grown_capacity(current: usize, desired: usize, max_cap: usize, hard_cap: usize) -> usize {
    let mut new_cap = if current != 0 { current } else { BASE_CAPACITY };
    while new_cap < desired {
        if new_cap > max_cap / 2 {
            // doubling would overflow; take exactly what was asked for
            new_cap = desired;
            break;
        }
        new_cap *= 2;
    }
    if hard_cap != 0 {
        new_cap = new_cap.min(hard_cap);
    }
    new_cap
}

#[derive(Debug, Default)]
pub struct PointBuffer {
    points: Vec<Point>,
    capacity: usize,
    hard_cap: usize, // 0 = unlimited
}

impl PointBuffer {
    /// Empty buffer, nothing allocated yet.
    pub fn new(hard_cap: usize) -> Self {
        Self { points: Vec::new(), capacity: 0, hard_cap }
    }

    /// Grow storage to at least `min(desired, hard_cap)`.
    ///
    /// Already-sufficient capacity is a no-op, except when the buffer sits at
    /// the hard cap and is completely full: that is reported as BufferFull.
    pub fn reserve(&mut self, desired: usize) -> Result<()> {
        let desired = if self.hard_cap != 0 { desired.min(self.hard_cap) } else { desired };

        if desired <= self.capacity {
            if self.hard_cap != 0 && self.capacity >= self.hard_cap && self.points.len() >= self.capacity {
                return Err(Error::BufferFull(self.points.len()));
            }
            return Ok(());
        }

        let max_cap = isize::MAX as usize / size_of::<Point>();
        if desired > max_cap {
            return Err(Error::SizeOverflow("point buffer capacity"));
        }

        let new_cap = grown_capacity(self.capacity, desired, max_cap, self.hard_cap);

        self.points
            .try_reserve_exact(new_cap - self.points.len())
            .map_err(|source| Error::Allocation { what: "point buffer", source })?;
        self.capacity = new_cap;
        Ok(())
    }

    /// Append one point, growing first when full.
    pub fn push(&mut self, p: Point) -> Result<()> {
        if self.points.len() == self.capacity {
            self.reserve(self.points.len() + 1)?;
            if self.points.len() == self.capacity {
                return Err(Error::BufferFull(self.points.len()));
            }
        }
        self.points.push(p);
        Ok(())
    }

    /// Forget the points, keep the storage for the next stroke.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Free the storage.
    pub fn release(&mut self) {
        self.points = Vec::new();
        self.capacity = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hard_cap(&self) -> usize {
        self.hard_cap
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
