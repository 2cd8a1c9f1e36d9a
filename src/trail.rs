use std::collections::VecDeque;

use crate::data::{Frame, WorldPoint};

/// Opacity sent to the renderer for the oldest and the newest trail frame.
pub const MIN_TRAIL_ALPHA: f64 = 0.2 * 255.0;
pub const MAX_TRAIL_ALPHA: f64 = 255.0;

/// Largest capacity the control surface offers.
pub const MAX_TRAIL_CAPACITY: usize = 150;

/// Archived frame together with the rotation angle it was captured at.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailFrame {
    frame: Frame,
    capture_angle: f64,
}

impl TrailFrame {
    pub fn new(frame: Frame, capture_angle: f64) -> Self {
        Self {
            frame,
            capture_angle,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn points(&self) -> &[WorldPoint] {
        &self.frame.points
    }

    pub fn capture_angle(&self) -> f64 {
        self.capture_angle
    }
}

/// Age based dimming of a trail frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Colour multiplier in `(0, 1]`, 1 for the newest frame.
    pub color: f64,
    /// Opacity in `[51, 255]`.
    pub alpha: f64,
}

impl Fade {
    /// Fade of the frame at `index` (0 = oldest) in a trail of `size` frames.
    pub fn at(index: usize, size: usize) -> Self {
        let color = (index as f64 + 1.0) / size.max(1) as f64;

        Self {
            color,
            alpha: MIN_TRAIL_ALPHA + (MAX_TRAIL_ALPHA - MIN_TRAIL_ALPHA) * color,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrailEntry<'a> {
    pub frame: &'a TrailFrame,
    pub fade: Fade,
    /// Rotation to apply on top of the live one, `capture_angle - current_angle`.
    pub delta_angle: f64,
}

/// Fixed capacity FIFO of past frames.
///
/// A capacity of 0 disables recording. Shrinking the capacity drops the oldest frames.
#[derive(Debug, Default, Clone)]
pub struct TrailBuffer {
    frames: VecDeque<TrailFrame>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: TrailFrame) {
        if self.capacity == 0 {
            return;
        }

        while self.frames.len() >= self.capacity {
            self.frames.pop_front();
        }

        self.frames.push_back(frame);
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;

        if self.frames.len() > capacity {
            let evicted = self.frames.len() - capacity;

            self.frames.drain(..evicted);

            tracing::debug!(capacity, evicted, "Trimmed trail");
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Frames oldest to newest with their fade and rotation offset.
    pub fn iter(&self, current_angle: f64) -> impl ExactSizeIterator<Item = TrailEntry<'_>> {
        let size = self.frames.len();

        self.frames
            .iter()
            .enumerate()
            .map(move |(index, frame)| TrailEntry {
                frame,
                fade: Fade::at(index, size),
                delta_angle: frame.capture_angle - current_angle,
            })
    }
}
