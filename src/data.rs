use std::fmt::{self, Debug};

use crate::{processor::calibration::MAX_RAW_DEPTH, Error};

pub const DEPTH_WIDTH: usize = 640;
pub const DEPTH_HEIGHT: usize = 480;

/// Raw depth samples of one sensor frame, row major with `index = x + y * width`.
///
/// A raster can only be built with exactly `width * height` samples, all in `0..=2047`,
/// so sampling never has to check bounds again.
#[derive(Clone)]
pub struct DepthRaster {
    width: usize,
    height: usize,
    buffer: Vec<u16>,
}

impl DepthRaster {
    pub fn new(width: usize, height: usize, buffer: Vec<u16>) -> Result<Self, Error> {
        let expected = width * height;

        if buffer.len() != expected {
            return Err(Error::RasterSize {
                expected,
                actual: buffer.len(),
            });
        }

        if let Some((index, value)) = buffer
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| *value > MAX_RAW_DEPTH)
        {
            return Err(Error::SampleOutOfRange { index, value });
        }

        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn filled(width: usize, height: usize, value: u16) -> Result<Self, Error> {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.buffer[x + y * self.width]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.buffer
    }
}

impl Debug for DepthRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthRaster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("buffer_length", &self.buffer.len())
            .finish()
    }
}

/// Point in render space, meters multiplied by the display scale.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Projected points of one tick, in sampling order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    pub points: Vec<WorldPoint>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<WorldPoint>> for Frame {
    fn from(points: Vec<WorldPoint>) -> Self {
        Self { points }
    }
}
