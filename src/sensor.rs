use std::future::Future;

use crate::{
    data::{DepthRaster, DEPTH_HEIGHT, DEPTH_WIDTH},
    processor::calibration::NO_RETURN,
    Error,
};

/// Anything that delivers one raw depth raster per tick.
///
/// A source that cannot produce a frame returns an error, the caller then skips the tick.
pub trait DepthSource {
    fn next_raster(&mut self) -> impl Future<Output = Result<DepthRaster, Error>>;
}

const WALL_CODE: u16 = 900;
const BLOB_CODE: u16 = 700;
const BLOB_RADIUS: usize = 60;
const BORDER: usize = 8;

/// Generated scene: a back wall, a disc sweeping in front of it and a
/// border without returns, like the edge of the Kinect field of view.
#[derive(Debug, Clone)]
pub struct SyntheticDepthSource {
    width: usize,
    height: usize,
    sequence: u32,
}

impl SyntheticDepthSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            sequence: 0,
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    fn render(&self) -> Vec<u16> {
        let travel = self.width.saturating_sub(2 * BLOB_RADIUS).max(1);
        let center_x = BLOB_RADIUS + (self.sequence as usize * 4) % travel;
        let center_y = self.height / 2;
        let radius2 = BLOB_RADIUS * BLOB_RADIUS;

        let mut buffer = Vec::with_capacity(self.width * self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let edge = x < BORDER
                    || y < BORDER
                    || x + BORDER >= self.width
                    || y + BORDER >= self.height;

                let dx = x.abs_diff(center_x);
                let dy = y.abs_diff(center_y);

                buffer.push(if edge {
                    NO_RETURN
                } else if dx * dx + dy * dy <= radius2 {
                    BLOB_CODE
                } else {
                    // slight slope so the wall is not a flat sheet
                    WALL_CODE + (y / 16) as u16
                });
            }
        }

        buffer
    }
}

impl Default for SyntheticDepthSource {
    fn default() -> Self {
        Self::new(DEPTH_WIDTH, DEPTH_HEIGHT)
    }
}

impl DepthSource for SyntheticDepthSource {
    async fn next_raster(&mut self) -> Result<DepthRaster, Error> {
        let raster = DepthRaster::new(self.width, self.height, self.render())?;

        self.sequence = self.sequence.wrapping_add(1);

        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produces_full_frames() {
        let mut source = SyntheticDepthSource::default();

        let raster = source.next_raster().await.unwrap();

        assert_eq!(raster.width(), DEPTH_WIDTH);
        assert_eq!(raster.height(), DEPTH_HEIGHT);
        assert_eq!(raster.get(0, 0), NO_RETURN);
        assert_eq!(raster.get(BLOB_RADIUS, DEPTH_HEIGHT / 2), BLOB_CODE);
        assert_eq!(source.sequence(), 1);
    }

    #[tokio::test]
    async fn blob_moves_between_frames() {
        let mut source = SyntheticDepthSource::default();

        let first = source.next_raster().await.unwrap();
        let second = source.next_raster().await.unwrap();

        assert_ne!(first.as_slice(), second.as_slice());
    }
}
