use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{
    data::{DepthRaster, Frame, WorldPoint},
    Error,
};

use super::projection::WorldProjector;

/// Pixel sampling interval, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Stride(NonZeroUsize);

impl Stride {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    pub fn new(value: i64) -> Result<Self, Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(Error::InvalidStride(value))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for Stride {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stride> for i64 {
    fn from(stride: Stride) -> Self {
        stride.get() as i64
    }
}

/// Walks a depth raster every `stride` pixels and projects each sample.
///
/// Columns are the outer loop and rows the inner one, so a frame lists
/// `(0, 0), (0, s), .., (s, 0), (s, s), ..`. Trail frames rely on this order.
#[derive(Debug, Clone, Copy)]
pub struct FrameSampler<'a> {
    projector: WorldProjector<'a>,
    stride: Stride,
}

impl<'a> FrameSampler<'a> {
    pub fn new(projector: WorldProjector<'a>, stride: Stride) -> Self {
        Self { projector, stride }
    }

    pub fn stride(&self) -> Stride {
        self.stride
    }

    pub fn set_stride(&mut self, stride: Stride) {
        self.stride = stride;
    }

    pub fn projector(&self) -> &WorldProjector<'a> {
        &self.projector
    }

    /// Number of points a raster of this size will produce.
    pub fn sample_count(&self, width: usize, height: usize) -> usize {
        let stride = self.stride.get();

        width.div_ceil(stride) * height.div_ceil(stride)
    }

    #[cfg(not(feature = "parallel"))]
    pub fn sample(&self, raster: &DepthRaster) -> Frame {
        let stride = self.stride.get();
        let mut points = Vec::with_capacity(self.sample_count(raster.width(), raster.height()));

        for x in (0..raster.width()).step_by(stride) {
            for y in (0..raster.height()).step_by(stride) {
                points.push(self.project(raster, x, y));
            }
        }

        Frame::from(points)
    }

    #[cfg(feature = "parallel")]
    pub fn sample(&self, raster: &DepthRaster) -> Frame {
        use rayon::prelude::*;

        let stride = self.stride.get();
        let height = raster.height();

        let points: Vec<WorldPoint> = (0..raster.width())
            .step_by(stride)
            .collect::<Vec<_>>()
            .into_par_iter()
            .flat_map_iter(move |x| {
                (0..height)
                    .step_by(stride)
                    .map(move |y| self.project(raster, x, y))
            })
            .collect();

        Frame::from(points)
    }

    #[inline]
    fn project(&self, raster: &DepthRaster, x: usize, y: usize) -> WorldPoint {
        self.projector.project(x, y, raster.get(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_stride() {
        assert!(matches!(Stride::new(0), Err(Error::InvalidStride(0))));
        assert!(matches!(Stride::new(-3), Err(Error::InvalidStride(-3))));
        assert_eq!(Stride::new(4).unwrap().get(), 4);
    }

    #[test]
    fn visits_columns_then_rows() {
        // every sample encodes its own pixel index
        let raster = DepthRaster::new(4, 4, (0..16).collect()).unwrap();
        let projector = WorldProjector::kinect();
        let sampler = FrameSampler::new(projector, Stride::new(2).unwrap());

        let frame = sampler.sample(&raster);

        let expected: Vec<WorldPoint> = [(0, 0), (0, 2), (2, 0), (2, 2)]
            .into_iter()
            .map(|(x, y)| projector.project(x, y, (x + y * 4) as u16))
            .collect();

        assert_eq!(frame.points, expected);
    }

    #[test]
    fn partial_strides_include_first_pixel() {
        let raster = DepthRaster::filled(5, 3, 600).unwrap();
        let sampler = FrameSampler::new(WorldProjector::kinect(), Stride::new(4).unwrap());

        let frame = sampler.sample(&raster);

        // x in {0, 4}, y in {0}
        assert_eq!(frame.len(), 2);
        assert_eq!(sampler.sample_count(5, 3), 2);
    }

    #[test]
    fn full_kinect_frame_at_stride_four() {
        let raster =
            DepthRaster::filled(crate::DEPTH_WIDTH, crate::DEPTH_HEIGHT, crate::NO_RETURN).unwrap();
        let sampler = FrameSampler::new(WorldProjector::kinect(), Stride::new(4).unwrap());

        let frame = sampler.sample(&raster);

        assert_eq!(frame.len(), 160 * 120);
        assert!(frame.points.iter().all(|point| point.z == 200.0));
    }
}
