use crate::{camera::CameraIntrinsics, data::WorldPoint};

use super::calibration::CalibrationTable;

/// Meters to render units.
pub const DISPLAY_SCALE: f64 = 200.0;

/// Back-projects depth pixels into render space.
///
/// The depth axis is flipped and offset by the scale, so nearer points get a larger `z`.
#[derive(Debug, Clone, Copy)]
pub struct WorldProjector<'a> {
    table: &'a CalibrationTable,
    intrinsics: CameraIntrinsics,
    scale: f64,
}

impl WorldProjector<'static> {
    /// Kinect intrinsics over the shared calibration table.
    pub fn kinect() -> Self {
        Self::new(
            CalibrationTable::shared(),
            CameraIntrinsics::KINECT,
            DISPLAY_SCALE,
        )
    }
}

impl<'a> WorldProjector<'a> {
    pub fn new(table: &'a CalibrationTable, intrinsics: CameraIntrinsics, scale: f64) -> Self {
        Self {
            table,
            intrinsics,
            scale,
        }
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn project(&self, pixel_x: usize, pixel_y: usize, raw: u16) -> WorldPoint {
        let depth = self.table.depth(raw);

        WorldPoint {
            x: (pixel_x as f64 - self.intrinsics.principal_x)
                * depth
                * self.intrinsics.focal_inv_x
                * self.scale,
            y: (pixel_y as f64 - self.intrinsics.principal_y)
                * depth
                * self.intrinsics.focal_inv_y
                * self.scale,
            z: self.scale - depth * self.scale,
        }
    }
}
