/// Depth camera intrinsic calibration parameters.
/// Kinect v1 factory values, see http://graphics.stanford.edu/~mdfisher/Kinect.html
/// They are used by the world projection of every sampled pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Inverse focal length x (1 / pixel)
    pub focal_inv_x: f64,
    /// Inverse focal length y (1 / pixel)
    pub focal_inv_y: f64,
    /// Principal point x (pixel)
    pub principal_x: f64,
    /// Principal point y (pixel)
    pub principal_y: f64,
}

impl CameraIntrinsics {
    pub const KINECT: Self = Self {
        focal_inv_x: 1.0 / 5.9421434211923247e+02,
        focal_inv_y: 1.0 / 5.9104053696870778e+02,
        principal_x: 3.3930780975300314e+02,
        principal_y: 2.4273913761751615e+02,
    };
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::KINECT
    }
}
