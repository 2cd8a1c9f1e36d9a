use std::{
    fmt::{self, Debug},
    sync::OnceLock,
};

/// Raw code the sensor reports when no infrared return was measured.
pub const NO_RETURN: u16 = 2047;
/// Largest code an 11-bit depth sample can hold.
pub const MAX_RAW_DEPTH: u16 = 2047;
pub const LUT_SIZE: usize = MAX_RAW_DEPTH as usize + 1;

// Inverse linear fit of the Kinect v1 disparity response,
// http://graphics.stanford.edu/~mdfisher/Kinect.html
const RESPONSE_SLOPE: f64 = -0.0030711016;
const RESPONSE_OFFSET: f64 = 3.3309495161;

/// Converts a raw 11-bit depth code to meters. `0.0` means no data.
pub fn calibrate(raw: u16) -> f64 {
    if raw < NO_RETURN {
        1.0 / (raw as f64 * RESPONSE_SLOPE + RESPONSE_OFFSET)
    } else {
        0.0
    }
}

static SHARED: OnceLock<CalibrationTable> = OnceLock::new();

/// Metric depth for every possible raw code, so the per-pixel path is a lookup.
#[derive(Clone)]
pub struct CalibrationTable {
    lut: Box<[f64; LUT_SIZE]>,
}

impl CalibrationTable {
    pub fn new() -> Self {
        tracing::debug!(entries = LUT_SIZE, "Building depth calibration table");

        Self {
            lut: Box::new(std::array::from_fn(|raw| calibrate(raw as u16))),
        }
    }

    /// Process wide table, built on first use and read-only afterwards.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::new)
    }

    /// Metric depth of `raw`. Panics if `raw` is above [`MAX_RAW_DEPTH`].
    #[inline]
    pub fn depth(&self, raw: u16) -> f64 {
        self.lut[raw as usize]
    }

    pub fn as_slice(&self) -> &[f64] {
        self.lut.as_slice()
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for CalibrationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalibrationTable")
            .field("entries", &self.lut.len())
            .finish()
    }
}
