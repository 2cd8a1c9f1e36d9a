mod camera;
mod controls;
mod data;
mod render;
mod sensor;
mod session;
mod settings;
mod trail;

pub mod processor;

use thiserror::Error;

pub use camera::CameraIntrinsics;
pub use controls::{Command, Key, KeyMap, SensorToggles};
pub use data::{DepthRaster, Frame, WorldPoint, DEPTH_HEIGHT, DEPTH_WIDTH};
pub use processor::{
    calibration::{calibrate, CalibrationTable, MAX_RAW_DEPTH, NO_RETURN},
    projection::{WorldProjector, DISPLAY_SCALE},
    sampler::{FrameSampler, Stride},
};
pub use render::{tick, DrawStyle, RenderDispatcher, RenderState, Rgba, TickStats};
pub use sensor::{DepthSource, SyntheticDepthSource};
pub use session::Session;
pub use settings::{
    Effect, Parameter, ParameterValue, Rgb, Settings, Shape, ShapeKind, Variant,
    ROTATION_SLIDER_SCALE,
};
pub use trail::{Fade, TrailBuffer, TrailEntry, TrailFrame};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid sampling stride {0}")]
    InvalidStride(i64),
    #[error("Invalid trail capacity {0}")]
    InvalidCapacity(i64),
    #[error("Value {value} out of range for {parameter:?}")]
    ParameterOutOfRange { parameter: Parameter, value: f64 },
    #[error("Wrong value kind for {parameter:?}")]
    ParameterType { parameter: Parameter },
    #[error("Depth raster has {actual} samples, expected {expected}")]
    RasterSize { expected: usize, actual: usize },
    #[error("Depth sample {value} at index {index} exceeds the sensor range")]
    SampleOutOfRange { index: usize, value: u16 },
    #[error("Depth source failed: {0}")]
    Sensor(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
