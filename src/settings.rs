use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{processor::sampler::Stride, trail::MAX_TRAIL_CAPACITY, Error};

/// Rotation slider values are shown in hundredths of a radian per tick.
pub const ROTATION_SLIDER_SCALE: f64 = 1.0 / 100.0;

pub const DEFAULT_ROTATION_DELTA: f64 = 0.015;
pub const DEFAULT_SHAPE_SIZE: f64 = 1.0;
pub const DEFAULT_POINT_COLOR: Rgb = Rgb::new(0, 255, 255);
pub const DEFAULT_TRAIL_COLOR: Rgb = Rgb::new(204, 0, 132);

const MAX_SKIP: i64 = 100;
const MAX_ROTATION_SLIDER: f64 = 2.0;
const SHAPE_SIZE_RANGE: (f64, f64) = (1.0, 100.0);

/// Preset defaults of the two point cloud sketches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Dense cloud, every 4th pixel, no trail.
    Basic,
    /// Sparse cloud with a 13 frame trail, recording off until enabled.
    #[default]
    Experiments,
}

impl Variant {
    fn default_skip(&self) -> i64 {
        match self {
            Variant::Basic => 4,
            Variant::Experiments => 10,
        }
    }

    fn default_trail_frames(&self) -> usize {
        match self {
            Variant::Basic => 0,
            Variant::Experiments => 13,
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "experiments" => Ok(Self::Experiments),
            other => Err(format!("unknown variant '{other}', expected basic or experiments")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Basic => "basic",
            Variant::Experiments => "experiments",
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Ellipse,
    #[default]
    Point,
    Rect,
}

/// What gets drawn at every point. Width and height are ignored for [`ShapeKind::Point`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub width: f64,
    pub height: f64,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Point,
            width: DEFAULT_SHAPE_SIZE,
            height: DEFAULT_SHAPE_SIZE,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Every value the control surface can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Skip,
    /// In slider units, see [`ROTATION_SLIDER_SCALE`].
    RotationDelta,
    AllowRotation,
    TrailFramesSize,
    AllowTrail,
    Shape,
    ShapeWidth,
    ShapeHeight,
    PointR,
    PointG,
    PointB,
    TrailR,
    TrailG,
    TrailB,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Shape(ShapeKind),
}

/// What the owner of the render state has to do after a parameter changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Stride(Stride),
    TrailCapacity(usize),
}

/// Tunable parameters of a point cloud session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    variant: Variant,
    skip: Stride,
    rotation_delta: f64,
    allow_rotation: bool,
    trail_frames_size: usize,
    allow_trail: bool,
    shape: Shape,
    point_color: Rgb,
    trail_color: Rgb,
}

impl Settings {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            skip: Stride::new(variant.default_skip()).unwrap_or(Stride::MIN),
            rotation_delta: DEFAULT_ROTATION_DELTA,
            allow_rotation: true,
            trail_frames_size: variant.default_trail_frames(),
            allow_trail: false,
            shape: Shape::default(),
            point_color: DEFAULT_POINT_COLOR,
            trail_color: DEFAULT_TRAIL_COLOR,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Self = serde_json::from_str(json)?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let settings = Self::from_json(&std::fs::read_to_string(path.as_ref())?)?;

        tracing::info!(path = %path.as_ref().display(), variant = %settings.variant, "Loaded settings");

        Ok(settings)
    }

    /// Checks ranges that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if self.skip.get() as i64 > MAX_SKIP {
            return Err(Error::InvalidStride(self.skip.get() as i64));
        }

        if self.trail_frames_size > MAX_TRAIL_CAPACITY {
            return Err(Error::InvalidCapacity(self.trail_frames_size as i64));
        }

        check_range(
            Parameter::RotationDelta,
            self.rotation_slider(),
            -MAX_ROTATION_SLIDER,
            MAX_ROTATION_SLIDER,
        )?;
        check_range(
            Parameter::ShapeWidth,
            self.shape.width,
            SHAPE_SIZE_RANGE.0,
            SHAPE_SIZE_RANGE.1,
        )?;
        check_range(
            Parameter::ShapeHeight,
            self.shape.height,
            SHAPE_SIZE_RANGE.0,
            SHAPE_SIZE_RANGE.1,
        )?;

        Ok(())
    }

    /// Applies one control change. On error nothing is modified.
    pub fn set(&mut self, parameter: Parameter, value: ParameterValue) -> Result<Effect, Error> {
        match parameter {
            Parameter::Skip => {
                let skip = int(parameter, value)?;

                if skip > MAX_SKIP {
                    return Err(Error::InvalidStride(skip));
                }

                self.skip = Stride::new(skip)?;

                return Ok(Effect::Stride(self.skip));
            }
            Parameter::RotationDelta => {
                let slider = float(parameter, value)?;

                check_range(parameter, slider, -MAX_ROTATION_SLIDER, MAX_ROTATION_SLIDER)?;

                self.rotation_delta = slider * ROTATION_SLIDER_SCALE;
            }
            Parameter::AllowRotation => self.allow_rotation = boolean(parameter, value)?,
            Parameter::TrailFramesSize => {
                let size = int(parameter, value)?;

                if !(0..=MAX_TRAIL_CAPACITY as i64).contains(&size) {
                    return Err(Error::InvalidCapacity(size));
                }

                self.trail_frames_size = size as usize;

                return Ok(Effect::TrailCapacity(self.trail_frames_size));
            }
            Parameter::AllowTrail => self.allow_trail = boolean(parameter, value)?,
            Parameter::Shape => match value {
                ParameterValue::Shape(kind) => self.shape.kind = kind,
                _ => return Err(Error::ParameterType { parameter }),
            },
            Parameter::ShapeWidth | Parameter::ShapeHeight => {
                let size = float(parameter, value)?;

                check_range(parameter, size, SHAPE_SIZE_RANGE.0, SHAPE_SIZE_RANGE.1)?;

                if parameter == Parameter::ShapeWidth {
                    self.shape.width = size;
                } else {
                    self.shape.height = size;
                }
            }
            Parameter::PointR => self.point_color.r = channel(parameter, value)?,
            Parameter::PointG => self.point_color.g = channel(parameter, value)?,
            Parameter::PointB => self.point_color.b = channel(parameter, value)?,
            Parameter::TrailR => self.trail_color.r = channel(parameter, value)?,
            Parameter::TrailG => self.trail_color.g = channel(parameter, value)?,
            Parameter::TrailB => self.trail_color.b = channel(parameter, value)?,
        }

        Ok(Effect::None)
    }

    /// Restores every default of the current variant.
    pub fn reset(&mut self) {
        *self = Self::for_variant(self.variant);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn stride(&self) -> Stride {
        self.skip
    }

    /// Radians added to the view angle each tick.
    pub fn rotation_delta(&self) -> f64 {
        self.rotation_delta
    }

    pub fn rotation_slider(&self) -> f64 {
        self.rotation_delta / ROTATION_SLIDER_SCALE
    }

    pub fn allow_rotation(&self) -> bool {
        self.allow_rotation
    }

    pub fn trail_frames_size(&self) -> usize {
        self.trail_frames_size
    }

    pub fn allow_trail(&self) -> bool {
        self.allow_trail
    }

    /// Whether this tick's frame goes into the trail.
    pub fn is_recording(&self) -> bool {
        self.allow_trail && self.trail_frames_size > 0
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn point_color(&self) -> Rgb {
        self.point_color
    }

    pub fn trail_color(&self) -> Rgb {
        self.trail_color
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

fn int(parameter: Parameter, value: ParameterValue) -> Result<i64, Error> {
    match value {
        ParameterValue::Int(value) => Ok(value),
        // sliders report floats, truncate like an integer cast
        ParameterValue::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => Err(Error::ParameterType { parameter }),
    }
}

fn float(parameter: Parameter, value: ParameterValue) -> Result<f64, Error> {
    match value {
        ParameterValue::Float(value) => Ok(value),
        ParameterValue::Int(value) => Ok(value as f64),
        _ => Err(Error::ParameterType { parameter }),
    }
}

fn boolean(parameter: Parameter, value: ParameterValue) -> Result<bool, Error> {
    match value {
        ParameterValue::Bool(value) => Ok(value),
        _ => Err(Error::ParameterType { parameter }),
    }
}

fn channel(parameter: Parameter, value: ParameterValue) -> Result<u8, Error> {
    let value = int(parameter, value)?;

    u8::try_from(value).map_err(|_| Error::ParameterOutOfRange {
        parameter,
        value: value as f64,
    })
}

fn check_range(parameter: Parameter, value: f64, min: f64, max: f64) -> Result<(), Error> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::ParameterOutOfRange { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_defaults() {
        let basic = Settings::for_variant(Variant::Basic);
        let experiments = Settings::for_variant(Variant::Experiments);

        assert_eq!(basic.stride().get(), 4);
        assert_eq!(basic.trail_frames_size(), 0);
        assert_eq!(experiments.stride().get(), 10);
        assert_eq!(experiments.trail_frames_size(), 13);
        assert!(!experiments.is_recording());
        assert_eq!(experiments.rotation_delta(), 0.015);
        assert!(experiments.allow_rotation());
    }

    #[test]
    fn rotation_slider_is_scaled() {
        let mut settings = Settings::default();

        settings
            .set(Parameter::RotationDelta, ParameterValue::Float(-1.5))
            .unwrap();

        assert!((settings.rotation_delta() - -0.015).abs() < 1e-12);
        assert!(settings
            .set(Parameter::RotationDelta, ParameterValue::Float(2.5))
            .is_err());
    }

    #[test]
    fn rejected_skip_keeps_previous_value() {
        let mut settings = Settings::default();

        assert!(matches!(
            settings.set(Parameter::Skip, ParameterValue::Int(0)),
            Err(Error::InvalidStride(0))
        ));
        assert!(matches!(
            settings.set(Parameter::Skip, ParameterValue::Int(101)),
            Err(Error::InvalidStride(101))
        ));
        assert_eq!(settings.stride().get(), 10);

        let effect = settings
            .set(Parameter::Skip, ParameterValue::Float(6.7))
            .unwrap();

        assert_eq!(effect, Effect::Stride(Stride::new(6).unwrap()));
    }

    #[test]
    fn capacity_change_is_reported() {
        let mut settings = Settings::default();

        assert_eq!(
            settings
                .set(Parameter::TrailFramesSize, ParameterValue::Int(2))
                .unwrap(),
            Effect::TrailCapacity(2)
        );
        assert!(matches!(
            settings.set(Parameter::TrailFramesSize, ParameterValue::Int(-1)),
            Err(Error::InvalidCapacity(-1))
        ));
        assert_eq!(settings.trail_frames_size(), 2);
    }

    #[test]
    fn colour_channels() {
        let mut settings = Settings::default();

        settings
            .set(Parameter::TrailG, ParameterValue::Int(77))
            .unwrap();

        assert_eq!(settings.trail_color(), Rgb::new(204, 77, 132));
        assert!(matches!(
            settings.set(Parameter::PointR, ParameterValue::Int(256)),
            Err(Error::ParameterOutOfRange {
                parameter: Parameter::PointR,
                ..
            })
        ));
        assert!(matches!(
            settings.set(Parameter::PointR, ParameterValue::Bool(true)),
            Err(Error::ParameterType { .. })
        ));
    }

    #[test]
    fn reset_restores_variant_defaults() {
        let mut settings = Settings::for_variant(Variant::Basic);

        settings
            .set(Parameter::Shape, ParameterValue::Shape(ShapeKind::Rect))
            .unwrap();
        settings
            .set(Parameter::AllowTrail, ParameterValue::Bool(true))
            .unwrap();
        settings.reset();

        assert_eq!(settings, Settings::for_variant(Variant::Basic));
    }

    #[test]
    fn json_round_trip_keeps_defaults_for_missing_fields() {
        let settings = Settings::from_json(r#"{ "skip": 6, "shape": { "kind": "ellipse", "width": 3.0, "height": 2.0 } }"#).unwrap();

        assert_eq!(settings.stride().get(), 6);
        assert_eq!(settings.shape().kind, ShapeKind::Ellipse);
        assert_eq!(settings.trail_frames_size(), 13);
        assert!(Settings::from_json(r#"{ "skip": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "trail_frames_size": 151 }"#).is_err());
    }
}
