use crate::{
    data::{DepthRaster, WorldPoint},
    processor::{projection::WorldProjector, sampler::FrameSampler},
    settings::{Rgb, Settings, Shape},
    trail::{Fade, TrailBuffer, TrailFrame},
};

/// Colour with straight alpha, channels in `0..=255`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn opaque(color: Rgb) -> Self {
        Self {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: 255.0,
        }
    }

    pub fn faded(color: Rgb, fade: Fade) -> Self {
        Self {
            r: color.r as f64 * fade.color,
            g: color.g as f64 * fade.color,
            b: color.b as f64 * fade.color,
            a: fade.alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub shape: Shape,
    pub color: Rgba,
}

/// Receives draw calls. Points are already in render space, implementations
/// only apply the rotation they are handed.
pub trait RenderDispatcher {
    /// Live frame under the view rotation `angle` (around Y).
    fn draw_frame(&mut self, angle: f64, points: &[WorldPoint], style: &DrawStyle);

    /// Archived frame, rotated by `delta_angle` on top of the live rotation.
    fn draw_trail_frame(&mut self, delta_angle: f64, points: &[WorldPoint], style: &DrawStyle);
}

/// Mutable state carried from one tick to the next.
#[derive(Debug, Default, Clone)]
pub struct RenderState {
    /// View rotation around Y, radians.
    pub angle: f64,
    pub trail: TrailBuffer,
}

impl RenderState {
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            angle: 0.0,
            trail: TrailBuffer::new(trail_capacity),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub points: usize,
    pub trail_frames: usize,
    pub archived: bool,
}

/// Samples `raster`, draws it and the trail, then archives it and advances the rotation.
pub fn tick<R: RenderDispatcher + ?Sized>(
    state: &mut RenderState,
    settings: &Settings,
    projector: &WorldProjector<'_>,
    raster: &DepthRaster,
    dispatcher: &mut R,
) -> TickStats {
    let recording = settings.is_recording();
    let frame = FrameSampler::new(*projector, settings.stride()).sample(raster);

    dispatcher.draw_frame(
        state.angle,
        &frame.points,
        &DrawStyle {
            shape: settings.shape(),
            color: Rgba::opaque(settings.point_color()),
        },
    );

    let mut stats = TickStats {
        points: frame.len(),
        ..Default::default()
    };

    if recording {
        for entry in state.trail.iter(state.angle) {
            dispatcher.draw_trail_frame(
                entry.delta_angle,
                entry.frame.points(),
                &DrawStyle {
                    shape: settings.shape(),
                    color: Rgba::faded(settings.trail_color(), entry.fade),
                },
            );

            stats.trail_frames += 1;
        }

        state.trail.push(TrailFrame::new(frame, state.angle));
        stats.archived = true;
    }

    if settings.allow_rotation() {
        state.angle += settings.rotation_delta();
    }

    tracing::trace!(
        points = stats.points,
        trail_frames = stats.trail_frames,
        angle = state.angle,
        "Rendered tick"
    );

    stats
}
