use crate::{
    data::DepthRaster,
    processor::projection::WorldProjector,
    render::{self, RenderDispatcher, RenderState, TickStats},
    settings::{Effect, Parameter, ParameterValue, Settings},
    Error,
};

/// One point cloud viewer: its settings, its render state and the projection it uses.
///
/// Parameter changes and actions run between ticks on the same thread as [`Session::tick`].
#[derive(Debug, Clone)]
pub struct Session<'a> {
    settings: Settings,
    state: RenderState,
    projector: WorldProjector<'a>,
}

impl Session<'static> {
    pub fn new(settings: Settings) -> Self {
        Self::with_projector(settings, WorldProjector::kinect())
    }
}

impl<'a> Session<'a> {
    pub fn with_projector(settings: Settings, projector: WorldProjector<'a>) -> Self {
        Self {
            state: RenderState::new(settings.trail_frames_size()),
            settings,
            projector,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Applies a control change. A rejected value leaves settings and trail untouched.
    pub fn set(&mut self, parameter: Parameter, value: ParameterValue) -> Result<(), Error> {
        let effect = self.settings.set(parameter, value).inspect_err(|error| {
            tracing::warn!(?parameter, ?value, %error, "Rejected parameter change");
        })?;

        match effect {
            Effect::None => {}
            Effect::Stride(stride) => tracing::debug!(stride = stride.get(), "Sampling stride changed"),
            Effect::TrailCapacity(capacity) => self.state.trail.set_capacity(capacity),
        }

        Ok(())
    }

    /// Restores the defaults and empties the trail.
    pub fn reset(&mut self) {
        self.settings.reset();
        self.state.trail.clear();
        self.state
            .trail
            .set_capacity(self.settings.trail_frames_size());

        tracing::info!(variant = %self.settings.variant(), "Reset settings");
    }

    pub fn clear_trail(&mut self) {
        self.state.trail.clear();

        tracing::info!("Cleared trail");
    }

    pub fn tick<R: RenderDispatcher + ?Sized>(
        &mut self,
        raster: &DepthRaster,
        dispatcher: &mut R,
    ) -> TickStats {
        render::tick(
            &mut self.state,
            &self.settings,
            &self.projector,
            raster,
            dispatcher,
        )
    }
}
