use std::{path::PathBuf, time::Duration};

use clap::Parser;
use kinect_cloud::{
    DepthSource, DrawStyle, Error, Parameter, ParameterValue, RenderDispatcher, Session, Settings,
    SyntheticDepthSource, Variant, WorldPoint,
};

#[derive(Parser)]
#[command(name = "kinect-cloud")]
#[command(about = "Render a depth camera point cloud with motion trails")]
#[command(version)]
struct Cli {
    /// Preset to start from (basic or experiments)
    #[arg(long, default_value = "experiments")]
    variant: Variant,

    /// JSON settings file, replaces the preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sample every n-th pixel
    #[arg(short, long)]
    skip: Option<i64>,

    /// Trail length in frames
    #[arg(short, long)]
    trail: Option<i64>,

    /// Record frames into the trail
    #[arg(long)]
    allow_trail: bool,

    /// Stop after this many ticks, runs until Ctrl-C when omitted
    #[arg(long)]
    ticks: Option<u64>,

    /// Ticks per second
    #[arg(long, default_value = "30")]
    fps: u32,
}

/// Dispatcher that reports draw calls through tracing.
#[derive(Default)]
struct TracingDispatcher {
    points: usize,
}

impl RenderDispatcher for TracingDispatcher {
    fn draw_frame(&mut self, angle: f64, points: &[WorldPoint], style: &DrawStyle) {
        self.points += points.len();

        tracing::debug!(angle, points = points.len(), shape = ?style.shape.kind, "Live frame");
    }

    fn draw_trail_frame(&mut self, delta_angle: f64, points: &[WorldPoint], style: &DrawStyle) {
        self.points += points.len();

        tracing::trace!(
            delta_angle,
            points = points.len(),
            alpha = style.color.a,
            "Trail frame"
        );
    }
}

fn build_session(cli: &Cli) -> Result<Session<'static>, Error> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::for_variant(cli.variant),
    };

    let mut session = Session::new(settings);

    if let Some(skip) = cli.skip {
        session.set(Parameter::Skip, ParameterValue::Int(skip))?;
    }

    if let Some(trail) = cli.trail {
        session.set(Parameter::TrailFramesSize, ParameterValue::Int(trail))?;
    }

    if cli.allow_trail {
        session.set(Parameter::AllowTrail, ParameterValue::Bool(true))?;
    }

    Ok(session)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let mut session = build_session(&cli)?;
    let mut source = SyntheticDepthSource::default();
    let mut dispatcher = TracingDispatcher::default();

    let mut interval = tokio::time::interval(Duration::from_secs(1) / cli.fps.max(1));
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = interval.tick() => {}
        }

        match source.next_raster().await {
            Ok(raster) => {
                session.tick(&raster, &mut dispatcher);
            }
            Err(error) => tracing::warn!(%error, "Skipping tick without depth frame"),
        }

        ticks += 1;

        if cli.ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
    }

    tracing::info!(
        ticks,
        points = dispatcher.points,
        trail_frames = session.state().trail.len(),
        angle = session.state().angle,
        "Stopped"
    );

    Ok(())
}
