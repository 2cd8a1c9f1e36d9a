//! Integration tests for the depth to point pipeline

use kinect_cloud::{
    calibrate, CalibrationTable, CameraIntrinsics, DepthRaster, DepthSource, FrameSampler,
    Session, Settings, Stride, SyntheticDepthSource, TickStats, Variant, WorldPoint,
    WorldProjector, NO_RETURN,
};

#[test]
fn test_sampler_known_raster() {
    let raster = DepthRaster::new(
        4,
        4,
        vec![
            600, 1, 700, 3, //
            4, 5, 6, 7, //
            800, 9, 2047, 11, //
            12, 13, 14, 15,
        ],
    )
    .unwrap();

    let table = CalibrationTable::new();
    let intrinsics = CameraIntrinsics::KINECT;
    let sampler = FrameSampler::new(
        WorldProjector::new(&table, intrinsics, 200.0),
        Stride::new(2).unwrap(),
    );

    let frame = sampler.sample(&raster);

    let expected: Vec<WorldPoint> = [
        (0.0, 0.0, 600),
        (0.0, 2.0, 800),
        (2.0, 0.0, 700),
        (2.0, 2.0, NO_RETURN),
    ]
    .into_iter()
    .map(|(x, y, raw): (f64, f64, u16)| {
        let depth = calibrate(raw);

        WorldPoint {
            x: (x - intrinsics.principal_x) * depth * intrinsics.focal_inv_x * 200.0,
            y: (y - intrinsics.principal_y) * depth * intrinsics.focal_inv_y * 200.0,
            z: 200.0 - depth * 200.0,
        }
    })
    .collect();

    assert_eq!(frame.points, expected);
    assert_eq!(frame.points[3].z, 200.0);
}

#[test]
fn test_nearer_points_get_larger_z() {
    let projector = WorldProjector::kinect();

    let near = projector.project(320, 240, 500);
    let far = projector.project(320, 240, 900);

    assert!(calibrate(500) < calibrate(900));
    assert!(near.z > far.z);
}

#[tokio::test]
async fn test_synthetic_source_through_session() {
    let mut source = SyntheticDepthSource::default();
    let mut session = Session::new(Settings::for_variant(Variant::Basic));
    let mut dispatcher = Vec::<usize>::new();

    struct Sizes<'a>(&'a mut Vec<usize>);

    impl kinect_cloud::RenderDispatcher for Sizes<'_> {
        fn draw_frame(&mut self, _: f64, points: &[WorldPoint], _: &kinect_cloud::DrawStyle) {
            self.0.push(points.len());
        }

        fn draw_trail_frame(&mut self, _: f64, _: &[WorldPoint], _: &kinect_cloud::DrawStyle) {
            unreachable!("basic preset has no trail");
        }
    }

    let raster = source.next_raster().await.unwrap();
    let stats = session.tick(&raster, &mut Sizes(&mut dispatcher));

    assert_eq!(
        stats,
        TickStats {
            points: 160 * 120,
            trail_frames: 0,
            archived: false,
        }
    );
    assert_eq!(dispatcher, vec![160 * 120]);
}
