//! Integration tests: tracks transported through a periodic cell.

use approx::assert_relative_eq;
use phyz::{
    BoundingBox, DiscreteProcess, ParticleDefinition, PeriodicCell, PeriodicConfig, Track,
    TrackFate, TrajectoryRecorder, Vec3,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn cell(config: PeriodicConfig) -> PeriodicCell {
    PeriodicCell::new(Vec3::new(100.0, 100.0, 100.0), config).unwrap()
}

fn electron(direction: Vec3) -> Track {
    Track::new(ParticleDefinition::electron(), Vec3::zeros(), direction)
}

#[test]
fn wrap_along_x_reenters_at_opposite_face() {
    init_tracing();
    let cell = cell(PeriodicConfig::new().verbose_level(1)).max_steps(3);
    let mut track = electron(Vec3::new(1.0, 0.0, 0.0));
    let mut rec = TrajectoryRecorder::new();

    let summary = cell.run(&mut track, Some(&mut rec)).unwrap();
    assert_eq!(summary.fate, TrackFate::StepLimit);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.position_jumps, 3);
    assert_eq!(summary.redirections, 0);
    assert_relative_eq!(summary.path_length, 500.0, epsilon = 1e-9);

    assert_relative_eq!(track.position, Vec3::new(-100.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(track.momentum_direction, Vec3::new(1.0, 0.0, 0.0));

    // Start, then for each step the boundary point and the re-entry point.
    assert_eq!(rec.len(), 7);
    assert_relative_eq!(rec.points[1].position, Vec3::new(100.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(rec.points[2].position, Vec3::new(-100.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(rec.points[3].position, Vec3::new(100.0, 0.0, 0.0), epsilon = 1e-12);

    // Boundary points lie on the way out, re-entry points back in the cell.
    assert_eq!(rec.points[0].volume.as_deref(), Some("Cell"));
    assert_eq!(rec.points[1].volume.as_deref(), Some("World"));
    assert_eq!(rec.points[2].volume.as_deref(), Some("Cell"));
    assert_eq!(rec.points[6].volume.as_deref(), Some("Cell"));

    let json: serde_json::Value = serde_json::from_str(&rec.to_json().unwrap()).unwrap();
    assert_eq!(json["points"][2]["volume"], "Cell");
}

#[test]
fn oblique_track_stays_in_cell() {
    let cell = cell(PeriodicConfig::new()).max_steps(12);
    let mut track = electron(Vec3::new(1.0, 0.5, 0.0));
    let direction = track.momentum_direction;
    let mut rec = TrajectoryRecorder::new();

    let summary = cell.run(&mut track, Some(&mut rec)).unwrap();
    assert_eq!(summary.fate, TrackFate::StepLimit);
    assert_eq!(summary.position_jumps, 12);
    assert_relative_eq!(track.momentum_direction, direction);
    for p in rec.positions() {
        assert!(p.x.abs() <= 100.0 + 1e-9 && p.y.abs() <= 100.0 + 1e-9, "{p:?}");
        assert_relative_eq!(p.z, 0.0);
    }
    // First crossing at x = +100, y = 50, re-entering at x = -100.
    assert_relative_eq!(rec.points[1].position, Vec3::new(100.0, 50.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(rec.points[2].position, Vec3::new(-100.0, 50.0, 0.0), epsilon = 1e-9);
    // Then through the +Y face at x = 0.
    assert_relative_eq!(rec.points[3].position, Vec3::new(0.0, 100.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(rec.points[4].position, Vec3::new(0.0, -100.0, 0.0), epsilon = 1e-9);
}

#[test]
fn edge_hit_wraps_first_axis_only() {
    // The exit point is on the X and Y faces at once; only X is wrapped,
    // which leaves the track just above the cell on Y.
    let cell = cell(PeriodicConfig::new()).max_steps(10);
    let mut track = electron(Vec3::new(1.0, 1.0, 0.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::Escaped);
    assert_eq!(summary.position_jumps, 1);
}

#[test]
fn reflecting_walls_bounce_track() {
    let cell = cell(PeriodicConfig::new().reflecting_walls(true)).max_steps(5);
    let mut track = electron(Vec3::new(1.0, 0.0, 0.0)).with_polarization(Vec3::new(0.0, 1.0, 0.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::StepLimit);
    assert_eq!(summary.redirections, 5);
    assert_eq!(summary.position_jumps, 0);
    assert_relative_eq!(summary.path_length, 900.0, epsilon = 1e-9);

    assert_relative_eq!(track.position, Vec3::new(100.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(track.momentum_direction, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(track.polarization, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
}

#[test]
fn disabled_axis_is_ordinary_boundary() {
    // Default configuration leaves Z open.
    let cell = cell(PeriodicConfig::new());
    let mut track = electron(Vec3::new(0.0, 0.0, 1.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::Escaped);
    assert_eq!(summary.steps, 2);
    assert_eq!(summary.position_jumps, 0);
    assert_relative_eq!(summary.path_length, 200.0, epsilon = 1e-9);
    assert_relative_eq!(track.position, Vec3::new(0.0, 0.0, 200.0), epsilon = 1e-12);
}

#[test]
fn json_config_enables_z() {
    let config = PeriodicConfig::from_json(r#"{ "periodic_z": true }"#).unwrap();
    let cell = cell(config).max_steps(4);
    let mut track = electron(Vec3::new(0.0, 0.0, -1.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::StepLimit);
    assert_eq!(summary.position_jumps, 4);
    assert_relative_eq!(track.position, Vec3::new(0.0, 0.0, 100.0), epsilon = 1e-12);
}

#[test]
fn tag_on_mother_applies_to_daughter() {
    let mut cell = cell(PeriodicConfig::new()).max_steps(4);
    // Slab spans the cell along X, so its X faces coincide with the cell's.
    let slab = BoundingBox::new(Vec3::new(-100.0, -10.0, -10.0), Vec3::new(100.0, 10.0, 10.0));
    cell.add_volume("Slab", "SlabLV", slab, 1).unwrap();
    let mut track = electron(Vec3::new(1.0, 0.0, 0.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::StepLimit);
    assert_eq!(summary.position_jumps, 4);
    assert_relative_eq!(track.position, Vec3::new(-100.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn innermost_tag_wins() {
    let mut cell = cell(PeriodicConfig::new()).max_steps(3);
    let core = BoundingBox::centered(Vec3::new(10.0, 10.0, 10.0));
    cell.add_volume("Core", "CoreLV", core, 1).unwrap();
    cell.tag("CoreLV", "CoreSurface");
    let mut track = electron(Vec3::new(1.0, 0.0, 0.0));

    // The track cycles inside the core and never reaches the cell faces.
    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.position_jumps, 3);
    assert_relative_eq!(summary.path_length, 50.0, epsilon = 1e-9);
    assert_relative_eq!(track.position, Vec3::new(-10.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn untagged_volumes_are_ordinary() {
    let mut cell = cell(PeriodicConfig::new());
    // Placed in the world, above the cell.
    let shield = BoundingBox::new(Vec3::new(-50.0, -50.0, 150.0), Vec3::new(50.0, 50.0, 160.0));
    cell.add_volume("Shield", "ShieldLV", shield, 0).unwrap();
    let mut track = electron(Vec3::new(0.0, 0.0, 1.0));

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::Escaped);
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.position_jumps, 0);
    assert_relative_eq!(summary.path_length, 200.0, epsilon = 1e-9);
}

#[test]
fn optical_photons_are_not_cycled() {
    let cell = cell(PeriodicConfig::new());
    let mut track = Track::new(
        ParticleDefinition::optical_photon(),
        Vec3::zeros(),
        Vec3::new(1.0, 0.0, 0.0),
    );

    let summary = cell.run(&mut track, None).unwrap();
    assert_eq!(summary.fate, TrackFate::Escaped);
    assert_eq!(summary.position_jumps, 0);
}

#[test]
fn batch_of_tracks() {
    let cell = cell(PeriodicConfig::new()).max_steps(6);
    let mut tracks: Vec<Track> = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ]
    .into_iter()
    .map(electron)
    .collect();

    let summaries = cell.run_all(&mut tracks).unwrap();
    for summary in &summaries[..4] {
        assert_eq!(summary.fate, TrackFate::StepLimit);
        assert_eq!(summary.position_jumps, 6);
    }
    assert_eq!(summaries[4].fate, TrackFate::Escaped);
}

#[test]
fn cell_shared_between_threads() {
    let cell = cell(PeriodicConfig::new()).max_steps(8);
    let jumps: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = [0.3, 0.5, 0.25, 2.0]
            .into_iter()
            .map(|slope| {
                let cell = &cell;
                s.spawn(move || {
                    let mut track = electron(Vec3::new(1.0, slope, 0.0));
                    cell.run(&mut track, None).unwrap().position_jumps
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(jumps, vec![8; 4]);
}

#[test]
fn trajectory_exports_to_json() {
    let cell = cell(PeriodicConfig::new()).max_steps(2);
    let mut track = electron(Vec3::new(0.0, 1.0, 0.0));
    let mut rec = TrajectoryRecorder::new();
    cell.run(&mut track, Some(&mut rec)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&rec.to_json().unwrap()).unwrap();
    assert_eq!(json["points"].as_array().unwrap().len(), 5);
    let stats = rec.stats();
    assert_eq!(stats.npoints, 5);
}

#[test]
fn cell_geometry_and_process() {
    let cell = cell(PeriodicConfig::new().process_name("Cyclic"));
    let world = cell.world();
    assert_eq!(world.world().placement.logical_volume, "WorldLV");
    assert_relative_eq!(world.world().bounds.max, Vec3::new(200.0, 200.0, 200.0));
    let touchable = world.locate(&Vec3::zeros()).unwrap();
    assert_eq!(
        touchable.volume().unwrap().logical_volume,
        phyz::CELL_LOGICAL_VOLUME
    );

    assert_eq!(cell.process().name(), "Cyclic");
    assert!(!cell.process().config().is_periodic(phyz::Axis::Z));
}

#[test]
fn invalid_setup_is_rejected() {
    assert!(
        PeriodicCell::new(
            Vec3::new(100.0, 100.0, 100.0),
            PeriodicConfig::new().surface_tolerance(0.0)
        )
        .is_err()
    );
    let mut cell = cell(PeriodicConfig::new());
    let too_big = BoundingBox::centered(Vec3::new(150.0, 10.0, 10.0));
    assert!(cell.add_volume("Rod", "RodLV", too_big, 1).is_err());

    let mut outside = Track::new(
        ParticleDefinition::electron(),
        Vec3::new(500.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    );
    assert!(cell.run(&mut outside, None).is_err());
}
