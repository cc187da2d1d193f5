//! phyz: particle transport with periodic boundaries.
//!
//! This is the umbrella crate that provides [`PeriodicCell`] and re-exports
//! core types from sub-crates.

pub use phyz_math::{self, Axis, Vec3};
pub use phyz_periodic::{
    self, BoundaryReport, BoundaryStatus, Disposition, PeriodicBoundaryProcess, PeriodicConfig,
    PeriodicError,
};
pub use phyz_transport::{
    self, BoundingBox, BoxWorld, DiscreteProcess, ParticleDefinition, SkinSurfaceTable,
    SteppingLoop, SurfaceTag, Track, TrackFate, TrackSummary, TrajectoryRecorder,
    TransportError,
};

use tracing::debug;

/// Logical volume name of the cell built by [`PeriodicCell::new`].
pub const CELL_LOGICAL_VOLUME: &str = "CellLV";

/// A world box holding one periodic cell, with the boundary process attached.
///
/// The cell is centered on the origin and registered with a periodic skin
/// surface. The world around it is twice as large, so tracks that cross a
/// non-periodic face of the cell travel on and escape.
pub struct PeriodicCell {
    world: BoxWorld,
    surfaces: SkinSurfaceTable,
    process: PeriodicBoundaryProcess,
    max_steps: usize,
}

impl PeriodicCell {
    /// Build a cell with half extents `half` (mm).
    pub fn new(half: Vec3, config: PeriodicConfig) -> Result<Self, TransportError> {
        let mut world = BoxWorld::new("World", "WorldLV", half * 2.0);
        world.add_volume("Cell", CELL_LOGICAL_VOLUME, BoundingBox::centered(half), 0)?;
        let surfaces = SkinSurfaceTable::new()
            .with_surface(CELL_LOGICAL_VOLUME, SurfaceTag::new("PeriodicSurface"));
        let process = PeriodicBoundaryProcess::new(config)?;
        debug!(
            half = ?half.as_slice(),
            process = %process.config().process_name,
            "periodic cell built"
        );
        Ok(Self {
            world,
            surfaces,
            process,
            max_steps: 1000,
        })
    }

    /// Maximum number of steps per track.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Place a daughter box inside the volume `mother` (0 is the world,
    /// 1 the cell). Returns the new volume index.
    pub fn add_volume(
        &mut self,
        name: &str,
        logical_volume: &str,
        bounds: BoundingBox,
        mother: usize,
    ) -> Result<usize, TransportError> {
        self.world.add_volume(name, logical_volume, bounds, mother)
    }

    /// Register a periodic surface on another logical volume.
    pub fn tag(&mut self, logical_volume: &str, surface: &str) {
        self.surfaces.register(logical_volume, SurfaceTag::new(surface));
    }

    pub fn world(&self) -> &BoxWorld {
        &self.world
    }

    pub fn process(&self) -> &PeriodicBoundaryProcess {
        &self.process
    }

    fn stepper(&self) -> SteppingLoop<'_, PeriodicBoundaryProcess> {
        SteppingLoop::new(&self.world, &self.surfaces, &self.process).max_steps(self.max_steps)
    }

    /// Transport one track, optionally recording its trajectory.
    pub fn run(
        &self,
        track: &mut Track,
        trajectory: Option<&mut TrajectoryRecorder>,
    ) -> Result<TrackSummary, TransportError> {
        self.stepper().run(track, trajectory)
    }

    /// Transport a batch of independent tracks.
    pub fn run_all(&self, tracks: &mut [Track]) -> Result<Vec<TrackSummary>, TransportError> {
        self.stepper().run_all(tracks)
    }
}
