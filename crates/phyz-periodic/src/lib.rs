//! Periodic boundary conditions for particle transport.
//!
//! A [`PeriodicBoundaryProcess`] is attached to the stepping engine as a
//! forced discrete process. At the skin of a volume registered with a
//! periodic surface it either:
//! - mirrors momentum and polarization about the face (reflecting walls), or
//! - moves the track to the opposite face of the world box (cycling).
//!
//! # Example
//!
//! ```
//! use phyz_math::Vec3;
//! use phyz_periodic::{PeriodicBoundaryProcess, PeriodicConfig};
//! use phyz_transport::{
//!     BoundingBox, BoxWorld, ParticleDefinition, SkinSurfaceTable, SteppingLoop, SurfaceTag,
//!     Track, TrackFate,
//! };
//!
//! let mut world = BoxWorld::new("World", "WorldLV", Vec3::new(200.0, 200.0, 200.0));
//! let cell = BoundingBox::centered(Vec3::new(100.0, 100.0, 100.0));
//! world.add_volume("Cell", "CellLV", cell, 0).unwrap();
//! let surfaces = SkinSurfaceTable::new().with_surface("CellLV", SurfaceTag::new("periodic"));
//!
//! // Periodic in X and Y; Z faces are ordinary boundaries.
//! let process = PeriodicBoundaryProcess::new(PeriodicConfig::new()).unwrap();
//! let stepper = SteppingLoop::new(&world, &surfaces, &process).max_steps(10);
//!
//! let mut track = Track::new(
//!     ParticleDefinition::electron(),
//!     Vec3::zeros(),
//!     Vec3::new(1.0, 0.0, 0.0),
//! );
//! let summary = stepper.run(&mut track, None).unwrap();
//! assert_eq!(summary.fate, TrackFate::StepLimit);
//! assert_eq!(summary.position_jumps, 10);
//! ```

pub mod config;
pub mod error;
pub mod process;
pub mod status;

pub use config::PeriodicConfig;
pub use error::{PeriodicError, Result};
pub use process::PeriodicBoundaryProcess;
pub use status::{BoundaryReport, BoundaryStatus, Crossing, Disposition};
