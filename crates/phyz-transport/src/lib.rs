//! Particle transport model for phyz.
//!
//! This crate holds everything a discrete boundary process needs from its
//! host engine:
//! - Tracks, step points, touchable histories and particle changes
//! - The [`DiscreteProcess`] extension point and its per-call
//!   [`TransportContext`]
//! - Navigator, surface registry and trajectory interfaces
//! - A nested axis-aligned box geometry with its navigator
//! - A straight-line stepping loop that drives one track through the geometry
//!
//! # Example
//!
//! ```
//! use phyz_math::Vec3;
//! use phyz_transport::{BoundingBox, BoxWorld, ParticleDefinition, Track};
//!
//! let mut world = BoxWorld::new("World", "WorldLV", Vec3::new(200.0, 200.0, 200.0));
//! let cell = BoundingBox::centered(Vec3::new(100.0, 100.0, 100.0));
//! world.add_volume("Cell", "CellLV", cell, 0).unwrap();
//!
//! let track = Track::new(
//!     ParticleDefinition::electron(),
//!     Vec3::zeros(),
//!     Vec3::new(1.0, 0.0, 0.0),
//! );
//! let touchable = world.locate(&track.position).unwrap();
//! assert_eq!(touchable.volume().unwrap().name, "Cell");
//! ```

pub mod change;
pub mod error;
pub mod geometry;
pub mod navigator;
pub mod particle;
pub mod process;
pub mod step;
pub mod stepping;
pub mod surface;
pub mod track;
pub mod trajectory;

pub use change::ParticleChange;
pub use error::{Result, TransportError};
pub use geometry::{BoundingBox, BoxNavigator, BoxVolume, BoxWorld, NavigatorStep};
pub use navigator::Navigator;
pub use particle::ParticleDefinition;
pub use process::{DiscreteProcess, ForceCondition, ParallelStep, ProcessType, TransportContext};
pub use step::{PhysicalVolume, Step, StepPoint, StepStatus, Touchable};
pub use stepping::{SteppingLoop, TrackFate, TrackSummary};
pub use surface::{SkinSurfaceTable, SurfaceRegistry, SurfaceTag};
pub use track::Track;
pub use trajectory::{TrajectoryPoint, TrajectoryRecorder, TrajectorySink};
