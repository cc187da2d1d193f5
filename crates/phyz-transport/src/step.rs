//! Steps, step points and touchable volume histories.

use phyz_math::Vec3;
use serde::{Deserialize, Serialize};

/// What limited a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Step terminated exactly on a boundary between two volumes.
    GeomBoundary,
    /// Step left the world volume.
    WorldBoundary,
    /// Step limited by a physics process.
    PostStepProcess,
    /// Step limited by a user-imposed maximum.
    UserLimit,
    /// First point of a track.
    Undefined,
}

/// A placed volume together with the logical volume it instantiates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalVolume {
    pub name: String,
    pub logical_volume: String,
}

impl PhysicalVolume {
    pub fn new(name: impl Into<String>, logical_volume: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logical_volume: logical_volume.into(),
        }
    }
}

/// Chain of volumes containing a point, ordered from the innermost (leaf)
/// volume out to the world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Touchable {
    history: Vec<PhysicalVolume>,
}

impl Touchable {
    /// Build from a leaf-first chain of volumes.
    pub fn new(history: Vec<PhysicalVolume>) -> Self {
        Self { history }
    }

    /// Build from a world-first chain of volumes.
    pub fn from_world_down(mut path: Vec<PhysicalVolume>) -> Self {
        path.reverse();
        Self { history: path }
    }

    /// Innermost volume, or `None` outside the world.
    pub fn volume(&self) -> Option<&PhysicalVolume> {
        self.history.first()
    }

    /// Iterate from the leaf outward to the world.
    pub fn ancestors(&self) -> impl Iterator<Item = &PhysicalVolume> {
        self.history.iter()
    }
}

/// One end of a step.
#[derive(Clone, Debug)]
pub struct StepPoint {
    /// Global position (mm).
    pub position: Vec3,
    /// What limited the step ending at this point.
    pub status: StepStatus,
    /// Volumes containing the point.
    pub touchable: Touchable,
}

impl StepPoint {
    pub fn new(position: Vec3, status: StepStatus, touchable: Touchable) -> Self {
        Self {
            position,
            status,
            touchable,
        }
    }

    /// Innermost volume containing the point.
    pub fn physical_volume(&self) -> Option<&PhysicalVolume> {
        self.touchable.volume()
    }
}

/// One straight segment of a track between two consecutive points.
#[derive(Clone, Debug)]
pub struct Step {
    pub pre: StepPoint,
    pub post: StepPoint,
    /// Geometric length (mm).
    pub length: f64,
}

impl Step {
    pub fn new(pre: StepPoint, post: StepPoint) -> Self {
        let length = (post.position - pre.position).norm();
        Self { pre, post, length }
    }

    /// True if the step terminated exactly on a geometric boundary.
    pub fn is_on_boundary(&self) -> bool {
        self.post.status == StepStatus::GeomBoundary
    }
}
