//! Trajectory recording for visualization.

use crate::{Result, Step};
use phyz_math::Vec3;
use serde::{Deserialize, Serialize};

/// Receives the points of a track as it is transported.
pub trait TrajectorySink {
    /// Append the post-step point of `step`.
    fn append_step(&mut self, step: &Step);
}

/// A recorded trajectory point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Global position (mm).
    pub position: Vec3,
    /// Name of the innermost volume at the point, if inside the world.
    pub volume: Option<String>,
}

/// Records the polyline a track follows.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrajectoryRecorder {
    pub points: Vec<TrajectoryPoint>,
}

impl TrajectoryRecorder {
    /// Create a new empty trajectory recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a point directly, e.g. the vertex of a track.
    pub fn record_point(&mut self, position: Vec3, volume: Option<String>) {
        self.points.push(TrajectoryPoint { position, volume });
    }

    /// Number of points recorded.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if recorder is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Clear all recorded points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Recorded positions in order.
    pub fn positions(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter().map(|p| &p.position)
    }

    /// Export to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get trajectory statistics.
    pub fn stats(&self) -> TrajectoryStats {
        let polyline_length = self
            .points
            .windows(2)
            .map(|w| (w[1].position - w[0].position).norm())
            .sum();
        TrajectoryStats {
            npoints: self.len(),
            polyline_length,
        }
    }
}

impl TrajectorySink for TrajectoryRecorder {
    fn append_step(&mut self, step: &Step) {
        let volume = step.post.physical_volume().map(|v| v.name.clone());
        self.record_point(step.post.position, volume);
    }
}

/// Statistics about a recorded trajectory.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryStats {
    /// Number of points.
    pub npoints: usize,
    /// Length of the drawn polyline (mm), including periodic jumps.
    pub polyline_length: f64,
}
