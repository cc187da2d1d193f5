//! Outcome of one boundary evaluation.

use phyz_math::{Axis, Vec3};
use phyz_transport::{ParticleChange, SurfaceTag};
use std::fmt;

/// Status of the most recent evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryStatus {
    /// No periodic action was taken at a boundary.
    #[default]
    Undefined,
    /// Momentum and polarization were mirrored.
    Reflection,
    /// Position was wrapped to the opposite face.
    Cycling,
    /// The step was too short to be a genuine crossing.
    StepTooSmall,
    /// The step did not end on a geometric boundary.
    NotAtBoundary,
}

impl fmt::Display for BoundaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BoundaryStatus::Undefined => " *** Undefined *** ",
            BoundaryStatus::Reflection => " *** Reflection *** ",
            BoundaryStatus::Cycling => " *** periodic *** ",
            BoundaryStatus::StepTooSmall => " *** StepTooSmall *** ",
            BoundaryStatus::NotAtBoundary => " *** NotAtBoundary *** ",
        };
        f.write_str(label)
    }
}

/// What happened at a boundary crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposition {
    /// The crossing was not examined (not at a boundary, or step too small).
    #[default]
    Skipped,
    /// Ordinary boundary: no volume in the touchable carries a periodic surface.
    Untagged,
    /// Ordinary boundary: the surface is periodic but its axis is not enabled.
    AxisDisabled(Axis),
    Reflected(Axis),
    Cycled(Axis),
}

impl Disposition {
    /// The axis of the face crossed, when it was determined.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Disposition::AxisDisabled(a) | Disposition::Reflected(a) | Disposition::Cycled(a) => {
                Some(a)
            }
            Disposition::Skipped | Disposition::Untagged => None,
        }
    }

    /// True for boundaries left to ordinary transport.
    pub fn is_ordinary_boundary(self) -> bool {
        matches!(self, Disposition::Untagged | Disposition::AxisDisabled(_))
    }
}

/// Vectors captured at a boundary crossing, for inspection and logging.
#[derive(Clone, Debug, PartialEq)]
pub struct Crossing {
    pub old_position: Vec3,
    pub new_position: Vec3,
    pub old_momentum: Vec3,
    pub new_momentum: Vec3,
    pub old_polarization: Vec3,
    pub new_polarization: Vec3,
    /// Exit normal, oriented against the incoming momentum.
    pub global_normal: Vec3,
    /// Periodic surface found in the touchable, if any.
    pub surface: Option<SurfaceTag>,
    /// Logical volume carrying `surface`.
    pub tagged_volume: Option<String>,
    /// Levels above the leaf at which `surface` was found.
    pub tag_depth: Option<usize>,
}

impl Crossing {
    pub(crate) fn new(position: Vec3, momentum: Vec3, polarization: Vec3, normal: Vec3) -> Self {
        Self {
            old_position: position,
            new_position: position,
            old_momentum: momentum,
            new_momentum: momentum,
            old_polarization: polarization,
            new_polarization: polarization,
            global_normal: normal,
            surface: None,
            tagged_volume: None,
            tag_depth: None,
        }
    }
}

/// Result of one evaluation: the proposed change plus diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryReport {
    pub status: BoundaryStatus,
    pub disposition: Disposition,
    pub change: ParticleChange,
    /// Present once the crossing got as far as computing the exit normal.
    pub crossing: Option<Crossing>,
}

impl BoundaryReport {
    /// True if no update of the track is proposed.
    pub fn is_noop(&self) -> bool {
        self.change.is_noop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(BoundaryStatus::Cycling.to_string(), " *** periodic *** ");
        assert_eq!(BoundaryStatus::default(), BoundaryStatus::Undefined);
    }

    #[test]
    fn test_disposition() {
        assert!(Disposition::Untagged.is_ordinary_boundary());
        assert!(Disposition::AxisDisabled(Axis::Z).is_ordinary_boundary());
        assert!(!Disposition::Cycled(Axis::X).is_ordinary_boundary());
        assert_eq!(Disposition::Reflected(Axis::Y).axis(), Some(Axis::Y));
        assert_eq!(Disposition::Skipped.axis(), None);
    }

    #[test]
    fn test_default_report_is_noop() {
        let report = BoundaryReport::default();
        assert!(report.is_noop());
        assert!(report.crossing.is_none());
    }
}
