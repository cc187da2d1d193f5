//! The periodic boundary process.
//!
//! Runs after every step. When a step ends on the skin of a volume tagged
//! with a periodic surface, and the face crossed is perpendicular to an
//! enabled axis, the track is either mirrored back into the volume or moved
//! to the opposite face. The world is assumed centered on the origin, so the
//! opposite face of `x = +L` is `x = -L`.

use crate::{
    BoundaryReport, BoundaryStatus, Crossing, Disposition, PeriodicConfig, PeriodicError, Result,
};
use phyz_math::{Vec3, axis_aligned, mirror, reflect_direction, reflect_polarization};
use phyz_transport::{
    DiscreteProcess, ForceCondition, ParticleChange, ParticleDefinition, PhysicalVolume,
    ProcessType, Step, SurfaceRegistry, SurfaceTag, Touchable, Track, TransportContext,
};
use tracing::{debug, warn};

/// Reflects or wraps tracks at periodic faces of an axis-aligned world box.
///
/// Holds only immutable configuration; per-call diagnostics are returned in
/// the [`BoundaryReport`], so one instance can serve many worker threads.
#[derive(Clone, Debug, Default)]
pub struct PeriodicBoundaryProcess {
    config: PeriodicConfig,
}

impl PeriodicBoundaryProcess {
    /// Create the process, validating `config`.
    pub fn new(config: PeriodicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PeriodicConfig {
        &self.config
    }

    fn verbose(&self) -> bool {
        self.config.verbose_level > 0
    }

    /// Evaluate one completed step.
    ///
    /// Benign cases (not at a boundary, step too small, ordinary boundary)
    /// return a report with an empty change. An invalid exit normal, or a
    /// periodic surface crossed through a face that is not axis-aligned,
    /// is an error that must abort the event.
    pub fn evaluate(
        &self,
        track: &Track,
        step: &Step,
        ctx: &mut TransportContext<'_>,
    ) -> Result<BoundaryReport> {
        let verbose = self.verbose();
        let step = ctx.geometric_step(step);

        if !step.is_on_boundary() {
            return Ok(self.conclude(BoundaryReport {
                status: BoundaryStatus::NotAtBoundary,
                ..Default::default()
            }));
        }

        if verbose {
            debug!(
                pre = step.pre.physical_volume().map(|v| v.name.as_str()),
                post = step.post.physical_volume().map(|v| v.name.as_str()),
                "particle at boundary"
            );
        }

        // A track stuck on the boundary would otherwise be cycled forever.
        if track.step_length <= self.config.surface_tolerance / 2.0 {
            return Ok(self.conclude(BoundaryReport {
                status: BoundaryStatus::StepTooSmall,
                ..Default::default()
            }));
        }

        let position = step.post.position;
        let momentum = track.momentum_direction;
        let mut normal = -ctx
            .limiting_navigator()
            .global_exit_normal(&position)
            .ok_or_else(|| PeriodicError::invalid_normal(&position))?;
        if momentum.dot(&normal) > 0.0 {
            if verbose {
                warn!(
                    normal = ?normal.as_slice(),
                    "exit normal points along the momentum, flipping it"
                );
            }
            normal = -normal;
        }

        let mut report = BoundaryReport::default();
        let mut crossing = Crossing::new(position, momentum, track.polarization, normal);
        if verbose {
            debug!(
                momentum = ?momentum.as_slice(),
                position = ?position.as_slice(),
                "old state"
            );
        }

        let surfaces = ctx.surfaces;
        let Some((depth, volume, tag)) = find_periodic_surface(&step.pre.touchable, surfaces) else {
            report.disposition = Disposition::Untagged;
            report.crossing = Some(crossing);
            return Ok(self.conclude(report));
        };
        crossing.surface = Some(tag.clone());
        crossing.tagged_volume = Some(volume.logical_volume.clone());
        crossing.tag_depth = Some(depth);
        if verbose {
            debug!(surface = %tag.name, volume = %volume.logical_volume, depth, "periodic surface");
        }

        let axis = axis_aligned(&normal).ok_or_else(|| {
            PeriodicError::not_on_plane(&tag.name, &volume.logical_volume, &normal)
        })?;
        if !self.config.is_periodic(axis) {
            report.disposition = Disposition::AxisDisabled(axis);
            report.crossing = Some(crossing);
            return Ok(self.conclude(report));
        }

        if self.config.reflecting_walls {
            let new_momentum = reflect_direction(&momentum, &normal).unwrap_or(momentum);
            let new_polarization =
                reflect_polarization(&track.polarization, &normal).unwrap_or_else(Vec3::zeros);
            report.change.propose_momentum_direction(new_momentum);
            report.change.propose_polarization(new_polarization);
            crossing.new_momentum = new_momentum;
            crossing.new_polarization = new_polarization;
            report.status = BoundaryStatus::Reflection;
            report.disposition = Disposition::Reflected(axis);
        } else {
            let new_position = mirror(axis) * position;
            report.change.propose_position(new_position);
            crossing.new_position = new_position;
            report.status = BoundaryStatus::Cycling;
            report.disposition = Disposition::Cycled(axis);

            // The jump is invisible to the navigator's cached location.
            ctx.navigator.locate_global_point_within_volume(&new_position);
            // Draw the step up to the face before the jump shows.
            if let Some(trajectory) = ctx.trajectory.as_deref_mut() {
                trajectory.append_step(step);
            }
        }

        if verbose {
            debug!(
                axis = %axis,
                normal = ?normal.as_slice(),
                new_momentum = ?crossing.new_momentum.as_slice(),
                new_polarization = ?crossing.new_polarization.as_slice(),
                new_position = ?crossing.new_position.as_slice(),
                "new state"
            );
        }
        report.crossing = Some(crossing);
        Ok(self.conclude(report))
    }

    fn conclude(&self, report: BoundaryReport) -> BoundaryReport {
        if self.verbose() {
            debug!(disposition = ?report.disposition, "{}", report.status);
        }
        report
    }
}

/// Innermost volume of `touchable` whose logical volume carries a periodic
/// surface, with its depth above the leaf.
fn find_periodic_surface<'t, 'r>(
    touchable: &'t Touchable,
    surfaces: &'r dyn SurfaceRegistry,
) -> Option<(usize, &'t PhysicalVolume, &'r SurfaceTag)> {
    touchable.ancestors().enumerate().find_map(|(depth, volume)| {
        surfaces
            .periodic_surface(&volume.logical_volume)
            .map(|tag| (depth, volume, tag))
    })
}

impl DiscreteProcess for PeriodicBoundaryProcess {
    fn name(&self) -> &str {
        &self.config.process_name
    }

    fn process_type(&self) -> ProcessType {
        self.config.process_type
    }

    /// Optical photons are handled by the optical surface model instead.
    fn is_applicable(&self, particle: &ParticleDefinition) -> bool {
        !particle.is_optical_photon()
    }

    /// Never limits the step, but must see every step.
    fn post_step_mean_free_path(
        &self,
        _track: &Track,
        _previous_step_size: f64,
    ) -> (f64, ForceCondition) {
        (f64::MAX, ForceCondition::Forced)
    }

    fn post_step_do_it(
        &self,
        track: &Track,
        step: &Step,
        ctx: &mut TransportContext<'_>,
    ) -> phyz_transport::Result<ParticleChange> {
        Ok(self.evaluate(track, step, ctx)?.change)
    }
}
