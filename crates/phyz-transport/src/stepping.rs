//! Straight-line stepping loop.
//!
//! Moves a track from boundary to boundary through a [`BoxWorld`], with no
//! physics other than one attached [`DiscreteProcess`] invoked after every
//! step it asks to be forced for.

use crate::{
    BoxNavigator, BoxWorld, DiscreteProcess, ForceCondition, Result, Step, StepPoint, StepStatus,
    SurfaceRegistry, Track, TrajectoryRecorder, TrajectorySink, TransportContext, TransportError,
};
use tracing::debug;

/// Why transport of a track stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackFate {
    /// The track left the world volume.
    Escaped,
    /// The step budget ran out.
    StepLimit,
}

/// Summary of one transported track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackSummary {
    pub fate: TrackFate,
    /// Number of steps taken.
    pub steps: usize,
    /// Total geometric path length (mm).
    pub path_length: f64,
    /// Steps after which a process moved the track.
    pub position_jumps: usize,
    /// Steps after which a process changed the momentum direction.
    pub redirections: usize,
}

/// Drives single tracks through a box world.
///
/// Each step ends at the next face, or earlier if the attached process
/// proposes a shorter mean free path. After a process moves or turns the
/// track, the navigator is relocated by pushing the new position slightly
/// along the direction of motion. A track aimed exactly at an edge of a
/// periodic cell is wrapped on the first aligned axis only (X before Y
/// before Z), so the push can land it outside the cell on the other axis.
pub struct SteppingLoop<'w, P> {
    world: &'w BoxWorld,
    surfaces: &'w dyn SurfaceRegistry,
    process: &'w P,
    max_steps: usize,
}

impl<'w, P: DiscreteProcess> SteppingLoop<'w, P> {
    pub fn new(world: &'w BoxWorld, surfaces: &'w dyn SurfaceRegistry, process: &'w P) -> Self {
        Self {
            world,
            surfaces,
            process,
            max_steps: 1000,
        }
    }

    /// Maximum number of steps per track.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Transport `track` until it leaves the world or the step budget runs out.
    pub fn run(
        &self,
        track: &mut Track,
        mut trajectory: Option<&mut TrajectoryRecorder>,
    ) -> Result<TrackSummary> {
        let mut navigator = BoxNavigator::new(self.world);
        let mut touchable = navigator
            .locate(&track.position, &track.momentum_direction)
            .ok_or(TransportError::OutsideWorld {
                x: track.position.x,
                y: track.position.y,
                z: track.position.z,
            })?;
        if let Some(rec) = trajectory.as_deref_mut() {
            rec.record_point(track.position, touchable.volume().map(|v| v.name.clone()));
        }

        let attached = self.process.is_applicable(&track.particle);
        let mut summary = TrackSummary {
            fate: TrackFate::StepLimit,
            steps: 0,
            path_length: 0.0,
            position_jumps: 0,
            redirections: 0,
        };
        let mut pre_status = StepStatus::Undefined;

        while summary.steps < self.max_steps {
            let nav_step = navigator.compute_step(&track.position, &track.momentum_direction)?;
            let (proposed, condition) = if attached {
                self.process.post_step_mean_free_path(track, track.step_length)
            } else {
                (f64::MAX, ForceCondition::NotForced)
            };
            let limited = proposed < nav_step.length;
            let (length, end, status) = if limited {
                let end = track.position + track.momentum_direction * proposed;
                (proposed, end, StepStatus::PostStepProcess)
            } else {
                (nav_step.length, nav_step.exit_point, nav_step.status)
            };

            let pre = StepPoint::new(track.position, pre_status, touchable);
            let post_touchable = navigator
                .locate(&end, &track.momentum_direction)
                .unwrap_or_default();
            let post = StepPoint::new(end, status, post_touchable);
            let mut step = Step::new(pre, post);

            track.position = end;
            track.step_length = length;
            track.current_step_number += 1;
            summary.steps += 1;
            summary.path_length += length;

            if limited || condition.is_forced() {
                let change = {
                    let mut ctx = TransportContext::new(&mut navigator, self.surfaces);
                    if let Some(rec) = trajectory.as_deref_mut() {
                        ctx = ctx.with_trajectory(rec);
                    }
                    self.process.post_step_do_it(track, &step, &mut ctx)?
                };
                change.apply(track);
                if change.momentum_direction().is_some() {
                    summary.redirections += 1;
                    navigator.locate(&track.position, &track.momentum_direction);
                }
                if change.position().is_some() {
                    summary.position_jumps += 1;
                }
                if !change.is_noop() {
                    step.post.position = track.position;
                    step.post.touchable = navigator.touchable().unwrap_or_default();
                }
            }

            if let Some(rec) = trajectory.as_deref_mut() {
                rec.append_step(&step);
            }

            if status == StepStatus::WorldBoundary {
                summary.fate = TrackFate::Escaped;
                break;
            }
            touchable = navigator.touchable().ok_or(TransportError::OutsideWorld {
                x: track.position.x,
                y: track.position.y,
                z: track.position.z,
            })?;
            pre_status = status;
        }

        debug!(
            particle = %track.particle.name,
            steps = summary.steps,
            path_length = summary.path_length,
            jumps = summary.position_jumps,
            fate = ?summary.fate,
            "track transported"
        );
        Ok(summary)
    }

    /// Transport a batch of independent tracks.
    pub fn run_all(&self, tracks: &mut [Track]) -> Result<Vec<TrackSummary>> {
        tracks.iter_mut().map(|t| self.run(t, None)).collect()
    }
}
