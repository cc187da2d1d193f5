//! Discrete processes: the extension point through which physics and
//! boundary handling attach to the stepping engine.

use crate::{
    Navigator, ParticleChange, ParticleDefinition, Result, Step, SurfaceRegistry, Track,
    TrajectorySink,
};
use serde::{Deserialize, Serialize};

/// Classification used by the engine to order processes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessType {
    #[default]
    NotDefined,
    Transportation,
    Electromagnetic,
    Optical,
    Hadronic,
    Decay,
    General,
    Parallel,
    UserDefined,
}

/// How a process wants to be invoked after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceCondition {
    /// Invoked only if the process limited the step.
    NotForced,
    /// Invoked after every step.
    Forced,
    /// Invoked after every step, even if the track was killed.
    StronglyForced,
}

impl ForceCondition {
    /// True if the engine must call the process whatever limited the step.
    pub fn is_forced(self) -> bool {
        matches!(self, ForceCondition::Forced | ForceCondition::StronglyForced)
    }
}

/// Step and navigator of a parallel geometry that overrides the nominal
/// step for geometric decisions.
#[derive(Clone, Copy)]
pub struct ParallelStep<'a> {
    pub step: &'a Step,
    pub navigator: &'a dyn Navigator,
}

/// Per-call collaborators of a process. Built by the stepping engine for
/// each invocation; holds the per-track navigator and trajectory.
pub struct TransportContext<'a> {
    /// Navigator used for tracking.
    pub navigator: &'a mut dyn Navigator,
    /// Surface registration.
    pub surfaces: &'a dyn SurfaceRegistry,
    /// Trajectory of the current track, when visualization is enabled.
    pub trajectory: Option<&'a mut dyn TrajectorySink>,
    /// Hyper step of a parallel world, if one limited the step.
    pub parallel: Option<ParallelStep<'a>>,
}

impl<'a> TransportContext<'a> {
    pub fn new(navigator: &'a mut dyn Navigator, surfaces: &'a dyn SurfaceRegistry) -> Self {
        Self {
            navigator,
            surfaces,
            trajectory: None,
            parallel: None,
        }
    }

    pub fn with_trajectory(mut self, trajectory: &'a mut dyn TrajectorySink) -> Self {
        self.trajectory = Some(trajectory);
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelStep<'a>) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// The step to use for geometric decisions: the parallel hyper step if
    /// present, otherwise `step`.
    pub fn geometric_step<'s>(&self, step: &'s Step) -> &'s Step
    where
        'a: 's,
    {
        match self.parallel {
            Some(p) => p.step,
            None => step,
        }
    }

    /// Navigator that limited the step, used for exit normals.
    pub fn limiting_navigator(&self) -> &dyn Navigator {
        match self.parallel {
            Some(p) => p.navigator,
            None => &*self.navigator,
        }
    }
}

/// A process acting only at the end of a step.
pub trait DiscreteProcess {
    /// Human-readable process name.
    fn name(&self) -> &str;

    fn process_type(&self) -> ProcessType;

    /// Whether the process should be attached to `particle` at all.
    fn is_applicable(&self, particle: &ParticleDefinition) -> bool;

    /// Mean free path for the next step and how the process must be invoked.
    fn post_step_mean_free_path(
        &self,
        track: &Track,
        previous_step_size: f64,
    ) -> (f64, ForceCondition);

    /// Act on a completed step, returning the proposed particle change.
    fn post_step_do_it(
        &self,
        track: &Track,
        step: &Step,
        ctx: &mut TransportContext<'_>,
    ) -> Result<ParticleChange>;
}
