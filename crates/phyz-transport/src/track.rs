//! Track state owned by the stepping engine.

use crate::ParticleDefinition;
use phyz_math::Vec3;

/// The evolving state of one simulated particle.
#[derive(Clone, Debug)]
pub struct Track {
    /// Particle species.
    pub particle: ParticleDefinition,
    /// Global position (mm).
    pub position: Vec3,
    /// Unit momentum direction.
    pub momentum_direction: Vec3,
    /// Polarization vector (zero for unpolarized particles).
    pub polarization: Vec3,
    /// Length of the most recent step (mm).
    pub step_length: f64,
    /// Number of completed steps.
    pub current_step_number: usize,
}

impl Track {
    /// Create an unpolarized track. The direction is normalized.
    pub fn new(particle: ParticleDefinition, position: Vec3, direction: Vec3) -> Self {
        Self {
            particle,
            position,
            momentum_direction: phyz_math::try_unit(&direction).unwrap_or_else(Vec3::zeros),
            polarization: Vec3::zeros(),
            step_length: 0.0,
            current_step_number: 0,
        }
    }

    /// Set the polarization vector.
    pub fn with_polarization(mut self, polarization: Vec3) -> Self {
        self.polarization = polarization;
        self
    }

    /// Set the length of the step just taken.
    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_is_normalized() {
        let t = Track::new(
            ParticleDefinition::proton(),
            Vec3::zeros(),
            Vec3::new(3.0, 4.0, 0.0),
        );
        assert_relative_eq!(t.momentum_direction, Vec3::new(0.6, 0.8, 0.0));
        assert_eq!(t.polarization, Vec3::zeros());
    }
}
