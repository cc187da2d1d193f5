//! Proposed updates of a track, returned by processes.

use crate::Track;
use phyz_math::Vec3;

/// Changes a process proposes for the track. The stepping engine applies
/// them; processes never mutate the track themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleChange {
    momentum_direction: Option<Vec3>,
    polarization: Option<Vec3>,
    position: Option<Vec3>,
}

impl ParticleChange {
    /// Empty change, proposing nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn propose_momentum_direction(&mut self, direction: Vec3) {
        self.momentum_direction = Some(direction);
    }

    pub fn propose_polarization(&mut self, polarization: Vec3) {
        self.polarization = Some(polarization);
    }

    pub fn propose_position(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    pub fn momentum_direction(&self) -> Option<&Vec3> {
        self.momentum_direction.as_ref()
    }

    pub fn polarization(&self) -> Option<&Vec3> {
        self.polarization.as_ref()
    }

    pub fn position(&self) -> Option<&Vec3> {
        self.position.as_ref()
    }

    /// True if no update is proposed.
    pub fn is_noop(&self) -> bool {
        self.momentum_direction.is_none() && self.polarization.is_none() && self.position.is_none()
    }

    /// Write the proposed values into `track`.
    pub fn apply(&self, track: &mut Track) {
        if let Some(d) = self.momentum_direction {
            track.momentum_direction = d;
        }
        if let Some(e) = self.polarization {
            track.polarization = e;
        }
        if let Some(x) = self.position {
            track.position = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParticleDefinition;

    #[test]
    fn test_apply_only_proposed() {
        let mut track = Track::new(
            ParticleDefinition::electron(),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let mut change = ParticleChange::new();
        assert!(change.is_noop());
        change.propose_position(Vec3::new(-1.0, 2.0, 3.0));
        assert!(!change.is_noop());
        change.apply(&mut track);
        assert_eq!(track.position, Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(track.momentum_direction, Vec3::new(1.0, 0.0, 0.0));
    }
}
