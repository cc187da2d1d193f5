//! Particle species definitions.

use serde::{Deserialize, Serialize};

/// Static description of a particle species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleDefinition {
    /// Species name, e.g. `"e-"` or `"opticalphoton"`.
    pub name: String,
    /// PDG Monte Carlo encoding.
    pub pdg_encoding: i32,
}

impl ParticleDefinition {
    /// Create a species from its name and PDG code.
    pub fn new(name: impl Into<String>, pdg_encoding: i32) -> Self {
        Self {
            name: name.into(),
            pdg_encoding,
        }
    }

    pub fn electron() -> Self {
        Self::new("e-", 11)
    }

    pub fn gamma() -> Self {
        Self::new("gamma", 22)
    }

    pub fn proton() -> Self {
        Self::new("proton", 2212)
    }

    /// Non-interacting test particle.
    pub fn geantino() -> Self {
        Self::new("geantino", 0)
    }

    /// Photon tracked by optical (wavelength-scale) transport.
    pub fn optical_photon() -> Self {
        Self::new("opticalphoton", -22)
    }

    pub fn is_optical_photon(&self) -> bool {
        *self == Self::optical_photon()
    }
}
