//! Configuration of the periodic boundary process.

use crate::{PeriodicError, Result};
use phyz_math::{Axis, SURFACE_TOLERANCE};
use phyz_transport::ProcessType;
use serde::{Deserialize, Serialize};

/// Fixed settings of a [`PeriodicBoundaryProcess`](crate::PeriodicBoundaryProcess).
///
/// Missing JSON fields take their default values:
///
/// ```
/// use phyz_periodic::PeriodicConfig;
///
/// let config = PeriodicConfig::from_json(r#"{ "periodic_z": true, "reflecting_walls": true }"#)
///     .unwrap();
/// assert!(config.periodic_x && config.periodic_y && config.periodic_z);
/// assert!(config.reflecting_walls);
/// assert_eq!(config.process_name, "CycBoundary");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicConfig {
    /// Faces perpendicular to X are periodic.
    pub periodic_x: bool,
    /// Faces perpendicular to Y are periodic.
    pub periodic_y: bool,
    /// Faces perpendicular to Z are periodic.
    pub periodic_z: bool,
    /// Reflect specularly instead of wrapping to the opposite face.
    pub reflecting_walls: bool,
    /// Name under which the process is registered.
    pub process_name: String,
    /// Classification used for process ordering.
    pub process_type: ProcessType,
    /// Geometry surface tolerance (mm). Steps no longer than half of it
    /// are treated as stuck on the boundary.
    pub surface_tolerance: f64,
    /// Diagnostic verbosity; 0 is silent.
    pub verbose_level: u8,
}

impl Default for PeriodicConfig {
    fn default() -> Self {
        Self {
            periodic_x: true,
            periodic_y: true,
            periodic_z: false,
            reflecting_walls: false,
            process_name: "CycBoundary".to_string(),
            process_type: ProcessType::NotDefined,
            surface_tolerance: SURFACE_TOLERANCE,
            verbose_level: 0,
        }
    }
}

impl PeriodicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set which axes are periodic.
    pub fn periodic(mut self, x: bool, y: bool, z: bool) -> Self {
        self.periodic_x = x;
        self.periodic_y = y;
        self.periodic_z = z;
        self
    }

    pub fn reflecting_walls(mut self, reflecting: bool) -> Self {
        self.reflecting_walls = reflecting;
        self
    }

    pub fn process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = name.into();
        self
    }

    pub fn process_type(mut self, process_type: ProcessType) -> Self {
        self.process_type = process_type;
        self
    }

    pub fn surface_tolerance(mut self, tolerance: f64) -> Self {
        self.surface_tolerance = tolerance;
        self
    }

    pub fn verbose_level(mut self, level: u8) -> Self {
        self.verbose_level = level;
        self
    }

    /// Whether faces perpendicular to `axis` are periodic.
    pub fn is_periodic(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.periodic_x,
            Axis::Y => self.periodic_y,
            Axis::Z => self.periodic_z,
        }
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.surface_tolerance.is_finite() || self.surface_tolerance <= 0.0 {
            return Err(PeriodicError::InvalidConfig(format!(
                "surface_tolerance must be finite and positive, got {}",
                self.surface_tolerance
            )));
        }
        if self.process_name.is_empty() {
            return Err(PeriodicError::InvalidConfig(
                "process_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
