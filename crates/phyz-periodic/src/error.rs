//! Error types for phyz-periodic.

use phyz_math::Vec3;
use phyz_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeriodicError {
    /// The navigator could not provide an exit normal at a boundary.
    #[error(
        "invalid surface normal at ({x}, {y}, {z}): geometry must return a valid surface normal"
    )]
    InvalidNormal { x: f64, y: f64, z: f64 },

    /// A periodic surface was crossed through a face that is not
    /// perpendicular to a Cartesian axis.
    #[error(
        "particle is not on a plane of the periodic world: normal ({nx}, {ny}, {nz}) of surface '{surface}' on volume '{volume}' is not axis-aligned"
    )]
    NotOnPeriodicPlane {
        surface: String,
        volume: String,
        nx: f64,
        ny: f64,
        nz: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PeriodicError {
    pub(crate) fn invalid_normal(point: &Vec3) -> Self {
        PeriodicError::InvalidNormal {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }

    pub(crate) fn not_on_plane(surface: &str, volume: &str, normal: &Vec3) -> Self {
        PeriodicError::NotOnPeriodicPlane {
            surface: surface.to_string(),
            volume: volume.to_string(),
            nx: normal.x,
            ny: normal.y,
            nz: normal.z,
        }
    }

    /// Exception code reported when the event is aborted.
    pub fn code(&self) -> &'static str {
        match self {
            PeriodicError::InvalidNormal { .. } => "PerBoun01",
            PeriodicError::NotOnPeriodicPlane { .. } => "Periodic01",
            PeriodicError::InvalidConfig(_) | PeriodicError::JsonError(_) => "PerBounCfg",
        }
    }

    /// True if the current event cannot continue.
    pub fn is_event_fatal(&self) -> bool {
        matches!(
            self,
            PeriodicError::InvalidNormal { .. } | PeriodicError::NotOnPeriodicPlane { .. }
        )
    }
}

impl From<PeriodicError> for TransportError {
    fn from(err: PeriodicError) -> Self {
        if err.is_event_fatal() {
            TransportError::EventAborted {
                code: err.code(),
                message: err.to_string(),
            }
        } else {
            TransportError::InvalidConfig(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodicError>;
