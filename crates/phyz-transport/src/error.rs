//! Error types for phyz-transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// A process found a condition that makes the current event unrecoverable.
    #[error("event aborted [{code}]: {message}")]
    EventAborted { code: &'static str, message: String },

    #[error("point ({x}, {y}, {z}) is outside the world volume")]
    OutsideWorld { x: f64, y: f64, z: f64 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid process configuration: {0}")]
    InvalidConfig(String),

    #[error("no boundary ahead of the track along its direction")]
    NoBoundary,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TransportError {
    /// True if the error aborts the current event rather than the run.
    pub fn is_event_abort(&self) -> bool {
        matches!(self, TransportError::EventAborted { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
