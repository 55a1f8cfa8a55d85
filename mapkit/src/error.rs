//! Error types used by the crate.

use thiserror::Error;

/// Mapkit error type.
#[derive(Debug, Error)]
pub enum MapkitError {
    /// Zoom step must be a finite positive number.
    #[error("invalid zoom step: {0}")]
    InvalidStep(f64),
    /// Tick interval of the continuous zoom must be greater than zero.
    #[error("zoom tick interval must be greater than zero")]
    InvalidInterval,
    /// Rotation step must be a finite number.
    #[error("invalid rotation step: {0}")]
    InvalidRotationStep(f64),
    /// Zoom constraints where the minimum is above the maximum or a bound is not finite.
    #[error("invalid zoom range: [{min}, {max}]")]
    InvalidZoomRange {
        /// Requested minimum zoom level.
        min: f64,
        /// Requested maximum zoom level.
        max: f64,
    },
    /// Controls position string is not one of the known corners.
    #[error("unknown controls position: {0}")]
    UnknownPosition(String),
    /// Timer driven zoom was created outside of a tokio runtime.
    #[cfg(feature = "tokio")]
    #[error("no tokio runtime to run zoom timer on")]
    NoRuntime,
    /// Configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse configuration")]
    Config(#[from] serde_json::Error),
}
