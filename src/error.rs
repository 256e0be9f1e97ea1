//! Unified error handling for the traillog engine.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation and
//! geolocation failures are recoverable (the controller reports them and
//! stays in its current state); persistence failures propagate to the host.

use thiserror::Error;

/// Unified error type for engine operations.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Numeric form input failed validation (non-finite or out of range).
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// The host could not resolve the user's position.
    #[error("could not get your position")]
    GeolocationUnavailable,

    /// A workout was submitted with no pending map-click coordinates.
    #[error("no location selected")]
    NoPendingLocation,

    /// Key-value storage read/write failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Snapshot encode/decode failure.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, TrackError>;
