//! Geolocation boundary.
//!
//! The engine only ever sees a resolved coordinate pair or a failure
//! signal. On failure the map subsystem stays unavailable for the rest of
//! the session; there is no retry.

use crate::error::{Result, TrackError};
use crate::GeoPoint;

/// Host-provided position source.
pub trait GeolocationProvider {
    /// Resolve the user's current position.
    ///
    /// Errors map to [`TrackError::GeolocationUnavailable`] however the
    /// host's lookup actually failed.
    fn request_position(&self) -> Result<GeoPoint>;
}

/// Fixed-position provider for tests and hosts with a known location.
#[derive(Debug, Clone, Copy)]
pub struct StaticPosition(pub GeoPoint);

impl GeolocationProvider for StaticPosition {
    fn request_position(&self) -> Result<GeoPoint> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(TrackError::GeolocationUnavailable)
        }
    }
}
