//! Workout records.
//!
//! A [`Workout`] is one logged exercise: shared fields plus a tagged
//! [`WorkoutDetails`] union for the kind-specific data. The derived metric
//! (pace for running, speed for cycling) is computed exactly once at
//! construction and stored as a plain field, so serialized workouts come
//! back with their variant and metric intact.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Workout kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase wire name ("running" / "cycling").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in labels.
    pub fn title(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Marker/list icon for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

/// Kind-specific fields, tagged by workout kind.
///
/// The derived metric is stored, not recomputed, so it always reflects the
/// distance/duration the workout was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    #[serde(rename_all = "camelCase")]
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Derived: duration / distance (min/km)
        pace_min_per_km: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        /// Total climb in meters (zero is valid)
        elevation_gain_m: f64,
        /// Derived: distance / (duration / 60) (km/h)
        speed_kmh: f64,
    },
}

/// A single logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Opaque identifier, unique within a store
    pub id: String,
    /// Creation timestamp; only rendered as a month/day label
    pub created_at: DateTime<Utc>,
    /// Where the workout was logged
    pub coords: GeoPoint,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Derived description, e.g. "Running on April 14"
    pub label: String,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    /// Create a running workout with a fresh id and the current timestamp.
    ///
    /// Inputs are not validated here; the controller validates before
    /// construction. Non-finite or non-positive distance/duration propagate
    /// into the stored pace.
    pub fn running(
        coords: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        Self::running_at(fresh_id(), Utc::now(), coords, distance_km, duration_min, cadence_spm)
    }

    /// Create a cycling workout with a fresh id and the current timestamp.
    pub fn cycling(
        coords: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::cycling_at(fresh_id(), Utc::now(), coords, distance_km, duration_min, elevation_gain_m)
    }

    /// Rebuild a running workout with a known identity. Used when an
    /// existing workout is updated in place.
    pub fn running_at(
        id: String,
        created_at: DateTime<Utc>,
        coords: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        let details = WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km: duration_min / distance_km,
        };
        Self::assemble(id, created_at, coords, distance_km, duration_min, details)
    }

    /// Rebuild a cycling workout with a known identity.
    pub fn cycling_at(
        id: String,
        created_at: DateTime<Utc>,
        coords: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let details = WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_kmh: distance_km / (duration_min / 60.0),
        };
        Self::assemble(id, created_at, coords, distance_km, duration_min, details)
    }

    fn assemble(
        id: String,
        created_at: DateTime<Utc>,
        coords: GeoPoint,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };
        let label = format!("{} on {}", kind.title(), created_at.format("%B %-d"));
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            label,
            details,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The derived metric: pace (min/km) for running, speed (km/h) for cycling.
    pub fn metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_kmh, .. } => speed_kmh,
        }
    }
}

/// Generate a fresh workout id.
///
/// Millisecond timestamp plus a process-wide sequence number, so ids stay
/// unique even when several workouts are created within the same tick.
fn fresh_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let millis = Utc::now().timestamp_millis();
    format!("w{}-{}", millis, SEQ.fetch_add(1, Ordering::Relaxed))
}
