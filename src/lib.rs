//! # Traillog
//!
//! Workout logging engine that keeps three representations of the same
//! list consistent: the in-memory workout store, a persisted snapshot, and
//! the marker overlay on an interactive map.
//!
//! This library provides:
//! - A tagged workout model (running/cycling) with derived pace/speed
//!   computed once at construction
//! - An insertion-ordered store with a JSON snapshot round-trip
//! - A controller that synchronizes store, storage, markers, and the
//!   rendered list through every create/delete/update event
//!
//! The map widget, geolocation source, key-value storage, and list surface
//! are collaborators behind traits; hosts and tests supply their own.
//!
//! ## Quick Start
//!
//! ```rust
//! use traillog::{
//!     App, FormInput, GeoPoint, ListEntry, ListSurface, MapPort, MarkerHandle,
//!     MarkerPopup, MemoryStore, StaticPosition,
//! };
//!
//! // Minimal host surfaces; a real host renders markup and draws a map.
//! struct NullSurface;
//! impl ListSurface for NullSurface {
//!     fn show_form(&mut self) {}
//!     fn hide_form(&mut self) {}
//!     fn render_entry(&mut self, _entry: &ListEntry) {}
//!     fn remove_entry(&mut self, _id: &str) {}
//!     fn set_controls_visible(&mut self, _visible: bool) {}
//!     fn notify(&mut self, _message: &str) {}
//! }
//!
//! struct NullMap(u64);
//! impl MapPort for NullMap {
//!     fn set_view(&mut self, _center: GeoPoint, _zoom: u8) {}
//!     fn add_marker(&mut self, _at: GeoPoint, _popup: MarkerPopup) -> MarkerHandle {
//!         self.0 += 1;
//!         MarkerHandle(self.0)
//!     }
//!     fn remove_marker(&mut self, _handle: MarkerHandle) {}
//!     fn bind_popup(&mut self, _handle: MarkerHandle, _popup: MarkerPopup) {}
//! }
//!
//! let mut app = App::new(NullSurface, MemoryStore::new());
//! app.load();
//! app.start(&StaticPosition(GeoPoint::new(51.5074, -0.1278)), |_center, _zoom| NullMap(0))
//!     .unwrap();
//!
//! app.map_click(GeoPoint::new(51.5, -0.12));
//! let id = app
//!     .submit(FormInput::Running {
//!         distance_km: 5.0,
//!         duration_min: 30.0,
//!         cadence_spm: 178.0,
//!     })
//!     .unwrap();
//!
//! assert_eq!(app.store().len(), 1);
//! app.delete(&id).unwrap();
//! assert!(app.store().is_empty());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TrackError};

// Workout records (tagged running/cycling union)
pub mod model;
pub use model::{Workout, WorkoutDetails, WorkoutKind};

// In-memory store with snapshot round-trip
pub mod store;
pub use store::WorkoutStore;

// Key-value snapshot storage boundary
pub mod storage;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, SNAPSHOT_KEY};

// Map widget boundary and marker side-table
pub mod map;
pub use map::{MapPort, MarkerHandle, MarkerPopup, MarkerRegistry};

// Geolocation boundary
pub mod geolocate;
pub use geolocate::{GeolocationProvider, StaticPosition};

// List rendering boundary
pub mod view;
pub use view::{ListEntry, ListSurface, StatLine};

// The synchronization controller
pub mod app;
pub use app::{App, FormInput, DEFAULT_ZOOM};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use traillog::GeoPoint;
/// let point = GeoPoint::new(51.5074, -0.1278); // London
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has finite, in-range coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}
