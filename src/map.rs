//! Map widget boundary and the marker side-table.
//!
//! The engine never talks to a rendering library. It drives an abstract
//! [`MapPort`] and remembers which overlay handle belongs to which workout
//! in a [`MarkerRegistry`]. The registry's key set must equal the store's
//! id set after every completed create/delete sequence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Workout;
use crate::GeoPoint;

/// Opaque overlay handle issued by the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPopup {
    /// Icon plus label, e.g. "🏃 Running on April 14"
    pub content: String,
    /// Kind-derived styling hook, e.g. "running-popup"
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl MarkerPopup {
    /// Build the popup for a workout.
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            content: format!("{} {}", kind.icon(), workout.label),
            class_name: format!("{}-popup", kind.as_str()),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Capability set the engine needs from a map widget.
///
/// The widget is created by the host once geolocation resolves; until then
/// the controller holds no map and every map-dependent path is skipped.
pub trait MapPort {
    /// Pan/zoom to `center`.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Place a marker with its popup, returning the overlay handle.
    fn add_marker(&mut self, at: GeoPoint, popup: MarkerPopup) -> MarkerHandle;

    /// Remove a previously added marker.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Replace the popup on an existing marker.
    fn bind_popup(&mut self, handle: MarkerHandle, popup: MarkerPopup);
}

/// Side-table mapping workout id to its overlay handle.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: HashMap<String, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, handle: MarkerHandle) {
        self.markers.insert(id.to_string(), handle);
    }

    /// Remove and return the handle for `id`, `None` when absent.
    pub fn remove(&mut self, id: &str) -> Option<MarkerHandle> {
        self.markers.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<MarkerHandle> {
        self.markers.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// All registered workout ids, unordered.
    pub fn ids(&self) -> Vec<String> {
        self.markers.keys().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}
