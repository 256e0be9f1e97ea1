//! The synchronization controller.
//!
//! [`App`] owns the workout store, the marker registry, and the boundary
//! ports, and keeps all three representations of the workout list — the
//! in-memory sequence, the persisted snapshot, and the map markers — in
//! lockstep through every lifecycle event.
//!
//! The host drives the controller one event at a time: `load` on startup,
//! `start` once geolocation resolves (or fails), then `map_click` /
//! `submit` / `delete` / `select` / `update` / `reset` as the user acts.
//! Handlers run to completion; there is no concurrent mutation.

use log::{info, warn};

use crate::error::{Result, TrackError};
use crate::geolocate::GeolocationProvider;
use crate::map::{MapPort, MarkerPopup, MarkerRegistry};
use crate::model::Workout;
use crate::storage::{KeyValueStore, SNAPSHOT_KEY};
use crate::store::WorkoutStore;
use crate::view::{ListEntry, ListSurface};
use crate::GeoPoint;

/// Initial map zoom, matching the host widget's default.
pub const DEFAULT_ZOOM: u8 = 13;

/// Numeric form fields as submitted, one variant per workout kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

/// Validate submitted fields: everything finite, distance/duration/cadence
/// strictly positive, elevation gain non-negative (zero climb is a valid
/// ride).
fn validate(input: &FormInput) -> Result<()> {
    fn positive(field: &'static str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(TrackError::InvalidInput {
                field,
                reason: "must be a finite number",
            });
        }
        if value <= 0.0 {
            return Err(TrackError::InvalidInput {
                field,
                reason: "must be positive",
            });
        }
        Ok(())
    }

    match *input {
        FormInput::Running {
            distance_km,
            duration_min,
            cadence_spm,
        } => {
            positive("distance", distance_km)?;
            positive("duration", duration_min)?;
            positive("cadence", cadence_spm)?;
        }
        FormInput::Cycling {
            distance_km,
            duration_min,
            elevation_gain_m,
        } => {
            positive("distance", distance_km)?;
            positive("duration", duration_min)?;
            if !elevation_gain_m.is_finite() {
                return Err(TrackError::InvalidInput {
                    field: "elevation",
                    reason: "must be a finite number",
                });
            }
            if elevation_gain_m < 0.0 {
                return Err(TrackError::InvalidInput {
                    field: "elevation",
                    reason: "must not be negative",
                });
            }
        }
    }
    Ok(())
}

/// The application controller.
///
/// One instance is constructed at process entry and owns all mutable
/// state; there is no global.
pub struct App<M, V, S> {
    store: WorkoutStore,
    markers: MarkerRegistry,
    map: Option<M>,
    view: V,
    storage: S,
    /// Coordinates of the last map click, pending until the form resolves
    pending: Option<GeoPoint>,
    zoom: u8,
}

impl<M, V, S> App<M, V, S>
where
    M: MapPort,
    V: ListSurface,
    S: KeyValueStore,
{
    pub fn new(view: V, storage: S) -> Self {
        Self {
            store: WorkoutStore::new(),
            markers: MarkerRegistry::new(),
            map: None,
            view,
            storage,
            pending: None,
            zoom: DEFAULT_ZOOM,
        }
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Hydrate the store from the persisted snapshot and render the list.
    ///
    /// A missing, unreadable, or corrupted snapshot means fresh state: the
    /// store starts empty and nothing is surfaced to the user. Markers are
    /// added later, when the map becomes available. Returns the number of
    /// workouts hydrated.
    pub fn load(&mut self) -> usize {
        let snapshot = match self.storage.get(SNAPSHOT_KEY) {
            Ok(s) => s,
            Err(e) => {
                warn!("app: snapshot read failed, starting empty: {}", e);
                None
            }
        };

        if let Some(json) = snapshot {
            match WorkoutStore::from_json(&json) {
                Ok(store) => self.store = store,
                Err(e) => {
                    warn!("app: snapshot corrupted, starting empty: {}", e);
                }
            }
        }

        for workout in self.store.iter() {
            self.view.render_entry(&ListEntry::for_workout(workout));
        }
        self.refresh_controls();

        info!("app: hydrated {} workouts", self.store.len());
        self.store.len()
    }

    /// Resolve the user's position and bring the map up at it.
    ///
    /// On success the host's `make_map` builds the widget centered on the
    /// resolved point, and every already-hydrated workout gets its marker.
    /// On failure the user is notified and the map stays unavailable for
    /// the whole session — the list keeps working, but no new workout can
    /// be geo-placed.
    pub fn start<G, F>(&mut self, geo: &G, make_map: F) -> Result<()>
    where
        G: GeolocationProvider,
        F: FnOnce(GeoPoint, u8) -> M,
    {
        let position = match geo.request_position() {
            Ok(p) => p,
            Err(e) => {
                self.view.notify("Could not get your position!");
                return Err(e);
            }
        };

        let mut map = make_map(position, self.zoom);
        for workout in self.store.iter() {
            let handle = map.add_marker(workout.coords, MarkerPopup::for_workout(workout));
            self.markers.insert(&workout.id, handle);
        }
        self.map = Some(map);

        info!("app: map ready at {:?}", position);
        Ok(())
    }

    // ========================================================================
    // Lifecycle events
    // ========================================================================

    /// A map click selects the location for the next workout and opens the
    /// entry form. Out-of-range coordinates are ignored.
    pub fn map_click(&mut self, at: GeoPoint) {
        if self.map.is_none() {
            return;
        }
        if !at.is_valid() {
            warn!("app: ignoring click at invalid coordinates {:?}", at);
            return;
        }
        self.pending = Some(at);
        self.view.show_form();
    }

    /// Create a workout from the open form.
    ///
    /// On validation failure the user is notified, the form stays open with
    /// its fields intact, and nothing is mutated. On success the workout is
    /// appended, its marker and list entry rendered, the snapshot persisted
    /// (failures propagate), and the form closed. Returns the new id.
    pub fn submit(&mut self, input: FormInput) -> Result<String> {
        let coords = self.pending.ok_or(TrackError::NoPendingLocation)?;

        if let Err(e) = validate(&input) {
            self.view.notify("Input is not valid");
            return Err(e);
        }

        let workout = match input {
            FormInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => Workout::running(coords, distance_km, duration_min, cadence_spm),
            FormInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => Workout::cycling(coords, distance_km, duration_min, elevation_gain_m),
        };
        let id = workout.id.clone();

        if let Some(map) = &mut self.map {
            let handle = map.add_marker(workout.coords, MarkerPopup::for_workout(&workout));
            self.markers.insert(&id, handle);
        }
        self.view.render_entry(&ListEntry::for_workout(&workout));

        self.store.push(workout);
        self.pending = None;
        self.view.hide_form();

        self.persist()?;
        self.refresh_controls();

        info!("app: added workout {}", id);
        Ok(id)
    }

    /// Delete the workout with the given id.
    ///
    /// Removes it from the store, the map, the registry, and the rendered
    /// list, then re-persists — or clears the snapshot entirely when the
    /// store became empty. An id that is already gone (stale list element)
    /// is a silent no-op.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.store.remove(id).is_none() {
            warn!("app: delete of unknown workout {}, ignoring", id);
            return Ok(());
        }

        if let Some(handle) = self.markers.remove(id) {
            if let Some(map) = &mut self.map {
                map.remove_marker(handle);
            }
        }
        self.view.remove_entry(id);

        self.persist()?;
        self.refresh_controls();

        info!("app: deleted workout {}", id);
        Ok(())
    }

    /// Pan/zoom the map to a workout's coordinates. No state change; an
    /// unknown id or an unavailable map is a no-op.
    pub fn select(&mut self, id: &str) {
        let Some(workout) = self.store.find(id) else {
            return;
        };
        let coords = workout.coords;
        if let Some(map) = &mut self.map {
            map.set_view(coords, self.zoom);
        }
    }

    /// Replace an existing workout's numbers (and possibly kind) in place,
    /// preserving its identifier, coordinates, and creation timestamp.
    ///
    /// The marker popup, list entry, and snapshot are all refreshed. An
    /// unknown id is a no-op.
    pub fn update(&mut self, id: &str, input: FormInput) -> Result<()> {
        let Some(existing) = self.store.find(id) else {
            warn!("app: update of unknown workout {}, ignoring", id);
            return Ok(());
        };
        let created_at = existing.created_at;
        let coords = existing.coords;

        if let Err(e) = validate(&input) {
            self.view.notify("Input is not valid");
            return Err(e);
        }

        let rebuilt = match input {
            FormInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => Workout::running_at(
                id.to_string(),
                created_at,
                coords,
                distance_km,
                duration_min,
                cadence_spm,
            ),
            FormInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => Workout::cycling_at(
                id.to_string(),
                created_at,
                coords,
                distance_km,
                duration_min,
                elevation_gain_m,
            ),
        };

        if let Some(handle) = self.markers.get(id) {
            if let Some(map) = &mut self.map {
                map.bind_popup(handle, MarkerPopup::for_workout(&rebuilt));
            }
        }
        self.view.remove_entry(id);
        self.view.render_entry(&ListEntry::for_workout(&rebuilt));

        self.store.replace(id, rebuilt);
        self.persist()?;

        info!("app: updated workout {}", id);
        Ok(())
    }

    /// Clear everything: snapshot, store, markers, rendered list.
    ///
    /// Resetting an already-empty store is a no-op and never touches
    /// storage.
    pub fn reset(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return Ok(());
        }

        for id in self.store.ids() {
            if let Some(handle) = self.markers.remove(&id) {
                if let Some(map) = &mut self.map {
                    map.remove_marker(handle);
                }
            }
            self.view.remove_entry(&id);
        }
        self.store.clear();
        self.markers.clear();
        self.pending = None;

        self.storage.remove(SNAPSHOT_KEY)?;
        self.refresh_controls();

        info!("app: reset to empty state");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Write the snapshot, or clear it when the store is empty.
    fn persist(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.storage.remove(SNAPSHOT_KEY)
        } else {
            let json = self.store.to_json()?;
            self.storage.set(SNAPSHOT_KEY, &json)
        }
    }

    /// Controls visibility is derived from store emptiness, re-evaluated
    /// after every mutation.
    fn refresh_controls(&mut self) {
        self.view.set_controls_visible(!self.store.is_empty());
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn map_available(&self) -> bool {
        self.map.is_some()
    }

    /// True between a map click and the form resolving.
    pub fn form_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_running() {
        let good = FormInput::Running {
            distance_km: 5.0,
            duration_min: 30.0,
            cadence_spm: 178.0,
        };
        assert!(validate(&good).is_ok());

        let negative = FormInput::Running {
            distance_km: -1.0,
            duration_min: 30.0,
            cadence_spm: 178.0,
        };
        assert!(validate(&negative).is_err());

        let nan = FormInput::Running {
            distance_km: f64::NAN,
            duration_min: 30.0,
            cadence_spm: 178.0,
        };
        assert!(validate(&nan).is_err());

        let zero_cadence = FormInput::Running {
            distance_km: 5.0,
            duration_min: 30.0,
            cadence_spm: 0.0,
        };
        assert!(validate(&zero_cadence).is_err());
    }

    #[test]
    fn test_validate_cycling_elevation() {
        let flat = FormInput::Cycling {
            distance_km: 20.0,
            duration_min: 60.0,
            elevation_gain_m: 0.0,
        };
        assert!(validate(&flat).is_ok());

        let downhill = FormInput::Cycling {
            distance_km: 20.0,
            duration_min: 60.0,
            elevation_gain_m: -5.0,
        };
        assert!(validate(&downhill).is_err());

        let infinite = FormInput::Cycling {
            distance_km: 20.0,
            duration_min: 60.0,
            elevation_gain_m: f64::INFINITY,
        };
        assert!(validate(&infinite).is_err());
    }
}
