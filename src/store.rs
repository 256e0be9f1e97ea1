//! In-memory workout collection.
//!
//! The store is the system of record during a session: an insertion-ordered
//! sequence of workouts with unique ids. The controller owns exactly one
//! store; there are no concurrent writers.

use log::debug;

use crate::error::Result;
use crate::model::Workout;

/// Insertion-ordered workout collection.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            workouts: Vec::new(),
        }
    }

    /// Append a workout to the end of the sequence.
    ///
    /// Ids are assumed fresh (the model generates them); no duplicate check
    /// is performed here.
    pub fn push(&mut self, workout: Workout) {
        debug!("store: push {}", workout.id);
        self.workouts.push(workout);
    }

    /// Look up a workout by id. Linear scan; `None` when absent, since a
    /// stale UI element may reference an id that is already gone.
    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Remove the workout with the given id, returning it. Absent ids are
    /// a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<Workout> {
        let idx = self.workouts.iter().position(|w| w.id == id)?;
        debug!("store: remove {}", id);
        Some(self.workouts.remove(idx))
    }

    /// Replace the workout with the given id in place, preserving its
    /// position in the sequence. Returns false when the id is absent.
    pub fn replace(&mut self, id: &str, workout: Workout) -> bool {
        match self.workouts.iter_mut().find(|w| w.id == id) {
            Some(slot) => {
                *slot = workout;
                true
            }
            None => false,
        }
    }

    /// Clear all workouts.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.workouts.iter().map(|w| w.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    /// Serialize the whole sequence as the snapshot body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.workouts)?)
    }

    /// Rebuild a store from a snapshot body.
    ///
    /// Workouts come back as fully-typed variants with their stored derived
    /// metrics; order is preserved.
    pub fn from_json(json: &str) -> Result<Self> {
        let workouts: Vec<Workout> = serde_json::from_str(json)?;
        Ok(Self { workouts })
    }
}
