//! List rendering boundary.
//!
//! The engine hands the host one structured [`ListEntry`] per workout; how
//! that becomes markup is the host's business. The trait also carries the
//! handful of surface toggles the lifecycle needs (form visibility,
//! management controls, user notices).

use serde::{Deserialize, Serialize};

use crate::model::{Workout, WorkoutDetails, WorkoutKind};

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl StatLine {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// Structured list block for one workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    /// Workout id, carried as the entry's data attribute so delete/edit
    /// clicks can be resolved back to the record
    pub id: String,
    pub kind: WorkoutKind,
    /// The workout label, e.g. "Running on April 14"
    pub title: String,
    pub stats: Vec<StatLine>,
}

impl ListEntry {
    /// Build the entry for a workout: distance and duration first, then the
    /// kind-specific pair. The derived metric is shown with one decimal.
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut stats = vec![
            StatLine::new(kind.icon(), format!("{}", workout.distance_km), "km"),
            StatLine::new("⏱", format!("{}", workout.duration_min), "min"),
        ];

        match workout.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                stats.push(StatLine::new("⚡️", format!("{:.1}", pace_min_per_km), "min/km"));
                stats.push(StatLine::new("🦶🏼", format!("{}", cadence_spm), "spm"));
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_kmh,
            } => {
                stats.push(StatLine::new("⚡️", format!("{:.1}", speed_kmh), "km/h"));
                stats.push(StatLine::new("⛰", format!("{}", elevation_gain_m), "m"));
            }
        }

        Self {
            id: workout.id.clone(),
            kind,
            title: workout.label.clone(),
            stats,
        }
    }
}

/// Host surface the controller renders into.
pub trait ListSurface {
    /// Reveal the entry form (a map click selected a location).
    fn show_form(&mut self);

    /// Clear and hide the entry form.
    fn hide_form(&mut self);

    /// Render one workout entry. Called once per workout on hydrate and
    /// once per successful create; an update re-renders via
    /// [`ListSurface::remove_entry`] + `render_entry`.
    fn render_entry(&mut self, entry: &ListEntry);

    /// Remove the entry for `id` from the rendered list.
    fn remove_entry(&mut self, id: &str);

    /// Show or hide the management controls (reset button container).
    fn set_controls_visible(&mut self, visible: bool);

    /// Blocking alert-style notice.
    fn notify(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    #[test]
    fn test_running_entry_rows() {
        let w = Workout::running(GeoPoint::new(51.5, -0.12), 5.0, 30.0, 178.0);
        let entry = ListEntry::for_workout(&w);

        assert_eq!(entry.id, w.id);
        assert_eq!(entry.kind, WorkoutKind::Running);
        assert_eq!(entry.title, w.label);
        assert_eq!(entry.stats.len(), 4);
        assert_eq!(entry.stats[0].value, "5");
        assert_eq!(entry.stats[0].unit, "km");
        assert_eq!(entry.stats[2].value, "6.0");
        assert_eq!(entry.stats[2].unit, "min/km");
        assert_eq!(entry.stats[3].value, "178");
    }

    #[test]
    fn test_cycling_entry_rows() {
        let w = Workout::cycling(GeoPoint::new(51.5, -0.12), 20.0, 60.0, 500.0);
        let entry = ListEntry::for_workout(&w);

        assert_eq!(entry.stats[2].value, "20.0");
        assert_eq!(entry.stats[2].unit, "km/h");
        assert_eq!(entry.stats[3].value, "500");
        assert_eq!(entry.stats[3].unit, "m");
    }
}
