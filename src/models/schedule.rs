//! Takt grid (solution) model.
//!
//! A schedule is the full set of wagon-zone assignments produced by one
//! scheduling run, each with a period number and concrete dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateWindow;

/// A wagon's occupancy of one zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    /// Occupied zone.
    pub zone_id: String,
    /// Occupying wagon.
    pub wagon_id: String,
    /// 1-based takt period.
    pub period_number: i64,
    /// First working day (inclusive).
    pub planned_start: NaiveDate,
    /// Last working day (inclusive). Never before `planned_start`.
    pub planned_end: NaiveDate,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        zone_id: impl Into<String>,
        wagon_id: impl Into<String>,
        period_number: i64,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            wagon_id: wagon_id.into(),
            period_number,
            planned_start,
            planned_end,
        }
    }

    /// The occupied date window.
    #[inline]
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.planned_start, self.planned_end)
    }
}

/// A complete takt grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    /// Wagon-zone assignments.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing assignments.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Appends all assignments of another schedule.
    pub fn extend(&mut self, other: Schedule) {
        self.assignments.extend(other.assignments);
    }

    /// Earliest planned start, `None` if empty.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.assignments.iter().map(|a| a.planned_start).min()
    }

    /// Latest planned end, `None` if empty.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.assignments.iter().map(|a| a.planned_end).max()
    }

    /// Highest period number, 0 if empty.
    pub fn max_period(&self) -> i64 {
        self.assignments
            .iter()
            .map(|a| a.period_number)
            .max()
            .unwrap_or(0)
    }

    /// Finds the assignment of a wagon in a zone.
    pub fn assignment_for(&self, wagon_id: &str, zone_id: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.wagon_id == wagon_id && a.zone_id == zone_id)
    }

    /// Returns all assignments of a wagon.
    pub fn assignments_for_wagon(&self, wagon_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.wagon_id == wagon_id)
            .collect()
    }

    /// Returns all assignments in a zone.
    pub fn assignments_for_zone(&self, zone_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.zone_id == zone_id)
            .collect()
    }

    /// Last working day of a wagon across all zones.
    pub fn wagon_completion_date(&self, wagon_id: &str) -> Option<NaiveDate> {
        self.assignments_for_wagon(wagon_id)
            .iter()
            .map(|a| a.planned_end)
            .max()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether there are no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
