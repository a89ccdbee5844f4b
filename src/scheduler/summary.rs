//! Plan-level figures: period estimates, end dates and summaries.
//!
//! # Period estimate
//!
//! | Figure | Definition |
//! |--------|-----------|
//! | Total periods | `zones + wagons - 1 + buffer_size * (wagons - 1)` |
//! | End date | `start + (total_periods * takt - 1)` working days |
//!
//! The estimate assumes one uniform train. For a generated grid,
//! [`PlanSummary`] reports the figures actually realised.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Schedule, WorkingWeek};

/// Takt periods a uniform train needs to clear every zone.
///
/// Returns 0 when there are no zones or no wagons.
pub fn total_periods(zone_count: usize, wagon_count: usize, buffer_size: i64) -> i64 {
    if zone_count == 0 || wagon_count == 0 {
        return 0;
    }
    let zones = zone_count as i64;
    let wagons = wagon_count as i64;
    zones + wagons - 1 + buffer_size * (wagons - 1)
}

/// Last working day of a plan of `total_periods` periods.
pub fn calculate_end_date(
    start_date: NaiveDate,
    total_periods: i64,
    takt_time_days: i64,
    week: &WorkingWeek,
) -> NaiveDate {
    week.add_working_days(start_date, (total_periods * takt_time_days - 1).max(0))
}

/// Realised figures of a generated grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Earliest planned start.
    pub start_date: Option<NaiveDate>,
    /// Latest planned end.
    pub end_date: Option<NaiveDate>,
    /// Highest period number in the grid.
    pub total_periods: i64,
    /// Working days from start to end (inclusive).
    pub working_days: i64,
    /// Calendar days from start to end (inclusive).
    pub calendar_days: i64,
    /// Distinct zones in the grid.
    pub zone_count: usize,
    /// Distinct wagons in the grid.
    pub wagon_count: usize,
    /// Number of assignments.
    pub assignment_count: usize,
    /// Last working day per wagon.
    pub wagon_finish_dates: BTreeMap<String, NaiveDate>,
}

impl PlanSummary {
    /// Computes the summary of a schedule.
    pub fn calculate(schedule: &Schedule, week: &WorkingWeek) -> Self {
        let start_date = schedule.start_date();
        let end_date = schedule.end_date();

        let (working_days, calendar_days) = match (start_date, end_date) {
            (Some(start), Some(end)) => (
                week.working_days_between(start, end),
                (end - start).num_days() + 1,
            ),
            _ => (0, 0),
        };

        let mut wagon_finish_dates: BTreeMap<String, NaiveDate> = BTreeMap::new();
        let mut zones = std::collections::BTreeSet::new();
        for a in &schedule.assignments {
            zones.insert(a.zone_id.as_str());
            wagon_finish_dates
                .entry(a.wagon_id.clone())
                .and_modify(|d| *d = (*d).max(a.planned_end))
                .or_insert(a.planned_end);
        }

        Self {
            start_date,
            end_date,
            total_periods: schedule.max_period(),
            working_days,
            calendar_days,
            zone_count: zones.len(),
            wagon_count: wagon_finish_dates.len(),
            assignment_count: schedule.assignment_count(),
            wagon_finish_dates,
        }
    }

    /// Whether the grid finishes on or before `deadline`.
    pub fn meets_deadline(&self, deadline: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| end <= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_total_periods() {
        assert_eq!(total_periods(2, 2, 0), 3);
        assert_eq!(total_periods(5, 4, 1), 11); // 5 + 4 - 1 + 3
        assert_eq!(total_periods(0, 4, 1), 0);
        assert_eq!(total_periods(3, 0, 0), 0);
        assert_eq!(total_periods(3, 1, 2), 3); // single wagon: no buffers
    }

    #[test]
    fn test_calculate_end_date() {
        let week = WorkingWeek::mon_to_fri();
        // 3 periods of 5 days from Monday 16th → Friday 6th
        assert_eq!(calculate_end_date(date(2, 16), 3, 5, &week), date(3, 6));
        assert_eq!(calculate_end_date(date(2, 16), 0, 5, &week), date(2, 16));
    }

    #[test]
    fn test_summary() {
        let schedule = Schedule::from_assignments(vec![
            Assignment::new("A", "X", 1, date(2, 16), date(2, 20)),
            Assignment::new("B", "X", 2, date(2, 23), date(2, 27)),
            Assignment::new("A", "Y", 2, date(2, 23), date(2, 27)),
            Assignment::new("B", "Y", 3, date(3, 2), date(3, 6)),
        ]);
        let summary = PlanSummary::calculate(&schedule, &WorkingWeek::mon_to_fri());

        assert_eq!(summary.start_date, Some(date(2, 16)));
        assert_eq!(summary.end_date, Some(date(3, 6)));
        assert_eq!(summary.total_periods, 3);
        assert_eq!(summary.working_days, 15);
        assert_eq!(summary.calendar_days, 19);
        assert_eq!(summary.zone_count, 2);
        assert_eq!(summary.wagon_count, 2);
        assert_eq!(summary.assignment_count, 4);
        assert_eq!(summary.wagon_finish_dates["X"], date(2, 27));
        assert!(summary.meets_deadline(date(3, 6)));
        assert!(!summary.meets_deadline(date(3, 5)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = PlanSummary::calculate(&Schedule::new(), &WorkingWeek::mon_to_fri());
        assert_eq!(summary.end_date, None);
        assert_eq!(summary.working_days, 0);
        assert!(summary.meets_deadline(date(1, 1)));
    }
}
