//! Scheduling context shared by the grid generators.

use chrono::NaiveDate;

use crate::models::WorkingWeek;

/// Calendar parameters of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleContext {
    /// First day of period 1.
    pub start_date: NaiveDate,
    /// Working days per takt period.
    pub takt_time_days: i64,
    /// Weekdays that count as working days.
    pub working_week: WorkingWeek,
}

impl ScheduleContext {
    /// Creates a context with a Monday-to-Friday week.
    pub fn new(start_date: NaiveDate, takt_time_days: i64) -> Self {
        Self {
            start_date,
            takt_time_days,
            working_week: WorkingWeek::mon_to_fri(),
        }
    }

    /// Sets the working week.
    pub fn with_working_week(mut self, week: WorkingWeek) -> Self {
        self.working_week = week;
        self
    }

    /// First day of a 1-based takt period.
    pub fn period_start(&self, period_number: i64) -> NaiveDate {
        self.working_week
            .add_working_days(self.start_date, (period_number - 1) * self.takt_time_days)
    }

    /// Last working day of a job of `duration_days` starting on `start`.
    ///
    /// Durations below one day are treated as one day, so the end is
    /// never before the start.
    pub fn finish_date(&self, start: NaiveDate, duration_days: i64) -> NaiveDate {
        self.working_week
            .add_working_days(start, (duration_days - 1).max(0))
    }
}
