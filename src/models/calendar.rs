//! Working-day calendar and date windows.
//!
//! Defines which weekdays count as working time and provides the
//! working-day arithmetic every scheduler in this crate is built on.
//!
//! # Time Model
//! All dates are calendar days (`chrono::NaiveDate`), no time of day.
//! A takt period is a number of *working* days; weekends (or whatever the
//! week excludes) are stepped over but never counted.
//!
//! # Stepping Rule
//! `add_working_days(start, n)` moves one calendar day at a time and counts
//! each day it lands on that is a working day, stopping after `n` counts.
//! The start day itself is never counted, so `n = 0` returns `start`
//! unchanged even when `start` is not a working day.

use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// An inclusive date interval [start, end].
///
/// Assignments occupy their zone from the first working day to the last
/// working day, both inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a new date window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a date falls within this window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether two windows share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The shared days of two windows, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if self.overlaps(other) {
            Some(Self::new(self.start.max(other.start), self.end.min(other.end)))
        } else {
            None
        }
    }

    /// Number of calendar days covered (inclusive).
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The set of weekdays on which work happens.
///
/// Stored as a 7-bit mask (bit 0 = Monday). Serialized as a list of
/// weekday names, e.g. `["Mon", "Tue", "Wed", "Thu", "Fri"]`.
///
/// # Precondition
/// The working-day operations loop until enough working days are found.
/// An empty week never finds one, so callers must reject it upfront
/// (see [`crate::validation`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WorkingWeek {
    mask: u8,
}

impl WorkingWeek {
    /// Monday through Friday.
    pub fn mon_to_fri() -> Self {
        Self::from_days(&ALL_WEEKDAYS[..5])
    }

    /// Monday through Saturday.
    pub fn mon_to_sat() -> Self {
        Self::from_days(&ALL_WEEKDAYS[..6])
    }

    /// Every day of the week.
    pub fn all_days() -> Self {
        Self { mask: 0b111_1111 }
    }

    /// A week with no working days. Only useful as a builder seed.
    pub fn empty() -> Self {
        Self { mask: 0 }
    }

    /// Builds a week from an explicit list of weekdays.
    pub fn from_days(days: &[Weekday]) -> Self {
        days.iter().fold(Self::empty(), |week, &d| week.with_day(d))
    }

    /// Adds a working weekday.
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.mask |= 1 << day.num_days_from_monday();
        self
    }

    /// Removes a weekday.
    pub fn without_day(mut self, day: Weekday) -> Self {
        self.mask &= !(1 << day.num_days_from_monday());
        self
    }

    /// Whether the week has no working days at all.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of working days per week.
    pub fn days_per_week(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Working weekdays, Monday first.
    pub fn days(&self) -> Vec<Weekday> {
        ALL_WEEKDAYS
            .iter()
            .copied()
            .filter(|&d| self.includes(d))
            .collect()
    }

    /// Whether a weekday is a working day.
    #[inline]
    pub fn includes(&self, day: Weekday) -> bool {
        self.mask & (1 << day.num_days_from_monday()) != 0
    }

    /// Whether a date is a working day.
    #[inline]
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.includes(date.weekday())
    }

    /// Moves forward until `n` working days have been counted.
    ///
    /// `n = 0` returns `start`. Negative `n` steps backward instead.
    pub fn add_working_days(&self, start: NaiveDate, n: i64) -> NaiveDate {
        if n < 0 {
            return self.subtract_working_days(start, -n);
        }
        let mut current = start;
        let mut counted = 0;
        while counted < n {
            current = current + Days::new(1);
            if self.is_working_day(current) {
                counted += 1;
            }
        }
        current
    }

    /// Mirror of [`add_working_days`](Self::add_working_days), stepping backward.
    pub fn subtract_working_days(&self, start: NaiveDate, n: i64) -> NaiveDate {
        if n < 0 {
            return self.add_working_days(start, -n);
        }
        let mut current = start;
        let mut counted = 0;
        while counted < n {
            current = current - Days::new(1);
            if self.is_working_day(current) {
                counted += 1;
            }
        }
        current
    }

    /// Signed shift: forward for positive `n`, backward for negative `n`.
    ///
    /// Used for lags, where a negative value is a lead.
    #[inline]
    pub fn shift_working_days(&self, start: NaiveDate, n: i64) -> NaiveDate {
        self.add_working_days(start, n)
    }

    /// Counts working days in the inclusive range [from, to].
    ///
    /// Returns 0 if `to < from`.
    pub fn working_days_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        if to < from {
            return 0;
        }
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_working_day(*d))
            .count() as i64
    }
}

impl Default for WorkingWeek {
    fn default() -> Self {
        Self::mon_to_fri()
    }
}

impl From<Vec<Weekday>> for WorkingWeek {
    fn from(days: Vec<Weekday>) -> Self {
        Self::from_days(&days)
    }
}

impl From<WorkingWeek> for Vec<Weekday> {
    fn from(week: WorkingWeek) -> Self {
        week.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_window() {
        let w = DateWindow::new(date(2026, 2, 16), date(2026, 2, 20));
        assert_eq!(w.calendar_days(), 5);
        assert!(w.contains(date(2026, 2, 16)));
        assert!(w.contains(date(2026, 2, 20))); // inclusive end
        assert!(!w.contains(date(2026, 2, 21)));
    }

    #[test]
    fn test_date_window_overlap() {
        let a = DateWindow::new(date(2026, 2, 16), date(2026, 2, 20));
        let b = DateWindow::new(date(2026, 2, 20), date(2026, 2, 27));
        assert!(a.overlaps(&b)); // sharing the last day counts
        assert_eq!(
            a.intersection(&b),
            Some(DateWindow::new(date(2026, 2, 20), date(2026, 2, 20)))
        );

        let c = DateWindow::new(date(2026, 2, 23), date(2026, 2, 27));
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_working_week_membership() {
        let week = WorkingWeek::mon_to_fri();
        assert_eq!(week.days_per_week(), 5);
        assert!(week.includes(Weekday::Mon));
        assert!(!week.includes(Weekday::Sat));
        assert!(week.is_working_day(date(2026, 2, 16))); // Monday
        assert!(!week.is_working_day(date(2026, 2, 22))); // Sunday

        let custom = WorkingWeek::empty()
            .with_day(Weekday::Sun)
            .with_day(Weekday::Thu);
        assert_eq!(custom.days(), vec![Weekday::Thu, Weekday::Sun]);
        assert!(WorkingWeek::empty().is_empty());
        assert_eq!(
            WorkingWeek::mon_to_sat().without_day(Weekday::Sat),
            WorkingWeek::mon_to_fri()
        );
    }

    #[test]
    fn test_add_zero_is_identity() {
        let week = WorkingWeek::mon_to_fri();
        let sunday = date(2026, 2, 22);
        assert_eq!(week.add_working_days(sunday, 0), sunday);
        assert_eq!(week.subtract_working_days(sunday, 0), sunday);
    }

    #[test]
    fn test_add_skips_weekend() {
        let week = WorkingWeek::mon_to_fri();
        // Friday + 1 working day = Monday
        assert_eq!(week.add_working_days(date(2026, 2, 20), 1), date(2026, 2, 23));
        // Monday + 4 = Friday (one takt week)
        assert_eq!(week.add_working_days(date(2026, 2, 16), 4), date(2026, 2, 20));
        // Monday + 5 = next Monday
        assert_eq!(week.add_working_days(date(2026, 2, 16), 5), date(2026, 2, 23));
    }

    #[test]
    fn test_subtract_skips_weekend() {
        let week = WorkingWeek::mon_to_fri();
        assert_eq!(
            week.subtract_working_days(date(2026, 2, 23), 1),
            date(2026, 2, 20)
        );
        assert_eq!(
            week.subtract_working_days(date(2026, 2, 27), 9),
            date(2026, 2, 16)
        );
    }

    #[test]
    fn test_negative_shift_steps_backward() {
        let week = WorkingWeek::mon_to_fri();
        let monday = date(2026, 2, 23);
        assert_eq!(week.shift_working_days(monday, -1), date(2026, 2, 20));
        assert_eq!(week.add_working_days(monday, -2), date(2026, 2, 19));
        assert_eq!(week.subtract_working_days(monday, -1), date(2026, 2, 24));
    }

    #[test]
    fn test_six_day_week() {
        let week = WorkingWeek::mon_to_sat();
        // Friday + 1 = Saturday
        assert_eq!(week.add_working_days(date(2026, 2, 20), 1), date(2026, 2, 21));
        // Saturday + 1 = Monday
        assert_eq!(week.add_working_days(date(2026, 2, 21), 1), date(2026, 2, 23));
    }

    #[test]
    fn test_working_days_between() {
        let week = WorkingWeek::mon_to_fri();
        assert_eq!(
            week.working_days_between(date(2026, 2, 16), date(2026, 2, 27)),
            10
        );
        assert_eq!(
            week.working_days_between(date(2026, 2, 21), date(2026, 2, 22)),
            0
        );
        assert_eq!(
            week.working_days_between(date(2026, 2, 27), date(2026, 2, 16)),
            0
        );
    }

    #[test]
    fn test_working_week_serde() {
        let week = WorkingWeek::mon_to_fri();
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(json, r#"["Mon","Tue","Wed","Thu","Fri"]"#);

        let parsed: WorkingWeek = serde_json::from_str(r#"["Sat","Sun"]"#).unwrap();
        assert_eq!(parsed.days(), vec![Weekday::Sat, Weekday::Sun]);
    }
}
