//! Formula-based flow grid generator.
//!
//! # Algorithm
//!
//! The classical wagon-train model. With zones and wagons sorted by
//! `sequence` and `i` the wagon's 0-based train position:
//!
//! 1. `offset(i)` = sum of `buffer_after` of the wagons before `i`.
//! 2. `period = zone.sequence + i + offset(i)`.
//! 3. `start = start_date + (period - 1) * takt` working days.
//! 4. `end = start + (duration - 1)` working days.
//!
//! Each wagon enters the next zone one takt after it entered the previous
//! one, and each wagon follows the one ahead of it by one takt plus the
//! buffers in between. Relationships are not consulted.
//!
//! # Complexity
//! O(z * w) assignments, each O(period * takt) calendar steps.

use tracing::debug;

use super::numbering::{buffer_offsets, positional_period, PeriodNumbering};
use super::{GeneratedGrid, GridGenerator, ScheduleContext};
use crate::error::PlanResult;
use crate::models::{sequence_order, Assignment, Relationship, Schedule, Wagon, Zone};

/// Formula-based takt grid generator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use takt_flow::models::{Wagon, Zone};
/// use takt_flow::scheduler::{FlowGridGenerator, ScheduleContext};
///
/// let zones = vec![Zone::new("A", "Zone A", 1), Zone::new("B", "Zone B", 2)];
/// let wagons = vec![Wagon::new("X", "T1", 1).with_duration(5)];
/// let ctx = ScheduleContext::new(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap(), 5);
///
/// let schedule = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx);
/// assert_eq!(schedule.assignment_count(), 2);
/// assert_eq!(schedule.assignment_for("X", "B").unwrap().period_number, 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGridGenerator;

impl FlowGridGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates one assignment per (zone, wagon) pair.
    ///
    /// Output order: zones by sequence, then wagons by sequence.
    pub fn generate_grid(&self, zones: &[Zone], wagons: &[Wagon], ctx: &ScheduleContext) -> Schedule {
        let mut zone_order: Vec<&Zone> = zones.iter().collect();
        zone_order.sort_by_key(|z| z.sequence);

        let train: Vec<&Wagon> = sequence_order(wagons).into_iter().map(|i| &wagons[i]).collect();
        let offsets = buffer_offsets(&train.iter().map(|w| w.buffer_after).collect::<Vec<_>>());

        let mut schedule = Schedule::new();
        for zone in &zone_order {
            for (i, wagon) in train.iter().enumerate() {
                let period = positional_period(zone.sequence, i, offsets[i]);
                let start = ctx.period_start(period);
                let end = ctx.finish_date(start, wagon.duration_days);
                schedule.add_assignment(Assignment::new(&zone.id, &wagon.id, period, start, end));
            }
        }

        debug!(
            zones = zones.len(),
            wagons = wagons.len(),
            max_period = schedule.max_period(),
            "flow grid generated"
        );
        schedule
    }
}

impl GridGenerator for FlowGridGenerator {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn numbering(&self) -> PeriodNumbering {
        PeriodNumbering::Positional
    }

    fn generate(
        &self,
        zones: &[Zone],
        wagons: &[Wagon],
        _relationships: &[Relationship],
        ctx: &ScheduleContext,
    ) -> PlanResult<GeneratedGrid> {
        Ok(GeneratedGrid {
            schedule: self.generate_grid(zones, wagons, ctx),
            numbering: self.numbering(),
            unordered_wagons: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn ctx(takt: i64) -> ScheduleContext {
        ScheduleContext::new(date(2, 16), takt)
    }

    fn two_by_two() -> (Vec<Zone>, Vec<Wagon>) {
        (
            vec![Zone::new("A", "Zone A", 1), Zone::new("B", "Zone B", 2)],
            vec![
                Wagon::new("X", "T1", 1).with_duration(5),
                Wagon::new("Y", "T2", 2).with_duration(5),
            ],
        )
    }

    #[test]
    fn test_two_by_two_grid() {
        let (zones, wagons) = two_by_two();
        let s = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx(5));
        assert_eq!(s.assignment_count(), 4);

        let expect = [
            ("X", "A", 1, date(2, 16), date(2, 20)),
            ("X", "B", 2, date(2, 23), date(2, 27)),
            ("Y", "A", 2, date(2, 23), date(2, 27)),
            ("Y", "B", 3, date(3, 2), date(3, 6)),
        ];
        for (wagon, zone, period, start, end) in expect {
            let a = s.assignment_for(wagon, zone).unwrap();
            assert_eq!(a.period_number, period, "{wagon}@{zone}");
            assert_eq!(a.planned_start, start, "{wagon}@{zone}");
            assert_eq!(a.planned_end, end, "{wagon}@{zone}");
        }
    }

    #[test]
    fn test_buffer_shifts_followers() {
        let (zones, mut wagons) = two_by_two();
        wagons[0].buffer_after = 1;
        let s = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx(5));

        let y_a = s.assignment_for("Y", "A").unwrap();
        assert_eq!(y_a.period_number, 3); // 1 + 1 + 1
        assert_eq!(y_a.planned_start, date(3, 2));
        let y_b = s.assignment_for("Y", "B").unwrap();
        assert_eq!(y_b.period_number, 4);
    }

    #[test]
    fn test_unsorted_input() {
        let zones = vec![Zone::new("B", "Zone B", 2), Zone::new("A", "Zone A", 1)];
        let wagons = vec![
            Wagon::new("Y", "T2", 2).with_duration(5),
            Wagon::new("X", "T1", 1).with_duration(5),
        ];
        let s = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx(5));
        let first = &s.assignments[0];
        assert_eq!((first.zone_id.as_str(), first.wagon_id.as_str()), ("A", "X"));
        assert_eq!(s.assignment_for("Y", "B").unwrap().period_number, 3);
    }

    #[test]
    fn test_short_duration_inside_takt() {
        let zones = vec![Zone::new("A", "Zone A", 1)];
        let wagons = vec![Wagon::new("X", "T1", 1).with_duration(2)];
        let s = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx(5));
        let a = &s.assignments[0];
        assert_eq!(a.planned_start, date(2, 16));
        assert_eq!(a.planned_end, date(2, 17));
    }

    #[test]
    fn test_monotonic_periods() {
        let zones: Vec<Zone> = (1..=4).map(|i| Zone::new(format!("Z{i}"), "z", i)).collect();
        let wagons: Vec<Wagon> = (1..=3)
            .map(|i| Wagon::new(format!("W{i}"), "t", i).with_duration(2).with_buffer_after(1))
            .collect();
        let s = FlowGridGenerator::new().generate_grid(&zones, &wagons, &ctx(2));
        assert_eq!(s.assignment_count(), 12);

        for w in &wagons {
            let periods: Vec<i64> = zones
                .iter()
                .map(|z| s.assignment_for(&w.id, &z.id).unwrap().period_number)
                .collect();
            assert!(periods.windows(2).all(|p| p[0] < p[1]));
        }
        for z in &zones {
            let periods: Vec<i64> = wagons
                .iter()
                .map(|w| s.assignment_for(&w.id, &z.id).unwrap().period_number)
                .collect();
            assert!(periods.windows(2).all(|p| p[0] < p[1]));
        }
    }

    #[test]
    fn test_trait_reports_positional() {
        let (zones, wagons) = two_by_two();
        let generator = FlowGridGenerator::new();
        let grid = generator.generate(&zones, &wagons, &[], &ctx(5)).unwrap();
        assert_eq!(grid.numbering, PeriodNumbering::Positional);
        assert_eq!(grid.schedule.assignment_count(), 4);
        assert!(grid.unordered_wagons.is_none());
        assert_eq!(generator.name(), "flow");
    }
}
