//! Flowline chart data.
//!
//! A flowline plots zones on the y-axis and time on the x-axis; every wagon
//! becomes a staircase of segments, one per zone it occupies. This module
//! only prepares the coordinates. Rendering is left to the caller.
//!
//! x-coordinates are takt-grid days: `x_start = (period - 1) * takt` and
//! `x_end = x_start + duration`.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{sequence_order, Assignment, Wagon, Zone};
use crate::scheduler::total_periods;

/// A zone row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowlineZone {
    /// Zone identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flow position.
    pub sequence: i32,
    /// Row index, 0 for the first zone in flow order.
    pub y_index: usize,
}

/// One wagon's occupancy of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowlineSegment {
    /// Occupied zone.
    pub zone_id: String,
    /// Row of the zone.
    pub y_index: usize,
    /// Takt period.
    pub period_number: i64,
    /// Grid day the segment starts.
    pub x_start: i64,
    /// Grid day the segment ends.
    pub x_end: i64,
    /// Planned start date.
    pub start: NaiveDate,
    /// Planned end date.
    pub end: NaiveDate,
}

/// A wagon line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowlineWagon {
    /// Wagon identifier.
    pub wagon_id: String,
    /// Trade of the wagon.
    pub trade_id: String,
    /// Train position.
    pub sequence: i32,
    /// Segments ordered by period.
    pub segments: Vec<FlowlineSegment>,
}

/// Coordinates of a complete flowline chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowlineChart {
    /// Zone rows in flow order.
    pub zones: Vec<FlowlineZone>,
    /// Wagon lines in train order.
    pub wagons: Vec<FlowlineWagon>,
    /// Working days per takt period.
    pub takt_time_days: i64,
    /// Periods covered by the x-axis.
    pub total_periods: i64,
    /// Length of the x-axis in grid days.
    pub total_days: i64,
}

impl FlowlineChart {
    /// Lays out a grid as a flowline.
    ///
    /// The x-axis spans the uniform-train period estimate, widened to the
    /// grid's highest period when buffers or relationships push it further.
    /// Assignments in zones that are not listed are left out.
    pub fn build(
        zones: &[Zone],
        wagons: &[Wagon],
        assignments: &[Assignment],
        takt_time_days: i64,
    ) -> Self {
        let mut zone_order: Vec<&Zone> = zones.iter().collect();
        zone_order.sort_by_key(|z| z.sequence);

        let rows: Vec<FlowlineZone> = zone_order
            .iter()
            .enumerate()
            .map(|(y, z)| FlowlineZone {
                id: z.id.clone(),
                name: z.name.clone(),
                sequence: z.sequence,
                y_index: y,
            })
            .collect();
        let row_of: HashMap<&str, usize> = rows.iter().map(|r| (r.id.as_str(), r.y_index)).collect();

        let lines: Vec<FlowlineWagon> = sequence_order(wagons)
            .into_iter()
            .map(|i| {
                let wagon = &wagons[i];
                let mut segments: Vec<FlowlineSegment> = assignments
                    .iter()
                    .filter(|a| a.wagon_id == wagon.id)
                    .filter_map(|a| {
                        let y = *row_of.get(a.zone_id.as_str())?;
                        let x_start = (a.period_number - 1) * takt_time_days;
                        Some(FlowlineSegment {
                            zone_id: a.zone_id.clone(),
                            y_index: y,
                            period_number: a.period_number,
                            x_start,
                            x_end: x_start + wagon.duration_days,
                            start: a.planned_start,
                            end: a.planned_end,
                        })
                    })
                    .collect();
                segments.sort_by_key(|s| (s.period_number, s.y_index));

                FlowlineWagon {
                    wagon_id: wagon.id.clone(),
                    trade_id: wagon.trade_id.clone(),
                    sequence: wagon.sequence,
                    segments,
                }
            })
            .collect();

        let max_period = assignments.iter().map(|a| a.period_number).max().unwrap_or(0);
        let periods = total_periods(zones.len(), wagons.len(), 0).max(max_period);

        Self {
            zones: rows,
            wagons: lines,
            takt_time_days,
            total_periods: periods,
            total_days: periods * takt_time_days,
        }
    }

    /// Finds the line of a wagon.
    pub fn wagon(&self, wagon_id: &str) -> Option<&FlowlineWagon> {
        self.wagons.iter().find(|w| w.wagon_id == wagon_id)
    }
}
