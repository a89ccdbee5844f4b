//! Period numbering strategies.
//!
//! The two grid generators number periods differently and the difference
//! is observable in their output:
//!
//! - **Positional**: `zone.sequence + wagon_index + buffer_offset`. The
//!   period is a property of the wagon's place in the train, independent of
//!   the dates it ends up on.
//! - **Chronological**: the dense rank (from 1) of the assignment's
//!   `planned_start` among all distinct start dates of the run. Two
//!   assignments starting on the same day share a period; gaps in the
//!   calendar do not create gaps in the numbering.
//!
//! For an unbuffered, uniform-duration train both strategies agree. With
//! buffers they do not: a buffer leaves an empty period in positional
//! numbering but no gap in chronological numbering.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Assignment;

/// Which numbering strategy produced a grid's period numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodNumbering {
    /// Formula-based, used by the flow grid generator.
    Positional,
    /// Rank of the start date, used by the relationship-aware scheduler.
    Chronological,
}

/// Positional period number of a wagon in a zone.
#[inline]
pub fn positional_period(zone_sequence: i32, wagon_index: usize, buffer_offset: i64) -> i64 {
    i64::from(zone_sequence) + wagon_index as i64 + buffer_offset
}

/// Cumulative `buffer_after` of all wagons before each position.
///
/// `buffers` are in train order; the first offset is always 0.
pub fn buffer_offsets(buffers: &[i64]) -> Vec<i64> {
    let mut offsets = Vec::with_capacity(buffers.len());
    let mut acc = 0;
    for b in buffers {
        offsets.push(acc);
        acc += b;
    }
    offsets
}

/// Replaces every period number with the chronological rank of its start.
pub fn renumber_chronologically(assignments: &mut [Assignment]) {
    let starts: BTreeSet<NaiveDate> = assignments.iter().map(|a| a.planned_start).collect();
    let ranks: Vec<NaiveDate> = starts.into_iter().collect();
    for a in assignments.iter_mut() {
        // Every start is in `ranks` by construction.
        let rank = ranks.partition_point(|d| *d < a.planned_start);
        a.period_number = rank as i64 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_positional_period() {
        assert_eq!(positional_period(1, 0, 0), 1);
        assert_eq!(positional_period(2, 1, 0), 3);
        assert_eq!(positional_period(1, 2, 3), 6);
    }

    #[test]
    fn test_buffer_offsets() {
        assert_eq!(buffer_offsets(&[]), Vec::<i64>::new());
        assert_eq!(buffer_offsets(&[0, 1, 0, 2]), vec![0, 0, 1, 1]);
        assert_eq!(buffer_offsets(&[2, 2]), vec![0, 2]);
    }

    #[test]
    fn test_chronological_dense_rank() {
        let mut assignments = vec![
            Assignment::new("A", "X", 0, date(3, 2), date(3, 6)),
            Assignment::new("A", "Y", 0, date(2, 16), date(2, 20)),
            Assignment::new("B", "X", 0, date(2, 16), date(2, 20)),
            Assignment::new("B", "Y", 0, date(4, 1), date(4, 3)),
        ];
        renumber_chronologically(&mut assignments);
        let periods: Vec<i64> = assignments.iter().map(|a| a.period_number).collect();
        assert_eq!(periods, vec![2, 1, 1, 3]);
    }

    #[test]
    fn test_chronological_empty() {
        let mut assignments: Vec<Assignment> = Vec::new();
        renumber_chronologically(&mut assignments);
        assert!(assignments.is_empty());
    }
}
