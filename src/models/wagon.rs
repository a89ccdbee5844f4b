//! Wagon model.
//!
//! A wagon is one trade's recurring package of work. The wagon train moves
//! through the zones one takt period at a time.

use serde::{Deserialize, Serialize};

/// A trade's recurring unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wagon {
    /// Unique wagon identifier.
    pub id: String,
    /// Trade performing the work.
    pub trade_id: String,
    /// 1-based position in the wagon train.
    pub sequence: i32,
    /// Working days of work per zone.
    pub duration_days: i64,
    /// Idle takt periods inserted after this wagon before the next one.
    #[serde(default)]
    pub buffer_after: i64,
}

impl Wagon {
    /// Creates a wagon with a one-day duration and no buffer.
    pub fn new(id: impl Into<String>, trade_id: impl Into<String>, sequence: i32) -> Self {
        Self {
            id: id.into(),
            trade_id: trade_id.into(),
            sequence,
            duration_days: 1,
            buffer_after: 0,
        }
    }

    /// Sets the duration in working days.
    pub fn with_duration(mut self, duration_days: i64) -> Self {
        self.duration_days = duration_days;
        self
    }

    /// Sets the buffer (in takt periods) after this wagon.
    pub fn with_buffer_after(mut self, periods: i64) -> Self {
        self.buffer_after = periods;
        self
    }
}

/// Returns wagon indices sorted by `sequence` (stable on ties).
pub(crate) fn sequence_order(wagons: &[Wagon]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..wagons.len()).collect();
    order.sort_by_key(|&i| wagons[i].sequence);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wagon_builder() {
        let w = Wagon::new("W1", "T-DRY", 3)
            .with_duration(4)
            .with_buffer_after(1);
        assert_eq!(w.trade_id, "T-DRY");
        assert_eq!(w.sequence, 3);
        assert_eq!(w.duration_days, 4);
        assert_eq!(w.buffer_after, 1);
    }

    #[test]
    fn test_sequence_order_is_stable() {
        let wagons = vec![
            Wagon::new("C", "t", 2),
            Wagon::new("A", "t", 1),
            Wagon::new("B", "t", 2),
        ];
        assert_eq!(sequence_order(&wagons), vec![1, 0, 2]);
    }
}
