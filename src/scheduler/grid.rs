//! Two-dimensional assignment index.
//!
//! An arena of occupancy windows addressed by `(wagon_index, zone_index)`,
//! where both indices refer to positions in the input slices. Lookups are
//! O(1) and never go through composite string keys.

use crate::models::DateWindow;

/// Dense wagon × zone occupancy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentGrid {
    zone_count: usize,
    cells: Vec<Option<DateWindow>>,
}

impl AssignmentGrid {
    /// Creates an empty grid.
    pub fn new(wagon_count: usize, zone_count: usize) -> Self {
        Self {
            zone_count,
            cells: vec![None; wagon_count * zone_count],
        }
    }

    #[inline]
    fn slot(&self, wagon: usize, zone: usize) -> usize {
        debug_assert!(zone < self.zone_count);
        wagon * self.zone_count + zone
    }

    /// Window of a wagon in a zone, if already placed.
    #[inline]
    pub fn get(&self, wagon: usize, zone: usize) -> Option<DateWindow> {
        self.cells.get(self.slot(wagon, zone)).copied().flatten()
    }

    /// Places a wagon in a zone, replacing any earlier placement.
    pub fn set(&mut self, wagon: usize, zone: usize, window: DateWindow) {
        let slot = self.slot(wagon, zone);
        self.cells[slot] = Some(window);
    }

    /// Number of placed cells.
    pub fn placed(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every (wagon, zone) cell is placed.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(day: u32) -> DateWindow {
        let d = NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
        DateWindow::new(d, d)
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = AssignmentGrid::new(2, 3);
        assert_eq!(grid.placed(), 0);
        assert!(grid.get(1, 2).is_none());

        grid.set(1, 2, window(16));
        grid.set(0, 2, window(17));
        assert_eq!(grid.get(1, 2), Some(window(16)));
        assert_eq!(grid.get(0, 2), Some(window(17)));
        assert!(grid.get(1, 0).is_none());
        assert_eq!(grid.placed(), 2);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_complete() {
        let mut grid = AssignmentGrid::new(1, 2);
        grid.set(0, 0, window(16));
        grid.set(0, 1, window(17));
        assert!(grid.is_complete());
    }
}
