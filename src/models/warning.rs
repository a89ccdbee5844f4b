//! Plan warnings.
//!
//! Findings of the conflict detector. None of them invalidate a grid by
//! themselves; the caller decides what to surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Relationship;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Should be reviewed.
    Warning,
    /// Must be resolved before execution.
    Critical,
}

/// Two wagons occupying the same zone on overlapping days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeStackingConflict {
    /// Zone in which both wagons overlap.
    pub zone_id: String,
    /// First wagon.
    pub wagon_1: String,
    /// Second wagon.
    pub wagon_2: String,
    /// Period of the first wagon's assignment.
    pub period_1: i64,
    /// Period of the second wagon's assignment.
    pub period_2: i64,
    /// First shared day.
    pub overlap_start: NaiveDate,
    /// Last shared day.
    pub overlap_end: NaiveDate,
}

/// A wagon starting in a zone before its trade-level predecessor finished there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredecessorViolation {
    /// Zone of the violation.
    pub zone_id: String,
    /// Wagon that starts too early.
    pub wagon_id: String,
    /// Wagon of the predecessor trade.
    pub predecessor_wagon_id: String,
    /// Trade code declared as predecessor.
    pub predecessor_code: String,
    /// Calendar days between the wagon's start and the predecessor's end.
    pub overlap_days: i64,
}

/// Two adjacent wagons with no buffer although one is recommended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BufferWarning {
    /// Leading wagon.
    pub wagon_id: String,
    /// Following wagon.
    pub next_wagon_id: String,
    /// Buffer currently planned, in working days.
    pub current_buffer_days: i64,
    /// Buffer recommended for the plan's takt time, in takt periods.
    pub recommended_buffer: i64,
    /// Finding severity.
    pub severity: Severity,
}

/// A soft relationship that the grid does not honor.
///
/// Only produced when soft relationships are advisory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipViolation {
    /// Zone of the violation.
    pub zone_id: String,
    /// The relationship that is not honored.
    pub relationship: Relationship,
    /// Earliest start the relationship asks for.
    pub required_start: NaiveDate,
    /// Planned start of the successor.
    pub actual_start: NaiveDate,
    /// Calendar days the successor would have to slip.
    pub slip_days: i64,
}

/// All findings for a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanWarnings {
    /// Overlapping occupancy.
    pub stacking_conflicts: Vec<TradeStackingConflict>,
    /// Trade-level ordering violations.
    pub predecessor_violations: Vec<PredecessorViolation>,
    /// Missing-buffer warnings.
    pub buffer_warnings: Vec<BufferWarning>,
    /// Soft relationships not honored.
    #[serde(default)]
    pub relationship_violations: Vec<RelationshipViolation>,
}

impl PlanWarnings {
    /// Creates an empty warning set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends all findings of another set.
    pub fn merge(&mut self, other: PlanWarnings) {
        self.stacking_conflicts.extend(other.stacking_conflicts);
        self.predecessor_violations
            .extend(other.predecessor_violations);
        self.buffer_warnings.extend(other.buffer_warnings);
        self.relationship_violations
            .extend(other.relationship_violations);
    }

    /// Total number of findings.
    pub fn len(&self) -> usize {
        self.stacking_conflicts.len()
            + self.predecessor_violations.len()
            + self.buffer_warnings.len()
            + self.relationship_violations.len()
    }

    /// Whether there are no findings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the grid is free of stacking and ordering problems.
    ///
    /// Buffer warnings and advisory relationship findings do not count.
    pub fn is_conflict_free(&self) -> bool {
        self.stacking_conflicts.is_empty() && self.predecessor_violations.is_empty()
    }
}
