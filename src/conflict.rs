//! Conflict detection over a generated takt grid.
//!
//! # Checks
//!
//! | Check | Finding |
//! |-------|---------|
//! | Trade stacking | Two wagons share a zone on overlapping days |
//! | Predecessor order | A wagon starts before a predecessor trade finished in the zone |
//! | Buffers | Adjacent wagons without buffer at a short takt time |
//! | Soft relationships | A successor starts earlier than a soft relationship allows |
//!
//! The detector never changes the grid. It runs once per phase group.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{
    sequence_order, Assignment, BufferWarning, PlanWarnings, PredecessorViolation, Relationship,
    RelationshipViolation, Severity, Trade, TradeStackingConflict, Wagon, WorkingWeek,
};

/// Takt times at or below this many days call for a one-period buffer.
const SHORT_TAKT_DAYS: i64 = 3;

/// Inspects a grid for stacking, ordering and buffer problems.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    takt_time_days: i64,
    working_week: WorkingWeek,
    advisory_relationships: bool,
}

impl ConflictDetector {
    /// Creates a detector for a plan with the given takt time.
    pub fn new(takt_time_days: i64) -> Self {
        Self {
            takt_time_days,
            working_week: WorkingWeek::mon_to_fri(),
            advisory_relationships: false,
        }
    }

    /// Sets the working week used for relationship checks.
    ///
    /// The week must have at least one working day; working-day stepping
    /// over an empty week never terminates.
    /// [`validate_request`](crate::validation::validate_request) rejects
    /// such weeks before a detector is built.
    pub fn with_working_week(mut self, week: WorkingWeek) -> Self {
        self.working_week = week;
        self
    }

    /// Enables the soft relationship pass in [`validate`](Self::validate).
    pub fn with_advisory_relationships(mut self, enabled: bool) -> Self {
        self.advisory_relationships = enabled;
        self
    }

    /// Buffer recommended for the takt time, in periods.
    pub fn recommended_buffer(&self) -> i64 {
        if self.takt_time_days <= SHORT_TAKT_DAYS {
            1
        } else {
            0
        }
    }

    /// Finds every pair of assignments sharing a zone on overlapping days.
    pub fn detect_trade_stacking(&self, assignments: &[Assignment]) -> Vec<TradeStackingConflict> {
        let mut by_zone: BTreeMap<&str, Vec<&Assignment>> = BTreeMap::new();
        for a in assignments {
            by_zone.entry(a.zone_id.as_str()).or_default().push(a);
        }

        let mut conflicts = Vec::new();
        for (zone_id, list) in by_zone {
            for (i, a1) in list.iter().enumerate() {
                for a2 in &list[i + 1..] {
                    if let Some(overlap) = a1.window().intersection(&a2.window()) {
                        conflicts.push(TradeStackingConflict {
                            zone_id: zone_id.to_string(),
                            wagon_1: a1.wagon_id.clone(),
                            wagon_2: a2.wagon_id.clone(),
                            period_1: a1.period_number,
                            period_2: a2.period_number,
                            overlap_start: overlap.start,
                            overlap_end: overlap.end,
                        });
                    }
                }
            }
        }
        conflicts
    }

    /// Finds wagons starting in a zone before a predecessor trade ended there.
    ///
    /// Predecessors come from [`Trade::predecessor_codes`]; wagons whose
    /// trade is unknown are skipped.
    pub fn detect_predecessor_violations(
        &self,
        assignments: &[Assignment],
        wagons: &[Wagon],
        trades: &[Trade],
    ) -> Vec<PredecessorViolation> {
        let trade_by_id: HashMap<&str, &Trade> = trades.iter().map(|t| (t.id.as_str(), t)).collect();
        let placed = index_assignments(assignments);

        let mut violations = Vec::new();
        for wagon in wagons {
            let Some(trade) = trade_by_id.get(wagon.trade_id.as_str()) else {
                continue;
            };

            for code in &trade.predecessor_codes {
                let predecessors = wagons.iter().filter(|w| {
                    w.id != wagon.id
                        && trade_by_id
                            .get(w.trade_id.as_str())
                            .is_some_and(|t| &t.code == code)
                });

                for pred in predecessors {
                    for a in assignments.iter().filter(|a| a.wagon_id == wagon.id) {
                        let Some(p) = placed.get(&(pred.id.as_str(), a.zone_id.as_str())) else {
                            continue;
                        };
                        if a.planned_start < p.planned_end {
                            violations.push(PredecessorViolation {
                                zone_id: a.zone_id.clone(),
                                wagon_id: wagon.id.clone(),
                                predecessor_wagon_id: pred.id.clone(),
                                predecessor_code: code.clone(),
                                overlap_days: days_between(a.planned_start, p.planned_end),
                            });
                        }
                    }
                }
            }
        }
        violations
    }

    /// Flags sequence-adjacent wagons with no buffer when one is recommended.
    pub fn check_buffers(&self, wagons: &[Wagon]) -> Vec<BufferWarning> {
        let recommended = self.recommended_buffer();
        if recommended == 0 {
            return Vec::new();
        }

        let order = sequence_order(wagons);
        order
            .windows(2)
            .filter_map(|pair| {
                let (current, next) = (&wagons[pair[0]], &wagons[pair[1]]);
                let buffer_days = current.buffer_after * self.takt_time_days;
                (buffer_days == 0).then(|| BufferWarning {
                    wagon_id: current.id.clone(),
                    next_wagon_id: next.id.clone(),
                    current_buffer_days: buffer_days,
                    recommended_buffer: recommended,
                    severity: Severity::Warning,
                })
            })
            .collect()
    }

    /// Finds soft relationships the grid does not honor.
    ///
    /// Mandatory relationships are skipped; the scheduler already enforced them.
    /// Requires a non-empty working week.
    pub fn detect_relationship_violations(
        &self,
        assignments: &[Assignment],
        wagons: &[Wagon],
        relationships: &[Relationship],
    ) -> Vec<RelationshipViolation> {
        let wagon_by_id: HashMap<&str, &Wagon> = wagons.iter().map(|w| (w.id.as_str(), w)).collect();
        let placed = index_assignments(assignments);

        let mut violations = Vec::new();
        for rel in relationships.iter().filter(|r| !r.mandatory) {
            let Some(successor) = wagon_by_id.get(rel.successor_wagon_id.as_str()) else {
                continue;
            };

            for a in assignments
                .iter()
                .filter(|a| a.wagon_id == rel.successor_wagon_id)
            {
                let Some(p) = placed.get(&(rel.predecessor_wagon_id.as_str(), a.zone_id.as_str()))
                else {
                    continue;
                };
                let required =
                    rel.earliest_start(p.window(), successor.duration_days, &self.working_week);
                if a.planned_start < required {
                    violations.push(RelationshipViolation {
                        zone_id: a.zone_id.clone(),
                        relationship: rel.clone(),
                        required_start: required,
                        actual_start: a.planned_start,
                        slip_days: days_between(a.planned_start, required),
                    });
                }
            }
        }
        violations
    }

    /// Runs every check over one phase group.
    pub fn validate(
        &self,
        assignments: &[Assignment],
        wagons: &[Wagon],
        trades: &[Trade],
        relationships: &[Relationship],
    ) -> PlanWarnings {
        PlanWarnings {
            stacking_conflicts: self.detect_trade_stacking(assignments),
            predecessor_violations: self.detect_predecessor_violations(assignments, wagons, trades),
            buffer_warnings: self.check_buffers(wagons),
            relationship_violations: if self.advisory_relationships {
                self.detect_relationship_violations(assignments, wagons, relationships)
            } else {
                Vec::new()
            },
        }
    }
}

fn index_assignments(assignments: &[Assignment]) -> HashMap<(&str, &str), &Assignment> {
    assignments
        .iter()
        .map(|a| ((a.wagon_id.as_str(), a.zone_id.as_str()), a))
        .collect()
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
