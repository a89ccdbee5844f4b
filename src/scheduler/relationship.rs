//! Relationship-aware takt scheduler.
//!
//! # Algorithm
//!
//! 1. Order wagons topologically over the relationship graph
//!    ([`topological_order`]). On a cycle, the [`CyclePolicy`] decides
//!    between scheduling in plain sequence order and failing.
//! 2. For each wagon in that order and each zone in sequence order, the
//!    earliest start is the latest of:
//!    - the plan start date,
//!    - the working day after the wagon's end in the previous zone
//!      (a crew is never in two zones at once),
//!    - for every constraining relationship whose predecessor is already
//!      placed in this zone, the start that relationship allows
//!      ([`Relationship::earliest_start`]).
//! 3. Periods are renumbered by start-date rank
//!    ([`PeriodNumbering::Chronological`]).
//!
//! `buffer_after` is not applied on this path; explicit relationships
//! (with their lags) take the place of positional buffers.
//!
//! # Complexity
//! O(w * z * r) where r is the number of incoming relationships per wagon.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::grid::AssignmentGrid;
use super::numbering::{renumber_chronologically, PeriodNumbering};
use super::topo::{topological_order, TopoOrder};
use super::{GeneratedGrid, GridGenerator, ScheduleContext};
use crate::config::{CyclePolicy, SoftRelationshipPolicy};
use crate::error::{PlanError, PlanResult};
use crate::models::{
    sequence_order, Assignment, DateWindow, Relationship, Schedule, Wagon, Zone,
};

/// Topological-sort and constraint-propagation scheduler.
#[derive(Debug, Clone, Default)]
pub struct RelationshipScheduler {
    cycle_policy: CyclePolicy,
    soft_relationships: SoftRelationshipPolicy,
}

impl RelationshipScheduler {
    /// Creates a scheduler with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cycle policy.
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Sets the soft relationship policy.
    pub fn with_soft_relationships(mut self, policy: SoftRelationshipPolicy) -> Self {
        self.soft_relationships = policy;
        self
    }

    /// Whether a relationship moves dates under the current policy.
    pub fn constrains(&self, relationship: &Relationship) -> bool {
        match self.soft_relationships {
            SoftRelationshipPolicy::Constrain => true,
            SoftRelationshipPolicy::Advisory => relationship.mandatory,
        }
    }

    /// Resolves the processing order, applying the cycle policy.
    ///
    /// Only constraining relationships take part in the ordering, so an
    /// advisory link can neither create a cycle nor reorder wagons.
    /// Returns the wagon indices and, on fallback, the wagons that were
    /// caught in the cycle.
    fn processing_order(
        &self,
        wagons: &[Wagon],
        relationships: &[Relationship],
    ) -> PlanResult<(Vec<usize>, Option<Vec<String>>)> {
        let constraining: Vec<Relationship> = relationships
            .iter()
            .filter(|r| self.constrains(r))
            .cloned()
            .collect();

        match topological_order(wagons, &constraining) {
            TopoOrder::Ordered(order) => Ok((order, None)),
            TopoOrder::CycleDetected(remaining) => match self.cycle_policy {
                CyclePolicy::FallbackToSequence => {
                    warn!(
                        wagons = ?remaining,
                        "relationship cycle detected, scheduling in sequence order"
                    );
                    Ok((sequence_order(wagons), Some(remaining)))
                }
                CyclePolicy::Reject => Err(PlanError::CyclicRelationships { wagons: remaining }),
            },
        }
    }

    /// Schedules every (wagon, zone) pair under the relationships.
    pub fn generate_grid(
        &self,
        zones: &[Zone],
        wagons: &[Wagon],
        relationships: &[Relationship],
        ctx: &ScheduleContext,
    ) -> PlanResult<GeneratedGrid> {
        let (order, unordered_wagons) = self.processing_order(wagons, relationships)?;

        let mut zone_order: Vec<usize> = (0..zones.len()).collect();
        zone_order.sort_by_key(|&z| zones[z].sequence);

        let index: HashMap<&str, usize> = wagons
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.as_str(), i))
            .collect();

        // successor index → (predecessor index, relationship)
        let mut incoming: Vec<Vec<(usize, &Relationship)>> = vec![Vec::new(); wagons.len()];
        for rel in relationships.iter().filter(|r| self.constrains(r)) {
            if let (Some(&pred), Some(&succ)) = (
                index.get(rel.predecessor_wagon_id.as_str()),
                index.get(rel.successor_wagon_id.as_str()),
            ) {
                incoming[succ].push((pred, rel));
            }
        }

        let week = &ctx.working_week;
        let mut grid = AssignmentGrid::new(wagons.len(), zones.len());
        let mut assignments = Vec::with_capacity(wagons.len() * zones.len());

        for &w in &order {
            let wagon = &wagons[w];
            let mut previous: Option<DateWindow> = None;

            for &z in &zone_order {
                let mut earliest = ctx.start_date;

                if let Some(prev) = previous {
                    earliest = earliest.max(week.add_working_days(prev.end, 1));
                }

                for &(pred, rel) in &incoming[w] {
                    if let Some(pred_window) = grid.get(pred, z) {
                        earliest =
                            earliest.max(rel.earliest_start(pred_window, wagon.duration_days, week));
                    }
                }

                let window = DateWindow::new(earliest, ctx.finish_date(earliest, wagon.duration_days));
                grid.set(w, z, window);
                previous = Some(window);
                assignments.push(Assignment::new(
                    &zones[z].id,
                    &wagon.id,
                    0,
                    window.start,
                    window.end,
                ));
            }
        }

        renumber_chronologically(&mut assignments);
        let schedule = Schedule::from_assignments(assignments);

        debug!(
            zones = zones.len(),
            wagons = wagons.len(),
            relationships = relationships.len(),
            cycle = unordered_wagons.is_some(),
            max_period = schedule.max_period(),
            "relationship grid generated"
        );

        Ok(GeneratedGrid {
            schedule,
            numbering: PeriodNumbering::Chronological,
            unordered_wagons,
        })
    }
}

impl GridGenerator for RelationshipScheduler {
    fn name(&self) -> &'static str {
        "relationship"
    }

    fn numbering(&self) -> PeriodNumbering {
        PeriodNumbering::Chronological
    }

    fn generate(
        &self,
        zones: &[Zone],
        wagons: &[Wagon],
        relationships: &[Relationship],
        ctx: &ScheduleContext,
    ) -> PlanResult<GeneratedGrid> {
        self.generate_grid(zones, wagons, relationships, ctx)
    }
}
