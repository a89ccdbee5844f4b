//! Takt planning front door.
//!
//! # Pipeline
//!
//! 1. Validate the request ([`validate_request`]).
//! 2. Split zones and wagons into phase groups ([`PhasePartitioner`]).
//! 3. Generate each group's grid: [`RelationshipScheduler`] if the group
//!    has relationships that constrain dates, [`FlowGridGenerator`] otherwise.
//! 4. Concatenate the grids and run the [`ConflictDetector`] per group.
//!
//! Groups are independent trains. Each one starts on the plan start date
//! and never shares zones or wagons with another group.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{PlannerConfig, SoftRelationshipPolicy};
use crate::conflict::ConflictDetector;
use crate::error::PlanResult;
use crate::flowline::FlowlineChart;
use crate::models::{Assignment, PlanWarnings, Relationship, Schedule, Trade, Wagon, Zone};
use crate::phase::{PhaseGroup, PhasePartition, PhasePartitioner};
use crate::scheduler::{
    calculate_end_date, total_periods, FlowGridGenerator, GridGenerator, PeriodNumbering,
    PlanSummary, RelationshipScheduler,
};
use crate::validation::validate_request;

/// Input of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Zones to schedule.
    pub zones: Vec<Zone>,
    /// Wagons to schedule.
    pub wagons: Vec<Wagon>,
    /// Trade metadata for phase classification and predecessor checks.
    #[serde(default)]
    pub trades: Vec<Trade>,
    /// Precedence relationships between wagons.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Run configuration.
    #[serde(default)]
    pub config: PlannerConfig,
}

impl PlanRequest {
    /// Creates a request with default configuration.
    pub fn new(zones: Vec<Zone>, wagons: Vec<Wagon>, start_date: NaiveDate) -> Self {
        Self {
            zones,
            wagons,
            trades: Vec::new(),
            relationships: Vec::new(),
            start_date,
            config: PlannerConfig::default(),
        }
    }

    /// Sets the trades.
    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    /// Sets the relationships.
    pub fn with_relationships(mut self, relationships: Vec<Relationship>) -> Self {
        self.relationships = relationships;
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Period estimate for a single uniform train over all zones and wagons.
    pub fn estimated_total_periods(&self) -> i64 {
        total_periods(self.zones.len(), self.wagons.len(), self.config.buffer_size)
    }

    /// End date of the uniform-train estimate.
    pub fn estimated_end_date(&self) -> NaiveDate {
        calculate_end_date(
            self.start_date,
            self.estimated_total_periods(),
            self.config.takt_time_days,
            &self.config.working_week,
        )
    }

    fn partitions(&self) -> Vec<PhasePartition> {
        if self.config.partition_phases {
            PhasePartitioner::new(&self.trades).partition(
                &self.zones,
                &self.wagons,
                &self.relationships,
            )
        } else {
            PhasePartitioner::single(&self.zones, &self.wagons, &self.relationships)
        }
    }
}

/// How one phase group was scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Phase group.
    pub phase: PhaseGroup,
    /// Generator that produced the grid.
    pub generator: String,
    /// Period numbering of the group's assignments.
    pub numbering: PeriodNumbering,
    /// Zones in the group.
    pub zone_count: usize,
    /// Wagons in the group.
    pub wagon_count: usize,
    /// Assignments produced.
    pub assignment_count: usize,
    /// Wagons caught in a relationship cycle, if the group fell back to
    /// sequence order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unordered_wagons: Option<Vec<String>>,
}

/// Result of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// All assignments, grouped by phase in [`PhaseGroup::ALL`] order.
    pub assignments: Vec<Assignment>,
    /// Findings of the conflict detector.
    pub warnings: PlanWarnings,
    /// Highest period number over all groups.
    pub total_periods: i64,
    /// Latest planned end, `None` for an empty grid.
    pub end_date: Option<NaiveDate>,
    /// Per-group reports.
    pub groups: Vec<GroupReport>,
}

impl PlanOutcome {
    /// The assignments as a [`Schedule`].
    pub fn schedule(&self) -> Schedule {
        Schedule::from_assignments(self.assignments.clone())
    }

    /// Realised figures of the grid.
    pub fn summary(&self, request: &PlanRequest) -> PlanSummary {
        PlanSummary::calculate(&self.schedule(), &request.config.working_week)
    }

    /// Flowline coordinates of one phase group's train.
    ///
    /// `None` if the group was not scheduled.
    pub fn flowline(&self, request: &PlanRequest, phase: PhaseGroup) -> Option<FlowlineChart> {
        request
            .partitions()
            .into_iter()
            .find(|p| p.phase == phase)
            .map(|p| self.group_flowline(request, &p))
    }

    /// Flowline coordinates of every train, in [`PhaseGroup::ALL`] order.
    pub fn flowlines(&self, request: &PlanRequest) -> Vec<(PhaseGroup, FlowlineChart)> {
        request
            .partitions()
            .iter()
            .map(|p| (p.phase, self.group_flowline(request, p)))
            .collect()
    }

    fn group_flowline(&self, request: &PlanRequest, partition: &PhasePartition) -> FlowlineChart {
        FlowlineChart::build(
            &partition.zones,
            &partition.wagons,
            &partition.assignments_of(&self.assignments),
            request.config.takt_time_days,
        )
    }

    /// Whether any group fell back to sequence order.
    pub fn has_cycle_fallback(&self) -> bool {
        self.groups.iter().any(|g| g.unordered_wagons.is_some())
    }
}

/// Takt planner.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use takt_flow::models::{Wagon, Zone};
/// use takt_flow::planner::{PlanRequest, TaktPlanner};
///
/// let zones = vec![Zone::new("A", "Level 1", 1), Zone::new("B", "Level 2", 2)];
/// let wagons = vec![
///     Wagon::new("X", "T1", 1).with_duration(5),
///     Wagon::new("Y", "T2", 2).with_duration(5),
/// ];
/// let start = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
///
/// let outcome = TaktPlanner::new()
///     .plan(&PlanRequest::new(zones, wagons, start))
///     .unwrap();
/// assert_eq!(outcome.assignments.len(), 4);
/// assert_eq!(outcome.total_periods, 3);
/// assert_eq!(outcome.end_date, NaiveDate::from_ymd_opt(2026, 3, 6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaktPlanner;

impl TaktPlanner {
    /// Creates a planner.
    pub fn new() -> Self {
        Self
    }

    /// Generator for a group under the run configuration.
    ///
    /// Groups whose relationships are all advisory get the flow grid.
    fn generator_for(config: &PlannerConfig, partition: &PhasePartition) -> Box<dyn GridGenerator> {
        let scheduler = RelationshipScheduler::new()
            .with_cycle_policy(config.cycle_policy)
            .with_soft_relationships(config.soft_relationships);

        if partition.relationships.iter().any(|r| scheduler.constrains(r)) {
            Box::new(scheduler)
        } else {
            Box::new(FlowGridGenerator::new())
        }
    }

    fn detector(config: &PlannerConfig) -> ConflictDetector {
        ConflictDetector::new(config.takt_time_days)
            .with_working_week(config.working_week)
            .with_advisory_relationships(
                config.soft_relationships == SoftRelationshipPolicy::Advisory,
            )
    }

    /// Generates and checks the takt grid for a request.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<PlanOutcome> {
        validate_request(request)?;

        let config = &request.config;
        let ctx = config.context(request.start_date);
        let detector = Self::detector(config);

        let mut assignments = Vec::new();
        let mut warnings = PlanWarnings::new();
        let mut groups = Vec::new();

        for partition in request.partitions() {
            let generator = Self::generator_for(config, &partition);
            let grid = generator.generate(
                &partition.zones,
                &partition.wagons,
                &partition.relationships,
                &ctx,
            )?;

            debug!(
                phase = %partition.phase,
                zones = partition.zones.len(),
                wagons = partition.wagons.len(),
                relationships = partition.relationships.len(),
                generator = generator.name(),
                "phase group scheduled"
            );

            warnings.merge(detector.validate(
                &grid.schedule.assignments,
                &partition.wagons,
                &request.trades,
                &partition.relationships,
            ));

            groups.push(GroupReport {
                phase: partition.phase,
                generator: generator.name().to_string(),
                numbering: grid.numbering,
                zone_count: partition.zones.len(),
                wagon_count: partition.wagons.len(),
                assignment_count: grid.schedule.assignment_count(),
                unordered_wagons: grid.unordered_wagons,
            });
            assignments.extend(grid.schedule.assignments);
        }

        let schedule = Schedule::from_assignments(assignments);
        let outcome = PlanOutcome {
            total_periods: schedule.max_period(),
            end_date: schedule.end_date(),
            assignments: schedule.assignments,
            warnings,
            groups,
        };

        info!(
            assignments = outcome.assignments.len(),
            groups = outcome.groups.len(),
            total_periods = outcome.total_periods,
            end_date = ?outcome.end_date,
            stacking_conflicts = outcome.warnings.stacking_conflicts.len(),
            predecessor_violations = outcome.warnings.predecessor_violations.len(),
            buffer_warnings = outcome.warnings.buffer_warnings.len(),
            "takt plan generated"
        );

        Ok(outcome)
    }

    /// Re-checks an existing grid (e.g. after manual edits) against a request.
    ///
    /// The request is validated first, as in [`plan`](Self::plan).
    /// Assignments are matched to phase groups by zone and wagon; those
    /// outside every group are ignored.
    pub fn validate_plan(
        &self,
        request: &PlanRequest,
        assignments: &[Assignment],
    ) -> PlanResult<PlanWarnings> {
        validate_request(request)?;

        let detector = Self::detector(&request.config);
        let mut warnings = PlanWarnings::new();

        for partition in request.partitions() {
            warnings.merge(detector.validate(
                &partition.assignments_of(assignments),
                &partition.wagons,
                &request.trades,
                &partition.relationships,
            ));
        }

        Ok(warnings)
    }
}
