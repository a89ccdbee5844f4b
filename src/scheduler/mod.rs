//! Takt grid generators.
//!
//! Two generators implement [`GridGenerator`]:
//!
//! - [`FlowGridGenerator`]: the formula-based wagon train, used when a
//!   phase group has no relationships.
//! - [`RelationshipScheduler`]: topological ordering plus constraint
//!   propagation, used when a phase group has relationships.
//!
//! They differ in how periods are numbered; see [`numbering`].
//!
//! # References
//!
//! - Frandson, Berghede & Tommelein (2013), "Takt time planning for construction
//!   of exterior cladding"
//! - Binninger, Dlouhy & Haghsheno (2017), "Technical takt planning and takt control
//!   in construction"

mod context;
mod flow;
mod grid;
pub mod numbering;
mod relationship;
mod summary;
mod topo;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

pub use context::ScheduleContext;
pub use flow::FlowGridGenerator;
pub use grid::AssignmentGrid;
pub use numbering::PeriodNumbering;
pub use relationship::RelationshipScheduler;
pub use summary::{calculate_end_date, total_periods, PlanSummary};
pub use topo::{topological_order, TopoOrder};

use crate::error::PlanResult;
use crate::models::{Relationship, Schedule, Wagon, Zone};

/// Output of one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedGrid {
    /// The assignments.
    pub schedule: Schedule,
    /// How `period_number` was derived.
    pub numbering: PeriodNumbering,
    /// Wagons caught in a relationship cycle, if the run fell back to
    /// sequence order.
    pub unordered_wagons: Option<Vec<String>>,
}

/// A strategy that turns zones and wagons into a takt grid.
pub trait GridGenerator: Send + Sync + Debug {
    /// Generator name (e.g., "flow").
    fn name(&self) -> &'static str;

    /// Numbering strategy of the produced periods.
    fn numbering(&self) -> PeriodNumbering;

    /// Generates one assignment per (wagon, zone) pair.
    fn generate(
        &self,
        zones: &[Zone],
        wagons: &[Wagon],
        relationships: &[Relationship],
        ctx: &ScheduleContext,
    ) -> PlanResult<GeneratedGrid>;
}
