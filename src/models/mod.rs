//! Takt planning domain models.
//!
//! Provides the value types exchanged with the scheduling engine. All of
//! them are snapshots supplied by (or handed back to) the caller; the
//! engine never mutates its inputs.
//!
//! # Domain Mappings
//!
//! | takt-flow | Lean construction | Job-shop analogue |
//! |-----------|-------------------|-------------------|
//! | Zone | Takt area / LBS node | Machine |
//! | Wagon | Trade work package | Job |
//! | Assignment | Wagon in area | Operation on machine |
//! | Relationship | Logic link | Precedence arc |

mod calendar;
mod relationship;
mod schedule;
mod trade;
mod wagon;
mod warning;
mod zone;

pub use calendar::{DateWindow, WorkingWeek};
pub use relationship::{ParseRelationshipKindError, Relationship, RelationshipKind};
pub use schedule::{Assignment, Schedule};
pub use trade::Trade;
pub use wagon::Wagon;
pub(crate) use wagon::sequence_order;
pub use warning::{
    BufferWarning, PlanWarnings, PredecessorViolation, RelationshipViolation, Severity,
    TradeStackingConflict,
};
pub use zone::{LocationType, Zone};
