//! Takt (flow-line) scheduling engine for construction projects.
//!
//! Given zones (physical work areas) and wagons (one recurring work package
//! per trade), computes which wagon occupies which zone in which takt period,
//! with concrete working-day dates, and checks the result for conflicts.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Zone`, `Wagon`, `Trade`, `Relationship`,
//!   `Assignment`, `Schedule`, `WorkingWeek`, warnings
//! - **`scheduler`**: Grid generators (`FlowGridGenerator`, `RelationshipScheduler`),
//!   topological ordering, period numbering, plan summaries
//! - **`phase`**: Partitioning into substructure / shell / fit-out trains
//! - **`conflict`**: Trade stacking, predecessor, buffer and soft relationship checks
//! - **`flowline`**: Flowline chart coordinates
//! - **`validation`**: Input integrity checks (duplicate IDs, references, durations)
//! - **`planner`**: `TaktPlanner`, the validated end-to-end pipeline
//!
//! # Architecture
//!
//! The engine is pure and synchronous: it performs no I/O, holds no state
//! between runs and never mutates its inputs. Persistence, transport and
//! rendering belong to the caller. Diagnostics are emitted as `tracing`
//! events; no subscriber is installed.
//!
//! # References
//!
//! - Frandson, Berghede & Tommelein (2013), "Takt time planning for construction
//!   of exterior cladding"
//! - Binninger, Dlouhy & Haghsheno (2017), "Technical takt planning and takt control
//!   in construction"
//! - Kenley & Seppänen (2010), "Location-Based Management for Construction"

pub mod config;
pub mod conflict;
pub mod error;
pub mod flowline;
pub mod models;
pub mod phase;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{PlanError, PlanResult};
pub use planner::{PlanOutcome, PlanRequest, TaktPlanner};
