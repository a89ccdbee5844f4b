//! Planner configuration.
//!
//! Everything that tunes a scheduling run but is not part of the zone and
//! wagon snapshots. All fields have defaults, so a partial JSON object
//! (or none at all) is a valid configuration.
//!
//! ```
//! use takt_flow::config::{CyclePolicy, PlannerConfig};
//!
//! let config: PlannerConfig =
//!     serde_json::from_str(r#"{"takt_time_days": 3, "cycle_policy": "reject"}"#).unwrap();
//! assert_eq!(config.takt_time_days, 3);
//! assert_eq!(config.cycle_policy, CyclePolicy::Reject);
//! assert_eq!(config.working_week.days_per_week(), 5);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WorkingWeek;
use crate::scheduler::ScheduleContext;

/// What to do when relationships form a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Schedule the group in plain wagon sequence order and report the cycle.
    #[default]
    FallbackToSequence,
    /// Fail the run with [`PlanError::CyclicRelationships`](crate::PlanError::CyclicRelationships).
    Reject,
}

/// How non-mandatory relationships are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftRelationshipPolicy {
    /// Soft relationships delay the schedule exactly like mandatory ones.
    #[default]
    Constrain,
    /// Only mandatory relationships move dates; soft ones are reported
    /// as [`RelationshipViolation`](crate::models::RelationshipViolation)s.
    Advisory,
}

/// Tuning for a takt planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Working days per takt period.
    pub takt_time_days: i64,
    /// Weekdays that count as working days.
    pub working_week: WorkingWeek,
    /// Default buffer (in periods) between trades, used by period estimates.
    pub buffer_size: i64,
    /// Cycle handling for relationship graphs.
    pub cycle_policy: CyclePolicy,
    /// Handling of `mandatory = false` relationships.
    pub soft_relationships: SoftRelationshipPolicy,
    /// Split zones and wagons into substructure / shell / fit-out trains.
    pub partition_phases: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            takt_time_days: 5,
            working_week: WorkingWeek::mon_to_fri(),
            buffer_size: 0,
            cycle_policy: CyclePolicy::default(),
            soft_relationships: SoftRelationshipPolicy::default(),
            partition_phases: true,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the takt time.
    pub fn with_takt_time(mut self, days: i64) -> Self {
        self.takt_time_days = days;
        self
    }

    /// Sets the working week.
    pub fn with_working_week(mut self, week: WorkingWeek) -> Self {
        self.working_week = week;
        self
    }

    /// Sets the default buffer size.
    pub fn with_buffer_size(mut self, periods: i64) -> Self {
        self.buffer_size = periods;
        self
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

    /// Enables or disables phase partitioning.
    pub fn with_phase_partitioning(mut self, enabled: bool) -> Self {
        self.partition_phases = enabled;
        self
    }

    /// Scheduling context for a run starting on `start_date`.
    pub fn context(&self, start_date: NaiveDate) -> ScheduleContext {
        ScheduleContext::new(start_date, self.takt_time_days).with_working_week(self.working_week)
    }
}
