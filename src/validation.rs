//! Input validation for takt plans.
//!
//! Checks structural integrity of zones, wagons, trades and relationships
//! before scheduling. Detects:
//! - Duplicate IDs
//! - Non-positive sequences, durations above [`MAX_DURATION_DAYS`]
//! - Negative buffers
//! - Relationships to unknown wagons, or from a wagon to itself
//! - Wagons referencing unknown trades (only when trades are supplied)
//!
//! Relationship cycles are not an input error; the planner's
//! [`CyclePolicy`](crate::config::CyclePolicy) decides how to handle them.

use std::collections::HashSet;

use crate::error::{PlanError, PlanResult};
use crate::models::{Relationship, Trade, Wagon, Zone};
use crate::planner::PlanRequest;

/// Longest wagon duration accepted, in working days.
pub const MAX_DURATION_DAYS: i64 = 30;

/// Longest takt time accepted, in working days.
pub const MAX_TAKT_TIME_DAYS: i64 = 30;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A zone or wagon sequence below 1.
    InvalidSequence,
    /// A wagon duration outside 1..=[`MAX_DURATION_DAYS`].
    InvalidDuration,
    /// A negative buffer.
    InvalidBuffer,
    /// A relationship references a wagon that doesn't exist.
    UnknownWagon,
    /// A relationship links a wagon to itself.
    SelfRelationship,
    /// A wagon references a trade that doesn't exist.
    UnknownTrade,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the zone, wagon, trade and relationship snapshots.
///
/// Checks:
/// 1. No duplicate zone, wagon or trade IDs
/// 2. Zone and wagon sequences are at least 1
/// 3. Wagon durations are within 1..=[`MAX_DURATION_DAYS`] working days
/// 4. Wagon buffers are not negative
/// 5. Wagon trade references resolve (skipped when `trades` is empty)
/// 6. Relationship endpoints resolve and differ
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    zones: &[Zone],
    wagons: &[Wagon],
    trades: &[Trade],
    relationships: &[Relationship],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut zone_ids = HashSet::new();
    for z in zones {
        if !zone_ids.insert(z.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate zone ID: {}", z.id),
            ));
        }
        if z.sequence < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSequence,
                format!("Zone '{}' has sequence {} (must be >= 1)", z.id, z.sequence),
            ));
        }
    }

    let mut trade_ids = HashSet::new();
    for t in trades {
        if !trade_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate trade ID: {}", t.id),
            ));
        }
    }

    let mut wagon_ids = HashSet::new();
    for w in wagons {
        if !wagon_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate wagon ID: {}", w.id),
            ));
        }
        if w.sequence < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSequence,
                format!("Wagon '{}' has sequence {} (must be >= 1)", w.id, w.sequence),
            ));
        }
        if !(1..=MAX_DURATION_DAYS).contains(&w.duration_days) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Wagon '{}' has duration {} (must be 1..={} working days)",
                    w.id, w.duration_days, MAX_DURATION_DAYS
                ),
            ));
        }
        if w.buffer_after < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBuffer,
                format!(
                    "Wagon '{}' has buffer {} (must be >= 0 periods)",
                    w.id, w.buffer_after
                ),
            ));
        }
        if !trades.is_empty() && !trade_ids.contains(w.trade_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTrade,
                format!("Wagon '{}' references unknown trade '{}'", w.id, w.trade_id),
            ));
        }
    }

    for rel in relationships {
        for endpoint in [&rel.predecessor_wagon_id, &rel.successor_wagon_id] {
            if !wagon_ids.contains(endpoint.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownWagon,
                    format!(
                        "Relationship {} -> {} references unknown wagon '{}'",
                        rel.predecessor_wagon_id, rel.successor_wagon_id, endpoint
                    ),
                ));
            }
        }
        if rel.predecessor_wagon_id == rel.successor_wagon_id {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfRelationship,
                format!("Wagon '{}' cannot depend on itself", rel.successor_wagon_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a complete plan request.
///
/// Missing zones or wagons and unusable configuration are reported as
/// their own [`PlanError`] variants; everything else is collected into
/// [`PlanError::InvalidInput`].
pub fn validate_request(request: &PlanRequest) -> PlanResult<()> {
    if request.zones.is_empty() {
        return Err(PlanError::NoZones);
    }
    if request.wagons.is_empty() {
        return Err(PlanError::NoTrades);
    }
    if request.config.working_week.is_empty() {
        return Err(PlanError::EmptyWorkingWeek);
    }
    if !(1..=MAX_TAKT_TIME_DAYS).contains(&request.config.takt_time_days) {
        return Err(PlanError::InvalidTaktTime(request.config.takt_time_days));
    }

    let mut errors = validate_input(
        &request.zones,
        &request.wagons,
        &request.trades,
        &request.relationships,
    )
    .err()
    .unwrap_or_default();
    if request.config.buffer_size < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBuffer,
            format!(
                "Buffer size {} must be >= 0 periods",
                request.config.buffer_size
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PlanError::InvalidInput(errors))
    }
}
