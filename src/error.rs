//! Error types for the planner front door.
//!
//! The scheduling algorithms themselves are total over well-formed input.
//! Everything here is raised before scheduling starts (input checks) or
//! when the caller asked for cycles to be rejected instead of recovered.

use crate::validation::ValidationError;

/// Main planning error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The plan has no zones.
    #[error("no zones to schedule")]
    NoZones,

    /// The plan has no wagons.
    #[error("no trades to schedule")]
    NoTrades,

    /// The working week contains no working day.
    #[error("working week has no working days")]
    EmptyWorkingWeek,

    /// Takt time outside the accepted range.
    #[error("takt time must be 1 to 30 working days, got {0}")]
    InvalidTaktTime(i64),

    /// Structural problems in zones, wagons or relationships.
    #[error("invalid plan input ({} issue(s)): {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The relationship graph has a cycle and the policy is to reject it.
    #[error("relationship cycle among wagons: {}", .wagons.join(", "))]
    CyclicRelationships {
        /// Wagons left unordered by the topological sort.
        wagons: Vec<String>,
    },
}

impl PlanError {
    /// Stable machine-readable code, as reported to API clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoZones => "NO_ZONES",
            Self::NoTrades => "NO_TRADES",
            Self::EmptyWorkingWeek => "NO_WORKING_DAYS",
            Self::InvalidTaktTime(_) => "INVALID_TAKT_TIME",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::CyclicRelationships { .. } => "CYCLIC_RELATIONSHIPS",
        }
    }
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map_or("", |e| e.message.as_str())
}

/// Planning result alias.
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlanError::NoZones.code(), "NO_ZONES");
        assert_eq!(PlanError::NoTrades.code(), "NO_TRADES");
        assert_eq!(
            PlanError::CyclicRelationships { wagons: vec![] }.code(),
            "CYCLIC_RELATIONSHIPS"
        );
    }

    #[test]
    fn test_error_display() {
        let err = PlanError::CyclicRelationships {
            wagons: vec!["X".into(), "Y".into()],
        };
        assert_eq!(err.to_string(), "relationship cycle among wagons: X, Y");

        let err = PlanError::InvalidInput(vec![ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Duplicate zone ID: A",
        )]);
        assert_eq!(
            err.to_string(),
            "invalid plan input (1 issue(s)): Duplicate zone ID: A"
        );
    }
}
