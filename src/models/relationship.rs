//! Precedence relationships between wagons.
//!
//! A relationship constrains when a successor wagon may start in a zone,
//! relative to its predecessor's occupancy of the *same* zone. It is
//! enforced independently in every zone both wagons pass through.
//!
//! # Formulas
//! With `pred` the predecessor's window in the zone, `lag` in working days
//! (negative = lead) and `d` the successor's duration:
//!
//! | Kind | Earliest successor start |
//! |------|--------------------------|
//! | FS | `pred.end + (1 + lag)` |
//! | SS | `pred.start + lag` |
//! | FF | `(pred.end + lag) - (d - 1)` |
//! | SF | `(pred.start + lag) - (d - 1)` |
//!
//! All `+`/`-` are working-day shifts on the plan's [`WorkingWeek`].
//!
//! # Reference
//! PMI (2017), "PMBOK Guide", 6.3 Sequence Activities (precedence diagramming)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DateWindow, WorkingWeek};

/// Precedence relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Successor starts after predecessor finishes.
    #[serde(rename = "FS")]
    FinishToStart,
    /// Successor starts after predecessor starts.
    #[serde(rename = "SS")]
    StartToStart,
    /// Successor finishes after predecessor finishes.
    #[serde(rename = "FF")]
    FinishToFinish,
    /// Successor finishes after predecessor starts.
    #[serde(rename = "SF")]
    StartToFinish,
}

impl RelationshipKind {
    /// Two-letter code (`"FS"`, `"SS"`, `"FF"`, `"SF"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
            Self::FinishToFinish => "FF",
            Self::StartToFinish => "SF",
        }
    }

    /// Earliest start this relationship allows for the successor.
    pub fn earliest_start(
        &self,
        predecessor: DateWindow,
        lag_days: i64,
        successor_duration: i64,
        week: &WorkingWeek,
    ) -> NaiveDate {
        let tail = successor_duration - 1;
        match self {
            Self::FinishToStart => week.shift_working_days(predecessor.end, 1 + lag_days),
            Self::StartToStart => week.shift_working_days(predecessor.start, lag_days),
            Self::FinishToFinish => {
                let finish = week.shift_working_days(predecessor.end, lag_days);
                week.subtract_working_days(finish, tail)
            }
            Self::StartToFinish => {
                let finish = week.shift_working_days(predecessor.start, lag_days);
                week.subtract_working_days(finish, tail)
            }
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown relationship code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relationship type '{0}' (expected FS, SS, FF or SF)")]
pub struct ParseRelationshipKindError(pub String);

impl FromStr for RelationshipKind {
    type Err = ParseRelationshipKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FinishToStart),
            "SS" => Ok(Self::StartToStart),
            "FF" => Ok(Self::FinishToFinish),
            "SF" => Ok(Self::StartToFinish),
            _ => Err(ParseRelationshipKindError(s.to_string())),
        }
    }
}

/// A precedence relationship between two wagons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
    /// Wagon that constrains.
    pub predecessor_wagon_id: String,
    /// Wagon being constrained.
    pub successor_wagon_id: String,
    /// Relationship type.
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// Lag in working days (negative = lead).
    #[serde(default)]
    pub lag_days: i64,
    /// Hard (`true`) or soft (`false`) relationship.
    #[serde(default = "default_mandatory")]
    pub mandatory: bool,
}

fn default_mandatory() -> bool {
    true
}

impl Relationship {
    /// Creates a mandatory relationship with zero lag.
    pub fn new(
        predecessor: impl Into<String>,
        successor: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            predecessor_wagon_id: predecessor.into(),
            successor_wagon_id: successor.into(),
            kind,
            lag_days: 0,
            mandatory: true,
        }
    }

    /// Creates a zero-lag finish-to-start relationship.
    pub fn finish_to_start(predecessor: impl Into<String>, successor: impl Into<String>) -> Self {
        Self::new(predecessor, successor, RelationshipKind::FinishToStart)
    }

    /// Sets the lag (negative = lead).
    pub fn with_lag(mut self, lag_days: i64) -> Self {
        self.lag_days = lag_days;
        self
    }

    /// Marks the relationship as soft.
    pub fn soft(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Earliest successor start given the predecessor's window in a zone.
    pub fn earliest_start(
        &self,
        predecessor: DateWindow,
        successor_duration: i64,
        week: &WorkingWeek,
    ) -> NaiveDate {
        self.kind
            .earliest_start(predecessor, self.lag_days, successor_duration, week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pred_week() -> DateWindow {
        // Monday..Friday
        DateWindow::new(date(2026, 2, 16), date(2026, 2, 20))
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("FS".parse::<RelationshipKind>(), Ok(RelationshipKind::FinishToStart));
        assert_eq!("ss".parse::<RelationshipKind>(), Ok(RelationshipKind::StartToStart));
        assert_eq!(RelationshipKind::FinishToFinish.to_string(), "FF");
        assert!("XX".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn test_finish_to_start() {
        let week = WorkingWeek::mon_to_fri();
        let r = Relationship::finish_to_start("A", "B");
        // Friday end → next Monday
        assert_eq!(r.earliest_start(pred_week(), 5, &week), date(2026, 2, 23));

        let lagged = Relationship::finish_to_start("A", "B").with_lag(2);
        assert_eq!(lagged.earliest_start(pred_week(), 5, &week), date(2026, 2, 25));
    }

    #[test]
    fn test_finish_to_start_with_lead() {
        let week = WorkingWeek::mon_to_fri();
        // lag -1 → 1 + (-1) = 0 → same day as predecessor end
        let r = Relationship::finish_to_start("A", "B").with_lag(-1);
        assert_eq!(r.earliest_start(pred_week(), 5, &week), date(2026, 2, 20));
        // lag -3 → shift back two working days from Friday
        let r = Relationship::finish_to_start("A", "B").with_lag(-3);
        assert_eq!(r.earliest_start(pred_week(), 5, &week), date(2026, 2, 18));
    }

    #[test]
    fn test_start_to_start() {
        let week = WorkingWeek::mon_to_fri();
        let r = Relationship::new("A", "B", RelationshipKind::StartToStart).with_lag(2);
        assert_eq!(r.earliest_start(pred_week(), 5, &week), date(2026, 2, 18));
    }

    #[test]
    fn test_finish_to_finish() {
        let week = WorkingWeek::mon_to_fri();
        // Successor of 3 days must finish no earlier than Friday → starts Wednesday
        let r = Relationship::new("A", "B", RelationshipKind::FinishToFinish);
        assert_eq!(r.earliest_start(pred_week(), 3, &week), date(2026, 2, 18));
    }

    #[test]
    fn test_start_to_finish() {
        let week = WorkingWeek::mon_to_fri();
        // Finish no earlier than Monday + 2 = Wednesday; 2 days long → start Tuesday
        let r = Relationship::new("A", "B", RelationshipKind::StartToFinish).with_lag(2);
        assert_eq!(r.earliest_start(pred_week(), 2, &week), date(2026, 2, 17));
    }

    #[test]
    fn test_relationship_serde() {
        let r: Relationship = serde_json::from_str(
            r#"{"predecessor_wagon_id":"A","successor_wagon_id":"B","type":"SS","lag_days":-1}"#,
        )
        .unwrap();
        assert_eq!(r.kind, RelationshipKind::StartToStart);
        assert_eq!(r.lag_days, -1);
        assert!(r.mandatory);

        let json = serde_json::to_string(&Relationship::finish_to_start("A", "B").soft()).unwrap();
        assert!(json.contains(r#""type":"FS""#));
        assert!(json.contains(r#""mandatory":false"#));
    }
}
