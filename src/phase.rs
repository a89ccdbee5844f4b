//! Phase partitioning into independent trains.
//!
//! A building is usually built by several trains that never share zones:
//! ground works in the substructure, the structural shell, and the
//! interior fit-out. Each train is scheduled on its own, so a wagon's
//! flow and relationships only ever see zones and wagons of its own train.
//!
//! # Classification
//!
//! - **Wagons**: keyword match on the trade's name, code and discipline.
//!   Substructure keywords win over fit-out keywords; anything else (or an
//!   unknown trade) is shell.
//! - **Zones**: sector and grid locations are substructure; otherwise a
//!   stored phase tag is used if it names a phase; otherwise shell.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Assignment, LocationType, Relationship, Trade, Wagon, Zone};

const SUBSTRUCTURE_KEYWORDS: &[&str] = &[
    "excavat",
    "earthwork",
    "groundwork",
    "foundation",
    "footing",
    "pile",
    "piling",
    "basement",
    "shoring",
    "dewater",
    "underpinning",
    "substructure",
];

const FITOUT_KEYWORDS: &[&str] = &[
    "drywall",
    "partition",
    "plaster",
    "paint",
    "tiling",
    "flooring",
    "screed",
    "ceiling",
    "joinery",
    "carpent",
    "door",
    "finish",
    "fit-out",
    "fitout",
    "fit out",
    "interior",
];

/// An independently scheduled train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseGroup {
    /// Earthworks, foundations, basement.
    Substructure,
    /// Structure and envelope.
    Shell,
    /// Interior finishes.
    Fitout,
}

impl PhaseGroup {
    /// All groups in scheduling order.
    pub const ALL: [PhaseGroup; 3] = [Self::Substructure, Self::Shell, Self::Fitout];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substructure => "substructure",
            Self::Shell => "shell",
            Self::Fitout => "fitout",
        }
    }
}

impl fmt::Display for PhaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised phase name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase '{0}'")]
pub struct ParsePhaseGroupError(pub String);

impl FromStr for PhaseGroup {
    type Err = ParsePhaseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "substructure" | "sub" | "foundation" | "foundations" => Ok(Self::Substructure),
            "shell" | "superstructure" | "structure" | "shellandcore" => Ok(Self::Shell),
            "fitout" | "finishes" | "interior" => Ok(Self::Fitout),
            _ => Err(ParsePhaseGroupError(s.to_string())),
        }
    }
}

/// Classifies free text (trade name, code, discipline) into a phase.
pub fn classify_text(text: &str) -> PhaseGroup {
    let text = text.to_lowercase();
    if SUBSTRUCTURE_KEYWORDS.iter().any(|k| text.contains(k)) {
        PhaseGroup::Substructure
    } else if FITOUT_KEYWORDS.iter().any(|k| text.contains(k)) {
        PhaseGroup::Fitout
    } else {
        PhaseGroup::Shell
    }
}

/// The zones, wagons and relationships of one train.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasePartition {
    /// Train.
    pub phase: PhaseGroup,
    /// Zones of the train.
    pub zones: Vec<Zone>,
    /// Wagons of the train.
    pub wagons: Vec<Wagon>,
    /// Relationships with both ends inside the train.
    pub relationships: Vec<Relationship>,
}

impl PhasePartition {
    /// Whether the train has anything to schedule.
    pub fn is_schedulable(&self) -> bool {
        !self.zones.is_empty() && !self.wagons.is_empty()
    }

    /// Assignments whose zone and wagon both belong to the train.
    pub fn assignments_of(&self, assignments: &[Assignment]) -> Vec<Assignment> {
        let zone_ids: HashSet<&str> = self.zones.iter().map(|z| z.id.as_str()).collect();
        let wagon_ids: HashSet<&str> = self.wagons.iter().map(|w| w.id.as_str()).collect();
        assignments
            .iter()
            .filter(|a| {
                zone_ids.contains(a.zone_id.as_str()) && wagon_ids.contains(a.wagon_id.as_str())
            })
            .cloned()
            .collect()
    }
}

/// Splits a plan into independent trains.
#[derive(Debug, Clone)]
pub struct PhasePartitioner<'a> {
    trades: HashMap<&'a str, &'a Trade>,
}

impl<'a> PhasePartitioner<'a> {
    /// Creates a partitioner over the plan's trade metadata.
    pub fn new(trades: &'a [Trade]) -> Self {
        Self {
            trades: trades.iter().map(|t| (t.id.as_str(), t)).collect(),
        }
    }

    /// Phase of a wagon, from its trade.
    pub fn classify_wagon(&self, wagon: &Wagon) -> PhaseGroup {
        self.trades
            .get(wagon.trade_id.as_str())
            .map_or(PhaseGroup::Shell, |t| classify_text(&t.search_text()))
    }

    /// Phase of a zone, from its location type or phase tag.
    pub fn classify_zone(&self, zone: &Zone) -> PhaseGroup {
        match zone.location_type {
            Some(LocationType::Sector | LocationType::Grid) => PhaseGroup::Substructure,
            _ => zone
                .phase_tag
                .as_deref()
                .and_then(|tag| tag.parse().ok())
                .unwrap_or(PhaseGroup::Shell),
        }
    }

    /// Splits the plan into schedulable trains, in [`PhaseGroup::ALL`] order.
    ///
    /// Trains without zones or without wagons are dropped.
    pub fn partition(
        &self,
        zones: &[Zone],
        wagons: &[Wagon],
        relationships: &[Relationship],
    ) -> Vec<PhasePartition> {
        let mut partitions = Vec::new();

        for phase in PhaseGroup::ALL {
            let group_zones: Vec<Zone> = zones
                .iter()
                .filter(|z| self.classify_zone(z) == phase)
                .cloned()
                .collect();
            let group_wagons: Vec<Wagon> = wagons
                .iter()
                .filter(|w| self.classify_wagon(w) == phase)
                .cloned()
                .collect();

            let partition = PhasePartition {
                phase,
                relationships: relationships_within(&group_wagons, relationships),
                zones: group_zones,
                wagons: group_wagons,
            };

            if partition.is_schedulable() {
                partitions.push(partition);
            } else {
                debug!(
                    %phase,
                    zones = partition.zones.len(),
                    wagons = partition.wagons.len(),
                    "skipping empty phase group"
                );
            }
        }

        partitions
    }

    /// Puts everything into a single shell train.
    pub fn single(
        zones: &[Zone],
        wagons: &[Wagon],
        relationships: &[Relationship],
    ) -> Vec<PhasePartition> {
        let partition = PhasePartition {
            phase: PhaseGroup::Shell,
            zones: zones.to_vec(),
            wagons: wagons.to_vec(),
            relationships: relationships_within(wagons, relationships),
        };
        if partition.is_schedulable() {
            vec![partition]
        } else {
            Vec::new()
        }
    }
}

/// Relationships whose both endpoints are among `wagons`.
fn relationships_within(wagons: &[Wagon], relationships: &[Relationship]) -> Vec<Relationship> {
    let ids: HashSet<&str> = wagons.iter().map(|w| w.id.as_str()).collect();
    relationships
        .iter()
        .filter(|r| {
            ids.contains(r.predecessor_wagon_id.as_str())
                && ids.contains(r.successor_wagon_id.as_str())
        })
        .cloned()
        .collect()
}
