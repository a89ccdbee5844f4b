//! Trade metadata snapshot.
//!
//! Trades are owned by the project collaborator; the engine only reads
//! the fields it needs for phase classification and trade-level
//! predecessor checks.

use serde::{Deserialize, Serialize};

/// A trade (subcontractor discipline) as seen by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trade {
    /// Unique trade identifier (referenced by `Wagon::trade_id`).
    pub id: String,
    /// Short trade code, e.g. `"DRY"`.
    pub code: String,
    /// Display name, e.g. `"Drywall"`.
    pub name: String,
    /// Discipline label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    /// Codes of trades that must finish in a zone before this one starts.
    #[serde(default)]
    pub predecessor_codes: Vec<String>,
}

impl Trade {
    /// Creates a trade with no discipline and no predecessors.
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            discipline: None,
            predecessor_codes: Vec::new(),
        }
    }

    /// Sets the discipline.
    pub fn with_discipline(mut self, discipline: impl Into<String>) -> Self {
        self.discipline = Some(discipline.into());
        self
    }

    /// Declares a predecessor trade code.
    pub fn with_predecessor(mut self, code: impl Into<String>) -> Self {
        self.predecessor_codes.push(code.into());
        self
    }

    /// Lowercased name, code and discipline joined for keyword matching.
    pub(crate) fn search_text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.code);
        if let Some(d) = &self.discipline {
            text.push(' ');
            text.push_str(d);
        }
        text.to_lowercase()
    }
}
