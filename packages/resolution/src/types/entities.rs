//! Entity records flowing into and out of validation.
//!
//! Fixed structured records with one field per entity kind, so
//! downstream stages cannot silently mishandle a missing key the way
//! a loose string-keyed map would allow.

use serde::{Deserialize, Serialize};

/// Raw entity-extraction output from the NLU step.
///
/// Not validated beyond basic shape; every string here is user-derived
/// text and must pass through [`EntityValidator`](crate::EntityValidator)
/// before SQL generation sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub players: Vec<String>,

    /// Season references as extracted (possibly non-numeric)
    #[serde(default)]
    pub seasons: Vec<String>,

    #[serde(default)]
    pub metrics: Vec<String>,

    #[serde(default)]
    pub rounds: Vec<String>,
}

impl RawEntities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(mut self, teams: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.teams = teams.into_iter().map(|t| t.into()).collect();
        self
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.players = players.into_iter().map(|p| p.into()).collect();
        self
    }

    pub fn with_seasons(mut self, seasons: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.seasons = seasons.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.metrics = metrics.into_iter().map(|m| m.into()).collect();
        self
    }

    pub fn with_rounds(mut self, rounds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rounds = rounds.into_iter().map(|r| r.into()).collect();
        self
    }

    /// True if no entity of any kind was extracted.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
            && self.players.is_empty()
            && self.seasons.is_empty()
            && self.metrics.is_empty()
            && self.rounds.is_empty()
    }
}

/// Canonicalized entities after validation.
///
/// Teams and players hold canonical names (or, for an ambiguous player,
/// all candidate names so a follow-up turn can recover them). Seasons
/// are parsed and range-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectedEntities {
    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub players: Vec<String>,

    #[serde(default)]
    pub seasons: Vec<i32>,

    /// Passed through unchanged (normalized elsewhere)
    #[serde(default)]
    pub metrics: Vec<String>,

    /// Passed through unchanged
    #[serde(default)]
    pub rounds: Vec<String>,
}

/// Aggregated validation outcome consumed by the SQL-generation stage.
///
/// The single boundary downstream depends on: only canonical names or
/// an explicit clarification signal ever leave here, never raw user text
/// masquerading as resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False if any team failed to resolve or a player needs clarification
    pub is_valid: bool,

    pub corrected: CorrectedEntities,

    /// Per-item problems that did not block resolution
    #[serde(default)]
    pub warnings: Vec<String>,

    /// True if at least one player reference is genuinely ambiguous
    pub needs_clarification: bool,

    /// Clarification questions and "did you mean" hints for the user
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// A valid, empty result to accumulate into.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }
}
