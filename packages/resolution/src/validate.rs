//! Entity validation orchestration.
//!
//! The single boundary the SQL-generation stage depends on: raw
//! extracted entities go in, canonical names or explicit ambiguity
//! signals come out. Raw user text never leaves here pretending to be
//! resolved.

use std::ops::RangeInclusive;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::Result;
use crate::resolve::dictionary::{EntityKind, NameDictionary};
use crate::resolve::fuzzy::{FuzzyMatcher, DEFAULT_FUZZY_THRESHOLD};
use crate::resolve::player::PlayerDisambiguator;
use crate::resolve::team::TeamResolver;
use crate::traits::store::PlayerStore;
use crate::types::candidate::Resolution;
use crate::types::entities::{RawEntities, ValidationResult};

/// Supported season range of the backing data set.
pub const DEFAULT_SEASON_RANGE: RangeInclusive<i32> = 1990..=2025;

/// Tunable heuristics for validation.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Seasons with data coverage; references outside are discarded
    /// with a warning
    pub season_range: RangeInclusive<i32>,

    /// Similarity threshold for fuzzy team matching
    pub fuzzy_threshold: f64,

    /// How many team names to offer in a "did you mean" hint
    pub suggestion_limit: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            season_range: DEFAULT_SEASON_RANGE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            suggestion_limit: 5,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_season_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.season_range = range;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}

/// Validates and canonicalizes extracted entities.
///
/// Stateless across calls; safe to share across conversations. All
/// state lives in the dictionary (immutable) and the store (external).
pub struct EntityValidator<S> {
    dictionary: Arc<NameDictionary>,
    teams: TeamResolver,
    players: PlayerDisambiguator<S>,
    config: ValidatorConfig,
}

impl<S: PlayerStore> EntityValidator<S> {
    /// Validator over the built-in AFL dictionary.
    pub fn new(store: S) -> Self {
        Self::with_config(Arc::new(NameDictionary::afl()), store, ValidatorConfig::default())
    }

    pub fn with_config(dictionary: Arc<NameDictionary>, store: S, config: ValidatorConfig) -> Self {
        let fuzzy = FuzzyMatcher::with_threshold(config.fuzzy_threshold);
        Self {
            teams: TeamResolver::with_fuzzy(Arc::clone(&dictionary), fuzzy),
            players: PlayerDisambiguator::new(store),
            dictionary,
            config,
        }
    }

    /// Validate one turn's raw entities.
    ///
    /// Teams resolve through the dictionary (failures become warnings
    /// plus a suggestion and invalidate the result); seasons are parsed
    /// and range-checked; players are disambiguated against the store,
    /// concurrently since references within a turn are independent.
    /// Metrics and rounds pass through unchanged.
    ///
    /// Only a store failure during player name lookup returns `Err` —
    /// every linguistic problem is surfaced as structured data.
    pub async fn validate(&self, raw: &RawEntities) -> Result<ValidationResult> {
        let mut result = ValidationResult::valid();

        self.validate_teams(raw, &mut result);
        self.validate_seasons(raw, &mut result);
        self.validate_players(raw, &mut result).await?;

        result.corrected.metrics = raw.metrics.clone();
        result.corrected.rounds = raw.rounds.clone();

        tracing::debug!(
            is_valid = result.is_valid,
            needs_clarification = result.needs_clarification,
            warnings = result.warnings.len(),
            "entity validation complete"
        );
        Ok(result)
    }

    fn validate_teams(&self, raw: &RawEntities, result: &mut ValidationResult) {
        for team_input in &raw.teams {
            match self.teams.resolve(team_input) {
                Some(canonical) => result.corrected.teams.push(canonical),
                None => {
                    result.is_valid = false;
                    result.warnings.push(format!("Unknown team: '{team_input}'"));

                    let mut suggested = self.teams.suggest(team_input, self.config.suggestion_limit);
                    if suggested.is_empty() {
                        suggested = self
                            .dictionary
                            .canonical_names(EntityKind::Team)
                            .take(self.config.suggestion_limit)
                            .map(String::from)
                            .collect();
                    }
                    result.suggestions.push(format!(
                        "Did you mean one of these teams? {}",
                        suggested.join(", ")
                    ));
                }
            }
        }
    }

    fn validate_seasons(&self, raw: &RawEntities, result: &mut ValidationResult) {
        for season in &raw.seasons {
            match season.trim().parse::<i32>() {
                Ok(year) if self.config.season_range.contains(&year) => {
                    result.corrected.seasons.push(year);
                }
                Ok(year) => {
                    result.warnings.push(format!(
                        "Season {year} outside data range ({}-{})",
                        self.config.season_range.start(),
                        self.config.season_range.end(),
                    ));
                }
                Err(_) => {
                    result.warnings.push(format!("Invalid season: '{season}'"));
                }
            }
        }
    }

    async fn validate_players(&self, raw: &RawEntities, result: &mut ValidationResult) -> Result<()> {
        if raw.players.is_empty() {
            return Ok(());
        }

        // Distinct references share no mutable state; resolve them
        // concurrently and aggregate in input order
        let seasons = result.corrected.seasons.clone();
        let resolutions = try_join_all(
            raw.players
                .iter()
                .map(|name| self.players.disambiguate(name, &seasons)),
        )
        .await?;

        for (name, resolution) in raw.players.iter().zip(resolutions) {
            match resolution {
                Resolution::Resolved { name: resolved, note } => {
                    result.corrected.players.push(resolved);
                    if let Some(note) = note {
                        result.warnings.push(note);
                    }
                }
                Resolution::Ambiguous { candidates, question } => {
                    result.is_valid = false;
                    result.needs_clarification = true;
                    result.suggestions.push(question);
                    // Keep every candidate so a follow-up turn can
                    // recover the choice set
                    result
                        .corrected
                        .players
                        .extend(candidates.into_iter().map(|c| c.name));
                }
                Resolution::NotFound => {
                    result
                        .warnings
                        .push(format!("No player matching '{name}' found; using the name as given"));
                    result.corrected.players.push(name.clone());
                }
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
