//! Player name disambiguation.
//!
//! A state machine over candidate cardinality, re-derived fresh on
//! every call: name-substring match first, then an optional activity
//! filter over the requested seasons. Biases toward asking the user
//! rather than guessing, except when the activity filter eliminates
//! everyone — there, guessing-with-disclosure beats blocking.

use crate::error::Result;
use crate::traits::store::PlayerStore;
use crate::types::candidate::{PlayerCandidate, Resolution};

/// Disambiguates free-text player references against the store.
#[derive(Debug, Clone)]
pub struct PlayerDisambiguator<S> {
    store: S,
}

impl<S: PlayerStore> PlayerDisambiguator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve a player name fragment, optionally narrowed by the
    /// seasons the question is about.
    ///
    /// Outcomes by candidate count:
    /// - 0 name matches: `NotFound` (caller passes the fragment through)
    /// - 1 name match: `Resolved`, regardless of seasons
    /// - 2+ name matches, no seasons: `Ambiguous` over all of them
    /// - 2+ name matches, seasons given: filter by recorded activity;
    ///   one survivor resolves (with a note), several stay ambiguous,
    ///   zero survivors default to the first name-ordered candidate
    ///   with a warning naming every candidate.
    ///
    /// A store failure during the activity check degrades to
    /// `Ambiguous` over all name matches — fail toward asking the user,
    /// never toward silently picking one.
    pub async fn disambiguate(&self, fragment: &str, seasons: &[i32]) -> Result<Resolution> {
        let mut candidates = self.store.find_players_by_name(fragment).await?;

        if candidates.is_empty() {
            tracing::warn!(fragment = %fragment, "no players match name fragment");
            return Ok(Resolution::NotFound);
        }

        if candidates.len() == 1 {
            let name = candidates.remove(0).name;
            tracing::debug!(fragment = %fragment, name = %name, "single player match");
            return Ok(Resolution::resolved(name));
        }

        // Defensive re-sort; the store contract already orders by name
        candidates.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::info!(
            fragment = %fragment,
            count = candidates.len(),
            names = ?candidates.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "multiple players match name fragment"
        );

        if seasons.is_empty() {
            let question = format!(
                "Multiple players named '{}' found: {}. Which player did you mean?",
                fragment,
                join_names(&candidates),
            );
            return Ok(Resolution::Ambiguous {
                candidates,
                question,
            });
        }

        let active = match self.filter_active(&candidates, seasons).await {
            Ok(active) => active,
            Err(err) => {
                // Activity check failed; the name matches are still good,
                // so ask the user instead of dropping the reference
                tracing::warn!(
                    fragment = %fragment,
                    error = %err,
                    "activity check failed, treating all name matches as ambiguous"
                );
                let question = format!(
                    "Multiple players named '{}' found: {}. Which player did you mean?",
                    fragment,
                    join_names(&candidates),
                );
                return Ok(Resolution::Ambiguous {
                    candidates,
                    question,
                });
            }
        };

        let season_str = join_seasons(seasons);

        match active.len() {
            0 => {
                let all_names = join_names(&candidates);
                let default = candidates[0].name.clone();
                let warning = format!(
                    "Multiple players named '{}' found ({}), but none were active in {}. Using {}.",
                    fragment, all_names, season_str, default,
                );
                tracing::warn!(fragment = %fragment, default = %default, "no candidates active, defaulting to first");
                Ok(Resolution::resolved_with_note(default, warning))
            }
            1 => {
                let name = active[0].name.clone();
                let note = format!("Resolved '{}' to {} (active in {})", fragment, name, season_str);
                tracing::info!(fragment = %fragment, name = %name, "season activity narrowed to one player");
                Ok(Resolution::resolved_with_note(name, note))
            }
            _ => {
                let question = format!(
                    "Multiple players named '{}' were active in {}: {}. Which player did you mean?",
                    fragment,
                    season_str,
                    join_names(&active),
                );
                Ok(Resolution::Ambiguous {
                    candidates: active,
                    question,
                })
            }
        }
    }

    async fn filter_active(
        &self,
        candidates: &[PlayerCandidate],
        seasons: &[i32],
    ) -> Result<Vec<PlayerCandidate>> {
        let mut active = Vec::new();
        for candidate in candidates {
            let is_active = self
                .store
                .player_active_in_seasons(candidate.id, seasons)
                .await?;
            tracing::debug!(
                name = %candidate.name,
                seasons = ?seasons,
                active = is_active,
                "activity check"
            );
            if is_active {
                active.push(candidate.clone());
            }
        }
        Ok(active)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn join_names(candidates: &[PlayerCandidate]) -> String {
    candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_seasons(seasons: &[i32]) -> String {
    seasons
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
