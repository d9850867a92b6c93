//! Team and metric reference resolution.
//!
//! Pure functions of the static dictionary plus input: exact alias
//! lookup first, fuzzy matching for typos second, absence returned as
//! `None` rather than raised.

use std::sync::Arc;

use super::dictionary::{EntityKind, NameDictionary};
use super::fuzzy::FuzzyMatcher;

/// Resolves free-text team references to canonical team names.
#[derive(Debug, Clone)]
pub struct TeamResolver {
    dictionary: Arc<NameDictionary>,
    fuzzy: FuzzyMatcher,
}

impl TeamResolver {
    pub fn new(dictionary: Arc<NameDictionary>) -> Self {
        Self {
            dictionary,
            fuzzy: FuzzyMatcher::new(),
        }
    }

    pub fn with_fuzzy(dictionary: Arc<NameDictionary>, fuzzy: FuzzyMatcher) -> Self {
        Self { dictionary, fuzzy }
    }

    /// Resolve a team reference, e.g. "Cats", "RIC", "Richmnd".
    ///
    /// Tries, short-circuiting on first hit:
    /// 1. exact alias lookup (full names, nicknames, abbreviations)
    /// 2. fuzzy match against every alias, returning its canonical
    pub fn resolve(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(canonical) = self.dictionary.resolve_alias(EntityKind::Team, input) {
            tracing::info!(input = %input, canonical = %canonical, "resolved team (exact match)");
            return Some(canonical.to_string());
        }

        let normalized = input.to_lowercase();
        let pairs: Vec<(&str, &str)> = self.dictionary.alias_pairs(EntityKind::Team).collect();
        if let Some(m) = self
            .fuzzy
            .best_match(&normalized, pairs.iter().map(|(alias, _)| *alias))
        {
            // Map the winning alias back to its canonical
            if let Some((_, canonical)) = pairs.iter().find(|(alias, _)| *alias == m.candidate) {
                tracing::info!(
                    input = %input,
                    canonical = %canonical,
                    score = m.score,
                    "resolved team (fuzzy match)"
                );
                return Some((*canonical).to_string());
            }
        }

        tracing::warn!(input = %input, "could not resolve team name");
        None
    }

    /// Resolve a metric alias, e.g. "victories" -> "wins".
    pub fn resolve_metric(&self, input: &str) -> Option<String> {
        self.dictionary
            .resolve_alias(EntityKind::Metric, input)
            .map(String::from)
    }

    /// Suggest canonical team names for a partial input.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<String> {
        self.dictionary.suggest(EntityKind::Team, partial, limit)
    }

    pub fn dictionary(&self) -> &NameDictionary {
        &self.dictionary
    }
}
