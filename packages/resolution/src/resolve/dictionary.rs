//! Canonical-name dictionary for teams and metrics.
//!
//! An explicitly constructed immutable value, built once at process
//! start and shared by reference into resolvers — no lazily-built
//! global lookup table. Rebuilding is idempotent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ResolutionError, Result};

/// Kind of entity an alias table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Team,
    Metric,
}

/// Static mapping of canonical entity names to accepted aliases.
///
/// Invariant (checked at construction): alias sets are disjoint within a
/// kind — no alias maps to two canonical names. A violating table is a
/// configuration bug and fails construction, not a runtime condition.
#[derive(Debug, Clone)]
pub struct NameDictionary {
    /// canonical -> aliases, insertion order preserved for deterministic
    /// iteration during fuzzy matching and suggestions
    teams: IndexMap<String, Vec<String>>,
    metrics: IndexMap<String, Vec<String>>,

    /// lowercase alias -> canonical
    team_lookup: IndexMap<String, String>,
    metric_lookup: IndexMap<String, String>,
}

impl NameDictionary {
    /// Build a dictionary from (canonical, aliases) entries per kind.
    pub fn from_entries(
        teams: &[(&str, &[&str])],
        metrics: &[(&str, &[&str])],
    ) -> Result<Self> {
        let (teams, team_lookup) = build_tables(teams)?;
        let (metrics, metric_lookup) = build_tables(metrics)?;
        Ok(Self {
            teams,
            metrics,
            team_lookup,
            metric_lookup,
        })
    }

    /// The built-in AFL dictionary: 18 clubs with nicknames and
    /// abbreviations, plus common ladder/scoring metric aliases.
    pub fn afl() -> Self {
        Self::from_entries(AFL_TEAMS, AFL_METRICS)
            .expect("built-in AFL alias tables are duplicate-free")
    }

    /// Exact alias lookup. Input is lower-cased and trimmed first.
    ///
    /// Returns the canonical name, or `None` — absence is not an error.
    pub fn resolve_alias(&self, kind: EntityKind, text: &str) -> Option<&str> {
        let normalized = text.trim().to_lowercase();
        self.lookup(kind).get(&normalized).map(String::as_str)
    }

    /// All canonical names for a kind, in table order.
    pub fn canonical_names(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
        self.table(kind).keys().map(String::as_str)
    }

    /// Aliases registered for a canonical name.
    pub fn aliases_of(&self, kind: EntityKind, canonical: &str) -> &[String] {
        self.table(kind)
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Flattened (alias, canonical) pairs in table order, for fuzzy
    /// matching. Iteration order is stable, which makes the fuzzy
    /// tie-break deterministic.
    pub fn alias_pairs(&self, kind: EntityKind) -> impl Iterator<Item = (&str, &str)> {
        self.lookup(kind)
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    /// Suggest canonical names for a partial input: any alias with the
    /// input as a prefix, or the input as a substring of the canonical.
    pub fn suggest(&self, kind: EntityKind, partial: &str, limit: usize) -> Vec<String> {
        let normalized = partial.trim().to_lowercase();
        if normalized.is_empty() {
            return vec![];
        }

        self.table(kind)
            .iter()
            .filter(|(canonical, aliases)| {
                aliases.iter().any(|a| a.starts_with(&normalized))
                    || canonical.to_lowercase().contains(&normalized)
            })
            .map(|(canonical, _)| canonical.clone())
            .take(limit)
            .collect()
    }

    fn table(&self, kind: EntityKind) -> &IndexMap<String, Vec<String>> {
        match kind {
            EntityKind::Team => &self.teams,
            EntityKind::Metric => &self.metrics,
        }
    }

    fn lookup(&self, kind: EntityKind) -> &IndexMap<String, String> {
        match kind {
            EntityKind::Team => &self.team_lookup,
            EntityKind::Metric => &self.metric_lookup,
        }
    }
}

fn build_tables(
    entries: &[(&str, &[&str])],
) -> Result<(IndexMap<String, Vec<String>>, IndexMap<String, String>)> {
    let mut table = IndexMap::new();
    let mut lookup: IndexMap<String, String> = IndexMap::new();

    for (canonical, aliases) in entries {
        let aliases: Vec<String> = aliases.iter().map(|a| a.to_lowercase()).collect();
        for alias in &aliases {
            if let Some(existing) = lookup.get(alias) {
                if existing != canonical {
                    return Err(ResolutionError::DuplicateAlias {
                        alias: alias.clone(),
                        existing: existing.clone(),
                        canonical: (*canonical).to_string(),
                    });
                }
            }
            lookup.insert(alias.clone(), (*canonical).to_string());
        }
        table.insert((*canonical).to_string(), aliases);
    }

    Ok((table, lookup))
}

/// AFL club nickname mapping: canonical database name -> variations.
const AFL_TEAMS: &[(&str, &[&str])] = &[
    ("Adelaide", &["adelaide", "crows", "adelaide crows", "the crows", "ade"]),
    (
        "Brisbane Lions",
        &["brisbane", "brisbane lions", "lions", "the lions", "bri", "brisbane bears"],
    ),
    ("Carlton", &["carlton", "blues", "the blues", "car", "navy blues"]),
    (
        "Collingwood",
        &["collingwood", "magpies", "the magpies", "pies", "col", "the pies"],
    ),
    (
        "Essendon",
        &["essendon", "bombers", "the bombers", "dons", "ess", "the dons"],
    ),
    ("Fremantle", &["fremantle", "dockers", "the dockers", "freo", "fre"]),
    ("Geelong", &["geelong", "cats", "geelong cats", "the cats", "gee"]),
    ("Gold Coast", &["gold coast", "suns", "gold coast suns", "the suns", "gcs"]),
    (
        "Greater Western Sydney",
        &["greater western sydney", "gws", "giants", "gws giants", "the giants", "western sydney"],
    ),
    ("Hawthorn", &["hawthorn", "hawks", "the hawks", "haw"]),
    (
        "Melbourne",
        &["melbourne", "demons", "the demons", "dees", "mel", "the dees"],
    ),
    (
        "North Melbourne",
        &["north melbourne", "kangaroos", "roos", "the roos", "nm", "the kangaroos", "north", "shinboners"],
    ),
    (
        "Port Adelaide",
        &["port adelaide", "power", "port adelaide power", "the power", "pa", "port"],
    ),
    (
        "Richmond",
        &["richmond", "tigers", "richmond tigers", "the tigers", "ric", "tiges"],
    ),
    ("St Kilda", &["st kilda", "saints", "the saints", "stk", "st. kilda"]),
    (
        "Sydney",
        &["sydney", "swans", "sydney swans", "the swans", "syd", "south melbourne"],
    ),
    (
        "West Coast",
        &["west coast", "eagles", "west coast eagles", "the eagles", "wce", "weagles"],
    ),
    (
        "Western Bulldogs",
        &["western bulldogs", "bulldogs", "dogs", "the dogs", "wb", "footscray", "the bulldogs"],
    ),
];

/// Metric alias mapping. Ambiguous aliases ("score") are deliberately
/// left off the table rather than mapped to an arbitrary canonical.
const AFL_METRICS: &[(&str, &[&str])] = &[
    ("wins", &["wins", "victories", "won", "win", "w"]),
    ("losses", &["losses", "defeats", "lost", "loss", "l"]),
    ("draws", &["draws", "ties", "drawn", "draw", "d"]),
    ("goals", &["goals", "goals scored", "total goals"]),
    ("points", &["points", "total points"]),
    (
        "margin",
        &["margin", "winning margin", "margin of victory", "diff", "difference"],
    ),
    ("percentage", &["percentage", "pct", "%", "win percentage"]),
    (
        "ladder_position",
        &["ladder position", "position", "rank", "ranking", "place"],
    ),
];
