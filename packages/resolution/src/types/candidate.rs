//! Player candidates and resolution outcomes.

use serde::{Deserialize, Serialize};

/// Opaque player identity assigned by the backing store.
///
/// The store owns player identity persistence; this crate only carries
/// the id through for activity lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A player identity returned from a name-substring lookup.
///
/// Created transiently per resolution call; not confirmed as the user's
/// intended referent until disambiguation completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCandidate {
    /// Full display name as stored (e.g., "Nick Daicos")
    pub name: String,

    /// Store-assigned identity
    pub id: PlayerId,
}

impl PlayerCandidate {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id: PlayerId(id),
        }
    }
}

/// Outcome of resolving one entity reference.
///
/// `Ambiguous` and `NotFound` are expected outcomes, not errors: the
/// caller decides whether to ask the user or pass the raw text through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Reference resolved to a single canonical name.
    Resolved {
        name: String,

        /// Optional disclosure for the user, e.g. which season narrowed
        /// the match, or that a default was picked among several.
        note: Option<String>,
    },

    /// Multiple genuine matches; the user must choose.
    Ambiguous {
        /// Candidates in name order, as surfaced to the user.
        candidates: Vec<PlayerCandidate>,

        /// User-facing clarification question.
        question: String,
    },

    /// No match in the store at all.
    NotFound,
}

impl Resolution {
    /// Resolved without any note.
    pub fn resolved(name: impl Into<String>) -> Self {
        Self::Resolved {
            name: name.into(),
            note: None,
        }
    }

    /// Resolved with a disclosure note.
    pub fn resolved_with_note(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self::Resolved {
            name: name.into(),
            note: Some(note.into()),
        }
    }

    /// Candidate names for an ambiguous outcome, empty otherwise.
    pub fn candidate_names(&self) -> Vec<String> {
        match self {
            Self::Ambiguous { candidates, .. } => {
                candidates.iter().map(|c| c.name.clone()).collect()
            }
            _ => vec![],
        }
    }
}
