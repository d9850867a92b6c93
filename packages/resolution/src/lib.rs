//! Entity Resolution & Clarification Library
//!
//! Resolves natural-language references to teams, players and seasons
//! into canonical database identities for the AFL analytics agent, and
//! drives the multi-turn clarification dialogue when a reference is
//! genuinely ambiguous.
//!
//! # Design Philosophy
//!
//! **Never silently pick the wrong person.**
//!
//! - Ambiguity and absence are first-class outcomes, not errors
//! - Bias toward asking the user over guessing; when a guess is
//!   unavoidable, disclose it
//! - Clarification pendingness is derived from the conversation log,
//!   never tracked as a second source of truth
//! - Resolution is stateless per call; only the externally-owned turn
//!   log carries state across turns
//!
//! # Usage
//!
//! ```rust,ignore
//! use resolution::{EntityValidator, MemoryStore, RawEntities, resolve_followup, FollowupOutcome};
//!
//! let store = MemoryStore::new();
//! let validator = EntityValidator::new(store);
//!
//! // Validate one turn's extracted entities
//! let raw = RawEntities::new()
//!     .with_teams(["Cats"])
//!     .with_players(["Daicos"])
//!     .with_seasons(["2024"]);
//! let outcome = validator.validate(&raw).await?;
//!
//! // On the next user turn, try the pending clarification first
//! match resolve_followup(&log.turns, "Josh please") {
//!     FollowupOutcome::Resolved(name) => { /* use the chosen player */ }
//!     FollowupOutcome::ReAsk(pending) => { /* repeat the question */ }
//!     FollowupOutcome::FreshQuery => { /* run the full pipeline */ }
//! }
//! ```
//!
//! # Modules
//!
//! - [`resolve`] - Dictionary, fuzzy matcher, team and player resolvers
//! - [`clarification`] - Pending-clarification derivation and follow-up matching
//! - [`validate`] - Top-level entity validation orchestrator
//! - [`types`] - Entity records, resolution outcomes, conversation turns
//! - [`traits`] - The `PlayerStore` abstraction over the data store
//! - [`stores`] - Store implementations (memory; Postgres behind a feature)
//! - [`testing`] - Mock store with failure injection

pub mod clarification;
pub mod error;
pub mod resolve;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export core types at crate root
pub use clarification::{
    derive_pending_clarification, match_reply, resolve_followup, FollowupOutcome,
    PendingClarification, ReplyMatch,
};
pub use error::{ResolutionError, Result};
pub use resolve::{
    EntityKind, FuzzyMatch, FuzzyMatcher, NameDictionary, PlayerDisambiguator, TeamResolver,
    DEFAULT_FUZZY_THRESHOLD,
};
pub use traits::PlayerStore;
pub use types::{
    ConversationLog, ConversationSummary, ConversationTurn, CorrectedEntities, PlayerCandidate,
    PlayerId, RawEntities, Resolution, Role, ValidationResult,
};
pub use validate::{EntityValidator, ValidatorConfig, DEFAULT_SEASON_RANGE};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
