//! Resolution stages: dictionary lookup, fuzzy matching, team and
//! player resolution.

pub mod dictionary;
pub mod fuzzy;
pub mod player;
pub mod team;

pub use dictionary::{EntityKind, NameDictionary};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, DEFAULT_FUZZY_THRESHOLD};
pub use player::PlayerDisambiguator;
pub use team::TeamResolver;
