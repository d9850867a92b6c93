//! Data types shared across the resolution pipeline.

pub mod candidate;
pub mod conversation;
pub mod entities;

pub use candidate::{PlayerCandidate, PlayerId, Resolution};
pub use conversation::{ConversationLog, ConversationSummary, ConversationTurn, Role};
pub use entities::{CorrectedEntities, RawEntities, ValidationResult};
