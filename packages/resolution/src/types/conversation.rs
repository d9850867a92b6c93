//! Conversation turns and the append-only turn log.
//!
//! The conversation service owns persistence; this module only defines
//! the in-memory representation that clarification state is derived
//! from. Turns are never mutated after append — pending-clarification
//! state is recovered by scanning the log, not tracked separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::entities::CorrectedEntities;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation, with resolution metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,

    pub content: String,

    pub timestamp: DateTime<Utc>,

    /// Entities the assistant resolved while answering (assistant turns only)
    pub resolved_entities: Option<CorrectedEntities>,

    /// True on an assistant turn that asked the user to pick a candidate
    #[serde(default)]
    pub needs_clarification: bool,

    /// Candidate names surfaced with a clarification question, in the
    /// order they were shown to the user
    pub clarification_candidates: Option<Vec<String>>,

    /// The clarification question as asked
    pub clarification_question: Option<String>,
}

impl ConversationTurn {
    /// A plain user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// A plain assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            resolved_entities: None,
            needs_clarification: false,
            clarification_candidates: None,
            clarification_question: None,
        }
    }

    /// Mark this assistant turn as an outstanding clarification.
    pub fn with_clarification(
        mut self,
        candidates: impl IntoIterator<Item = impl Into<String>>,
        question: impl Into<String>,
    ) -> Self {
        self.needs_clarification = true;
        self.clarification_candidates =
            Some(candidates.into_iter().map(|c| c.into()).collect());
        self.clarification_question = Some(question.into());
        self
    }

    /// Attach the entities resolved for this turn.
    pub fn with_entities(mut self, entities: CorrectedEntities) -> Self {
        self.resolved_entities = Some(entities);
        self
    }
}

/// Append-only conversation log for one chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    pub id: Uuid,

    pub turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    /// Start a new conversation with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            turns: Vec::new(),
        }
    }

    /// Rehydrate a persisted conversation.
    pub fn with_turns(id: Uuid, turns: Vec<ConversationTurn>) -> Self {
        Self { id, turns }
    }

    /// Append a turn. Turns are never edited or removed afterwards.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// The most recent `limit` turns, oldest first.
    pub fn recent(&self, limit: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(limit);
        &self.turns[start..]
    }

    /// Format recent history as a markdown block for prompt context.
    pub fn format_context(&self, max_turns: usize) -> String {
        let turns = self.recent(max_turns);
        if turns.is_empty() {
            return String::new();
        }

        let mut out = String::from("## Previous Conversation Context\n\n");
        for turn in turns {
            let speaker = match turn.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            out.push_str(&format!("**{}**: {}\n\n", speaker, turn.content));
        }
        out.push_str("---\n\n");
        out
    }

    /// Summarize the conversation: message counts and entities discussed.
    pub fn summary(&self) -> ConversationSummary {
        let mut teams = BTreeSet::new();
        let mut players = BTreeSet::new();
        let mut seasons = BTreeSet::new();

        for turn in &self.turns {
            if turn.role != Role::Assistant {
                continue;
            }
            if let Some(entities) = &turn.resolved_entities {
                teams.extend(entities.teams.iter().cloned());
                players.extend(entities.players.iter().cloned());
                seasons.extend(entities.seasons.iter().copied());
            }
        }

        ConversationSummary {
            turn_count: self.turns.len(),
            user_turns: self.turns.iter().filter(|t| t.role == Role::User).count(),
            assistant_turns: self
                .turns
                .iter()
                .filter(|t| t.role == Role::Assistant)
                .count(),
            teams_discussed: teams.into_iter().collect(),
            players_discussed: players.into_iter().collect(),
            seasons_discussed: seasons.into_iter().collect(),
        }
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate view of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub turn_count: usize,
    pub user_turns: usize,
    pub assistant_turns: usize,
    pub teams_discussed: Vec<String>,
    pub players_discussed: Vec<String>,
    pub seasons_discussed: Vec<i32>,
}
