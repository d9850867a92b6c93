//! Multi-turn clarification handling.
//!
//! Pendingness is not tracked as separate mutable state: the most
//! recent assistant turn with `needs_clarification = true` is
//! authoritative, and everything here is a pure function over the turn
//! log. A terse follow-up ("Josh please") is matched against the
//! previously surfaced candidate set only — the disambiguator is never
//! re-invoked, which keeps a short reply from diverging into a new
//! ambiguous set.

use serde::{Deserialize, Serialize};

use crate::types::conversation::{ConversationTurn, Role};

/// Filler tokens stripped from a follow-up reply before matching.
const FILLER_TOKENS: &[&str] = &["please", "thanks", "thank", "pls", "thx", "cheers", "ta"];

/// An outstanding clarification recovered from the turn log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClarification {
    /// Candidates in the order they were shown to the user
    pub candidates: Vec<String>,

    /// The question as asked, if recorded
    pub question: Option<String>,
}

/// How a follow-up reply matched the candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMatch {
    /// Exactly one candidate matched
    Unique(String),

    /// Two or more candidates matched
    Ambiguous(Vec<String>),

    /// Nothing matched
    NoMatch,
}

/// Policy-applied outcome for a user turn that may answer a pending
/// clarification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowupOutcome {
    /// The reply picked one candidate; the clarification cycle ends
    Resolved(String),

    /// The reply matched several candidates; re-ask with the same set
    ReAsk(PendingClarification),

    /// No pending clarification, corrupted candidate state, or a reply
    /// matching nothing: run the full resolution pipeline on the text
    FreshQuery,
}

/// Find the outstanding clarification, if any.
///
/// Scans backward past trailing user turns (the new user message may
/// already be appended); the newest assistant turn is authoritative.
/// It must carry `needs_clarification` and a non-empty candidate list —
/// an older clarification turn is never resurrected.
pub fn derive_pending_clarification(turns: &[ConversationTurn]) -> Option<PendingClarification> {
    let last_assistant = turns.iter().rev().find(|t| t.role == Role::Assistant)?;

    if !last_assistant.needs_clarification {
        return None;
    }

    let candidates = last_assistant.clarification_candidates.clone()?;
    if candidates.is_empty() {
        return None;
    }

    Some(PendingClarification {
        candidates,
        question: last_assistant.clarification_question.clone(),
    })
}

/// Match a follow-up reply against a candidate list.
///
/// The reply is lower-cased, stripped of punctuation and filler tokens,
/// then tested against each candidate:
/// - exact equality with the normalized reply, or
/// - every reply token appears among the candidate's tokens
///   (order-insensitive subset test); a single-token reply matches if
///   the token equals any one token of the candidate, so "Nick" matches
///   "Nick Daicos".
pub fn match_reply(reply: &str, candidates: &[String]) -> ReplyMatch {
    let tokens = normalize_reply(reply);
    if tokens.is_empty() {
        return ReplyMatch::NoMatch;
    }
    let normalized = tokens.join(" ");

    let mut matches = Vec::new();
    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();

        if normalized == candidate_lower {
            matches.push(candidate.clone());
            continue;
        }

        let candidate_tokens: Vec<&str> = candidate_lower.split_whitespace().collect();
        let all_present = tokens
            .iter()
            .all(|t| candidate_tokens.contains(&t.as_str()));
        if all_present {
            matches.push(candidate.clone());
        }
    }

    match matches.len() {
        0 => ReplyMatch::NoMatch,
        1 => ReplyMatch::Unique(matches.remove(0)),
        _ => ReplyMatch::Ambiguous(matches),
    }
}

/// Resolve a user turn against the log's pending clarification.
///
/// Policy (applied uniformly): a reply matching zero candidates is a
/// fresh query; a reply matching several re-asks with the same list.
/// Missing or empty candidate state also falls back to a fresh query
/// rather than failing.
pub fn resolve_followup(turns: &[ConversationTurn], reply: &str) -> FollowupOutcome {
    let Some(pending) = derive_pending_clarification(turns) else {
        return FollowupOutcome::FreshQuery;
    };

    match match_reply(reply, &pending.candidates) {
        ReplyMatch::Unique(name) => {
            tracing::info!(reply = %reply, resolved = %name, "follow-up resolved pending clarification");
            FollowupOutcome::Resolved(name)
        }
        ReplyMatch::Ambiguous(matched) => {
            tracing::info!(reply = %reply, matched = ?matched, "follow-up still ambiguous, re-asking");
            FollowupOutcome::ReAsk(pending)
        }
        ReplyMatch::NoMatch => {
            tracing::debug!(reply = %reply, "follow-up matched no candidate, treating as fresh query");
            FollowupOutcome::FreshQuery
        }
    }
}

fn normalize_reply(reply: &str) -> Vec<String> {
    reply
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| !FILLER_TOKENS.contains(t))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daicos_candidates() -> Vec<String> {
        vec!["Josh Daicos".to_string(), "Nick Daicos".to_string()]
    }

    #[test]
    fn test_single_token_matches_one_name_part() {
        assert_eq!(
            match_reply("Josh", &daicos_candidates()),
            ReplyMatch::Unique("Josh Daicos".to_string())
        );
        assert_eq!(
            match_reply("nick", &daicos_candidates()),
            ReplyMatch::Unique("Nick Daicos".to_string())
        );
    }

    #[test]
    fn test_shared_surname_stays_ambiguous() {
        assert_eq!(
            match_reply("Daicos", &daicos_candidates()),
            ReplyMatch::Ambiguous(daicos_candidates())
        );
    }

    #[test]
    fn test_filler_words_are_stripped() {
        assert_eq!(
            match_reply("nick please", &daicos_candidates()),
            ReplyMatch::Unique("Nick Daicos".to_string())
        );
        assert_eq!(
            match_reply("Josh, thanks!", &daicos_candidates()),
            ReplyMatch::Unique("Josh Daicos".to_string())
        );
    }

    #[test]
    fn test_full_name_and_reordered_tokens_match() {
        assert_eq!(
            match_reply("josh daicos", &daicos_candidates()),
            ReplyMatch::Unique("Josh Daicos".to_string())
        );
        assert_eq!(
            match_reply("Daicos Nick", &daicos_candidates()),
            ReplyMatch::Unique("Nick Daicos".to_string())
        );
    }

    #[test]
    fn test_unrelated_reply_matches_nothing() {
        assert_eq!(match_reply("Dangerfield", &daicos_candidates()), ReplyMatch::NoMatch);
        assert_eq!(match_reply("please", &daicos_candidates()), ReplyMatch::NoMatch);
        assert_eq!(match_reply("", &daicos_candidates()), ReplyMatch::NoMatch);
    }

    #[test]
    fn test_pending_derivation_requires_latest_assistant_turn() {
        let mut turns = vec![
            ConversationTurn::user("How many goals did Daicos kick?"),
            ConversationTurn::assistant("Which Daicos?")
                .with_clarification(daicos_candidates(), "Which player did you mean?"),
        ];

        let pending = derive_pending_clarification(&turns).unwrap();
        assert_eq!(pending.candidates, daicos_candidates());
        assert_eq!(pending.question.as_deref(), Some("Which player did you mean?"));

        // A trailing user turn does not clear pendingness
        turns.push(ConversationTurn::user("Josh please"));
        assert!(derive_pending_clarification(&turns).is_some());

        // A newer plain assistant turn does
        turns.push(ConversationTurn::assistant("Josh Daicos kicked 21 goals."));
        assert!(derive_pending_clarification(&turns).is_none());
    }

    #[test]
    fn test_pending_derivation_rejects_empty_candidates() {
        let turns = vec![
            ConversationTurn::assistant("Which player?")
                .with_clarification(Vec::<String>::new(), "Which player did you mean?"),
        ];
        assert!(derive_pending_clarification(&turns).is_none());
    }

    #[test]
    fn test_followup_policy() {
        let turns = vec![
            ConversationTurn::user("How many goals did Daicos kick last year?"),
            ConversationTurn::assistant("Which Daicos?")
                .with_clarification(daicos_candidates(), "Which player did you mean?"),
            ConversationTurn::user("Josh please"),
        ];

        // Unique match resolves
        assert_eq!(
            resolve_followup(&turns, "Josh please"),
            FollowupOutcome::Resolved("Josh Daicos".to_string())
        );

        // Multiple matches re-ask with the same candidates
        match resolve_followup(&turns, "Daicos") {
            FollowupOutcome::ReAsk(pending) => assert_eq!(pending.candidates, daicos_candidates()),
            other => panic!("expected ReAsk, got {other:?}"),
        }

        // Zero matches fall back to a fresh query
        assert_eq!(
            resolve_followup(&turns, "What about Dangerfield?"),
            FollowupOutcome::FreshQuery
        );

        // No pending clarification at all
        let plain = vec![ConversationTurn::assistant("Geelong won by 30.")];
        assert_eq!(resolve_followup(&plain, "Josh"), FollowupOutcome::FreshQuery);
    }
}
