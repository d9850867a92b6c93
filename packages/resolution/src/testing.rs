//! Testing utilities including a mock player store.
//!
//! Useful for testing applications that embed the resolution pipeline
//! without a database, including its failure paths.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ResolutionError, Result};
use crate::traits::store::PlayerStore;
use crate::types::candidate::{PlayerCandidate, PlayerId};

/// Record of a call made to the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStoreCall {
    FindPlayers { fragment: String },
    ActivityCheck { id: PlayerId, seasons: Vec<i32> },
}

#[derive(Debug, Clone)]
struct MockPlayer {
    id: i64,
    name: String,
    seasons: BTreeSet<i32>,
}

/// A mock player store with seedable data, failure injection, and
/// call tracking for assertions.
#[derive(Default)]
pub struct MockPlayerStore {
    players: Arc<RwLock<Vec<MockPlayer>>>,
    fail_find: Arc<AtomicBool>,
    fail_activity: Arc<AtomicBool>,
    calls: Arc<RwLock<Vec<MockStoreCall>>>,
}

impl MockPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a player with their active seasons.
    pub fn with_player(
        self,
        id: i64,
        name: impl Into<String>,
        seasons: impl IntoIterator<Item = i32>,
    ) -> Self {
        self.players.write().unwrap().push(MockPlayer {
            id,
            name: name.into(),
            seasons: seasons.into_iter().collect(),
        });
        self
    }

    /// Make every name lookup fail with a store error.
    pub fn failing_lookups(self) -> Self {
        self.fail_find.store(true, Ordering::SeqCst);
        self
    }

    /// Make every activity check fail with a store error.
    pub fn failing_activity_checks(self) -> Self {
        self.fail_activity.store(true, Ordering::SeqCst);
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockStoreCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: MockStoreCall) {
        self.calls.write().unwrap().push(call);
    }
}

#[async_trait]
impl PlayerStore for MockPlayerStore {
    async fn find_players_by_name(&self, fragment: &str) -> Result<Vec<PlayerCandidate>> {
        self.record(MockStoreCall::FindPlayers {
            fragment: fragment.to_string(),
        });

        if self.fail_find.load(Ordering::SeqCst) {
            return Err(ResolutionError::store(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock store: lookup failure injected",
            )));
        }

        let needle = fragment.trim().to_lowercase();
        let players = self.players.read().unwrap();
        let mut matches: Vec<PlayerCandidate> = players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .map(|p| PlayerCandidate::new(p.name.clone(), p.id))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn player_active_in_seasons(&self, id: PlayerId, seasons: &[i32]) -> Result<bool> {
        self.record(MockStoreCall::ActivityCheck {
            id,
            seasons: seasons.to_vec(),
        });

        if self.fail_activity.load(Ordering::SeqCst) {
            return Err(ResolutionError::store(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "mock store: activity check failure injected",
            )));
        }

        let players = self.players.read().unwrap();
        Ok(players
            .iter()
            .find(|p| p.id == id.0)
            .map(|p| seasons.iter().any(|s| p.seasons.contains(s)))
            .unwrap_or(false))
    }
}
