//! In-memory player store for tests and embedded use.

use std::collections::BTreeSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::store::PlayerStore;
use crate::types::candidate::{PlayerCandidate, PlayerId};

#[derive(Debug)]
struct StoredPlayer {
    id: i64,
    name: String,
    seasons: BTreeSet<i32>,
}

/// A `PlayerStore` backed by an in-memory list.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<Vec<StoredPlayer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player with the seasons they have recorded stats in.
    pub fn insert_player(
        &self,
        id: i64,
        name: impl Into<String>,
        seasons: impl IntoIterator<Item = i32>,
    ) {
        self.players.write().unwrap().push(StoredPlayer {
            id,
            name: name.into(),
            seasons: seasons.into_iter().collect(),
        });
    }

    pub fn player_count(&self) -> usize {
        self.players.read().unwrap().len()
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn find_players_by_name(&self, fragment: &str) -> Result<Vec<PlayerCandidate>> {
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
        let players = self.players.read().unwrap();
        Ok(players
            .iter()
            .find(|p| p.id == id.0)
            .map(|p| seasons.iter().any(|s| p.seasons.contains(s)))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_substring_lookup_is_case_insensitive_and_sorted() {
        let store = MemoryStore::new();
        store.insert_player(2, "Nick Daicos", [2024]);
        store.insert_player(1, "Josh Daicos", [2024]);

        let matches = store.find_players_by_name("dAiCoS").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "Josh Daicos");
        assert_eq!(matches[1].name, "Nick Daicos");

        assert!(store.find_players_by_name("Ablett").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_activity_check() {
        let store = MemoryStore::new();
        store.insert_player(1, "Josh Daicos", [2022, 2023]);

        let id = PlayerId(1);
        assert!(store.player_active_in_seasons(id, &[2023, 2024]).await.unwrap());
        assert!(!store.player_active_in_seasons(id, &[2024]).await.unwrap());
        assert!(!store.player_active_in_seasons(PlayerId(99), &[2023]).await.unwrap());
    }
}
