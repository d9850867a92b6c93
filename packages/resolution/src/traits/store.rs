//! Storage trait for player identity lookups.
//!
//! The relational store owns player identity; this crate only issues
//! two bounded queries against it. Implementations must treat both as
//! pure reads with no side effects.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::candidate::{PlayerCandidate, PlayerId};

/// Read-only access to player identities and their recorded activity.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// All players whose stored name contains `fragment` as a
    /// case-insensitive substring, ordered by name.
    ///
    /// The name ordering is part of the contract: disambiguation
    /// tie-breaks ("default to first") depend on it being stable.
    async fn find_players_by_name(&self, fragment: &str) -> Result<Vec<PlayerCandidate>>;

    /// Whether the player has any recorded statistical activity in any
    /// of the given seasons.
    async fn player_active_in_seasons(&self, id: PlayerId, seasons: &[i32]) -> Result<bool>;
}

#[async_trait]
impl<T: PlayerStore + ?Sized> PlayerStore for std::sync::Arc<T> {
    async fn find_players_by_name(&self, fragment: &str) -> Result<Vec<PlayerCandidate>> {
        (**self).find_players_by_name(fragment).await
    }

    async fn player_active_in_seasons(&self, id: PlayerId, seasons: &[i32]) -> Result<bool> {
        (**self).player_active_in_seasons(id, seasons).await
    }
}
