//! Authoritative in-memory game store.
//!
//! The store is the single holder of each game's current snapshot. Every
//! submission names the version it was built against; a stale version is
//! refused before the rules engine sees the action, so two racing callers
//! can never both apply a move to the same snapshot.

use super::transition::apply;
use super::{Action, GameId, GameState, PlayerId, RuleError, new_game};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────
//  Records
// ─────────────────────────────────────────────────────────────

/// A snapshot together with the store version it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Versioned {
    /// The snapshot.
    state: GameState,
    /// Incremented on every accepted action, starting at 0.
    version: u64,
}

/// An accepted action, as recorded in a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ActionRecord {
    /// Record identity.
    id: Uuid,
    /// Game the action was applied to.
    game_id: GameId,
    /// Position in the game's history, starting at 1.
    sequence: u64,
    /// The accepted action.
    action: Action,
    /// When the store accepted it.
    recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredGame {
    state: GameState,
    version: u64,
    history: Vec<ActionRecord>,
}

impl StoredGame {
    fn versioned(&self) -> Versioned {
        Versioned {
            state: self.state.clone(),
            version: self.version,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Errors
// ─────────────────────────────────────────────────────────────

/// Why the store refused a request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum StoreError {
    /// No game with this id is held.
    #[display("Unknown game {}", _0)]
    #[from(ignore)]
    UnknownGame(GameId),

    /// The submission was built against an older snapshot.
    #[display("Version conflict: expected {}, current is {}", expected, current)]
    #[from(ignore)]
    VersionConflict {
        /// Version the caller built against.
        expected: u64,
        /// Version the store holds.
        current: u64,
    },

    /// The rules engine rejected the action.
    #[display("Action rejected: {}", _0)]
    Rejected(RuleError),

    /// A previous holder of the lock panicked.
    #[display("Game store lock poisoned")]
    #[from(ignore)]
    LockPoisoned,
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Store
// ─────────────────────────────────────────────────────────────

/// Clonable handle to the shared game table.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Arc<Mutex<HashMap<GameId, StoredGame>>>,
}

impl GameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GameId, StoredGame>>, StoreError> {
        self.games.lock().map_err(|_| {
            warn!("Game store lock poisoned");
            StoreError::LockPoisoned
        })
    }

    /// Opens a new waiting game hosted by `host`, at version 0.
    #[instrument(skip(self, host_name))]
    pub fn create_game(
        &self,
        host: PlayerId,
        host_name: impl Into<String>,
    ) -> Result<Versioned, StoreError> {
        self.insert(new_game(host, host_name))
    }

    /// Takes ownership of an existing snapshot, at version 0.
    ///
    /// Replaces any game already held under the same id.
    #[instrument(skip_all, fields(game_id = %state.id()))]
    pub fn insert(&self, state: GameState) -> Result<Versioned, StoreError> {
        let stored = StoredGame {
            state,
            version: 0,
            history: Vec::new(),
        };
        let versioned = stored.versioned();
        let mut games = self.lock()?;
        if games.insert(stored.state.id().clone(), stored).is_some() {
            warn!("Replaced an existing game");
        }
        info!(games = games.len(), "Game stored");
        Ok(versioned)
    }

    /// Current snapshot and version of a game.
    #[instrument(skip(self))]
    pub fn get(&self, game_id: &GameId) -> Result<Versioned, StoreError> {
        self.lock()?
            .get(game_id)
            .map(StoredGame::versioned)
            .ok_or_else(|| StoreError::UnknownGame(game_id.clone()))
    }

    /// Applies an action if the caller saw the current version.
    ///
    /// On success the snapshot is replaced, the version goes up by one, and
    /// the action is appended to the history. On any failure nothing changes.
    #[instrument(skip(self, action), fields(action = action.kind()))]
    pub fn submit(
        &self,
        game_id: &GameId,
        expected_version: u64,
        action: Action,
    ) -> Result<Versioned, StoreError> {
        let mut games = self.lock()?;
        let stored = games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::UnknownGame(game_id.clone()))?;

        if stored.version != expected_version {
            warn!(
                expected = expected_version,
                current = stored.version,
                "Stale submission refused"
            );
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                current: stored.version,
            });
        }

        let next = apply(Some(&stored.state), &action)?;
        stored.state = next;
        stored.version += 1;
        stored.history.push(ActionRecord {
            id: Uuid::new_v4(),
            game_id: game_id.clone(),
            sequence: stored.version,
            action,
            recorded_at: Utc::now(),
        });

        debug!(version = stored.version, status = %stored.state.status(), "Action accepted");
        Ok(stored.versioned())
    }

    /// Accepted actions for a game, oldest first.
    #[instrument(skip(self))]
    pub fn history(&self, game_id: &GameId) -> Result<Vec<ActionRecord>, StoreError> {
        self.lock()?
            .get(game_id)
            .map(|stored| stored.history.clone())
            .ok_or_else(|| StoreError::UnknownGame(game_id.clone()))
    }

    /// Ids of every game held, in no particular order.
    pub fn game_ids(&self) -> Result<Vec<GameId>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, Position};

    fn join_action() -> Action {
        Action::Join {
            player: PlayerId::new("p2"),
            name: "Two".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = GameStore::new();
        let created = store.create_game(PlayerId::new("p1"), "One").unwrap();
        assert_eq!(*created.version(), 0);

        let fetched = store.get(created.state().id()).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.game_ids().unwrap(), vec![created.state().id().clone()]);
    }

    #[test]
    fn test_submit_bumps_version_and_records() {
        let store = GameStore::new();
        let created = store.create_game(PlayerId::new("p1"), "One").unwrap();
        let id = created.state().id().clone();

        let joined = store.submit(&id, 0, join_action()).unwrap();
        assert_eq!(*joined.version(), 1);
        assert_eq!(joined.state().status(), GameStatus::Active);

        let moved = store
            .submit(
                &id,
                1,
                Action::MovePawn {
                    player: PlayerId::new("p1"),
                    to: Position::new(1, 4),
                },
            )
            .unwrap();
        assert_eq!(*moved.version(), 2);

        let history = store.history(&id).unwrap();
        let sequences: Vec<u64> = history.iter().map(|record| *record.sequence()).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(history[0].action(), &join_action());
    }

    #[test]
    fn test_stale_version_conflicts() {
        let store = GameStore::new();
        let id = store
            .create_game(PlayerId::new("p1"), "One")
            .unwrap()
            .state()
            .id()
            .clone();
        store.submit(&id, 0, join_action()).unwrap();

        let err = store.submit(&id, 0, Action::EndTurn).unwrap_err();
        assert_eq!(
            err,
            StoreError::VersionConflict {
                expected: 0,
                current: 1
            }
        );
        assert_eq!(*store.get(&id).unwrap().version(), 1);
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let store = GameStore::new();
        let created = store.create_game(PlayerId::new("p1"), "One").unwrap();
        let id = created.state().id().clone();

        let err = store.submit(&id, 0, Action::EndTurn).unwrap_err();
        assert_eq!(
            err,
            StoreError::Rejected(RuleError::GameNotActive(GameStatus::Waiting))
        );
        assert_eq!(store.get(&id).unwrap(), created);
        assert!(store.history(&id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_game() {
        let store = GameStore::new();
        let missing = GameId::new("missing");
        assert_eq!(
            store.get(&missing),
            Err(StoreError::UnknownGame(missing.clone()))
        );
        assert!(matches!(
            store.submit(&missing, 0, Action::EndTurn),
            Err(StoreError::UnknownGame(_))
        ));
    }
}
