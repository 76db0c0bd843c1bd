//! Replay scripts: a host plus an ordered list of actions, stored as TOML.
//!
//! ```toml
//! host = "alice"
//! host_name = "Alice"
//!
//! [[actions]]
//! type = "join"
//! player = "bob"
//! name = "Bob"
//!
//! [[actions]]
//! type = "place_wall"
//! player = "alice"
//! wall = { anchor = { row = 7, col = 4 }, orientation = "horizontal" }
//! ```

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_quoridor::{Action, GameId, GameState, PlayerId, ReplayError, replay};
use tracing::{debug, info, instrument};

/// A recorded game, replayable from its first action.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Script {
    /// Game identity given to the rebuilt snapshot.
    #[serde(default = "default_game_id")]
    game_id: GameId,

    /// Creation time given to the rebuilt snapshot.
    #[serde(default = "default_created_at")]
    created_at: DateTime<Utc>,

    /// The hosting player.
    host: PlayerId,

    /// The host's display name.
    #[serde(default = "default_host_name")]
    host_name: String,

    /// Actions in submission order.
    #[serde(default)]
    actions: Vec<Action>,
}

fn default_game_id() -> GameId {
    GameId::new("script")
}

fn default_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn default_host_name() -> String {
    "Host".to_string()
}

impl Script {
    /// Loads a script from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        debug!("Loading script from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScriptError::new(format!("Failed to read script: {}", e)))?;
        let script = Self::parse(&content)?;
        info!(actions = script.actions.len(), "Script loaded");
        Ok(script)
    }

    /// Parses a script from TOML text.
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        toml::from_str(content)
            .map_err(|e| ScriptError::new(format!("Failed to parse script: {}", e)))
    }

    /// The waiting game every replay starts from.
    pub fn initial_state(&self) -> GameState {
        GameState::new(
            self.game_id.clone(),
            self.created_at,
            self.host.clone(),
            self.host_name.clone(),
        )
    }

    /// Replays every action, stopping at the first rejection.
    #[instrument(skip(self), fields(game_id = %self.game_id, actions = self.actions.len()))]
    pub fn run(&self) -> Result<GameState, ReplayError> {
        replay(&self.initial_state(), &self.actions)
    }
}

/// Script loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Script error: {} at {}:{}", message, file, line)]
pub struct ScriptError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScriptError {
    /// Creates a new script error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
