//! Line-oriented hot-seat play through the authoritative store.

use super::config::Config;
use super::report::{status_line, turn_line};
use derive_more::{Display, From};
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_quoridor::{
    Action, GameId, GameState, GameStatus, GameStore, Orientation, PlayerId, Position,
    StoreError, Wall,
};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Commands
// ─────────────────────────────────────────────────────────────

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// `move R C`
    Move(Position),
    /// `wall h|v R C`
    Wall(Orientation, Position),
    /// `end`
    End,
    /// `resign`
    Resign,
    /// `quit`
    Quit,
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Cannot read '{}': {}", input, reason)]
pub struct CommandError {
    /// The offending input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl std::error::Error for CommandError {}

impl FromStr for PlayCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &'static str| CommandError {
            input: line.trim().to_string(),
            reason,
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let coord = |word: &str| word.parse::<u8>().map_err(|_| fail("coordinates are numbers"));

        match words.as_slice() {
            ["move", row, col] => Ok(PlayCommand::Move(Position::new(coord(*row)?, coord(*col)?))),
            ["wall", kind, row, col] => {
                let orientation = match *kind {
                    "h" => Orientation::Horizontal,
                    "v" => Orientation::Vertical,
                    _ => return Err(fail("wall orientation is h or v")),
                };
                Ok(PlayCommand::Wall(orientation, Position::new(coord(*row)?, coord(*col)?)))
            }
            ["end"] => Ok(PlayCommand::End),
            ["resign"] => Ok(PlayCommand::Resign),
            ["quit"] => Ok(PlayCommand::Quit),
            _ => Err(fail("expected move R C, wall h|v R C, end, resign or quit")),
        }
    }
}

impl PlayCommand {
    /// Turns the command into an action for the player holding the turn.
    ///
    /// Returns `None` for `quit`.
    pub fn into_action(self, state: &GameState, player: &PlayerId) -> Option<Action> {
        let player = player.clone();
        match self {
            PlayCommand::Move(to) => Some(Action::MovePawn { player, to }),
            PlayCommand::Wall(orientation, anchor) => Some(Action::PlaceWall {
                player,
                wall: Wall::new(anchor, orientation),
            }),
            PlayCommand::End => Some(Action::EndTurn),
            PlayCommand::Resign => state
                .opponent_of(&player)
                .map(|opponent| Action::GameOver {
                    winner: opponent.id().clone(),
                }),
            PlayCommand::Quit => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Session
// ─────────────────────────────────────────────────────────────

/// A fatal play error. Rule rejections are reported to the players instead.
#[derive(Debug, Display, From)]
pub enum PlayError {
    /// Reading input or writing output failed.
    #[display("I/O error: {}", _0)]
    Io(std::io::Error),

    /// The store refused for a reason other than the rules.
    #[display("Store error: {}", _0)]
    Store(StoreError),
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Io(err) => Some(err),
            PlayError::Store(err) => Some(err),
        }
    }
}

/// Runs a hot-seat game until it finishes, input ends, or a player quits.
///
/// Returns the last accepted snapshot.
#[instrument(skip_all)]
pub fn play<R: BufRead, W: Write>(
    store: &GameStore,
    config: &Config,
    input: R,
    mut output: W,
) -> Result<GameState, PlayError> {
    let created = store.create_game(PlayerId::new(config.host_id()), config.host_name())?;
    let game_id: GameId = created.state().id().clone();
    let join = Action::Join {
        player: PlayerId::new(config.guest_id()),
        name: config.guest_name().clone(),
    };
    let mut current = store.submit(&game_id, *created.version(), join)?;
    info!(game_id = %game_id, "Hot-seat game started");

    writeln!(output, "{}", status_line(current.state()))?;
    let mut lines = input.lines();

    while current.state().status() == GameStatus::Active {
        let Some(player) = current.state().current_turn().cloned() else {
            break;
        };
        writeln!(output, "{}", turn_line(current.state(), &player))?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };
        let Some(action) = command.into_action(current.state(), &player) else {
            info!("Player quit");
            break;
        };

        match store.submit(&game_id, *current.version(), action) {
            Ok(next) => {
                current = next;
                writeln!(output, "{}", status_line(current.state()))?;
            }
            Err(StoreError::Rejected(err)) => {
                warn!(error = %err, "Move rejected");
                writeln!(output, "Rejected: {}", err)?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(current.state().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "move 1 4".parse::<PlayCommand>(),
            Ok(PlayCommand::Move(Position::new(1, 4)))
        );
        assert_eq!(
            "  wall v 3 5 ".parse::<PlayCommand>(),
            Ok(PlayCommand::Wall(Orientation::Vertical, Position::new(3, 5)))
        );
        assert_eq!("end".parse::<PlayCommand>(), Ok(PlayCommand::End));
        assert_eq!("resign".parse::<PlayCommand>(), Ok(PlayCommand::Resign));
        assert_eq!("quit".parse::<PlayCommand>(), Ok(PlayCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        let err = "wall x 1 1".parse::<PlayCommand>().unwrap_err();
        assert_eq!(err.reason, "wall orientation is h or v");
        let err = "move one 4".parse::<PlayCommand>().unwrap_err();
        assert_eq!(err.reason, "coordinates are numbers");
        assert!("jump".parse::<PlayCommand>().is_err());
    }

    #[test]
    fn test_resign_names_opponent() {
        let store = GameStore::new();
        let config = Config::default();
        let input = b"resign\n".as_slice();
        let mut output = Vec::new();

        let state = play(&store, &config, input, &mut output).unwrap();
        assert_eq!(state.status(), GameStatus::Finished);
        assert_eq!(state.winner(), Some(&PlayerId::new("p2")));
    }
}
