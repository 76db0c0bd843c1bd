//! First-class action and rejection types.
//!
//! Actions are domain events, not side effects. They carry the caller's
//! intent and are validated against a snapshot before anything is applied.

use super::{GameStatus, Orientation, PlayerId, Position, Wall};
use serde::{Deserialize, Serialize};

/// An intended transition, submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Seat a second player in a waiting game.
    Join {
        /// Identity of the joining player.
        player: PlayerId,
        /// Display name of the joining player.
        name: String,
    },
    /// Step a pawn to an adjacent cell.
    MovePawn {
        /// The acting player.
        player: PlayerId,
        /// Destination cell.
        to: Position,
    },
    /// Place a wall.
    PlaceWall {
        /// The acting player.
        player: PlayerId,
        /// The wall to place.
        wall: Wall,
    },
    /// Hand the turn to the other player without acting.
    EndTurn,
    /// End the game out of band (resignation, timeout).
    GameOver {
        /// The player declared the winner.
        winner: PlayerId,
    },
}

impl Action {
    /// Returns the player performing the action, if the action has one.
    pub fn actor(&self) -> Option<&PlayerId> {
        match self {
            Action::Join { player, .. }
            | Action::MovePawn { player, .. }
            | Action::PlaceWall { player, .. } => Some(player),
            Action::EndTurn | Action::GameOver { .. } => None,
        }
    }

    /// Short name of the action kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Join { .. } => "join",
            Action::MovePawn { .. } => "move_pawn",
            Action::PlaceWall { .. } => "place_wall",
            Action::EndTurn => "end_turn",
            Action::GameOver { .. } => "game_over",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Join { player, name } => write!(f, "{} ({}) joins", player, name),
            Action::MovePawn { player, to } => write!(f, "{} moves to {}", player, to),
            Action::PlaceWall { player, wall } => write!(f, "{} places {}", player, wall),
            Action::EndTurn => write!(f, "end turn"),
            Action::GameOver { winner } => write!(f, "game over, {} wins", winner),
        }
    }
}

/// Why an action or placement was rejected.
///
/// Every rejection is recoverable: the snapshot is untouched and the caller
/// may submit a different action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RuleError {
    /// The acting identity is not seated in this game.
    #[display("Player {} is not seated in this game", _0)]
    UnknownPlayer(PlayerId),

    /// The acting identity does not hold the turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(PlayerId),

    /// The action needs an active game.
    #[display("Game is {}, not active", _0)]
    GameNotActive(GameStatus),

    /// Target cell or wall anchor lies outside its legal range.
    #[display("Position {} is out of bounds", _0)]
    OutOfBounds(Position),

    /// Target cell holds the opponent's pawn.
    #[display("Square {} is occupied by the opponent", _0)]
    Occupied(Position),

    /// The move is not exactly one orthogonal step.
    #[display("Cannot step from {} to {}", from, to)]
    IllegalStep {
        /// Pawn's current cell.
        from: Position,
        /// Requested cell.
        to: Position,
    },

    /// A wall covers the edge being crossed.
    #[display("A wall blocks the step from {} to {}", from, to)]
    Blocked {
        /// Pawn's current cell.
        from: Position,
        /// Requested cell.
        to: Position,
    },

    /// The player has no walls left to place.
    #[display("Player {} has no walls remaining", _0)]
    NoWallsRemaining(PlayerId),

    /// A wall already occupies this anchor and orientation.
    #[display("A {} wall already stands at {}", orientation, anchor)]
    DuplicateWall {
        /// Anchor of the rejected wall.
        anchor: Position,
        /// Orientation of the rejected wall.
        orientation: Orientation,
    },

    /// The wall would cross a perpendicular wall.
    #[display("A {} wall at {} would cross an existing wall", orientation, anchor)]
    IntersectingWall {
        /// Anchor of the rejected wall.
        anchor: Position,
        /// Orientation of the rejected wall.
        orientation: Orientation,
    },

    /// The wall would share an edge with a parallel wall.
    #[display("A {} wall at {} would overlap an existing wall", orientation, anchor)]
    OverlappingWall {
        /// Anchor of the rejected wall.
        anchor: Position,
        /// Orientation of the rejected wall.
        orientation: Orientation,
    },

    /// The wall would leave a player with no route to their goal row.
    #[display("Wall would cut player {} off from their goal row", _0)]
    PathBlocked(PlayerId),

    /// Both seats are already taken.
    #[display("Game already has two players")]
    GameAlreadyFull,

    /// The game is past the joining stage.
    #[display("Game is {} and cannot be joined", _0)]
    GameNotJoinable(GameStatus),

    /// The joiner is already seated as the host.
    #[display("Player {} is already seated", _0)]
    DuplicatePlayer(PlayerId),

    /// Only a join can start from an empty slot.
    #[display("No game to apply the action to")]
    NoGame,

    /// A post-condition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RuleError {}
