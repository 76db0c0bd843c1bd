//! Strictly Quoridor - a pure, contract-checked Quoridor rules engine
//!
//! Two players race pawns across a 9x9 board, each spending up to ten walls
//! to slow the other down. A wall may never seal a player off from their
//! goal row.
//!
//! # Architecture
//!
//! - **Geometry**: bounds, occupancy and wall-edge predicates
//! - **Rules**: move and wall validators, path search, win detection
//! - **Transitions**: `apply` and per-action functions returning new snapshots
//! - **Contracts**: preconditions and debug-build postconditions per transition
//! - **Store**: authoritative, versioned holder of live games
//!
//! # Example
//!
//! ```
//! use strictly_quoridor::{Action, PlayerId, Position, apply, new_game};
//!
//! let game = new_game(PlayerId::new("alice"), "Alice");
//! let game = apply(
//!     Some(&game),
//!     &Action::Join { player: PlayerId::new("bob"), name: "Bob".into() },
//! )?;
//! let game = apply(
//!     Some(&game),
//!     &Action::MovePawn { player: PlayerId::new("alice"), to: Position::new(1, 4) },
//! )?;
//! assert_eq!(game.current_turn(), Some(&PlayerId::new("bob")));
//! # Ok::<(), strictly_quoridor::RuleError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod geometry;
mod position;
mod store;
mod transition;
mod types;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Board
pub use position::{BOARD_SIZE, Direction, MAX_INDEX, Position};

// Crate-level exports - Domain types
pub use types::{
    GameId, GameState, GameStatus, Orientation, Player, PlayerId, Seat, WALLS_PER_PLAYER, Wall,
    WallId, new_game,
};

// Crate-level exports - Actions and errors
pub use action::{Action, RuleError};

// Crate-level exports - Geometry
pub use geometry::{in_bounds, occupied_by_opponent, open_neighbors, wall_blocks};

// Crate-level exports - Rules
pub use rules::{
    all_players_can_reach_goal, can_reach_goal, check_winner, distance_to_goal, is_valid_move,
    is_valid_wall_placement, valid_moves, valid_wall_placements, validate_move,
    validate_wall_placement,
};

// Crate-level exports - Transitions
pub use transition::{ReplayError, apply, end_turn, game_over, join, move_pawn, place_wall, replay};

// Crate-level exports - Store
pub use store::{ActionRecord, GameStore, StoreError, Versioned};
