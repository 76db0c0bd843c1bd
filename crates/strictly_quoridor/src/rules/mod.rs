//! Game rules for Quoridor.
//!
//! Pure functions that judge actions against a snapshot. They never mutate
//! and never look at whose turn it is; the dispatcher layers turn order and
//! status on top of them.

pub mod movement;
pub mod path;
pub mod walls;
pub mod win;

pub use movement::{is_valid_move, valid_moves, validate_move};
pub use path::{all_players_can_reach_goal, can_reach_goal, distance_to_goal};
pub use walls::{is_valid_wall_placement, valid_wall_placements, validate_wall_placement};
pub use win::check_winner;
