//! Reachability search over the open-edge graph.
//!
//! The board is treated as a 9x9 grid graph where an edge exists between
//! two orthogonal neighbours unless a wall covers it. Pawns never block.

use super::super::geometry::open_neighbors;
use super::super::position::BOARD_SIZE;
use super::super::{GameState, PlayerId, Position, Wall};
use std::collections::VecDeque;
use tracing::{instrument, trace};

const CELLS: usize = BOARD_SIZE as usize;

/// Length of the shortest route from `from` to any cell on `goal_row`.
///
/// Returns `None` when every route is walled off. A pawn already on its
/// goal row is at distance 0.
#[instrument(level = "debug", skip(walls), fields(walls = walls.len()))]
pub fn distance_to_goal(walls: &[Wall], from: Position, goal_row: u8) -> Option<usize> {
    if !from.in_bounds() {
        return None;
    }

    let mut visited = [[false; CELLS]; CELLS];
    let mut queue = VecDeque::new();
    visited[usize::from(from.row)][usize::from(from.col)] = true;
    queue.push_back((from, 0usize));

    while let Some((cell, distance)) = queue.pop_front() {
        if cell.row == goal_row {
            trace!(%cell, distance, "Goal row reached");
            return Some(distance);
        }
        for next in open_neighbors(walls, cell) {
            let seen = &mut visited[usize::from(next.row)][usize::from(next.col)];
            if !*seen {
                *seen = true;
                queue.push_back((next, distance + 1));
            }
        }
    }

    None
}

/// Returns true if some route connects `from` to `goal_row`.
pub fn can_reach_goal(walls: &[Wall], from: Position, goal_row: u8) -> bool {
    distance_to_goal(walls, from, goal_row).is_some()
}

/// Checks that every seated player can still reach their goal row with the
/// given wall set.
///
/// Returns the first player found cut off.
#[instrument(level = "debug", skip_all, fields(game_id = %state.id(), walls = walls.len()))]
pub fn all_players_can_reach_goal(state: &GameState, walls: &[Wall]) -> Result<(), PlayerId> {
    match state
        .players()
        .find(|player| !can_reach_goal(walls, player.position(), player.goal_row()))
    {
        Some(player) => Err(player.id().clone()),
        None => Ok(()),
    }
}
