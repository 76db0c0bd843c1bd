//! Geometry and occupancy predicates over a snapshot.
//!
//! These are the primitives both validators and the path search are built
//! from. None of them look at turn order or game status.

use super::{GameState, PlayerId, Position, Wall};

/// Returns true if both coordinates lie in `[0, 8]`.
pub fn in_bounds(pos: Position) -> bool {
    pos.in_bounds()
}

/// Returns true if the *other* seated player's pawn stands on `pos`.
///
/// Unknown players have no opponent, so this is false for them.
pub fn occupied_by_opponent(state: &GameState, player: &PlayerId, pos: Position) -> bool {
    state
        .opponent_of(player)
        .is_some_and(|opponent| opponent.position() == pos)
}

/// Returns true if any wall covers the edge between two adjacent cells.
pub fn wall_blocks(walls: &[Wall], from: Position, to: Position) -> bool {
    walls.iter().any(|wall| wall.blocks(from, to))
}

/// Neighbouring cells reachable from `pos` by a single unblocked step.
///
/// Pawns are ignored: they never cut a route, only the walls do.
pub fn open_neighbors(walls: &[Wall], pos: Position) -> impl Iterator<Item = Position> + '_ {
    pos.neighbors()
        .filter(move |next| !wall_blocks(walls, pos, *next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, GameState, join};
    use chrono::Utc;

    fn active_game() -> GameState {
        let state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        join(&state, PlayerId::new("p2"), "Two").unwrap()
    }

    #[test]
    fn test_opponent_occupancy() {
        let state = active_game();
        let p1 = PlayerId::new("p1");
        let p2 = PlayerId::new("p2");

        assert!(occupied_by_opponent(&state, &p1, Position::new(8, 4)));
        assert!(!occupied_by_opponent(&state, &p1, Position::new(0, 4)));
        assert!(occupied_by_opponent(&state, &p2, Position::new(0, 4)));
        assert!(!occupied_by_opponent(&state, &PlayerId::new("ghost"), Position::new(8, 4)));
    }

    #[test]
    fn test_wall_blocks_either_direction() {
        let walls = vec![Wall::horizontal(1, 4)];
        assert!(wall_blocks(&walls, Position::new(0, 4), Position::new(1, 4)));
        assert!(wall_blocks(&walls, Position::new(1, 4), Position::new(0, 4)));
        assert!(!wall_blocks(&walls, Position::new(0, 3), Position::new(1, 3)));
        assert!(!wall_blocks(&[], Position::new(0, 4), Position::new(1, 4)));
    }

    #[test]
    fn test_open_neighbors_respects_walls() {
        let walls = vec![Wall::horizontal(1, 4), Wall::vertical(0, 4)];
        let open: Vec<_> = open_neighbors(&walls, Position::new(0, 4)).collect();
        assert_eq!(open, vec![Position::new(0, 5)]);
    }
}
