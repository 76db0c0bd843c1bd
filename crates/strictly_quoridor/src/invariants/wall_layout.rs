//! Wall layout invariant: placed walls are in range and never collide.

use super::super::GameState;
use super::Invariant;

/// Invariant: every wall is in range and no two walls share a slot, cross,
/// or overlap.
pub struct WallLayoutInvariant;

impl Invariant<GameState> for WallLayoutInvariant {
    fn holds(state: &GameState) -> bool {
        let walls = state.walls();
        walls.iter().all(|wall| wall.in_bounds())
            && walls.iter().enumerate().all(|(i, a)| {
                walls[i + 1..]
                    .iter()
                    .all(|b| !a.same_slot(b) && !a.crosses(b) && !a.overlaps(b))
            })
    }

    fn description() -> &'static str {
        "Walls are in range and never share a slot, cross, or overlap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, PlayerId, Wall};
    use chrono::Utc;

    fn empty() -> GameState {
        GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One")
    }

    #[test]
    fn test_disjoint_walls_hold() {
        let mut state = empty();
        state.push_wall(Wall::horizontal(4, 0));
        state.push_wall(Wall::horizontal(4, 2));
        state.push_wall(Wall::vertical(0, 8));
        assert!(WallLayoutInvariant::holds(&state));
    }

    #[test]
    fn test_crossing_walls_violate() {
        let mut state = empty();
        state.push_wall(Wall::horizontal(0, 3));
        state.push_wall(Wall::vertical(0, 4));
        assert!(!WallLayoutInvariant::holds(&state));
    }

    #[test]
    fn test_duplicate_walls_violate() {
        let mut state = empty();
        state.push_wall(Wall::vertical(2, 2));
        state.push_wall(Wall::vertical(2, 2));
        assert!(!WallLayoutInvariant::holds(&state));
    }
}
