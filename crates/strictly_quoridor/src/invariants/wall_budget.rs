//! Wall budget invariant: every placed wall was paid for exactly once.

use super::super::{GameState, WALLS_PER_PLAYER};
use super::Invariant;

/// Invariant: remaining walls plus placed walls equal the starting supply.
///
/// A seat that is still empty counts as holding a full supply. Since the
/// wall set only grows, this also means wall counts never go back up.
pub struct WallBudgetInvariant;

impl Invariant<GameState> for WallBudgetInvariant {
    fn holds(state: &GameState) -> bool {
        let remaining: usize = usize::from(state.player1().walls_left())
            + usize::from(
                state
                    .player2()
                    .map_or(WALLS_PER_PLAYER, |player| player.walls_left()),
            );
        let supply = 2 * usize::from(WALLS_PER_PLAYER);
        state.players().all(|player| player.walls_left() <= WALLS_PER_PLAYER)
            && remaining + state.walls().len() == supply
    }

    fn description() -> &'static str {
        "Remaining walls plus placed walls equal the starting supply"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, PlayerId, Wall, join, place_wall};
    use chrono::Utc;

    #[test]
    fn test_budget_tracks_placements() {
        let state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        assert!(WallBudgetInvariant::holds(&state));

        let state = join(&state, PlayerId::new("p2"), "Two").unwrap();
        let state = place_wall(&state, PlayerId::new("p1"), Wall::horizontal(4, 0)).unwrap();
        let state = place_wall(&state, PlayerId::new("p2"), Wall::horizontal(4, 4)).unwrap();
        assert!(WallBudgetInvariant::holds(&state));
    }

    #[test]
    fn test_free_wall_violates() {
        let mut state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        state.push_wall(Wall::horizontal(4, 4));
        assert!(!WallBudgetInvariant::holds(&state));
    }

    #[test]
    fn test_spent_wall_without_placement_violates() {
        let mut state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        if let Some(player) = state.player_mut(&PlayerId::new("p1")) {
            player.spend_wall();
        }
        assert!(!WallBudgetInvariant::holds(&state));
    }
}
