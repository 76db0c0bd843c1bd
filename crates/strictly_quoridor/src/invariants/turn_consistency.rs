//! Turn consistency invariant: status, turn holder and winner agree.

use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: the turn holder and winner match the lifecycle status.
///
/// - `Waiting`: no second player, no turn, no winner.
/// - `Active`: both seated, the turn belongs to one of them, no winner.
/// - `Finished`: a seated winner and no turn.
pub struct TurnConsistencyInvariant;

impl Invariant<GameState> for TurnConsistencyInvariant {
    fn holds(state: &GameState) -> bool {
        match state.status() {
            GameStatus::Waiting => {
                state.player2().is_none()
                    && state.current_turn().is_none()
                    && state.winner().is_none()
            }
            GameStatus::Active => {
                state.player2().is_some()
                    && state.winner().is_none()
                    && state
                        .current_turn()
                        .is_some_and(|turn| state.player(turn).is_some())
            }
            GameStatus::Finished => {
                state.current_turn().is_none()
                    && state
                        .winner()
                        .is_some_and(|winner| state.player(winner).is_some())
            }
        }
    }

    fn description() -> &'static str {
        "Turn holder and winner are consistent with the game status"
    }
}
