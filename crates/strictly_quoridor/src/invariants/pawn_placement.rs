//! Pawn placement invariant: pawns stay on the board and apart.

use super::super::GameState;
use super::Invariant;

/// Invariant: every pawn is on the board and no two pawns share a cell.
pub struct PawnPlacementInvariant;

impl Invariant<GameState> for PawnPlacementInvariant {
    fn holds(state: &GameState) -> bool {
        let on_board = state.players().all(|player| player.position().in_bounds());
        let apart = state
            .player2()
            .is_none_or(|guest| guest.position() != state.player1().position());
        on_board && apart
    }

    fn description() -> &'static str {
        "Pawns are on the board and never share a cell"
    }
}
