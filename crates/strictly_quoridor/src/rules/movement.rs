//! Pawn move validation.

use super::super::geometry::{in_bounds, occupied_by_opponent, wall_blocks};
use super::super::{GameState, PlayerId, Position, RuleError};
use tracing::{debug, instrument};

/// Validates a single pawn step, reporting the first rule it breaks.
///
/// Checks, in order: the player is seated, the target is on the board, the
/// opponent is not on it, it is exactly one orthogonal step away (there is
/// no jump rule), and no wall covers the crossed edge. Turn order is the
/// dispatcher's business and is not checked here.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn validate_move(
    state: &GameState,
    player: &PlayerId,
    target: Position,
) -> Result<(), RuleError> {
    let from = state
        .player(player)
        .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))?
        .position();

    if !in_bounds(target) {
        return Err(RuleError::OutOfBounds(target));
    }

    if occupied_by_opponent(state, player, target) {
        return Err(RuleError::Occupied(target));
    }

    if !from.is_adjacent(target) {
        return Err(RuleError::IllegalStep { from, to: target });
    }

    if wall_blocks(state.walls(), from, target) {
        return Err(RuleError::Blocked { from, to: target });
    }

    debug!(%from, %target, "Move is legal");
    Ok(())
}

/// Boolean form of [`validate_move`].
pub fn is_valid_move(state: &GameState, player: &PlayerId, target: Position) -> bool {
    validate_move(state, player, target).is_ok()
}

/// Cells the player could step to right now, for highlighting.
///
/// Empty for unknown players. Not authoritative: the dispatcher always
/// revalidates.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn valid_moves(state: &GameState, player: &PlayerId) -> Vec<Position> {
    let Some(seated) = state.player(player) else {
        return Vec::new();
    };
    seated
        .position()
        .neighbors()
        .filter(|target| is_valid_move(state, player, *target))
        .collect()
}
