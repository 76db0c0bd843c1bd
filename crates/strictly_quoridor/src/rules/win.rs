//! Win detection logic for Quoridor.

use super::super::{GameState, PlayerId};
use tracing::instrument;

/// Returns the seated player whose pawn stands on their goal row, if any.
///
/// The host is checked first. Only one pawn moves per transition, so two
/// simultaneous winners cannot arise through play.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn check_winner(state: &GameState) -> Option<PlayerId> {
    state
        .players()
        .find(|player| player.has_reached_goal())
        .map(|player| player.id().clone())
}
