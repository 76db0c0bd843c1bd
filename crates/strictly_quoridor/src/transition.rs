//! State transition dispatcher.
//!
//! Every transition borrows the current snapshot, checks its contract, and
//! returns a fresh snapshot. Inputs are never mutated, so a rejected action
//! leaves the caller holding exactly what they had.

use super::contracts::{
    Contract, EndTurnContract, GameOverContract, JoinContract, MovePawnContract,
    PlaceWallContract,
};
use super::rules::check_winner;
use super::{
    Action, GameState, GameStatus, Player, PlayerId, Position, RuleError, Seat, Wall, new_game,
};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Dispatcher
// ─────────────────────────────────────────────────────────────

/// Applies an action to an optional snapshot.
///
/// With no snapshot only [`Action::Join`] is accepted: it opens a fresh
/// waiting game hosted by the joiner. Anything else fails with
/// [`RuleError::NoGame`].
#[instrument(skip(state), fields(action = action.kind()))]
pub fn apply(state: Option<&GameState>, action: &Action) -> Result<GameState, RuleError> {
    let Some(state) = state else {
        return match action {
            Action::Join { player, name } => {
                info!(host = %player, "No game yet, opening one");
                Ok(new_game(player.clone(), name.clone()))
            }
            _ => {
                warn!("Action without a game");
                Err(RuleError::NoGame)
            }
        };
    };

    let result = match action {
        Action::Join { player, name } => join(state, player.clone(), name.clone()),
        Action::MovePawn { player, to } => move_pawn(state, player.clone(), *to),
        Action::PlaceWall { player, wall } => place_wall(state, player.clone(), wall.clone()),
        Action::EndTurn => end_turn(state),
        Action::GameOver { winner } => game_over(state, winner.clone()),
    };

    if let Err(err) = &result {
        warn!(game_id = %state.id(), error = %err, "Action rejected");
    }
    result
}

// ─────────────────────────────────────────────────────────────
//  Transitions
// ─────────────────────────────────────────────────────────────

/// Seats a second player and starts the game.
///
/// The joiner takes the far side at (8, 4) with goal row 0, and the host
/// moves first.
#[instrument(skip(state, name), fields(game_id = %state.id()))]
pub fn join(
    state: &GameState,
    player: PlayerId,
    name: impl Into<String>,
) -> Result<GameState, RuleError> {
    JoinContract::pre(state, &player)?;

    let mut next = state.clone();
    next.seat_second(Player::new(player.clone(), name, Seat::Second));
    next.set_status(GameStatus::Active);
    next.set_current_turn(Some(state.player1().id().clone()));

    finish_transition(state, &next, JoinContract::post)?;
    info!(joiner = %player, "Game started");
    Ok(next)
}

/// Steps the player's pawn one cell.
///
/// Reaching the goal row ends the game with the mover as winner. Otherwise
/// the turn passes to the opponent.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn move_pawn(
    state: &GameState,
    player: PlayerId,
    to: Position,
) -> Result<GameState, RuleError> {
    let step = (player, to);
    MovePawnContract::pre(state, &step)?;
    let (player, to) = step;

    let mut next = state.clone();
    if let Some(pawn) = next.player_mut(&player) {
        pawn.set_position(to);
    }

    match check_winner(&next) {
        Some(winner) => {
            info!(winner = %winner, "Goal row reached");
            finish(&mut next, winner);
        }
        None => pass_turn(&mut next, &player),
    }

    finish_transition(state, &next, MovePawnContract::post)?;
    debug!(%player, %to, "Pawn moved");
    Ok(next)
}

/// Places a wall for the player, spending one from their supply.
#[instrument(skip(state, wall), fields(game_id = %state.id(), wall = %wall))]
pub fn place_wall(state: &GameState, player: PlayerId, wall: Wall) -> Result<GameState, RuleError> {
    let placement = (player, wall);
    PlaceWallContract::pre(state, &placement)?;
    let (player, wall) = placement;

    let mut next = state.clone();
    if let Some(placer) = next.player_mut(&player) {
        placer.spend_wall();
    }
    next.push_wall(wall);
    pass_turn(&mut next, &player);

    finish_transition(state, &next, PlaceWallContract::post)?;
    debug!(%player, walls = next.walls().len(), "Wall placed");
    Ok(next)
}

/// Passes the turn to the other player.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn end_turn(state: &GameState) -> Result<GameState, RuleError> {
    EndTurnContract::pre(state, &())?;

    let mut next = state.clone();
    if let Some(current) = state.current_turn() {
        pass_turn(&mut next, current);
    }

    finish_transition(state, &next, EndTurnContract::post)?;
    debug!("Turn ended");
    Ok(next)
}

/// Ends the game with the given winner, for resignations and timeouts.
///
/// Accepted from a waiting or active game.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn game_over(state: &GameState, winner: PlayerId) -> Result<GameState, RuleError> {
    GameOverContract::pre(state, &winner)?;

    let mut next = state.clone();
    finish(&mut next, winner.clone());

    finish_transition(state, &next, GameOverContract::post)?;
    info!(%winner, "Game over");
    Ok(next)
}

// ─────────────────────────────────────────────────────────────
//  Replay
// ─────────────────────────────────────────────────────────────

/// A replayed action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Action {} ({}) rejected: {}", index, action, source)]
pub struct ReplayError {
    /// Zero-based position of the rejected action.
    pub index: usize,
    /// The rejected action.
    pub action: Action,
    /// Why it was rejected.
    pub source: RuleError,
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Rebuilds a snapshot by applying actions in order to `initial`.
///
/// Stops at the first rejected action.
#[instrument(skip_all, fields(game_id = %initial.id(), actions = actions.len()))]
pub fn replay(initial: &GameState, actions: &[Action]) -> Result<GameState, ReplayError> {
    let mut state = initial.clone();
    for (index, action) in actions.iter().enumerate() {
        state = apply(Some(&state), action).map_err(|source| ReplayError {
            index,
            action: action.clone(),
            source,
        })?;
    }
    debug!(status = %state.status(), "Replay complete");
    Ok(state)
}

// ─────────────────────────────────────────────────────────────
//  Helpers
// ─────────────────────────────────────────────────────────────

fn pass_turn(state: &mut GameState, from: &PlayerId) {
    let next = state.opponent_of(from).map(|opponent| opponent.id().clone());
    state.set_current_turn(next);
}

fn finish(state: &mut GameState, winner: PlayerId) {
    state.set_status(GameStatus::Finished);
    state.set_current_turn(None);
    state.set_winner(Some(winner));
}

#[cfg(debug_assertions)]
fn finish_transition(
    before: &GameState,
    after: &GameState,
    post: fn(&GameState, &GameState) -> Result<(), RuleError>,
) -> Result<(), RuleError> {
    post(before, after)
}

#[cfg(not(debug_assertions))]
fn finish_transition(
    _before: &GameState,
    _after: &GameState,
    _post: fn(&GameState, &GameState) -> Result<(), RuleError>,
) -> Result<(), RuleError> {
    Ok(())
}
