//! Contract-based validation for Quoridor transitions.
//!
//! Contracts pair the preconditions a transition needs with the
//! postconditions it promises: {P(state, action)} transition {Q(before, after)}.
//! Preconditions are always checked. The dispatcher checks postconditions in
//! debug builds only.

use super::invariants::{InvariantSet, InvariantViolation, QuoridorInvariants};
use super::rules::{validate_move, validate_wall_placement};
use super::{Action, GameState, GameStatus, PlayerId, Position, RuleError, Wall};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), RuleError>;

    /// Checks postconditions after applying the action.
    ///
    /// This verifies that the transition maintained system invariants.
    fn post(before: &S, after: &S) -> Result<(), RuleError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must be active.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with [`RuleError::GameNotActive`] unless the game is active.
    pub fn check(state: &GameState) -> Result<(), RuleError> {
        match state.status() {
            GameStatus::Active => Ok(()),
            status => Err(RuleError::GameNotActive(status)),
        }
    }
}

/// Precondition: the acting identity must be seated.
pub struct SeatedPlayer;

impl SeatedPlayer {
    /// Fails with [`RuleError::UnknownPlayer`] for strangers.
    pub fn check(state: &GameState, player: &PlayerId) -> Result<(), RuleError> {
        state
            .player(player)
            .map(|_| ())
            .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`RuleError::NotYourTurn`] unless the player holds the turn.
    pub fn check(state: &GameState, player: &PlayerId) -> Result<(), RuleError> {
        if state.is_turn_of(player) {
            Ok(())
        } else {
            Err(RuleError::NotYourTurn(player.clone()))
        }
    }
}

/// Precondition: the second seat must be open and the joiner new.
pub struct OpenSeat;

impl OpenSeat {
    /// Checks, in order: seat free, game still waiting, joiner not the host.
    pub fn check(state: &GameState, player: &PlayerId) -> Result<(), RuleError> {
        if state.player2().is_some() {
            return Err(RuleError::GameAlreadyFull);
        }
        if state.status() != GameStatus::Waiting {
            return Err(RuleError::GameNotJoinable(state.status()));
        }
        if state.player1().id() == player {
            return Err(RuleError::DuplicatePlayer(player.clone()));
        }
        Ok(())
    }
}

/// Composite precondition shared by pawn moves and wall placements.
pub struct TurnAction;

impl TurnAction {
    /// Active game, seated player, player's turn.
    pub fn check(state: &GameState, player: &PlayerId) -> Result<(), RuleError> {
        GameIsActive::check(state)?;
        SeatedPlayer::check(state, player)?;
        PlayersTurn::check(state, player)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for a second player joining.
///
/// Preconditions:
/// - Second seat free
/// - Game still waiting
/// - Joiner is not the host
pub struct JoinContract;

impl Contract<GameState, PlayerId> for JoinContract {
    fn pre(state: &GameState, player: &PlayerId) -> Result<(), RuleError> {
        OpenSeat::check(state, player)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

/// Contract for a pawn step.
///
/// Preconditions:
/// - Game active, player seated, player's turn
/// - Step accepted by the move validator
pub struct MovePawnContract;

impl Contract<GameState, (PlayerId, Position)> for MovePawnContract {
    fn pre(state: &GameState, (player, to): &(PlayerId, Position)) -> Result<(), RuleError> {
        TurnAction::check(state, player)?;
        validate_move(state, player, *to)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

/// Contract for a wall placement.
///
/// Preconditions:
/// - Game active, player seated, player's turn
/// - Wall accepted by the wall validator, including the path check
pub struct PlaceWallContract;

impl Contract<GameState, (PlayerId, Wall)> for PlaceWallContract {
    fn pre(state: &GameState, (player, wall): &(PlayerId, Wall)) -> Result<(), RuleError> {
        TurnAction::check(state, player)?;
        validate_wall_placement(state, player, wall)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

/// Contract for passing the turn.
pub struct EndTurnContract;

impl Contract<GameState, ()> for EndTurnContract {
    fn pre(state: &GameState, _: &()) -> Result<(), RuleError> {
        GameIsActive::check(state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

/// Contract for an out-of-band game end.
///
/// Preconditions:
/// - Game not already finished
/// - Declared winner is seated
pub struct GameOverContract;

impl Contract<GameState, PlayerId> for GameOverContract {
    fn pre(state: &GameState, winner: &PlayerId) -> Result<(), RuleError> {
        if state.status() == GameStatus::Finished {
            return Err(RuleError::GameNotActive(GameStatus::Finished));
        }
        SeatedPlayer::check(state, winner)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

/// Contract for any [`Action`] against an existing snapshot.
pub struct ActionContract;

impl Contract<GameState, Action> for ActionContract {
    fn pre(state: &GameState, action: &Action) -> Result<(), RuleError> {
        match action {
            Action::Join { player, .. } => JoinContract::pre(state, player),
            Action::MovePawn { player, to } => {
                MovePawnContract::pre(state, &(player.clone(), *to))
            }
            Action::PlaceWall { player, wall } => {
                PlaceWallContract::pre(state, &(player.clone(), wall.clone()))
            }
            Action::EndTurn => EndTurnContract::pre(state, &()),
            Action::GameOver { winner } => GameOverContract::pre(state, winner),
        }
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), RuleError> {
        verify_transition(before, after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Checks every snapshot invariant on a single state.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn verify_snapshot(state: &GameState) -> Result<(), RuleError> {
    QuoridorInvariants::check_all(state).map_err(|violations| {
        let descriptions = join_descriptions(&violations);
        warn!(%descriptions, "Snapshot invariants violated");
        RuleError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Checks the snapshot invariants on `after` plus the progress rules tying
/// it to `before`.
///
/// Progress rules: same game and host, status never moves backwards, the
/// wall list only grows by appending, and no wall count goes up.
#[instrument(skip_all, fields(game_id = %after.id()))]
pub fn verify_transition(before: &GameState, after: &GameState) -> Result<(), RuleError> {
    verify_snapshot(after)?;

    let mut violations = Vec::new();
    if before.id() != after.id() || before.player1().id() != after.player1().id() {
        violations.push(InvariantViolation::new("Game and host identity are stable"));
    }
    if after.status() < before.status() {
        violations.push(InvariantViolation::new("Status never moves backwards"));
    }
    if !after.walls().starts_with(before.walls()) {
        violations.push(InvariantViolation::new("Placed walls are never removed"));
    }
    let walls_regained = before.players().any(|player| {
        after
            .player(player.id())
            .is_none_or(|now| now.walls_left() > player.walls_left())
    });
    if walls_regained {
        violations.push(InvariantViolation::new("Wall counts never increase"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        let descriptions = join_descriptions(&violations);
        warn!(%descriptions, "Transition progress violated");
        Err(RuleError::InvariantViolation(format!(
            "Postcondition failed: {}",
            descriptions
        )))
    }
}

fn join_descriptions(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
