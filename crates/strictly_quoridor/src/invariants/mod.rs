//! First-class invariants for Quoridor snapshots.
//!
//! Invariants are logical properties every reachable snapshot satisfies.
//! They are testable independently, back the dispatcher's debug-build
//! post-conditions, and document what the engine guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two to five invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod goal_reachable;
pub mod pawn_placement;
pub mod turn_consistency;
pub mod wall_budget;
pub mod wall_layout;

pub use goal_reachable::GoalReachableInvariant;
pub use pawn_placement::PawnPlacementInvariant;
pub use turn_consistency::TurnConsistencyInvariant;
pub use wall_budget::WallBudgetInvariant;
pub use wall_layout::WallLayoutInvariant;

/// All Quoridor snapshot invariants as a composable set.
pub type QuoridorInvariants = (
    TurnConsistencyInvariant,
    WallBudgetInvariant,
    WallLayoutInvariant,
    PawnPlacementInvariant,
    GoalReachableInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, GameState, PlayerId, Position, Wall, join, move_pawn, place_wall};
    use chrono::Utc;

    fn active_game() -> GameState {
        let state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        join(&state, PlayerId::new("p2"), "Two").unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let state = GameState::new(GameId::new("g"), Utc::now(), PlayerId::new("p1"), "One");
        assert!(QuoridorInvariants::check_all(&state).is_ok());
        assert!(QuoridorInvariants::check_all(&active_game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_play() {
        let state = active_game();
        let state = move_pawn(&state, PlayerId::new("p1"), Position::new(1, 4)).unwrap();
        let state = place_wall(&state, PlayerId::new("p2"), Wall::vertical(3, 3)).unwrap();
        assert!(QuoridorInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut state = active_game();
        // Corrupt the snapshot: both pawns on one cell and a wall nobody paid for.
        if let Some(player) = state.player_mut(&PlayerId::new("p2")) {
            player.set_position(Position::new(0, 4));
        }
        state.push_wall(Wall::horizontal(4, 4));

        let violations = QuoridorInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (TurnConsistencyInvariant, PawnPlacementInvariant);
        assert!(TwoInvariants::check_all(&active_game()).is_ok());
    }
}
