//! Goal reachability invariant: no player is ever sealed in.

use super::super::GameState;
use super::super::rules::all_players_can_reach_goal;
use super::Invariant;

/// Invariant: every seated player has a route to their goal row.
///
/// The wall validator refuses any placement that would break this, so a
/// violation means a snapshot was built outside the dispatcher.
pub struct GoalReachableInvariant;

impl Invariant<GameState> for GoalReachableInvariant {
    fn holds(state: &GameState) -> bool {
        all_players_can_reach_goal(state, state.walls()).is_ok()
    }

    fn description() -> &'static str {
        "Every seated player can still reach their goal row"
    }
}
