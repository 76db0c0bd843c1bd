//! Property tests over random action sequences.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use strictly_quoridor::invariants::{InvariantSet, QuoridorInvariants};
use strictly_quoridor::{
    Action, GameId, GameState, GameStatus, Orientation, PlayerId, Position, WALLS_PER_PLAYER,
    Wall, apply, distance_to_goal, valid_moves,
};

#[derive(Debug, Clone)]
enum Intent {
    Step(Position),
    Place(u8, u8, bool),
    Pass,
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => (0u8..10, 0u8..10).prop_map(|(row, col)| Intent::Step(Position::new(row, col))),
        4 => (0u8..9, 0u8..9, any::<bool>()).prop_map(|(row, col, h)| Intent::Place(row, col, h)),
        1 => Just(Intent::Pass),
    ]
}

fn active_game() -> GameState {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let state = GameState::new(GameId::new("prop"), created_at, PlayerId::new("p1"), "One");
    apply(
        Some(&state),
        &Action::Join {
            player: PlayerId::new("p2"),
            name: "Two".to_string(),
        },
    )
    .unwrap()
}

fn to_action(state: &GameState, intent: &Intent) -> Option<Action> {
    let player = state.current_turn()?.clone();
    Some(match intent {
        Intent::Step(to) => Action::MovePawn { player, to: *to },
        Intent::Place(row, col, horizontal) => {
            let orientation = if *horizontal {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            Action::PlaceWall {
                player,
                wall: Wall::new(Position::new(*row, *col), orientation),
            }
        }
        Intent::Pass => Action::EndTurn,
    })
}

fn placed_by(placements: &[PlayerId], player: &PlayerId) -> u8 {
    placements.iter().filter(|placer| *placer == player).count() as u8
}

proptest! {
    #[test]
    fn random_play_preserves_rules(intents in prop::collection::vec(intent(), 1..120)) {
        let mut state = active_game();
        let mut placements: Vec<PlayerId> = Vec::new();

        for intent in &intents {
            let Some(action) = to_action(&state, intent) else { break };
            let mover = state.current_turn().cloned();

            match apply(Some(&state), &action) {
                Ok(next) => {
                    if let Action::PlaceWall { player, .. } = &action {
                        placements.push(player.clone());
                    }
                    // Turn alternates unless the game just ended.
                    if next.status() == GameStatus::Active {
                        prop_assert_ne!(next.current_turn().cloned(), mover);
                    } else {
                        prop_assert!(next.current_turn().is_none());
                        prop_assert!(next.winner().is_some());
                    }
                    state = next;
                }
                Err(_) => {
                    // A rejection never changes the snapshot, and repeats identically.
                    let again = apply(Some(&state), &action);
                    prop_assert!(again.is_err());
                }
            }

            prop_assert!(QuoridorInvariants::check_all(&state).is_ok());
            for player in state.players() {
                prop_assert_eq!(
                    player.walls_left(),
                    WALLS_PER_PLAYER - placed_by(&placements, player.id())
                );
                let route = distance_to_goal(state.walls(), player.position(), player.goal_row());
                prop_assert!(route.is_some());

                let from = player.position();
                for target in valid_moves(&state, player.id()) {
                    prop_assert!(target.in_bounds());
                    prop_assert_eq!(from.manhattan(target), 1);
                }
            }

            if state.status() == GameStatus::Finished {
                break;
            }
        }
    }
}
