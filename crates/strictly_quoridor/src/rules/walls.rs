//! Wall placement validation.

use super::super::position::MAX_INDEX;
use super::super::{GameState, Orientation, PlayerId, Position, RuleError, Wall};
use super::path::all_players_can_reach_goal;
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Validates a wall placement, reporting the first rule it breaks.
///
/// Checks, in order: the player is seated and has walls left, the anchor is
/// in range for the orientation, the slot is free, the wall crosses no
/// perpendicular wall, it shares no edge with a parallel wall, and finally
/// that every seated player keeps a route to their goal row once the wall
/// is in place. Never touches the wall count.
#[instrument(skip(state, wall), fields(game_id = %state.id(), wall = %wall))]
pub fn validate_wall_placement(
    state: &GameState,
    player: &PlayerId,
    wall: &Wall,
) -> Result<(), RuleError> {
    let placer = state
        .player(player)
        .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))?;

    if placer.walls_left() == 0 {
        return Err(RuleError::NoWallsRemaining(player.clone()));
    }

    check_geometry(state.walls(), wall)?;

    let mut tentative = state.walls().to_vec();
    tentative.push(wall.clone());
    if let Err(cut_off) = all_players_can_reach_goal(state, &tentative) {
        warn!(player = %cut_off, "Wall would seal a player in");
        return Err(RuleError::PathBlocked(cut_off));
    }

    debug!("Wall placement is legal");
    Ok(())
}

/// Boolean form of [`validate_wall_placement`].
pub fn is_valid_wall_placement(state: &GameState, player: &PlayerId, wall: &Wall) -> bool {
    validate_wall_placement(state, player, wall).is_ok()
}

/// Every wall the player could legally place right now.
///
/// Runs the full validator (including the path search) for every in-range
/// slot, so it is meant for hints and bots, not hot loops. Border walls are
/// included: they are legal, though they block nothing.
#[instrument(skip(state), fields(game_id = %state.id()))]
pub fn valid_wall_placements(state: &GameState, player: &PlayerId) -> Vec<Wall> {
    Orientation::iter()
        .flat_map(|orientation| {
            (0..=MAX_INDEX).flat_map(move |row| {
                (0..=MAX_INDEX)
                    .map(move |col| Wall::new(Position::new(row, col), orientation))
            })
        })
        .filter(|wall| wall.in_bounds())
        .filter(|wall| is_valid_wall_placement(state, player, wall))
        .collect()
}

/// Bounds, duplicate, crossing and overlap checks against existing walls.
fn check_geometry(existing: &[Wall], wall: &Wall) -> Result<(), RuleError> {
    let (anchor, orientation) = (wall.anchor, wall.orientation);

    if !wall.in_bounds() {
        return Err(RuleError::OutOfBounds(anchor));
    }

    if existing.iter().any(|placed| placed.same_slot(wall)) {
        return Err(RuleError::DuplicateWall { anchor, orientation });
    }

    if existing
        .iter()
        .filter(|placed| placed.orientation == orientation.perpendicular())
        .any(|placed| placed.crosses(wall))
    {
        return Err(RuleError::IntersectingWall { anchor, orientation });
    }

    if existing.iter().any(|placed| placed.overlaps(wall)) {
        return Err(RuleError::OverlappingWall { anchor, orientation });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameId, join, place_wall};
    use chrono::Utc;

    fn p1() -> PlayerId {
        PlayerId::new("p1")
    }

    fn p2() -> PlayerId {
        PlayerId::new("p2")
    }

    fn active_game() -> GameState {
        let state = GameState::new(GameId::new("g"), Utc::now(), p1(), "One");
        join(&state, p2(), "Two").unwrap()
    }

    #[test]
    fn test_open_board_accepts_wall() {
        let state = active_game();
        assert!(is_valid_wall_placement(&state, &p1(), &Wall::horizontal(4, 4)));
        assert!(is_valid_wall_placement(&state, &p1(), &Wall::vertical(4, 4)));
    }

    #[test]
    fn test_out_of_range_anchor() {
        let state = active_game();
        assert_eq!(
            validate_wall_placement(&state, &p1(), &Wall::horizontal(3, 8)),
            Err(RuleError::OutOfBounds(Position::new(3, 8)))
        );
        assert_eq!(
            validate_wall_placement(&state, &p1(), &Wall::vertical(8, 3)),
            Err(RuleError::OutOfBounds(Position::new(8, 3)))
        );
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let state = place_wall(&active_game(), p1(), Wall::horizontal(4, 4)).unwrap();
        assert!(matches!(
            validate_wall_placement(&state, &p2(), &Wall::horizontal(4, 4)),
            Err(RuleError::DuplicateWall { .. })
        ));
    }

    #[test]
    fn test_crossing_rejected_both_ways() {
        let state = place_wall(&active_game(), p1(), Wall::horizontal(4, 4)).unwrap();
        assert!(matches!(
            validate_wall_placement(&state, &p2(), &Wall::vertical(3, 5)),
            Err(RuleError::IntersectingWall { .. })
        ));

        let state = place_wall(&active_game(), p1(), Wall::vertical(3, 5)).unwrap();
        assert!(matches!(
            validate_wall_placement(&state, &p2(), &Wall::horizontal(4, 4)),
            Err(RuleError::IntersectingWall { .. })
        ));
    }

    #[test]
    fn test_overlap_rejected() {
        let state = place_wall(&active_game(), p1(), Wall::horizontal(4, 4)).unwrap();
        assert!(matches!(
            validate_wall_placement(&state, &p2(), &Wall::horizontal(4, 5)),
            Err(RuleError::OverlappingWall { .. })
        ));
        assert!(is_valid_wall_placement(&state, &p2(), &Wall::horizontal(4, 6)));
    }

    #[test]
    fn test_unknown_player_rejected_first() {
        let state = active_game();
        assert_eq!(
            validate_wall_placement(&state, &PlayerId::new("ghost"), &Wall::horizontal(99, 99)),
            Err(RuleError::UnknownPlayer(PlayerId::new("ghost")))
        );
    }

    #[test]
    fn test_validation_never_spends_walls() {
        let state = active_game();
        let _ = validate_wall_placement(&state, &p1(), &Wall::horizontal(4, 4));
        assert_eq!(state.player1().walls_left(), 10);
        assert!(state.walls().is_empty());
    }

    #[test]
    fn test_valid_wall_placements_on_open_board() {
        let state = active_game();
        let walls = valid_wall_placements(&state, &p1());
        // 9 rows x 8 columns of horizontal anchors, 8 x 9 of vertical ones.
        assert_eq!(walls.len(), 144);
        assert!(walls.iter().all(|wall| is_valid_wall_placement(&state, &p1(), wall)));
    }

    #[test]
    fn test_valid_wall_placements_match_validator() {
        let state = place_wall(&active_game(), p1(), Wall::horizontal(4, 4)).unwrap();
        let listed = valid_wall_placements(&state, &p2());

        // Border walls pass validation, so they are listed too.
        assert_eq!(validate_wall_placement(&state, &p2(), &Wall::horizontal(0, 0)), Ok(()));
        assert!(listed.iter().any(|wall| wall.same_slot(&Wall::horizontal(0, 0))));
        assert!(listed.iter().any(|wall| wall.same_slot(&Wall::vertical(0, 0))));

        // Every in-range slot is listed exactly when the validator accepts it.
        for orientation in Orientation::iter() {
            for row in 0..=MAX_INDEX {
                for col in 0..=MAX_INDEX {
                    let wall = Wall::new(Position::new(row, col), orientation);
                    if !wall.in_bounds() {
                        continue;
                    }
                    assert_eq!(
                        listed.iter().any(|placed| placed.same_slot(&wall)),
                        is_valid_wall_placement(&state, &p2(), &wall),
                        "{wall}"
                    );
                }
            }
        }
    }
}
