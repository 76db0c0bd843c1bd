//! Plain-text summaries of a snapshot.

use strictly_quoridor::{GameState, GameStatus, PlayerId, Position, distance_to_goal};

/// One line describing where the game stands.
pub fn status_line(state: &GameState) -> String {
    match state.status() {
        GameStatus::Waiting => format!(
            "Game {} is waiting for an opponent to join {}",
            state.id(),
            state.player1().name()
        ),
        GameStatus::Active => format!(
            "Game {} is active, {} walls on the board, {} to move",
            state.id(),
            state.walls().len(),
            state
                .current_turn()
                .map_or_else(|| "nobody".to_string(), |turn| turn.to_string())
        ),
        GameStatus::Finished => format!(
            "Game {} is finished, winner: {}",
            state.id(),
            state
                .winner()
                .map_or_else(|| "nobody".to_string(), |winner| winner.to_string())
        ),
    }
}

/// One line prompting the player who holds the turn.
pub fn turn_line(state: &GameState, player: &PlayerId) -> String {
    let Some(seated) = state.player(player) else {
        return format!("{} is not seated", player);
    };
    let distance = distance_to_goal(state.walls(), seated.position(), seated.goal_row())
        .map_or_else(|| "unreachable".to_string(), |steps| steps.to_string());
    format!(
        "{} ({}) at {}, {} walls left, {} steps to goal >",
        seated.name(),
        seated.id(),
        seated.position(),
        seated.walls_left(),
        distance
    )
}

/// Lines listing a player's legal moves and wall count.
pub fn moves_lines(player: &PlayerId, moves: &[Position], wall_count: usize) -> Vec<String> {
    let cells = if moves.is_empty() {
        "none".to_string()
    } else {
        moves
            .iter()
            .map(Position::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    vec![
        format!("Pawn moves for {}: {}", player, cells),
        format!("Legal wall placements for {}: {}", player, wall_count),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use strictly_quoridor::{GameId, join};

    fn waiting() -> GameState {
        GameState::new(GameId::new("g1"), Utc::now(), PlayerId::new("p1"), "Alice")
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            status_line(&waiting()),
            "Game g1 is waiting for an opponent to join Alice"
        );
        let active = join(&waiting(), PlayerId::new("p2"), "Bob").unwrap();
        assert_eq!(
            status_line(&active),
            "Game g1 is active, 0 walls on the board, p1 to move"
        );
    }

    #[test]
    fn test_turn_line() {
        let active = join(&waiting(), PlayerId::new("p2"), "Bob").unwrap();
        assert_eq!(
            turn_line(&active, &PlayerId::new("p2")),
            "Bob (p2) at (8, 4), 10 walls left, 8 steps to goal >"
        );
    }

    #[test]
    fn test_moves_lines() {
        let lines = moves_lines(&PlayerId::new("p1"), &[Position::new(1, 4)], 144);
        assert_eq!(lines[0], "Pawn moves for p1: (1, 4)");
        assert_eq!(lines[1], "Legal wall placements for p1: 144");
    }
}
