//! Board coordinates and orthogonal directions.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 9;

/// Largest valid row or column index.
pub const MAX_INDEX: u8 = BOARD_SIZE - 1;

/// A cell on the 9x9 board, addressed by `(row, col)`.
///
/// Row 0 is the top edge (where the first player starts), row 8 the bottom.
/// Positions are plain values; nothing stops a caller from building one
/// outside the board, so validators check [`Position::in_bounds`] first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: u8,
    /// Column index, 0 at the left.
    pub col: u8,
}

impl Position {
    /// Creates a position without checking bounds.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates lie in `[0, 8]`.
    pub const fn in_bounds(self) -> bool {
        self.row <= MAX_INDEX && self.col <= MAX_INDEX
    }

    /// Returns the neighbouring cell in `direction`, if it is on the board.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position::new(self.row.checked_sub(1)?, self.col),
            Direction::Down => Position::new(self.row.checked_add(1)?, self.col),
            Direction::Left => Position::new(self.row, self.col.checked_sub(1)?),
            Direction::Right => Position::new(self.row, self.col.checked_add(1)?),
        };
        next.in_bounds().then_some(next)
    }

    /// All on-board orthogonal neighbours (two to four of them).
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Direction::iter().filter_map(move |direction| self.step(direction))
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Position) -> u16 {
        u16::from(self.row.abs_diff(other.row)) + u16::from(self.col.abs_diff(other.col))
    }

    /// Returns true if `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

/// One of the four orthogonal step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 8.
    Down,
    /// Towards column 0.
    Left,
    /// Towards column 8.
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds());
        assert!(Position::new(8, 8).in_bounds());
        assert!(!Position::new(9, 0).in_bounds());
        assert!(!Position::new(0, 9).in_bounds());
    }

    #[test]
    fn test_step_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(corner.step(Direction::Right), Some(Position::new(0, 1)));

        let far = Position::new(8, 8);
        assert_eq!(far.step(Direction::Down), None);
        assert_eq!(far.step(Direction::Right), None);
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(Position::new(0, 0).neighbors().count(), 2);
        assert_eq!(Position::new(0, 4).neighbors().count(), 3);
        assert_eq!(Position::new(4, 4).neighbors().count(), 4);
    }

    #[test]
    fn test_adjacency() {
        let center = Position::new(4, 4);
        assert!(center.is_adjacent(Position::new(3, 4)));
        assert!(center.is_adjacent(Position::new(4, 5)));
        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Position::new(5, 5)));
        assert!(!center.is_adjacent(Position::new(6, 4)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1, 4).to_string(), "(1, 4)");
    }
}
