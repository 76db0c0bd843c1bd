//! Core domain types for Quoridor.

use super::position::{MAX_INDEX, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Walls each player starts with.
pub const WALLS_PER_PLAYER: u8 = 10;

/// Middle column, where both pawns start.
const START_COL: u8 = 4;

// ─────────────────────────────────────────────────────────────
//  Identities
// ─────────────────────────────────────────────────────────────

/// Stable player identity supplied by the identity layer.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identity of a game.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Creates a game id from an existing value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random (UUID v4) game id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identity of a placed wall.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct WallId(String);

impl WallId {
    /// Creates a wall id from an existing value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random (UUID v4) wall id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

// ─────────────────────────────────────────────────────────────
//  Walls
// ─────────────────────────────────────────────────────────────

/// Orientation of a wall segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Lies along a row boundary, blocking vertical steps.
    #[display("horizontal")]
    Horizontal,
    /// Lies along a column boundary, blocking horizontal steps.
    #[display("vertical")]
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A wall two cell-edges long.
///
/// A horizontal wall anchored at `(r, c)` sits on the boundary above row `r`
/// and covers columns `c` and `c + 1`. A vertical wall anchored at `(r, c)`
/// sits on the boundary left of column `c` and covers rows `r` and `r + 1`.
///
/// Two walls occupy the same slot when anchor and orientation match; the id
/// is bookkeeping for collaborators and plays no part in the rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    /// Wall identity.
    #[serde(default = "WallId::generate")]
    pub id: WallId,
    /// Anchor cell.
    pub anchor: Position,
    /// Horizontal or vertical.
    pub orientation: Orientation,
}

impl Wall {
    /// Creates a wall with a freshly generated id.
    pub fn new(anchor: Position, orientation: Orientation) -> Self {
        Self::with_id(WallId::generate(), anchor, orientation)
    }

    /// Creates a wall with a caller-supplied id.
    pub fn with_id(id: WallId, anchor: Position, orientation: Orientation) -> Self {
        Self {
            id,
            anchor,
            orientation,
        }
    }

    /// Shorthand for a horizontal wall at `(row, col)`.
    pub fn horizontal(row: u8, col: u8) -> Self {
        Self::new(Position::new(row, col), Orientation::Horizontal)
    }

    /// Shorthand for a vertical wall at `(row, col)`.
    pub fn vertical(row: u8, col: u8) -> Self {
        Self::new(Position::new(row, col), Orientation::Vertical)
    }

    /// Returns true if both walls occupy the same `(anchor, orientation)` slot.
    pub fn same_slot(&self, other: &Wall) -> bool {
        self.anchor == other.anchor && self.orientation == other.orientation
    }

    /// Returns true if the anchor is inside the range for this orientation.
    ///
    /// Horizontal: row `0..=8`, col `0..=7`. Vertical: row `0..=7`, col `0..=8`.
    pub fn in_bounds(&self) -> bool {
        let Position { row, col } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => row <= MAX_INDEX && col < MAX_INDEX,
            Orientation::Vertical => row < MAX_INDEX && col <= MAX_INDEX,
        }
    }

    /// Returns true if this wall covers the edge crossed by a single step.
    ///
    /// Non-adjacent pairs are never blocked.
    pub fn blocks(&self, from: Position, to: Position) -> bool {
        let Position { row, col } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => {
                let (upper, lower) = (from.row.min(to.row), from.row.max(to.row));
                from.col == to.col && lower - upper == 1 && lower == row && spans(col, from.col)
            }
            Orientation::Vertical => {
                let (left, right) = (from.col.min(to.col), from.col.max(to.col));
                from.row == to.row && right - left == 1 && right == col && spans(row, from.row)
            }
        }
    }

    /// Returns true if this wall and a perpendicular wall cross.
    ///
    /// A horizontal wall `h` and a vertical wall `v` cross when
    /// `v.row <= h.row <= v.row + 1` and `v.col == h.col + 1`. The relation
    /// is symmetric: it does not matter which of the two is checked first.
    pub fn crosses(&self, other: &Wall) -> bool {
        let (h, v) = match (self.orientation, other.orientation) {
            (Orientation::Horizontal, Orientation::Vertical) => (self.anchor, other.anchor),
            (Orientation::Vertical, Orientation::Horizontal) => (other.anchor, self.anchor),
            _ => return false,
        };
        v.row <= h.row && u16::from(h.row) <= u16::from(v.row) + 1 && spans_next(h.col, v.col)
    }

    /// Returns true if this wall and a parallel wall share a unit edge.
    pub fn overlaps(&self, other: &Wall) -> bool {
        if self.orientation != other.orientation {
            return false;
        }
        let (a, b) = (self.anchor, other.anchor);
        match self.orientation {
            Orientation::Horizontal => a.row == b.row && a.col.abs_diff(b.col) == 1,
            Orientation::Vertical => a.col == b.col && a.row.abs_diff(b.row) == 1,
        }
    }
}

/// True if `index` is `start` or the cell after it.
fn spans(start: u8, index: u8) -> bool {
    index == start || spans_next(start, index)
}

/// True if `index` is exactly the cell after `start`.
fn spans_next(start: u8, index: u8) -> bool {
    start.checked_add(1) == Some(index)
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wall at {}", self.orientation, self.anchor)
    }
}

// ─────────────────────────────────────────────────────────────
//  Players
// ─────────────────────────────────────────────────────────────

/// Which side of the board a player starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// Host; starts on row 0 and races to row 8.
    First,
    /// Joiner; starts on row 8 and races to row 0.
    Second,
}

impl Seat {
    /// Starting cell for this seat.
    pub fn start_position(self) -> Position {
        match self {
            Seat::First => Position::new(0, START_COL),
            Seat::Second => Position::new(MAX_INDEX, START_COL),
        }
    }

    /// Row this seat must reach to win.
    pub fn goal_row(self) -> u8 {
        match self {
            Seat::First => MAX_INDEX,
            Seat::Second => 0,
        }
    }

    /// Returns the opposing seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    walls_left: u8,
    position: Position,
    seat: Seat,
}

impl Player {
    /// Seats a player at the start cell for `seat` with a full wall supply.
    #[instrument(skip(name))]
    pub fn new(id: PlayerId, name: impl Into<String>, seat: Seat) -> Self {
        Self {
            id,
            name: name.into(),
            walls_left: WALLS_PER_PLAYER,
            position: seat.start_position(),
            seat,
        }
    }

    /// Player identity.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Walls still available to place.
    pub fn walls_left(&self) -> u8 {
        self.walls_left
    }

    /// Current pawn cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Seat, which fixes start and goal rows.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Row this player must reach.
    pub fn goal_row(&self) -> u8 {
        self.seat.goal_row()
    }

    /// Returns true if the pawn stands on the goal row.
    pub fn has_reached_goal(&self) -> bool {
        self.position.row == self.goal_row()
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn spend_wall(&mut self) {
        self.walls_left = self.walls_left.saturating_sub(1);
    }
}

// ─────────────────────────────────────────────────────────────
//  Game state
// ─────────────────────────────────────────────────────────────

/// Lifecycle status of a game.
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
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Host seated, waiting for an opponent.
    #[display("waiting")]
    Waiting,
    /// Both players seated; turns are being taken.
    #[display("active")]
    Active,
    /// A winner has been decided.
    #[display("finished")]
    Finished,
}

/// Immutable snapshot of one game.
///
/// Transitions never modify a snapshot in place; they return a new one
/// (see [`crate::apply`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    id: GameId,
    status: GameStatus,
    created_at: DateTime<Utc>,
    player1: Player,
    player2: Option<Player>,
    current_turn: Option<PlayerId>,
    winner: Option<PlayerId>,
    walls: Vec<Wall>,
}

impl GameState {
    /// Creates a waiting game with only the host seated.
    #[instrument(skip_all, fields(game_id = %id, host = %host))]
    pub fn new(
        id: GameId,
        created_at: DateTime<Utc>,
        host: PlayerId,
        host_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            status: GameStatus::Waiting,
            created_at,
            player1: Player::new(host, host_name, Seat::First),
            player2: None,
            current_turn: None,
            winner: None,
            walls: Vec::new(),
        }
    }

    /// Game identity.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The host (always present).
    pub fn player1(&self) -> &Player {
        &self.player1
    }

    /// The joiner, once seated.
    pub fn player2(&self) -> Option<&Player> {
        self.player2.as_ref()
    }

    /// Whose move it is, if the game is active.
    pub fn current_turn(&self) -> Option<&PlayerId> {
        self.current_turn.as_ref()
    }

    /// Winner, once finished.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Placed walls, in placement order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Seated players, host first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        std::iter::once(&self.player1).chain(self.player2.as_ref())
    }

    /// Looks up a seated player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players().find(|player| player.id() == id)
    }

    /// Looks up the other seated player, if `id` is seated and has one.
    pub fn opponent_of(&self, id: &PlayerId) -> Option<&Player> {
        let seat = self.player(id)?.seat();
        self.players().find(|player| player.seat() == seat.opponent())
    }

    /// Returns true if `id` holds the current turn.
    pub fn is_turn_of(&self, id: &PlayerId) -> bool {
        self.current_turn.as_ref() == Some(id)
    }

    pub(crate) fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        if self.player1.id() == id {
            Some(&mut self.player1)
        } else {
            self.player2.as_mut().filter(|player| player.id() == id)
        }
    }

    pub(crate) fn seat_second(&mut self, player: Player) {
        self.player2 = Some(player);
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn set_current_turn(&mut self, turn: Option<PlayerId>) {
        self.current_turn = turn;
    }

    pub(crate) fn set_winner(&mut self, winner: Option<PlayerId>) {
        self.winner = winner;
    }

    pub(crate) fn push_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }
}

/// Starts a new waiting game with a random id and the current time.
#[instrument(skip(host_name))]
pub fn new_game(host: PlayerId, host_name: impl Into<String>) -> GameState {
    GameState::new(GameId::generate(), Utc::now(), host, host_name)
}
