//! Square-grid board with 1-indexed coordinates

use crate::pieces::{Piece, Side};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard board size for the capture game.
pub const STANDARD_SIZE: u8 = 8;

/// A board coordinate, 1-indexed in both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Square offset by a direction vector.
    pub fn offset(self, dx: i8, dy: i8) -> Square {
        Square::new(self.x + dx, self.y + dy)
    }

    /// Square halfway between two squares two diagonal steps apart.
    pub fn midpoint(self, other: Square) -> Square {
        Square::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Diagonal direction vectors (dx, dy).
/// The first two point toward higher rows (Light's forward pair), the last
/// two toward lower rows (Dark's forward pair).
pub const DIAGONALS: [(i8, i8); 4] = [
    (1, 1),   // up-right
    (-1, 1),  // up-left
    (1, -1),  // down-right
    (-1, -1), // down-left
];

/// Piece occupancy for an N×N grid (sparse representation).
///
/// Serialized as a list of `(square, piece)` pairs so the state survives
/// formats like JSON that cannot key maps by structs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    size: u8,
    squares: FxHashMap<Square, Piece>,
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    size: u8,
    pieces: Vec<(Square, Piece)>,
}

impl From<BoardRepr> for Board {
    fn from(repr: BoardRepr) -> Self {
        Self {
            size: repr.size,
            squares: repr.pieces.into_iter().collect(),
        }
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        let mut pieces: Vec<_> = board.squares.into_iter().collect();
        pieces.sort_by_key(|&(sq, _)| (sq.y, sq.x));
        Self {
            size: board.size,
            pieces,
        }
    }
}

impl Board {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            squares: FxHashMap::default(),
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Check if a square is on the board.
    pub fn in_bounds(&self, sq: Square) -> bool {
        sq.x >= 1 && sq.y >= 1 && sq.x <= self.size as i8 && sq.y <= self.size as i8
    }

    /// Get the piece at a square.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares.get(&sq)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        !self.squares.contains_key(&sq)
    }

    /// Iterate pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.squares.iter().map(|(&sq, piece)| (sq, piece))
    }

    /// Number of pieces belonging to a side.
    pub fn side_count(&self, side: Side) -> usize {
        self.squares.values().filter(|p| p.side == side).count()
    }

    /// Place a piece on an empty in-bounds square.
    pub(crate) fn place(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.in_bounds(sq), "placing off-board at {sq}");
        let prev = self.squares.insert(sq, piece);
        debug_assert!(prev.is_none(), "two pieces on {sq}");
    }

    /// Take the piece off a square, if any.
    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares.remove(&sq)
    }
}
