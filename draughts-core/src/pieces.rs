//! Sides and piece records

use serde::{Deserialize, Serialize};

/// Stable identity of a piece for the lifetime of one game.
///
/// Ids are assigned at board setup and survive captures: a captured piece
/// keeps its id inside the captor's spoils, which is what lets the
/// hand/spoils ledger stay consistent with the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

/// One of the two opposing factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Light = 0,
    Dark = 1,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Seat index for per-player storage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The row a piece of this side must reach to be crowned.
    ///
    /// Light starts on rows 1..=3 and crowns on the far row `size`; Dark
    /// starts on the top band and crowns on row 1.
    pub fn crown_row(self, size: u8) -> i8 {
        match self {
            Side::Light => size as i8,
            Side::Dark => 1,
        }
    }
}

/// A piece on the board.
///
/// Position is not stored here: the board's occupancy map key is the single
/// source of truth for where a piece stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    /// Set once when the piece reaches its crown row, never cleared.
    pub promoted: bool,
}

impl Piece {
    pub fn new(id: PieceId, side: Side) -> Self {
        Self {
            id,
            side,
            promoted: false,
        }
    }
}
