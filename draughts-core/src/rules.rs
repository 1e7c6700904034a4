//! The rules-engine seam shared by every game variant

use crate::board::Square;
use crate::pieces::{Piece, PieceId, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a query or move was rejected.
///
/// These are caller-recoverable values: a rejected operation leaves the
/// engine state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RulesError {
    #[error("square {0} is outside the board")]
    OutOfBounds(Square),

    #[error("no piece at {0}")]
    NoPieceAtSquare(Square),

    #[error("piece at {0} does not belong to {1:?}")]
    NotYourPiece(Square, Side),

    #[error("{from} -> {to} is not a legal move")]
    IllegalMove { from: Square, to: Square },

    #[error("the piece at {0} must finish its capture chain first")]
    CaptureChainPending(Square),

    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    #[error("board size {0} must be even and within 6..=126")]
    InvalidBoardSize(u8),
}

/// Terminal outcome of a game.
///
/// Every engine reports through this enum even if, like the capture game,
/// it can never produce `Drawn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    Won(Side),
    Drawn,
}

/// Report returned by a committed move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applied {
    /// Piece removed from the board by this move, if it was a capture.
    /// Ownership moves with the value: the game routes it into the
    /// mover's spoils.
    pub captured: Option<Piece>,

    /// Whether this move crowned the moving piece.
    pub promoted: bool,

    /// Jump destinations still open to the piece that just captured.
    /// Non-empty means the turn does not pass: the same piece must keep
    /// jumping.
    pub continue_from: Vec<Square>,
}

/// A game variant's rule engine.
///
/// One implementation is selected at game creation; the turn machine in
/// [`crate::game::Game`] never inspects which variant it is driving.
pub trait Rules {
    /// Shape of a submitted move for this variant.
    type Move;

    /// All moves the given side may submit right now.
    fn legal_moves(&self, side: Side) -> Vec<Self::Move>;

    /// Validate and commit a move. On rejection, no state changes.
    fn apply(&mut self, side: Side, mv: &Self::Move) -> Result<Applied, RulesError>;

    /// Terminal outcome after `last_mover`'s fully resolved turn, if any.
    /// Pure query; executes no move.
    fn terminal(&self, last_mover: Side) -> Option<Terminal>;

    /// Ids of the pieces a side controls at the start of the game.
    /// Variants without persistent pieces keep the default empty hand.
    fn opening_hand(&self, _side: Side) -> Vec<PieceId> {
        Vec::new()
    }
}
