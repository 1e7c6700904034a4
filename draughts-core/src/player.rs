//! Per-seat player records

use crate::pieces::{Piece, PieceId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A seated player: account reference, counters, and the piece ledger.
///
/// `hand` and `spoils` partition the pieces of a game: every piece id is
/// either on the board (and in its owner's hand) or captured (and in the
/// captor's spoils), never both. Only [`crate::game::Game`] writes to the
/// ledger, so the partition cannot drift from the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub account_id: u64,
    pub username: String,
    /// Moves this player has submitted this game.
    pub plays: u32,
    pub score: u32,
    hand: FxHashSet<PieceId>,
    spoils: Vec<Piece>,
}

impl Player {
    pub fn new(account_id: u64, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
            plays: 0,
            score: 0,
            hand: FxHashSet::default(),
            spoils: Vec::new(),
        }
    }

    /// Pieces this player still controls.
    pub fn hand(&self) -> &FxHashSet<PieceId> {
        &self.hand
    }

    /// Pieces this player has captured from the opponent.
    pub fn spoils(&self) -> &[Piece] {
        &self.spoils
    }

    pub(crate) fn deal_hand(&mut self, ids: impl IntoIterator<Item = PieceId>) {
        self.hand = ids.into_iter().collect();
    }

    /// Drop a captured piece's id from this player's hand.
    pub(crate) fn release(&mut self, id: PieceId) {
        let removed = self.hand.remove(&id);
        debug_assert!(removed, "captured piece was not in its owner's hand");
    }

    /// Take ownership of a piece captured from the opponent.
    pub(crate) fn claim(&mut self, piece: Piece) {
        self.spoils.push(piece);
    }
}
