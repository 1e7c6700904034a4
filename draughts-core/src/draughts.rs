//! Capture-game rules: move generation, capture chains, crowning

use crate::board::{Board, Square, DIAGONALS};
use crate::pieces::{Piece, PieceId, Side};
use crate::rules::{Applied, Rules, RulesError, Terminal};
use serde::{Deserialize, Serialize};

/// A square-to-square move submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraughtsMove {
    pub from: Square,
    pub to: Square,
}

impl DraughtsMove {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

/// The checkers-like rule engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draughts {
    board: Board,

    /// Square of a piece mid capture chain. While set, only that piece may
    /// move, and only by jumping.
    chain: Option<Square>,
}

impl Draughts {
    /// Set up the standard opening layout: three rows per side on
    /// checkerboard parity, Light on rows `1..=3`, Dark on the top three
    /// rows. Yields `3 * size / 2` pieces per side.
    pub fn new(size: u8) -> Result<Self, RulesError> {
        Self::check_size(size)?;

        let mut board = Board::new(size);
        let mut next_id = 0u16;
        let mut fill = |board: &mut Board, rows: std::ops::RangeInclusive<i8>, side: Side| {
            for y in rows {
                for x in 1..=size as i8 {
                    if (x as i16 + y as i16) % 2 == 0 {
                        board.place(Square::new(x, y), Piece::new(PieceId(next_id), side));
                        next_id += 1;
                    }
                }
            }
        };

        fill(&mut board, 1..=3, Side::Light);
        fill(&mut board, (size as i8 - 2)..=(size as i8), Side::Dark);

        Ok(Self { board, chain: None })
    }

    /// Set up an arbitrary position. Entries are `(square, side, promoted)`;
    /// ids are assigned in order.
    pub fn with_pieces(size: u8, pieces: &[(Square, Side, bool)]) -> Result<Self, RulesError> {
        Self::check_size(size)?;

        let mut board = Board::new(size);
        for (i, &(sq, side, promoted)) in pieces.iter().enumerate() {
            if !board.in_bounds(sq) {
                return Err(RulesError::OutOfBounds(sq));
            }
            if board.piece_at(sq).is_some() {
                return Err(RulesError::SquareOccupied(sq));
            }
            let mut piece = Piece::new(PieceId(i as u16), side);
            piece.promoted = promoted;
            board.place(sq, piece);
        }

        Ok(Self { board, chain: None })
    }

    /// Sizes must be even for checkerboard parity and small enough that
    /// every coordinate fits the `i8` squares use.
    fn check_size(size: u8) -> Result<(), RulesError> {
        if size < 6 || size > 126 || size % 2 != 0 {
            return Err(RulesError::InvalidBoardSize(size));
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Square of the piece that must continue jumping, if a chain is open.
    pub fn pending_chain(&self) -> Option<Square> {
        self.chain
    }

    /// Legal destinations for the piece at `from` on the current turn.
    ///
    /// Pure query: calling it repeatedly without an intervening move
    /// returns the same set. While a capture chain is pending, only the
    /// chain piece has destinations (its remaining jumps); every other
    /// occupied square reports an empty set.
    pub fn destinations(&self, from: Square) -> Result<Vec<Square>, RulesError> {
        if !self.board.in_bounds(from) {
            return Err(RulesError::OutOfBounds(from));
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(RulesError::NoPieceAtSquare(from))?;

        if let Some(chain) = self.chain {
            if chain != from {
                return Ok(Vec::new());
            }
            return Ok(self.jump_destinations(from, piece));
        }

        Ok(self.piece_destinations(from, piece))
    }

    /// Directions a piece may move in: the forward diagonal pair until
    /// crowned, all four diagonals after.
    fn active_directions(piece: &Piece) -> &'static [(i8, i8)] {
        if piece.promoted {
            &DIAGONALS
        } else {
            match piece.side {
                Side::Light => &DIAGONALS[..2],
                Side::Dark => &DIAGONALS[2..],
            }
        }
    }

    /// Simple and jump destinations for a piece, ignoring any open chain.
    fn piece_destinations(&self, from: Square, piece: &Piece) -> Vec<Square> {
        let mut dests = Vec::new();
        for &(dx, dy) in Self::active_directions(piece) {
            let step = from.offset(dx, dy);
            if !self.board.in_bounds(step) {
                continue;
            }
            match self.board.piece_at(step) {
                None => dests.push(step),
                Some(other) if other.side != piece.side => {
                    let landing = from.offset(2 * dx, 2 * dy);
                    if self.board.in_bounds(landing) && self.board.is_empty(landing) {
                        dests.push(landing);
                    }
                }
                Some(_) => {} // own piece blocks
            }
        }
        dests
    }

    /// Jump destinations only; used for chain continuation.
    fn jump_destinations(&self, from: Square, piece: &Piece) -> Vec<Square> {
        let mut dests = Vec::new();
        for &(dx, dy) in Self::active_directions(piece) {
            let step = from.offset(dx, dy);
            let landing = from.offset(2 * dx, 2 * dy);
            if !self.board.in_bounds(landing) || !self.board.is_empty(landing) {
                continue;
            }
            if let Some(other) = self.board.piece_at(step) {
                if other.side != piece.side {
                    dests.push(landing);
                }
            }
        }
        dests
    }

    /// Whether no piece of a side has any destination.
    fn immobilized(&self, side: Side) -> bool {
        self.board
            .pieces()
            .filter(|(_, p)| p.side == side)
            .all(|(sq, p)| self.piece_destinations(sq, p).is_empty())
    }
}

impl Rules for Draughts {
    type Move = DraughtsMove;

    fn legal_moves(&self, side: Side) -> Vec<DraughtsMove> {
        if let Some(chain) = self.chain {
            let piece = match self.board.piece_at(chain) {
                Some(p) if p.side == side => p,
                _ => return Vec::new(),
            };
            return self
                .jump_destinations(chain, piece)
                .into_iter()
                .map(|to| DraughtsMove::new(chain, to))
                .collect();
        }

        let mut moves = Vec::new();
        for (from, piece) in self.board.pieces() {
            if piece.side != side {
                continue;
            }
            for to in self.piece_destinations(from, piece) {
                moves.push(DraughtsMove::new(from, to));
            }
        }
        moves
    }

    fn apply(&mut self, side: Side, mv: &DraughtsMove) -> Result<Applied, RulesError> {
        let DraughtsMove { from, to } = *mv;

        // Every rejection happens before the first mutation.
        if !self.board.in_bounds(from) {
            return Err(RulesError::OutOfBounds(from));
        }
        if !self.board.in_bounds(to) {
            return Err(RulesError::OutOfBounds(to));
        }
        let piece = self
            .board
            .piece_at(from)
            .copied()
            .ok_or(RulesError::NoPieceAtSquare(from))?;
        if piece.side != side {
            return Err(RulesError::NotYourPiece(from, side));
        }
        if let Some(chain) = self.chain {
            if chain != from {
                return Err(RulesError::CaptureChainPending(chain));
            }
            if !self.jump_destinations(from, &piece).contains(&to) {
                return Err(RulesError::IllegalMove { from, to });
            }
        } else if !self.piece_destinations(from, &piece).contains(&to) {
            return Err(RulesError::IllegalMove { from, to });
        }

        // Commit. A distance-two move is a capture; the jumped piece comes
        // off the board and is handed back to the caller.
        let captured = if (to.x - from.x).abs() > 1 {
            self.board.remove(from.midpoint(to))
        } else {
            None
        };

        let mut piece = self.board.remove(from).expect("validated piece vanished");
        let mut promoted = false;
        if !piece.promoted && to.y == piece.side.crown_row(self.board.size()) {
            piece.promoted = true;
            promoted = true;
        }
        self.board.place(to, piece);

        let continue_from = if captured.is_some() {
            self.jump_destinations(to, &piece)
        } else {
            Vec::new()
        };
        self.chain = if continue_from.is_empty() {
            None
        } else {
            Some(to)
        };

        Ok(Applied {
            captured,
            promoted,
            continue_from,
        })
    }

    fn terminal(&self, last_mover: Side) -> Option<Terminal> {
        if self.chain.is_some() {
            return None;
        }
        let opponent = last_mover.opponent();
        if self.board.side_count(opponent) == 0 || self.immobilized(opponent) {
            return Some(Terminal::Won(last_mover));
        }
        None
    }

    fn opening_hand(&self, side: Side) -> Vec<PieceId> {
        self.board
            .pieces()
            .filter(|(_, p)| p.side == side)
            .map(|(_, p)| p.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: i8, y: i8) -> Square {
        Square::new(x, y)
    }

    /// Positions of every piece of a side, sorted for comparison.
    fn positions(engine: &Draughts, side: Side) -> Vec<Square> {
        let mut v: Vec<_> = engine
            .board()
            .pieces()
            .filter(|(_, p)| p.side == side)
            .map(|(s, _)| s)
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_setup_counts() {
        let engine = Draughts::new(8).unwrap();
        assert_eq!(engine.board().side_count(Side::Light), 12);
        assert_eq!(engine.board().side_count(Side::Dark), 12);

        for (square, piece) in engine.board().pieces() {
            assert_eq!((square.x + square.y) % 2, 0, "off-parity piece at {square}");
            match piece.side {
                Side::Light => assert!((1..=3).contains(&square.y)),
                Side::Dark => assert!((6..=8).contains(&square.y)),
            }
            assert!(!piece.promoted);
        }
    }

    #[test]
    fn test_setup_scales_with_size() {
        let engine = Draughts::new(10).unwrap();
        assert_eq!(engine.board().side_count(Side::Light), 15);
        assert_eq!(engine.board().side_count(Side::Dark), 15);
        // Dark band is size-relative, not hardcoded to rows 6..8.
        for (square, piece) in engine.board().pieces() {
            if piece.side == Side::Dark {
                assert!((8..=10).contains(&square.y));
            }
        }
    }

    #[test]
    fn test_bad_sizes_rejected() {
        assert_eq!(Draughts::new(0).unwrap_err(), RulesError::InvalidBoardSize(0));
        assert_eq!(Draughts::new(4).unwrap_err(), RulesError::InvalidBoardSize(4));
        assert_eq!(Draughts::new(7).unwrap_err(), RulesError::InvalidBoardSize(7));
        // Sizes that would wrap i8 coordinates are rejected, not truncated.
        assert_eq!(
            Draughts::new(128).unwrap_err(),
            RulesError::InvalidBoardSize(128)
        );
        assert_eq!(
            Draughts::new(200).unwrap_err(),
            RulesError::InvalidBoardSize(200)
        );
        let engine = Draughts::new(126).unwrap();
        assert_eq!(engine.board().side_count(Side::Light), 3 * 63);
    }

    #[test]
    fn test_duplicate_square_rejected() {
        let err = Draughts::with_pieces(
            8,
            &[(sq(3, 3), Side::Light, false), (sq(3, 3), Side::Dark, false)],
        )
        .unwrap_err();
        assert_eq!(err, RulesError::SquareOccupied(sq(3, 3)));
    }

    #[test]
    fn test_query_errors() {
        let engine = Draughts::new(8).unwrap();
        assert_eq!(
            engine.destinations(sq(0, 0)),
            Err(RulesError::OutOfBounds(sq(0, 0)))
        );
        assert_eq!(
            engine.destinations(sq(9, 1)),
            Err(RulesError::OutOfBounds(sq(9, 1)))
        );
        assert_eq!(
            engine.destinations(sq(4, 4)),
            Err(RulesError::NoPieceAtSquare(sq(4, 4)))
        );
    }

    #[test]
    fn test_simple_move() {
        let engine = Draughts::with_pieces(8, &[(sq(3, 5), Side::Light, false)]).unwrap();
        let mut dests = engine.destinations(sq(3, 5)).unwrap();
        dests.sort();
        assert_eq!(dests, vec![sq(2, 6), sq(4, 6)]);

        let mut engine = engine;
        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 5), sq(4, 6)))
            .unwrap();
        assert_eq!(applied.captured, None);
        assert!(applied.continue_from.is_empty());
        assert!(engine.board().is_empty(sq(3, 5)));
        assert!(engine.board().piece_at(sq(4, 6)).is_some());
    }

    #[test]
    fn test_destinations_idempotent() {
        let engine = Draughts::new(8).unwrap();
        let first = engine.destinations(sq(3, 3)).unwrap();
        let second = engine.destinations(sq(3, 3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_own_piece_blocks() {
        let engine = Draughts::with_pieces(
            8,
            &[(sq(3, 5), Side::Light, false), (sq(4, 6), Side::Light, false)],
        )
        .unwrap();
        let dests = engine.destinations(sq(3, 5)).unwrap();
        assert!(!dests.contains(&sq(4, 6)));
        assert!(!dests.contains(&sq(5, 7)));
        assert_eq!(dests, vec![sq(2, 6)]);
    }

    #[test]
    fn test_single_capture() {
        let mut engine = Draughts::with_pieces(
            8,
            &[(sq(3, 5), Side::Light, false), (sq(4, 6), Side::Dark, false)],
        )
        .unwrap();
        let dests = engine.destinations(sq(3, 5)).unwrap();
        assert!(dests.contains(&sq(5, 7)));

        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 5), sq(5, 7)))
            .unwrap();
        let captured = applied.captured.expect("capture should yield a piece");
        assert_eq!(captured.side, Side::Dark);
        assert!(engine.board().is_empty(sq(4, 6)));
        assert!(engine.board().is_empty(sq(3, 5)));
        assert_eq!(engine.board().side_count(Side::Dark), 0);
    }

    #[test]
    fn test_blocked_landing_is_no_capture() {
        let engine = Draughts::with_pieces(
            8,
            &[
                (sq(3, 5), Side::Light, false),
                (sq(4, 6), Side::Dark, false),
                (sq(5, 7), Side::Dark, false),
            ],
        )
        .unwrap();
        let dests = engine.destinations(sq(3, 5)).unwrap();
        assert_eq!(dests, vec![sq(2, 6)]);
    }

    #[test]
    fn test_forced_double_jump() {
        let mut engine = Draughts::with_pieces(
            8,
            &[
                (sq(3, 3), Side::Light, false),
                (sq(1, 3), Side::Light, false),
                (sq(4, 4), Side::Dark, false),
                (sq(6, 6), Side::Dark, false),
            ],
        )
        .unwrap();

        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 3), sq(5, 5)))
            .unwrap();
        assert!(applied.captured.is_some());
        assert_eq!(applied.continue_from, vec![sq(7, 7)]);
        assert_eq!(engine.pending_chain(), Some(sq(5, 5)));

        // Another piece may not move while the chain is open.
        assert_eq!(
            engine.apply(Side::Light, &DraughtsMove::new(sq(1, 3), sq(2, 4))),
            Err(RulesError::CaptureChainPending(sq(5, 5)))
        );
        // The chain piece may not make a simple move either.
        assert_eq!(
            engine.apply(Side::Light, &DraughtsMove::new(sq(5, 5), sq(4, 6))),
            Err(RulesError::IllegalMove {
                from: sq(5, 5),
                to: sq(4, 6)
            })
        );
        // Non-chain squares report no destinations while the chain is open.
        assert_eq!(engine.destinations(sq(1, 3)).unwrap(), Vec::<Square>::new());

        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(5, 5), sq(7, 7)))
            .unwrap();
        assert!(applied.captured.is_some());
        assert!(applied.continue_from.is_empty());
        assert_eq!(engine.pending_chain(), None);
        assert_eq!(engine.board().side_count(Side::Dark), 0);
    }

    #[test]
    fn test_rejection_mutates_nothing() {
        let mut engine = Draughts::new(8).unwrap();
        let before_light = positions(&engine, Side::Light);
        let before_dark = positions(&engine, Side::Dark);

        // Sideways is never legal.
        assert!(engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 3), sq(5, 3)))
            .is_err());
        // Wrong side.
        assert_eq!(
            engine.apply(Side::Light, &DraughtsMove::new(sq(2, 6), sq(3, 5))),
            Err(RulesError::NotYourPiece(sq(2, 6), Side::Light))
        );

        assert_eq!(positions(&engine, Side::Light), before_light);
        assert_eq!(positions(&engine, Side::Dark), before_dark);
        assert_eq!(engine.pending_chain(), None);
    }

    #[test]
    fn test_promotion() {
        let mut engine = Draughts::with_pieces(8, &[(sq(5, 7), Side::Light, false)]).unwrap();
        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(5, 7), sq(6, 8)))
            .unwrap();
        assert!(applied.promoted);

        let piece = engine.board().piece_at(sq(6, 8)).unwrap();
        assert!(piece.promoted);

        // Crowned piece moves on all four diagonals.
        let mut dests = engine.destinations(sq(6, 8)).unwrap();
        dests.sort();
        assert_eq!(dests, vec![sq(5, 7), sq(7, 7)]);
    }

    #[test]
    fn test_promotion_is_not_rereported() {
        let mut engine = Draughts::with_pieces(8, &[(sq(6, 8), Side::Light, true)]).unwrap();
        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(6, 8), sq(7, 7)))
            .unwrap();
        assert!(!applied.promoted);
        assert!(engine.board().piece_at(sq(7, 7)).unwrap().promoted);
    }

    #[test]
    fn test_promoted_piece_captures_backward() {
        let mut engine = Draughts::with_pieces(
            8,
            &[(sq(4, 6), Side::Light, true), (sq(3, 5), Side::Dark, false)],
        )
        .unwrap();
        let dests = engine.destinations(sq(4, 6)).unwrap();
        assert!(dests.contains(&sq(2, 4)));

        let applied = engine
            .apply(Side::Light, &DraughtsMove::new(sq(4, 6), sq(2, 4)))
            .unwrap();
        assert!(applied.captured.is_some());
    }

    #[test]
    fn test_win_by_elimination() {
        let mut engine = Draughts::with_pieces(
            8,
            &[(sq(3, 5), Side::Light, false), (sq(4, 6), Side::Dark, false)],
        )
        .unwrap();
        assert_eq!(engine.terminal(Side::Light), None);
        engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 5), sq(5, 7)))
            .unwrap();
        assert_eq!(engine.terminal(Side::Light), Some(Terminal::Won(Side::Light)));
    }

    #[test]
    fn test_win_by_immobilization() {
        // Dark's lone piece sits on row 1 with nowhere to go.
        let mut engine = Draughts::with_pieces(
            8,
            &[(sq(4, 4), Side::Light, false), (sq(1, 1), Side::Dark, false)],
        )
        .unwrap();
        assert!(engine.destinations(sq(1, 1)).unwrap().is_empty());

        engine
            .apply(Side::Light, &DraughtsMove::new(sq(4, 4), sq(5, 5)))
            .unwrap();
        assert_eq!(engine.terminal(Side::Light), Some(Terminal::Won(Side::Light)));
        // Light itself is still mobile, so Dark has not won anything.
        assert_eq!(engine.terminal(Side::Dark), None);
    }

    #[test]
    fn test_no_terminal_while_chain_open() {
        // Capturing Dark's only piece mid-chain: the win is only reported
        // once the chain resolves.
        let mut engine = Draughts::with_pieces(
            8,
            &[
                (sq(3, 3), Side::Light, false),
                (sq(4, 4), Side::Dark, false),
                (sq(6, 6), Side::Dark, false),
            ],
        )
        .unwrap();
        engine
            .apply(Side::Light, &DraughtsMove::new(sq(3, 3), sq(5, 5)))
            .unwrap();
        assert_eq!(engine.pending_chain(), Some(sq(5, 5)));
        assert_eq!(engine.terminal(Side::Light), None);

        engine
            .apply(Side::Light, &DraughtsMove::new(sq(5, 5), sq(7, 7)))
            .unwrap();
        assert_eq!(engine.terminal(Side::Light), Some(Terminal::Won(Side::Light)));
    }

    #[test]
    fn test_opening_hand_matches_board() {
        let engine = Draughts::new(8).unwrap();
        let light = engine.opening_hand(Side::Light);
        let dark = engine.opening_hand(Side::Dark);
        assert_eq!(light.len(), 12);
        assert_eq!(dark.len(), 12);
        assert!(light.iter().all(|id| !dark.contains(id)));
    }

    #[test]
    fn test_legal_moves_opening() {
        let engine = Draughts::new(8).unwrap();
        // Only the front row (row 3) can move; each of its 4 pieces has two
        // forward diagonals except edge effects.
        let moves = engine.legal_moves(Side::Light);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| m.from.y == 3 && m.to.y == 4));
    }
}
