//! Three-in-a-row grid game on the same rules seam
//!
//! Deliberately minimal: it exists to show the [`Rules`] seam is not shaped
//! around the capture game, and it is the engine that actually produces
//! [`Terminal::Drawn`].

use crate::board::Square;
use crate::pieces::Side;
use crate::rules::{Applied, Rules, RulesError, Terminal};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

const GRID: i8 = 3;

/// Three-in-a-row engine. A move is the square to claim.
///
/// Serialized as a list of `(square, side)` pairs so the state survives
/// formats like JSON that cannot key maps by structs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "ThreesRepr", into = "ThreesRepr")]
pub struct Threes {
    marks: FxHashMap<Square, Side>,
}

#[derive(Serialize, Deserialize)]
struct ThreesRepr {
    marks: Vec<(Square, Side)>,
}

impl From<ThreesRepr> for Threes {
    fn from(repr: ThreesRepr) -> Self {
        Self {
            marks: repr.marks.into_iter().collect(),
        }
    }
}

impl From<Threes> for ThreesRepr {
    fn from(game: Threes) -> Self {
        let mut marks: Vec<_> = game.marks.into_iter().collect();
        marks.sort_by_key(|&(sq, _)| (sq.y, sq.x));
        Self { marks }
    }
}

impl Threes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_at(&self, sq: Square) -> Option<Side> {
        self.marks.get(&sq).copied()
    }

    fn in_bounds(sq: Square) -> bool {
        sq.x >= 1 && sq.y >= 1 && sq.x <= GRID && sq.y <= GRID
    }

    fn line_through(&self, side: Side, line: [Square; 3]) -> bool {
        line.iter().all(|sq| self.marks.get(sq) == Some(&side))
    }

    fn has_line(&self, side: Side) -> bool {
        for i in 1..=GRID {
            if self.line_through(side, [Square::new(i, 1), Square::new(i, 2), Square::new(i, 3)])
                || self.line_through(side, [Square::new(1, i), Square::new(2, i), Square::new(3, i)])
            {
                return true;
            }
        }
        self.line_through(side, [Square::new(1, 1), Square::new(2, 2), Square::new(3, 3)])
            || self.line_through(side, [Square::new(1, 3), Square::new(2, 2), Square::new(3, 1)])
    }
}

impl Rules for Threes {
    type Move = Square;

    fn legal_moves(&self, _side: Side) -> Vec<Square> {
        let mut moves = Vec::new();
        for x in 1..=GRID {
            for y in 1..=GRID {
                let sq = Square::new(x, y);
                if !self.marks.contains_key(&sq) {
                    moves.push(sq);
                }
            }
        }
        moves
    }

    fn apply(&mut self, side: Side, mv: &Square) -> Result<Applied, RulesError> {
        let sq = *mv;
        if !Self::in_bounds(sq) {
            return Err(RulesError::OutOfBounds(sq));
        }
        if self.marks.contains_key(&sq) {
            return Err(RulesError::IllegalMove { from: sq, to: sq });
        }
        self.marks.insert(sq, side);
        Ok(Applied::default())
    }

    fn terminal(&self, last_mover: Side) -> Option<Terminal> {
        if self.has_line(last_mover) {
            return Some(Terminal::Won(last_mover));
        }
        if self.marks.len() as i8 == GRID * GRID {
            return Some(Terminal::Drawn);
        }
        None
    }
}
