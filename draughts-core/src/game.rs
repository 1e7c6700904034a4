//! Turn/session state machine generic over a rules engine

use crate::board::Square;
use crate::pieces::Side;
use crate::player::Player;
use crate::rules::{Rules, RulesError, Terminal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingFirstMove,
    InProgress,
    Won(Side),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Drawn)
    }
}

/// What a committed move means for the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// Turn passes to the opponent.
    TurnEnds,
    /// The mover must continue the capture chain from one of these squares'
    /// listed jumps; the turn does not pass.
    ContinueCapture(Vec<Square>),
    Won(Side),
    Drawn,
}

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("it is {expected:?}'s turn")]
    NotYourTurn { expected: Side },

    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// One game session: two seated players, a turn holder, and a rules engine
/// chosen at creation.
///
/// All mutation flows through [`Game::play`]; the engine reports captures
/// by value and the game routes them into the hand/spoils ledger, so board
/// and ledger can only change together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game<R: Rules> {
    players: [Player; 2],
    turn: Side,
    status: GameStatus,
    rules: R,
}

impl<R: Rules> Game<R> {
    /// Seat two players over a rules engine. Light moves first.
    pub fn new(light: Player, dark: Player, rules: R) -> Self {
        let mut players = [light, dark];
        for side in [Side::Light, Side::Dark] {
            players[side.index()].deal_hand(rules.opening_hand(side));
        }
        Self {
            players,
            turn: Side::Light,
            status: GameStatus::AwaitingFirstMove,
            rules,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// The engine, for read-only queries such as
    /// [`crate::draughts::Draughts::destinations`].
    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn turn_holder(&self) -> Side {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Won(side) => Some(side),
            _ => None,
        }
    }

    /// All moves the turn holder may submit right now.
    pub fn legal_moves(&self) -> Vec<R::Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.rules.legal_moves(self.turn)
    }

    /// Submit a move for `side`.
    ///
    /// Rejections (wrong turn, finished game, any [`RulesError`]) leave
    /// every part of the session untouched. On a capture the jumped piece
    /// moves out of the opponent's hand into the mover's spoils in the same
    /// call that updates the board.
    pub fn play(&mut self, side: Side, mv: &R::Move) -> Result<PlayOutcome, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if side != self.turn {
            return Err(GameError::NotYourTurn {
                expected: self.turn,
            });
        }

        let applied = self.rules.apply(side, mv)?;

        // Committed: from here on the session bookkeeping must stay in
        // step with the engine.
        self.status = GameStatus::InProgress;
        self.players[side.index()].plays += 1;

        if let Some(captured) = applied.captured {
            self.players[side.opponent().index()].release(captured.id);
            self.players[side.index()].claim(captured);
        }

        if !applied.continue_from.is_empty() {
            // Forced chain: same player keeps the turn.
            return Ok(PlayOutcome::ContinueCapture(applied.continue_from));
        }

        match self.rules.terminal(side) {
            Some(Terminal::Won(winner)) => {
                self.status = GameStatus::Won(winner);
                self.players[winner.index()].score += 1;
                Ok(PlayOutcome::Won(winner))
            }
            Some(Terminal::Drawn) => {
                self.status = GameStatus::Drawn;
                Ok(PlayOutcome::Drawn)
            }
            None => {
                self.turn = side.opponent();
                Ok(PlayOutcome::TurnEnds)
            }
        }
    }
}
