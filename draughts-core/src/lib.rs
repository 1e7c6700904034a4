//! Draughts Core - turn-based board-game rule engines
//!
//! This crate provides:
//! - Board geometry (1-indexed N×N grid, sparse occupancy)
//! - Piece records with sides, stable ids and crowning
//! - The [`rules::Rules`] seam shared by every game variant
//! - The checkers-like capture engine with forced capture chains
//! - A minimal three-in-a-row engine on the same seam
//! - The generic turn/player/winner state machine
//!
//! The engine is a synchronous library: no I/O, no global state, and every
//! piece of state is plain serializable data.

pub mod board;
pub mod draughts;
pub mod game;
pub mod pieces;
pub mod player;
pub mod rules;
pub mod threes;

// Re-exports for convenient access
pub use board::{Board, Square, DIAGONALS, STANDARD_SIZE};
pub use draughts::{Draughts, DraughtsMove};
pub use game::{Game, GameError, GameStatus, PlayOutcome};
pub use pieces::{Piece, PieceId, Side};
pub use player::Player;
pub use rules::{Applied, Rules, RulesError, Terminal};
