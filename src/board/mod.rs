//! Chess rules: positions, move generation, notation and search.
//!
//! Positions are plain 8x8 arrays that are cheap to copy, so every query
//! that needs to "try" a move works on a copy instead of undoing it.
//! Supports full chess rules including castling, en passant, promotion and
//! the draw rules.
//!
//! # Example
//! ```
//! use chess_game::board::Position;
//!
//! let pos = Position::new();
//! let moves = pos.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod apply;
mod attack_tables;
mod attacks;
mod error;
mod eval;
mod fen;
mod movegen;
mod pst;
mod san;
mod search;
mod state;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use apply::Applied;
pub use error::{FenError, MoveError, MoveParseError, SanError, SquareError};
pub use fen::START_FEN;
pub use pst::pst_value;
pub use search::{find_best_move, search, SearchLimits, SearchResult, MATE_SCORE};
pub use state::{Board, Cell, Position};
pub use status::{EndReason, GameResult, FIFTY_MOVE_LIMIT, REPETITION_LIMIT};
pub use types::{CastlingRights, Color, Move, Piece, Square};

pub(crate) use types::PROMOTION_PIECES;
