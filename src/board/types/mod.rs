//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - (rank, file) board coordinate
//! - `Move` - candidate move with its special-move flags
//! - `CastlingRights` - castling state

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::Move;
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::{king_home, rook_home};
pub(crate) use piece::PROMOTION_PIECES;
