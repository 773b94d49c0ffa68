pub mod board;
pub mod game;

pub use board::{Color, Move, Piece, Position, Square};
pub use game::{ChessEngine, Game};
