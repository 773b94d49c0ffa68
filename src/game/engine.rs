use crate::board::{FenError, Move, MoveError, Piece, Square};

use super::{Game, MoveOutcome};

/// The operations a front end drives a game through.
///
/// This allows swapping the rules-and-search implementation behind a user
/// interface without touching the interface code.
pub trait ChessEngine {
    /// Play the move from `from` to `to`. A missing promotion piece on a
    /// promoting move means a queen.
    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<MoveOutcome, MoveError>;

    /// Legal moves of the piece on `from`, for move hints
    fn legal_moves_from(&self, from: Square) -> Vec<Move>;

    /// Take back the last move. Returns false if there is nothing to undo.
    fn undo(&mut self) -> bool;

    fn to_fen(&self) -> String;

    /// Replace the game with the position in `fen`; the game is unchanged on error.
    fn load_fen(&mut self, fen: &str) -> Result<(), FenError>;

    /// Suggested move for the side to move, `None` once the game is over
    fn best_move(&self, depth: u32) -> Option<Move>;
}

impl ChessEngine for Game {
    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<MoveOutcome, MoveError> {
        Game::make_move(self, from, to, promotion)
    }

    fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        Game::legal_moves_from(self, from)
    }

    fn undo(&mut self) -> bool {
        Game::undo(self)
    }

    fn to_fen(&self) -> String {
        Game::to_fen(self)
    }

    fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        Game::load_fen(self, fen)
    }

    fn best_move(&self, depth: u32) -> Option<Move> {
        Game::best_move(self, depth)
    }
}
