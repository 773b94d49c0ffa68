use super::super::attack_tables::KING_TARGETS;
use super::super::types::king_home;
use super::super::{Move, Position, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        for &to in &KING_TARGETS[from.as_index()] {
            if self.board.color_on(to) != Some(color) {
                moves.push(Move::quiet(from, to));
            }
        }

        if from != king_home(color) {
            return;
        }
        let rank = color.back_rank();
        // Only emptiness is checked here; attacked squares are rejected by the legal filter.
        if self.castling.has(color, true)
            && self.castling_pieces_home(color, true)
            && self.board.is_empty(Square(rank, 5))
            && self.board.is_empty(Square(rank, 6))
        {
            moves.push(Move::castle(from, Square(rank, 6)));
        }
        if self.castling.has(color, false)
            && self.castling_pieces_home(color, false)
            && self.board.is_empty(Square(rank, 1))
            && self.board.is_empty(Square(rank, 2))
            && self.board.is_empty(Square(rank, 3))
        {
            moves.push(Move::castle(from, Square(rank, 2)));
        }
    }
}
