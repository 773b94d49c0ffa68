use super::super::attack_tables::KNIGHT_TARGETS;
use super::super::{Move, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        for &to in &KNIGHT_TARGETS[from.as_index()] {
            if self.board.color_on(to) != Some(color) {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}
