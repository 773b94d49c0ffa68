//! Move ordering utilities for search.

use std::cmp::Reverse;

use super::super::{Move, Piece, Position};

/// Material value of whatever `mv` captures, 0 for quiet moves
pub(crate) fn capture_value(position: &Position, mv: Move) -> i32 {
    if mv.is_en_passant() {
        return Piece::Pawn.value();
    }
    position
        .board()
        .piece_on(mv.to())
        .map_or(0, Piece::value)
}

/// Sort captures of the most valuable pieces first. The sort is stable, so
/// equal-valued moves keep generation order.
pub(crate) fn order_moves(position: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(capture_value(position, mv)));
}
