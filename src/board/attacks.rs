//! Attack detection on a fully populated board.

use super::attack_tables::{BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, ROOK_DIRECTIONS};
use super::{Board, Color, Piece, Square};

impl Board {
    /// Whether any piece of `attacker` could capture on `square`.
    ///
    /// Pawn attacks count even when the square is empty, which is what
    /// castling transit checks need.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        let idx = square.as_index();

        if KNIGHT_TARGETS[idx]
            .iter()
            .any(|&sq| self.piece_at(sq) == Some((attacker, Piece::Knight)))
        {
            return true;
        }

        if KING_TARGETS[idx]
            .iter()
            .any(|&sq| self.piece_at(sq) == Some((attacker, Piece::King)))
        {
            return true;
        }

        // Attacking pawns sit one rank behind the target from their own side.
        let behind = -attacker.pawn_direction();
        for df in [-1, 1] {
            if let Some(sq) = square.offset(behind, df) {
                if self.piece_at(sq) == Some((attacker, Piece::Pawn)) {
                    return true;
                }
            }
        }

        if self.ray_hits(square, &ROOK_DIRECTIONS, attacker, Piece::Rook) {
            return true;
        }
        self.ray_hits(square, &BISHOP_DIRECTIONS, attacker, Piece::Bishop)
    }

    /// Walk each ray to its first occupant and test for `slider` or a queen.
    fn ray_hits(
        &self,
        from: Square,
        directions: &[(isize, isize)],
        attacker: Color,
        slider: Piece,
    ) -> bool {
        for &(dr, df) in directions {
            let mut current = from;
            while let Some(sq) = current.offset(dr, df) {
                if let Some((color, piece)) = self.piece_at(sq) {
                    if color == attacker && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
                current = sq;
            }
        }
        false
    }

    /// Whether `color`'s king is attacked. A board without that king is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king_sq| self.is_square_attacked(king_sq, color.opponent()))
    }
}
