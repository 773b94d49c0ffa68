use super::super::{Move, Position, Square, PROMOTION_PIECES};

impl Position {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let dir = color.pawn_direction();
        let promotion_rank = color.pawn_promotion_rank();

        let push = |to: Square, moves: &mut Vec<Move>| {
            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::new_promotion(from, to, promo));
                }
            } else {
                moves.push(Move::quiet(from, to));
            }
        };

        if let Some(forward) = from.offset(dir, 0) {
            if self.board.is_empty(forward) {
                push(forward, moves);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double) = forward.offset(dir, 0) {
                        if self.board.is_empty(double) {
                            moves.push(Move::double_pawn_push(from, double));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(dir, df) else {
                continue;
            };
            match self.board.color_on(target) {
                Some(target_color) if target_color != color => push(target, moves),
                Some(_) => {}
                None => {
                    if self.en_passant == Some(target) {
                        moves.push(Move::en_passant(from, target));
                    }
                }
            }
        }
    }
}
