mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::{Move, Piece, Position, Square};

impl Position {
    /// Moves obeying each piece's movement pattern, ignoring self-check.
    ///
    /// Order is fixed: squares a1..h8, then each generator's own order.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, color, piece) in self.board.pieces() {
            if color == self.side_to_move {
                self.generate_piece_moves(from, piece, &mut moves);
            }
        }
        moves
    }

    fn generate_piece_moves(&self, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from, moves),
            Piece::Knight => self.generate_knight_moves(from, moves),
            Piece::Bishop => self.generate_slider_moves(from, SliderType::Bishop, moves),
            Piece::Rook => self.generate_slider_moves(from, SliderType::Rook, moves),
            Piece::Queen => self.generate_slider_moves(from, SliderType::Queen, moves),
            Piece::King => self.generate_king_moves(from, moves),
        }
    }

    /// Whether a pseudo-legal move keeps the mover's king safe.
    fn is_legal(&self, mv: Move) -> bool {
        let color = self.side_to_move;
        if mv.is_castling() {
            let enemy = color.opponent();
            let transit = Square(mv.from().rank(), (mv.from().file() + mv.to().file()) / 2);
            if self.board.is_in_check(color)
                || self.board.is_square_attacked(transit, enemy)
                || self.board.is_square_attacked(mv.to(), enemy)
            {
                return false;
            }
        }
        !self.apply(mv).board.is_in_check(color)
    }

    /// All legal moves for the side to move
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|&mv| self.is_legal(mv));
        moves
    }

    /// Legal moves of the piece on `from`; empty if it is not the mover's piece
    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let Some((color, piece)) = self.board.piece_at(from) else {
            return Vec::new();
        };
        if color != self.side_to_move {
            return Vec::new();
        }
        let mut moves = Vec::new();
        self.generate_piece_moves(from, piece, &mut moves);
        moves.retain(|&mv| self.is_legal(mv));
        moves
    }

    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        self.pseudo_legal_moves()
            .into_iter()
            .any(|mv| self.is_legal(mv))
    }

    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check(self.side_to_move)
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_moves()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_moves()
    }

    /// Count leaf nodes of the legal move tree to `depth`
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|mv| self.after(mv).perft(depth - 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Position, Square};

    #[test]
    fn test_start_position_has_twenty_moves() {
        assert_eq!(Position::new().legal_moves().len(), 20);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // Knight on e2 pinned by the rook on e8.
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pos.legal_moves_from(Square(1, 4)).is_empty());
    }

    #[test]
    fn test_cannot_castle_out_of_check() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(pos.legal_moves().iter().all(|m| !m.is_castling()));
    }

    #[test]
    fn test_cannot_castle_through_attack() {
        // f1 is covered by the rook on f8; queenside is still fine.
        let pos = Position::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_castling())
            .collect();
        assert_eq!(castles.len(), 1);
        assert!(castles[0].is_castle_queenside());
    }

    #[test]
    fn test_cannot_castle_into_attack() {
        let pos = Position::from_fen("6rk/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.legal_moves().iter().all(|m| !m.is_castling()));
    }

    #[test]
    fn test_queenside_b_file_attack_is_allowed() {
        // Only b1 is attacked; the king never crosses it.
        let pos = Position::from_fen("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(pos.legal_moves().iter().any(|m| m.is_castle_queenside()));
    }

    #[test]
    fn test_legal_moves_from_wrong_color() {
        let pos = Position::new();
        assert!(pos.legal_moves_from(Square(6, 4)).is_empty());
        assert!(pos.legal_moves_from(Square(3, 3)).is_empty());
        assert_eq!(pos.legal_moves_from(Square(0, 6)).len(), 2);
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        assert!(Position::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1").is_checkmate());
        let stale = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(stale.is_stalemate());
        assert!(!stale.is_checkmate());
    }

    #[test]
    fn test_perft_start_depth_three() {
        let pos = Position::new();
        assert_eq!(pos.perft(1), 20);
        assert_eq!(pos.perft(2), 400);
        assert_eq!(pos.perft(3), 8902);
    }
}
