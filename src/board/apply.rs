//! Move application.
//!
//! [`Position::apply`] is a pure transform that knows nothing about legality
//! or move counters. [`Position::make_move`] commits its result and does the
//! clock bookkeeping, flipping the side to move.

use super::{Board, CastlingRights, Color, Move, Piece, Position, Square};
use super::types::{king_home, rook_home};

/// Everything a move changes apart from the counters and side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    pub board: Board,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub captured: Option<Piece>,
}

impl Position {
    /// Apply `mv` to a copy of this position's board and rights.
    ///
    /// The move is trusted: a move whose source square is empty leaves the
    /// board unchanged apart from the cleared en passant target.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Applied {
        let mut board = self.board;
        let mut castling = self.castling;
        let mut en_passant = None;
        let mut captured = None;

        let from = mv.from();
        let to = mv.to();
        let mover = board.take(from);
        let Some((color, piece)) = mover.piece else {
            return Applied {
                board,
                castling,
                en_passant,
                captured,
            };
        };

        if mv.is_en_passant() {
            // The captured pawn stands beside the mover, on its original rank.
            let victim = Square(from.rank(), to.file());
            captured = board.take(victim).piece.map(|(_, p)| p);
        } else {
            captured = board.take(to).piece.map(|(_, p)| p);
        }

        let placed = mv.promotion().unwrap_or(piece);
        board.set_piece(to, color, placed);
        board.mark_moved(to, true);

        if mv.is_castling() {
            let kingside = mv.is_castle_kingside();
            let rook_from = rook_home(color, kingside);
            let rook_to = Square(to.rank(), if kingside { to.file() - 1 } else { to.file() + 1 });
            let rook = board.take(rook_from);
            board.set_cell(rook_to, rook);
            board.mark_moved(rook_to, true);
        }

        if mv.is_double_pawn_push() {
            en_passant = Some(Square((from.rank() + to.rank()) / 2, from.file()));
        }

        if piece == Piece::King {
            castling.remove_color(color);
        }
        // A rook leaving its corner, or anything landing on one, ends that right.
        castling.remove_for_corner(from);
        castling.remove_for_corner(to);

        Applied {
            board,
            castling,
            en_passant,
            captured,
        }
    }

    /// Commit `mv`: apply it, update the clocks and pass the turn.
    ///
    /// Returns the captured piece, if any.
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let is_pawn = self.board.piece_on(mv.from()) == Some(Piece::Pawn);
        let applied = self.apply(mv);

        self.board = applied.board;
        self.castling = applied.castling;
        self.en_passant = applied.en_passant;

        if is_pawn || applied.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opponent();

        applied.captured
    }

    /// Copy of this position with `mv` made
    #[must_use]
    pub fn after(&self, mv: Move) -> Position {
        let mut next = *self;
        next.make_move(mv);
        next
    }

    /// Whether the king and the given rook both still stand on their home squares.
    pub(crate) fn castling_pieces_home(&self, color: Color, kingside: bool) -> bool {
        self.board.piece_at(king_home(color)) == Some((color, Piece::King))
            && self.board.piece_at(rook_home(color, kingside)) == Some((color, Piece::Rook))
    }
}
