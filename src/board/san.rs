//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the standard human-readable chess notation used in scoresheets,
//! books, and GUIs. Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#"
//!
//! # Examples
//! ```
//! use chess_game::board::Position;
//!
//! let pos = Position::new();
//! let mv = pos.parse_san("e4").unwrap();
//! assert_eq!(pos.move_to_san(mv), "e4");
//! ```

use super::error::SanError;
use super::{Move, Piece, Position, Square};

impl Position {
    /// Format a legal move in Standard Algebraic Notation.
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let legal = self.legal_moves();
        self.san_with_legal(mv, &legal)
    }

    /// SAN for `mv`, disambiguated against an already generated legal move list.
    ///
    /// The check suffix is decided by playing the move on a copy.
    #[must_use]
    pub fn san_with_legal(&self, mv: Move, legal: &[Move]) -> String {
        let mut san = self.san_body(mv, legal);
        let next = self.after(mv);
        if next.is_in_check() {
            san.push(if next.has_legal_moves() { '+' } else { '#' });
        }
        san
    }

    fn san_body(&self, mv: Move, legal: &[Move]) -> String {
        if mv.is_castling() {
            return if mv.is_castle_kingside() {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            };
        }

        let mut san = String::new();
        let piece = self.board.piece_on(mv.from()).unwrap_or(Piece::Pawn);
        let is_capture = mv.is_en_passant() || !self.board.is_empty(mv.to());

        if piece == Piece::Pawn {
            if is_capture {
                san.push(mv.from().file_char());
            }
        } else {
            san.push(piece.to_char().to_ascii_uppercase());
            let (needs_file, needs_rank) = self.needs_disambiguation(mv, piece, legal);
            if needs_file {
                san.push(mv.from().file_char());
            }
            if needs_rank {
                san.push(mv.from().rank_char());
            }
        }

        if is_capture {
            san.push('x');
        }
        san.push_str(&mv.to().to_string());

        if let Some(promo) = mv.promotion() {
            san.push('=');
            san.push(promo.to_char().to_ascii_uppercase());
        }
        san
    }

    /// Determine if disambiguation is needed for a piece move.
    /// Returns (`needs_file`, `needs_rank`).
    fn needs_disambiguation(&self, mv: Move, piece: Piece, legal: &[Move]) -> (bool, bool) {
        let rivals: Vec<Square> = legal
            .iter()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.board.piece_on(m.from()) == Some(piece)
            })
            .map(|m| m.from())
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let same_file = rivals.iter().any(|sq| sq.file() == mv.from().file());
        let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from().rank());

        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a move in Standard Algebraic Notation.
    ///
    /// Accepts notation like "e4", "Nf3", "Bxc6", "O-O", "0-0-0", "e8=Q"
    /// with optional check indicators (+, #).
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let trimmed = san.trim().trim_end_matches(['+', '#', '!', '?']);
        if trimmed.is_empty() {
            return Err(SanError::Empty);
        }

        if trimmed == "O-O" || trimmed == "0-0" {
            return self.find_castling_move(true, san);
        }
        if trimmed == "O-O-O" || trimmed == "0-0-0" {
            return self.find_castling_move(false, san);
        }

        let mut chars: Vec<char> = trimmed.chars().collect();

        let piece = if chars[0].is_ascii_uppercase() {
            let p = Piece::from_char(chars[0])
                .filter(|p| *p != Piece::Pawn)
                .ok_or(SanError::InvalidPiece { char: chars[0] })?;
            chars.remove(0);
            p
        } else {
            Piece::Pawn
        };

        let promotion = match chars.iter().position(|&c| c == '=') {
            Some(idx) => {
                let promo_char = chars.get(idx + 1).copied().unwrap_or('=');
                let promo = Piece::from_char(promo_char)
                    .filter(|p| !matches!(p, Piece::Pawn | Piece::King))
                    .ok_or(SanError::InvalidPromotion { char: promo_char })?;
                chars.truncate(idx);
                Some(promo)
            }
            None => None,
        };

        chars.retain(|&c| c != 'x' && c != ':');
        if chars.len() < 2 {
            return Err(SanError::InvalidSquare {
                notation: chars.iter().collect(),
            });
        }
        let dest_text: String = chars[chars.len() - 2..].iter().collect();
        let dest: Square = dest_text.parse().map_err(|_| SanError::InvalidSquare {
            notation: dest_text.clone(),
        })?;

        let mut disambig_file = None;
        let mut disambig_rank = None;
        for &c in &chars[..chars.len() - 2] {
            match c {
                'a'..='h' => disambig_file = Some(c as usize - 'a' as usize),
                '1'..='8' => disambig_rank = Some(c as usize - '1' as usize),
                _ => {
                    return Err(SanError::InvalidSquare {
                        notation: trimmed.to_string(),
                    })
                }
            }
        }

        let matching: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|mv| {
                mv.to() == dest
                    && !mv.is_castling()
                    && self.board.piece_on(mv.from()) == Some(piece)
                    && mv.promotion() == promotion
                    && disambig_file.map_or(true, |f| mv.from().file() == f)
                    && disambig_rank.map_or(true, |r| mv.from().rank() == r)
            })
            .collect();

        match matching.as_slice() {
            [] => Err(SanError::NoMatchingMove {
                san: san.to_string(),
            }),
            [mv] => Ok(*mv),
            _ => Err(SanError::AmbiguousMove {
                san: san.to_string(),
            }),
        }
    }

    fn find_castling_move(&self, kingside: bool, san: &str) -> Result<Move, SanError> {
        self.legal_moves()
            .into_iter()
            .find(|mv| {
                if kingside {
                    mv.is_castle_kingside()
                } else {
                    mv.is_castle_queenside()
                }
            })
            .ok_or_else(|| SanError::NoMatchingMove {
                san: san.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_moves() {
        let pos = Position::new();
        let mv = pos.parse_san("e4").unwrap();
        assert_eq!(mv.from(), Square(1, 4));
        assert_eq!(mv.to(), Square(3, 4));
        assert_eq!(pos.move_to_san(mv), "e4");
    }

    #[test]
    fn test_knight_moves() {
        let pos = Position::new();
        let mv = pos.parse_san("Nf3").unwrap();
        assert_eq!(mv.from(), Square(0, 6));
        assert_eq!(pos.move_to_san(mv), "Nf3");
    }

    #[test]
    fn test_castling() {
        let pos = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let mv = pos.parse_san("O-O").unwrap();
        assert!(mv.is_castle_kingside());
        assert_eq!(pos.move_to_san(mv), "O-O");

        let mv = pos.parse_san("0-0-0").unwrap();
        assert!(mv.is_castle_queenside());
        assert_eq!(pos.move_to_san(mv), "O-O-O");
    }

    #[test]
    fn test_captures() {
        let pos = Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let mv = pos.parse_san("exd5").unwrap();
        assert_eq!(pos.move_to_san(mv), "exd5");
    }

    #[test]
    fn test_en_passant_is_a_capture() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = pos.parse_san("exd6").unwrap();
        assert!(mv.is_en_passant());
        assert_eq!(pos.move_to_san(mv), "exd6");
    }

    #[test]
    fn test_promotion() {
        let pos = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let mv = pos.parse_san("a8=Q").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        assert_eq!(pos.move_to_san(mv), "a8=Q");
        let mv = pos.parse_san("a8=N").unwrap();
        assert_eq!(pos.move_to_san(mv), "a8=N");
        assert!(matches!(
            pos.parse_san("a8=K"),
            Err(SanError::InvalidPromotion { char: 'K' })
        ));
    }

    #[test]
    fn test_file_disambiguation() {
        let pos = Position::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1");
        let mv = pos.parse_san("Rad4").unwrap();
        assert_eq!(mv.from().file(), 0);
        assert_eq!(pos.move_to_san(mv), "Rad4+");
        let mv = pos.parse_san("Rhd4").unwrap();
        assert_eq!(pos.move_to_san(mv), "Rhd4+");
        assert!(matches!(
            pos.parse_san("Rd4"),
            Err(SanError::AmbiguousMove { .. })
        ));
    }

    #[test]
    fn test_rank_disambiguation() {
        let pos = Position::from_fen("3k4/R7/8/8/8/8/R7/4K3 w - - 0 1");
        let mv = pos.parse_san("R7a5").unwrap();
        assert_eq!(mv.from(), Square(6, 0));
        assert_eq!(pos.move_to_san(mv), "R7a5");
    }

    #[test]
    fn test_full_square_disambiguation() {
        // e1 shares the rank and h4 the file of the moving queen on h1.
        let pos = Position::from_fen("1k6/8/8/8/7Q/8/8/K3Q2Q w - - 0 1");
        let mv = Move::quiet(Square(0, 7), Square(3, 4));
        assert_eq!(pos.move_to_san(mv), "Qh1e4");
    }

    #[test]
    fn test_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mv = pos.parse_san("Rh8").unwrap();
        assert_eq!(pos.move_to_san(mv), "Rh8+");
    }

    #[test]
    fn test_checkmate() {
        let pos = Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        let mv = pos.parse_san("Qh4#").unwrap();
        assert_eq!(pos.move_to_san(mv), "Qh4#");
    }

    #[test]
    fn test_parse_errors() {
        let pos = Position::new();
        assert_eq!(pos.parse_san("  "), Err(SanError::Empty));
        assert!(matches!(pos.parse_san("Zf3"), Err(SanError::InvalidPiece { char: 'Z' })));
        assert!(matches!(pos.parse_san("Nz9"), Err(SanError::InvalidSquare { .. })));
        assert!(matches!(pos.parse_san("Nf4"), Err(SanError::NoMatchingMove { .. })));
        assert!(matches!(pos.parse_san("O-O"), Err(SanError::NoMatchingMove { .. })));
    }

    #[test]
    fn test_round_trip() {
        let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        for mv in pos.legal_moves() {
            let san = pos.move_to_san(mv);
            assert_eq!(pos.parse_san(&san).unwrap(), mv, "{san}");
        }
    }
}
