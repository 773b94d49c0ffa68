use std::fmt;
use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::types::{king_home, rook_home};
use super::{Board, CastlingRights, Color, Move, Piece, Position, Square};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// Four to six fields are accepted; missing move counters default to
    /// `0` and `1`. Nothing is built until every field has parsed.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyParts { found: parts.len() });
        }

        let mut board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = if parts[3] == "-" {
            None
        } else {
            let sq: Square = parts[3].parse().map_err(|_| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?;
            // The target sits behind a pawn the opponent just pushed.
            let expected_rank = match side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            Some(sq)
        };

        let halfmove_clock = parse_counter(parts.get(4).copied(), 0)?;
        let fullmove_number = parse_counter(parts.get(5).copied(), 1)?;

        derive_moved_flags(&mut board, castling);

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.position_key(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The first four FEN fields: placement, side, castling, en passant.
    ///
    /// Two positions with equal keys are the same for repetition purposes.
    #[must_use]
    pub fn position_key(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.board.piece_at(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        for (color, kingside, letter) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling.has(color, kingside) {
                castling.push(letter);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!("{} {} {} {}", rows.join("/"), active, castling, ep)
    }

    /// Parse a move in long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found.
    pub fn parse_uci(&self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() < 4 || uci.len() > 5 || !uci.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci.chars().nth(4) {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0;
        let mut after_digit = false;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if after_digit || !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidEmptyRun { rank, char: c });
                }
                after_digit = true;
                file += skip as usize;
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank, files: file });
                }
                continue;
            }
            after_digit = false;
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            if file >= 8 {
                return Err(FenError::TooManyFiles {
                    rank,
                    files: file + 1,
                });
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            board.set_piece(Square(rank, file), color, piece);
            file += 1;
        }
        if file < 8 {
            return Err(FenError::TooFewFiles { rank, files: file });
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidCounter {
            found: text.to_string(),
        }),
    }
}

/// Kings and rooks count as unmoved only where a castling right relies on
/// them; pawns are unmoved on their starting rank.
fn derive_moved_flags(board: &mut Board, castling: CastlingRights) {
    let placed: Vec<(Square, Color, Piece)> = board.pieces().collect();
    for (sq, color, piece) in placed {
        let moved = match piece {
            Piece::King => {
                sq != king_home(color)
                    || !(castling.has(color, true) || castling.has(color, false))
            }
            Piece::Rook => {
                let kingside = sq == rook_home(color, true) && castling.has(color, true);
                let queenside = sq == rook_home(color, false) && castling.has(color, false);
                !(kingside || queenside)
            }
            Piece::Pawn => sq.rank() != color.pawn_start_rank(),
            _ => false,
        };
        board.mark_moved(sq, moved);
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let pos = Position::try_from_fen(START_FEN).unwrap();
        assert_eq!(pos.to_fen(), START_FEN);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::try_from_fen(fen).unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant_target(), Some(Square(2, 4)));
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_fen_optional_counters() {
        let pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        let pos = Position::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 42 17").unwrap();
        assert_eq!(pos.halfmove_clock(), 42);
        assert_eq!(pos.fullmove_number(), 17);
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { found: 2 })));
    }

    #[test]
    fn test_fen_error_too_many_parts() {
        let result = Position::try_from_fen(&format!("{START_FEN} extra"));
        assert!(matches!(result, Err(FenError::TooManyParts { found: 7 })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Position::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_shape() {
        let result = Position::try_from_fen("8/8/8/8/8/8/8 w - - 0 1");
        assert!(matches!(result, Err(FenError::WrongRankCount { found: 7 })));
        let result = Position::try_from_fen("7p1/8/8/8/8/8/8/8 w - - 0 1");
        assert!(matches!(result, Err(FenError::TooManyFiles { .. })));
        let result = Position::try_from_fen("9/8/8/8/8/8/8/8 w - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidEmptyRun { rank: 7, char: '9' })));
        let result = Position::try_from_fen("8/8/8/8/44/8/8/8 w - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidEmptyRun { rank: 3, char: '4' })));
        let result = Position::try_from_fen("8/8/8/8/8/8/8/08 w - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidEmptyRun { rank: 0, char: '0' })));
        let result = Position::try_from_fen("7/8/8/8/8/8/8/8 w - - 0 1");
        assert!(matches!(result, Err(FenError::TooFewFiles { rank: 7, files: 7 })));
    }

    #[test]
    fn test_fen_error_fields() {
        let result = Position::try_from_fen("8/8/8/8/8/8/8/8 x - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
        let result = Position::try_from_fen("8/8/8/8/8/8/8/8 w XQ - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
        let result = Position::try_from_fen("8/8/8/8/8/8/8/8 w - z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result = Position::try_from_fen("8/8/8/8/8/8/8/8 w - e4 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // target on the mover's own side of the board
        let result = Position::try_from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result = Position::try_from_fen("4k3/3pp3/8/8/8/8/8/4K3 b - e6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        assert!(Position::try_from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").is_ok());
        let result = Position::try_from_fen("8/8/8/8/8/8/8/8 w - - x 1");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let pos = Position::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let rights = pos.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_moved_flags_follow_castling_rights() {
        let pos = Position::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let board = pos.board();
        assert!(!board.cell(Square(0, 4)).has_moved());
        assert!(!board.cell(Square(0, 7)).has_moved());
        assert!(board.cell(Square(0, 0)).has_moved());
        assert!(!board.cell(Square(7, 4)).has_moved());
        assert!(board.cell(Square(7, 7)).has_moved());
        assert!(!board.cell(Square(7, 0)).has_moved());

        let bare = Position::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(bare.board().cell(Square(0, 4)).has_moved());
    }

    #[test]
    fn test_position_key_drops_counters() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 3 9");
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(a.position_key(), b.position_key());
        assert_eq!(a.position_key(), "4k3/8/8/8/8/8/8/4K3 w - -");
    }

    #[test]
    fn test_parse_uci() {
        let pos = Position::new();
        let mv = pos.parse_uci("e2e4").unwrap();
        assert!(mv.is_double_pawn_push());
        assert!(matches!(
            pos.parse_uci("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            pos.parse_uci("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            pos.parse_uci("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));

        let promo = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        assert_eq!(
            promo.parse_uci("a7a8n").unwrap().promotion(),
            Some(Piece::Knight)
        );
        assert!(matches!(
            promo.parse_uci("a7a8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        ));
    }

    #[test]
    fn test_from_str_trait() {
        let pos: Position = START_FEN.parse().unwrap();
        assert_eq!(pos.to_string(), START_FEN);
    }
}
