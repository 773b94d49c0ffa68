//! Terminal and draw detection.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Color, Piece, Position, Square};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EndReason {
    Checkmate,
    Stalemate,
    FiftyMove,
    Repetition,
    InsufficientMaterial,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::FiftyMove => "fifty-move rule",
            EndReason::Repetition => "threefold repetition",
            EndReason::InsufficientMaterial => "insufficient material",
        };
        f.write_str(text)
    }
}

/// Final result of a game. `winner` is `None` for draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameResult {
    pub winner: Option<Color>,
    pub reason: EndReason,
}

impl GameResult {
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(color) => write!(f, "{color} wins by {}", self.reason),
            None => write!(f, "Draw by {}", self.reason),
        }
    }
}

/// Occurrences of a position key needed for a repetition draw
pub const REPETITION_LIMIT: usize = 3;

/// Halfmove clock value that ends the game
pub const FIFTY_MOVE_LIMIT: u32 = 100;

impl Position {
    /// Classify the position after a move has been made.
    ///
    /// `repetitions` is how often the current position key has occurred,
    /// this occurrence included. Rules are tried in a fixed order and the
    /// first match wins: checkmate, stalemate, fifty-move, repetition,
    /// insufficient material.
    #[must_use]
    pub fn terminal_state(&self, repetitions: usize) -> Option<GameResult> {
        if !self.has_legal_moves() {
            return Some(if self.is_in_check() {
                GameResult {
                    winner: Some(self.side_to_move.opponent()),
                    reason: EndReason::Checkmate,
                }
            } else {
                GameResult {
                    winner: None,
                    reason: EndReason::Stalemate,
                }
            });
        }

        let draw = |reason| Some(GameResult {
            winner: None,
            reason,
        });
        if self.halfmove_clock >= FIFTY_MOVE_LIMIT {
            return draw(EndReason::FiftyMove);
        }
        if repetitions >= REPETITION_LIMIT {
            return draw(EndReason::Repetition);
        }
        if self.is_insufficient_material() {
            return draw(EndReason::InsufficientMaterial);
        }
        None
    }

    /// Bare kings, a single minor piece against a bare king, or one bishop
    /// each on same-colored squares. Other endings are played out.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let mut extras: [Vec<(Piece, Square)>; 2] = [Vec::new(), Vec::new()];
        for (sq, color, piece) in self.board.pieces() {
            if piece != Piece::King {
                extras[color.index()].push((piece, sq));
            }
        }

        match (extras[0].as_slice(), extras[1].as_slice()) {
            ([], []) => true,
            ([(piece, _)], []) | ([], [(piece, _)]) => piece.is_minor(),
            ([(Piece::Bishop, a)], [(Piece::Bishop, b)]) => a.is_dark() == b.is_dark(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insufficient(fen: &str) -> bool {
        Position::from_fen(fen).is_insufficient_material()
    }

    #[test]
    fn test_insufficient_material_cases() {
        assert!(insufficient("8/8/8/4k3/8/8/4K3/8 w - - 0 1"));
        assert!(insufficient("8/8/8/4k3/8/8/4K1N1/8 w - - 0 1"));
        assert!(insufficient("8/8/8/4k3/8/8/4K3/2b5 w - - 0 1"));
        // c1 and f4 are both dark squares
        assert!(insufficient("8/8/8/4k3/5B2/8/4K3/2b5 w - - 0 1"));
    }

    #[test]
    fn test_sufficient_material_cases() {
        assert!(!insufficient("8/8/8/4k3/8/8/4KP2/8 w - - 0 1"));
        // bishops on opposite colors
        assert!(!insufficient("8/8/8/4k3/4B3/8/4K3/2b5 w - - 0 1"));
        // two knights, and bishop against knight, are left alone
        assert!(!insufficient("8/8/8/4k3/8/8/4KNN1/8 w - - 0 1"));
        assert!(!insufficient("8/8/8/4k3/8/8/4K1N1/2b5 w - - 0 1"));
        assert!(!insufficient("8/8/8/4k3/8/8/4K1R1/8 w - - 0 1"));
    }

    #[test]
    fn test_checkmate_winner_is_previous_mover() {
        let pos = Position::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1");
        let result = pos.terminal_state(1).unwrap();
        assert_eq!(result.reason, EndReason::Checkmate);
        assert_eq!(result.winner, Some(Color::White));
        assert_eq!(result.to_string(), "White wins by checkmate");
    }

    #[test]
    fn test_stalemate_beats_material_draw() {
        // A lone bishop is also insufficient material; stalemate is reported first.
        let pos = Position::from_fen("k7/2K5/1B6/8/8/8/8/8 b - - 0 1");
        assert!(pos.is_stalemate());
        assert!(pos.is_insufficient_material());
        assert_eq!(pos.terminal_state(1).unwrap().reason, EndReason::Stalemate);
    }

    #[test]
    fn test_fifty_move_and_repetition() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 100 80");
        assert_eq!(pos.terminal_state(1).unwrap().reason, EndReason::FiftyMove);
        let pos = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 99 80");
        assert_eq!(pos.terminal_state(1), None);
        assert_eq!(pos.terminal_state(2), None);
        let result = pos.terminal_state(3).unwrap();
        assert_eq!(result.reason, EndReason::Repetition);
        assert!(result.is_draw());
    }
}
