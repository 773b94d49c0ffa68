#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Color, EndReason, GameResult, Move, Piece};

/// One committed move, as kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub mv: Move,
    /// The piece that moved (a pawn for promotions)
    pub piece: Piece,
    pub color: Color,
    pub captured: Option<Piece>,
    pub san: String,
    /// Full FEN of the position after the move
    pub fen_after: String,
}

/// What a caller needs to update a display after a move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveOutcome {
    pub san: String,
    /// The side now to move is in check
    pub in_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub game_over: bool,
    pub winner: Option<Color>,
    pub reason: Option<EndReason>,
}

impl MoveOutcome {
    pub(crate) fn new(san: String, in_check: bool, result: Option<GameResult>) -> Self {
        let reason = result.map(|r| r.reason);
        MoveOutcome {
            san,
            in_check,
            is_checkmate: reason == Some(EndReason::Checkmate),
            is_stalemate: reason == Some(EndReason::Stalemate),
            game_over: result.is_some(),
            winner: result.and_then(|r| r.winner),
            reason,
        }
    }
}

/// Lifecycle of a game: moves are accepted only while ongoing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Ongoing,
    Terminal(GameResult),
}
