//! Live game management.
//!
//! [`Game`] owns the current position together with everything the board
//! alone cannot know: the move history, the positions seen so far (for
//! repetition), captured material and the final result.
//!
//! # Example
//! ```
//! use chess_game::board::Square;
//! use chess_game::game::Game;
//!
//! let mut game = Game::new();
//! let e2: Square = "e2".parse().unwrap();
//! let e4 = Square::new(3, 4).unwrap();
//! let outcome = game.make_move(e2, e4, None).unwrap();
//! assert_eq!(outcome.san, "e4");
//! assert!(!outcome.game_over);
//! ```

mod engine;
mod record;

use log::{debug, error, info};

use crate::board::{
    find_best_move, Color, FenError, GameResult, Move, MoveError, Piece, Position, Square,
    START_FEN,
};

pub use engine::ChessEngine;
pub use record::{GameStatus, MoveOutcome, MoveRecord};

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    /// FEN the game started from; `undo` falls back to it
    start_fen: String,
    history: Vec<MoveRecord>,
    /// Position keys of every position reached, the starting one included
    keys: Vec<String>,
    /// Pieces taken by each color, indexed by the capturing color
    captured: [Vec<Piece>; 2],
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A game from the standard starting position
    #[must_use]
    pub fn new() -> Self {
        Game::with_position(Position::new(), START_FEN.to_string())
    }

    /// A game starting from `fen`
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let position = Position::try_from_fen(fen)?;
        Ok(Game::with_position(position, fen.trim().to_string()))
    }

    fn with_position(position: Position, start_fen: String) -> Self {
        let key = position.position_key();
        Game {
            result: position.terminal_state(1),
            position,
            start_fen,
            history: Vec::new(),
            keys: vec![key],
            captured: [Vec::new(), Vec::new()],
        }
    }

    /// Play the move from `from` to `to`.
    ///
    /// A promoting move without a `promotion` piece promotes to a queen. A
    /// promotion piece on a move that does not promote is illegal. On error
    /// the game is left exactly as it was.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<MoveOutcome, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        let (color, piece) = self
            .position
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if color != self.position.side_to_move() {
            return Err(MoveError::NotYourTurn);
        }

        let legal = self.position.legal_moves();
        let mv = select_move(&legal, from, to, promotion).ok_or(MoveError::IllegalMove)?;
        Ok(self.commit(mv, color, piece, &legal))
    }

    /// Play a move given in Standard Algebraic Notation, e.g. `"Nf3"` or `"O-O"`.
    pub fn make_move_san(&mut self, san: &str) -> Result<MoveOutcome, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }
        let mv = self.position.parse_san(san)?;
        self.make_move(mv.from(), mv.to(), mv.promotion())
    }

    fn commit(&mut self, mv: Move, color: Color, piece: Piece, legal: &[Move]) -> MoveOutcome {
        let san = self.position.san_with_legal(mv, legal);
        let captured = self.position.make_move(mv);
        if let Some(taken) = captured {
            self.captured[color.index()].push(taken);
        }

        let key = self.position.position_key();
        let repetitions = self.keys.iter().filter(|k| **k == key).count() + 1;
        self.keys.push(key);
        self.result = self.position.terminal_state(repetitions);

        let fen_after = self.position.to_fen();
        debug!("{color} played {san}, now {fen_after}");
        if let Some(result) = self.result {
            info!("game over after {san}: {result}");
        }

        self.history.push(MoveRecord {
            mv,
            piece,
            color,
            captured,
            san: san.clone(),
            fen_after,
        });
        MoveOutcome::new(san, self.position.is_in_check(), self.result)
    }

    /// Take back the last move and clear any result.
    ///
    /// Returns false when there is no move to take back.
    pub fn undo(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let previous_fen = match self.history.len() {
            1 => &self.start_fen,
            n => &self.history[n - 2].fen_after,
        };
        let position = match Position::try_from_fen(previous_fen) {
            Ok(position) => position,
            Err(err) => {
                error!("cannot restore {previous_fen}: {err}");
                return false;
            }
        };

        let Some(record) = self.history.pop() else {
            return false;
        };
        if record.captured.is_some() {
            self.captured[record.color.index()].pop();
        }
        self.keys.pop();
        self.position = position;
        self.result = None;
        debug!("took back {}", record.san);
        true
    }

    /// Legal moves of the piece on `from`; empty for an empty square, the
    /// opponent's piece or a finished game.
    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        if self.result.is_some() {
            return Vec::new();
        }
        self.position.legal_moves_from(from)
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Start over from `fen`, discarding the history.
    ///
    /// The loaded position is classified at once, so a position that is
    /// already drawn or decided reports its result immediately.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Game::from_fen(fen)?;
        debug!("loaded {}", self.start_fen);
        if let Some(result) = self.result {
            info!("loaded position is already decided: {result}");
        }
        Ok(())
    }

    /// The search's choice for the side to move, `None` once the game is over.
    #[must_use]
    pub fn best_move(&self, depth: u32) -> Option<Move> {
        if self.result.is_some() {
            return None;
        }
        find_best_move(&self.position, depth)
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Pieces `color` has captured, in capture order
    #[must_use]
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.result {
            Some(result) => GameStatus::Terminal(result),
            None => GameStatus::Ongoing,
        }
    }

    /// SAN of every move played so far
    #[must_use]
    pub fn san_history(&self) -> Vec<&str> {
        self.history.iter().map(|r| r.san.as_str()).collect()
    }
}

/// Find the legal move matching a from/to request, defaulting promotions to a queen.
fn select_move(legal: &[Move], from: Square, to: Square, promotion: Option<Piece>) -> Option<Move> {
    let mut candidates = legal.iter().filter(|m| m.from() == from && m.to() == to);
    let first = *candidates.clone().next()?;
    if first.is_promotion() {
        let wanted = promotion.unwrap_or(Piece::Queen);
        candidates.find(|m| m.promotion() == Some(wanted)).copied()
    } else if promotion.is_some() {
        None
    } else {
        Some(first)
    }
}
