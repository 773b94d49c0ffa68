//! Move type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

/// A candidate move as produced by the generators.
///
/// Carries only what the applier needs; legality is decided separately.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    is_en_passant: bool,
    is_double_push: bool,
    is_castle: bool,
}

impl Move {
    /// Create a plain move or capture
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            is_en_passant: false,
            is_double_push: false,
            is_castle: false,
        }
    }

    /// Create a double pawn push
    #[inline]
    #[must_use]
    pub const fn double_pawn_push(from: Square, to: Square) -> Self {
        Move {
            is_double_push: true,
            ..Move::quiet(from, to)
        }
    }

    /// Create an en passant capture
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move {
            is_en_passant: true,
            ..Move::quiet(from, to)
        }
    }

    /// Create a castling move, given as the king's two-square step
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Move {
            is_castle: true,
            ..Move::quiet(from, to)
        }
    }

    /// Create a promotion (capturing or not)
    #[inline]
    #[must_use]
    pub const fn new_promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            promotion: Some(piece),
            ..Move::quiet(from, to)
        }
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.is_en_passant
    }

    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.is_double_push
    }

    /// Returns true if this move is castling (either side)
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.is_castle
    }

    /// Returns true if this is kingside castling (O-O)
    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.is_castle && self.to.1 > self.from.1
    }

    /// Returns true if this is queenside castling (O-O-O)
    #[inline]
    #[must_use]
    pub const fn is_castle_queenside(self) -> bool {
        self.is_castle && self.to.1 < self.from.1
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
