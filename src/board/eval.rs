use super::pst::pst_value;
use super::Position;

impl Position {
    /// Static evaluation in centipawns: positive favors White.
    ///
    /// Material plus piece-square bonuses, nothing else.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        self.board
            .pieces()
            .map(|(sq, color, piece)| color.sign() * (piece.value() + pst_value(piece, color, sq)))
            .sum()
    }
}
