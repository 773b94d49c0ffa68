use super::super::attack_tables::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use super::super::{Move, Position, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    fn directions(self) -> &'static [(isize, isize)] {
        match self {
            SliderType::Bishop => &BISHOP_DIRECTIONS,
            SliderType::Rook => &ROOK_DIRECTIONS,
            SliderType::Queen => &QUEEN_DIRECTIONS,
        }
    }
}

impl Position {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut Vec<Move>,
    ) {
        let color = self.side_to_move;
        for &(dr, df) in slider.directions() {
            let mut current = from;
            while let Some(to) = current.offset(dr, df) {
                match self.board.color_on(to) {
                    None => moves.push(Move::quiet(from, to)),
                    Some(occupant) => {
                        if occupant != color {
                            moves.push(Move::quiet(from, to));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }
}
