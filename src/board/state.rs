use super::{CastlingRights, Color, Piece, Square};

/// Contents of one square: an optional piece plus whether it has moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Cell {
    pub(crate) piece: Option<(Color, Piece)>,
    pub(crate) has_moved: bool,
}

impl Cell {
    #[must_use]
    pub const fn piece(self) -> Option<(Color, Piece)> {
        self.piece
    }

    #[must_use]
    pub const fn has_moved(self) -> bool {
        self.has_moved
    }
}

/// 8x8 grid indexed `[rank][file]`, rank 0 being White's home rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    #[must_use]
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::default(); 8]; 8],
        }
    }

    /// The standard initial arrangement
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            board.set_piece(Square(0, file), Color::White, *piece);
            board.set_piece(Square(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square(6, file), Color::Black, Piece::Pawn);
            board.set_piece(Square(7, file), Color::Black, *piece);
        }
        board
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.0][sq.1]
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.cells[sq.0][sq.1].piece
    }

    /// Get just the piece type on a square (without color)
    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[inline]
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.0][sq.1].piece.is_none()
    }

    /// Place an unmoved piece, replacing whatever was there
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.cells[sq.0][sq.1] = Cell {
            piece: Some((color, piece)),
            has_moved: false,
        };
    }

    pub(crate) fn set_cell(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.0][sq.1] = cell;
    }

    pub(crate) fn mark_moved(&mut self, sq: Square, moved: bool) {
        self.cells[sq.0][sq.1].has_moved = moved;
    }

    /// Empty a square, returning what stood there
    pub(crate) fn take(&mut self, sq: Square) -> Cell {
        std::mem::take(&mut self.cells[sq.0][sq.1])
    }

    /// Every occupied square in index order (a1, b1, ..., h8)
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(c, p)| (sq, c, p)))
    }

    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some((color, Piece::King)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

/// Board plus everything else needed to decide the next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        Position {
            board: Board::starting(),
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board.piece_at(sq)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
