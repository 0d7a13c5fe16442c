use cozy_chess::{Board, Color, Piece};

/// Centipawn value of each non-king piece.
#[derive(Debug, Clone, Copy)]
pub struct PieceValues {
    pub pawn: i16,
    pub knight: i16,
    pub bishop: i16,
    pub rook: i16,
    pub queen: i16,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 320,
            bishop: 330,
            rook: 500,
            queen: 900,
        }
    }
}

impl PieceValues {
    #[inline]
    pub fn get(&self, piece: Piece) -> i16 {
        match piece {
            Piece::Pawn => self.pawn,
            Piece::Knight => self.knight,
            Piece::Bishop => self.bishop,
            Piece::Rook => self.rook,
            Piece::Queen => self.queen,
            Piece::King => 0,
        }
    }
}

pub(super) fn evaluate(board: &Board, color: Color, values: &PieceValues) -> i16 {
    Piece::ALL
        .iter()
        .map(|&piece| board.colored_pieces(color, piece).len() as i16 * values.get(piece))
        .sum()
}

/// A lone king, or a king with a single minor piece, cannot force mate.
pub(super) fn cannot_win(board: &Board, color: Color) -> bool {
    let heavy_or_pawns = board.colored_pieces(color, Piece::Pawn)
        | board.colored_pieces(color, Piece::Rook)
        | board.colored_pieces(color, Piece::Queen);
    if !heavy_or_pawns.is_empty() {
        return false;
    }

    let minors = board.colored_pieces(color, Piece::Knight) | board.colored_pieces(color, Piece::Bishop);
    minors.len() <= 1
}
