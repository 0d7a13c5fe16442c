// cozy-chess encodes castling as "king captures rook" (e.g. e1h1) while UCI
// expects the king's destination square (e1g1).

use cozy_chess::{util::display_uci_move, Board, Move};

#[inline]
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    display_uci_move(board, mv).to_string()
}
