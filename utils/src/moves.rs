use cozy_chess::{Board, Move, Piece};

/// Check if a move is a real capture (enemy piece on destination).
/// Correctly handles castling, which cozy-chess represents as "king captures rook".
#[inline(always)]
pub fn is_capture(board: &Board, mv: Move) -> bool {
    board.colors(!board.side_to_move()).has(mv.to)
}

/// Make a move and return a new board.
#[inline(always)]
pub fn make_move(board: &Board, mv: Move) -> Board {
    let mut new_board = board.clone();
    new_board.play_unchecked(mv);
    new_board
}

/// Collect all legal moves into a Vec, in generation order.
#[inline(always)]
pub fn collect_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|batch| {
        moves.extend(batch);
        false
    });
    moves
}

/// Check if the side to move is in check.
#[inline(always)]
pub fn has_check(board: &Board) -> bool {
    !board.checkers().is_empty()
}

// MVV-LVA table
// king, queen, rook, bishop, knight, pawn
const MVV_LVA: [[i32; 6]; 6] = [
    [0, 0, 0, 0, 0, 0],       // victim King
    [50, 51, 52, 53, 54, 55], // victim Queen
    [40, 41, 42, 43, 44, 45], // victim Rook
    [30, 31, 32, 33, 34, 35], // victim Bishop
    [20, 21, 22, 23, 24, 25], // victim Knight
    [10, 11, 12, 13, 14, 15], // victim Pawn
];

#[inline]
fn mvv_lva_index(piece: Piece) -> usize {
    match piece {
        Piece::King => 0,
        Piece::Queen => 1,
        Piece::Rook => 2,
        Piece::Bishop => 3,
        Piece::Knight => 4,
        Piece::Pawn => 5,
    }
}

/// 0 for quiet moves, otherwise the MVV-LVA value of the capture.
#[inline]
fn capture_priority(board: &Board, mv: Move) -> i32 {
    if !is_capture(board, mv) {
        return 0;
    }
    match (board.piece_on(mv.to), board.piece_on(mv.from)) {
        (Some(victim), Some(attacker)) => MVV_LVA[mvv_lva_index(victim)][mvv_lva_index(attacker)],
        _ => 0,
    }
}

/// Moves captures to the front, most valuable victim first and cheapest attacker
/// breaking ties. Quiet moves keep their generation order.
///
/// <https://www.chessprogramming.org/MVV-LVA>
pub fn order_captures(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| -capture_priority(board, mv));
}
