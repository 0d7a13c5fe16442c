// Score bounds and special values for minimax search.
const SCORE_INF: i32 = 1_000_000;
pub const POS_INFINITY: i32 = SCORE_INF;
pub const NEG_INFINITY: i32 = -SCORE_INF;
/// Base value for checkmate. Terminal scores are MATE_VALUE + remaining depth,
/// so a mate found closer to the root scores higher.
pub const MATE_VALUE: i32 = 100_000;
/// Score for stalemate and other drawn terminals.
pub const DRAW_VALUE: i32 = 0;

/// Returns true if the score encodes a forced mate rather than an evaluation.
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_VALUE
}
