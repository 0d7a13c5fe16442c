use evaluation::scores::{is_mate_score, MATE_VALUE};
use uci::commands::Score;

/// Converts a root score into UCI terms from the side to move's point of view.
///
/// Terminal scores are `MATE_VALUE + remaining depth`, so the ply at which the
/// mate occurs is `search_depth - remaining`.
pub fn to_uci_score(score: i32, search_depth: u32, maximizing: bool) -> Score {
    let relative = if maximizing { score } else { -score };

    if !is_mate_score(relative) {
        return Score::Centipawns(relative);
    }

    let remaining = relative.abs() - MATE_VALUE;
    let mate_plies = (search_depth as i32 - remaining).max(1);
    let mate_in = (mate_plies + 1) / 2;

    if relative > 0 {
        Score::Mate(mate_in)
    } else {
        Score::Mate(-mate_in)
    }
}
