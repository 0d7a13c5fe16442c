mod eval_cache;
mod eval_material;
mod pst;

pub use eval_cache::{EvalCache, EVAL_CACHE_CAPACITY};
pub use eval_material::PieceValues;

use cozy_chess::{Board, Color};

/// Hand-Crafted Evaluation: material plus piece-square tables.
///
/// <https://www.chessprogramming.org/Evaluation>
pub struct Evaluator {
    piece_values: PieceValues,
    cache: EvalCache,
}

impl Evaluator {
    pub fn new(piece_values: PieceValues) -> Self {
        Self::with_cache_capacity(piece_values, EVAL_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(piece_values: PieceValues, capacity: usize) -> Self {
        Self {
            piece_values,
            cache: EvalCache::new(capacity),
        }
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }

    fn compute(&self, board: &Board) -> i32 {
        let mut cp: i16 = 0;

        cp += eval_material::evaluate(board, Color::White, &self.piece_values);
        cp -= eval_material::evaluate(board, Color::Black, &self.piece_values);

        cp += pst::evaluate(board, Color::White);
        cp -= pst::evaluate(board, Color::Black);

        // A side that cannot mate is never better than a draw
        if eval_material::cannot_win(board, Color::White) {
            cp = cp.min(0);
        }
        if eval_material::cannot_win(board, Color::Black) {
            cp = cp.max(0);
        }

        i32::from(cp)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(PieceValues::default())
    }
}

impl evaluation::Evaluator<Board> for Evaluator {
    fn name(&self) -> String {
        "HCE".to_string()
    }

    /// Evaluates from White's perspective. Positive = White advantage.
    fn evaluate(&self, board: &Board) -> i32 {
        let key = board.hash();
        if let Some(cp) = self.cache.get(key) {
            return cp;
        }

        let cp = self.compute(board);
        self.cache.insert(key, cp);
        cp
    }
}
