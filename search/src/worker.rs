use evaluation::{
    scores::{DRAW_VALUE, MATE_VALUE, NEG_INFINITY, POS_INFINITY},
    Evaluator,
};

use crate::{
    oracle::{Oracle, OracleError},
    shared::SharedSearchState,
    transposition::TTEntry,
};

/// Best root move found by one worker for its group.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub mv: M,
    pub score: i32,
}

/// Sequential alpha-beta minimax over one group of root moves.
///
/// The stop flag is only observed at the top of each root move and every
/// `checkpoint_period` nodes inside the recursion, so a worker may run up to one
/// period past the moment the flag is set.
pub struct SearchWorker<'a, O: Oracle> {
    oracle: &'a O,
    evaluator: &'a dyn Evaluator<O::Position>,
    shared: &'a SharedSearchState,
    checkpoint_period: u64,

    /// Nodes visited by this worker
    nodes: u64,
    /// Set once a checkpoint observed the stop flag. Scores computed after that
    /// point are meaningless and are neither stored nor reported.
    interrupted: bool,
}

impl<'a, O: Oracle> SearchWorker<'a, O> {
    pub fn new(
        oracle: &'a O,
        evaluator: &'a dyn Evaluator<O::Position>,
        shared: &'a SharedSearchState,
        checkpoint_period: u64,
    ) -> Self {
        Self {
            oracle,
            evaluator,
            shared,
            checkpoint_period: checkpoint_period.max(1),
            nodes: 0,
            interrupted: false,
        }
    }

    /// Searches each move of `moves` in order and returns the best one for the
    /// side to move. Ties keep the earlier move. Returns `None` if the search was
    /// stopped before any move completed.
    pub fn search_group(
        &mut self,
        position: &O::Position,
        maximizing: bool,
        moves: &[O::Move],
        depth: u32,
    ) -> Result<Option<SearchResult<O::Move>>, OracleError> {
        let mut best: Option<SearchResult<O::Move>> = None;

        for mv in moves {
            if self.shared.is_stopped() {
                break;
            }

            let child = self.oracle.apply_move(position, mv)?;
            let score = self.minimax(
                &child,
                depth.saturating_sub(1),
                NEG_INFINITY,
                POS_INFINITY,
                !maximizing,
            )?;

            if self.interrupted {
                break;
            }

            let improves = match &best {
                None => true,
                Some(b) if maximizing => score > b.score,
                Some(b) => score < b.score,
            };
            if improves {
                best = Some(SearchResult {
                    mv: mv.clone(),
                    score,
                });
            }
        }

        Ok(best)
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// <https://www.chessprogramming.org/Alpha-Beta>
    pub fn minimax(
        &mut self,
        position: &O::Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, OracleError> {
        if self.checkpoint() {
            return Ok(0);
        }

        if depth == 0 {
            return Ok(self.evaluator.evaluate(position));
        }

        let moves = self.oracle.generate_legal_moves(position, maximizing)?;
        if moves.is_empty() {
            return Ok(self.terminal_score(position, depth, maximizing));
        }

        let fingerprint = self.oracle.fingerprint(position, maximizing);
        if let Some(entry) = self.shared.tt.lookup(fingerprint, depth) {
            self.shared.count_tt_hit();
            return Ok(entry.score);
        }

        let mut best = if maximizing {
            NEG_INFINITY
        } else {
            POS_INFINITY
        };

        for mv in &moves {
            let child = self.oracle.apply_move(position, mv)?;
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing)?;

            // Unwind without touching the table
            if self.interrupted {
                return Ok(0);
            }

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        self.shared.tt.store(fingerprint, TTEntry { score: best, depth });

        Ok(best)
    }

    /// Nodes visited by this worker so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Counts a node and, every `checkpoint_period` nodes, polls the stop flag.
    #[inline]
    fn checkpoint(&mut self) -> bool {
        self.nodes += 1;
        self.shared.count_node();

        if self.nodes % self.checkpoint_period == 0 && self.shared.is_stopped() {
            self.interrupted = true;
        }
        self.interrupted
    }

    /// Score for a position without legal moves. Deeper remaining depth means
    /// the mate happened closer to the root, so it scores further from zero.
    fn terminal_score(&self, position: &O::Position, depth: u32, maximizing: bool) -> i32 {
        if !self.oracle.is_in_check(position, maximizing) {
            return DRAW_VALUE;
        }

        let mate = MATE_VALUE + depth as i32;
        if maximizing {
            -mate
        } else {
            mate
        }
    }
}
