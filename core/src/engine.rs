use std::sync::{atomic::AtomicBool, mpsc::Sender, Arc};

use cozy_chess::{Board, Move};
use evaluation::Evaluator;
use log::{debug, warn};
use search::{
    to_uci_score, Coordinator, EngineConfig, Oracle, SearchError, SearchLimits, SearchStats,
    TimeBudget,
};
use uci::commands::{GoParams, Info};
use uci::{move_to_uci, UciOutput};
use utils::ChessOracle;

/// Outcome of one `go`: the move to play and its root score, if it was searched.
pub type SearchOutcome = Option<(Move, Option<i32>)>;

/// Chess front of the search: owns the current board and the coordinator.
pub struct Engine {
    coordinator: Coordinator<ChessOracle>,
    evaluator: Arc<dyn Evaluator<Board>>,
    stop: Arc<AtomicBool>,
    board: Board,
}

pub fn create_engine(config: &EngineConfig, stop: Arc<AtomicBool>) -> Result<Engine, SearchError> {
    let evaluator: Arc<dyn Evaluator<Board>> = Arc::new(hce::Evaluator::default());
    Engine::new(config, evaluator, stop)
}

impl Engine {
    pub fn new(
        config: &EngineConfig,
        evaluator: Arc<dyn Evaluator<Board>>,
        stop: Arc<AtomicBool>,
    ) -> Result<Self, SearchError> {
        let oracle = ChessOracle::new(config.capture_ordering.value);
        let coordinator = Coordinator::new(config, oracle, Arc::clone(&evaluator), Arc::clone(&stop))?;

        debug!(
            "Engine ready: {} workers, evaluator {}",
            coordinator.worker_count(),
            evaluator.name()
        );

        Ok(Self {
            coordinator,
            evaluator,
            stop,
            board: Board::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_position(&mut self, board: Board) {
        self.board = board;
    }

    pub fn new_game(&mut self) {
        self.board = Board::default();
        self.coordinator.new_game();
    }

    pub fn stats(&self) -> &SearchStats {
        self.coordinator.stats()
    }

    pub fn configure(&mut self, config: &EngineConfig) -> Result<(), SearchError> {
        // Move ordering lives in the oracle, which the coordinator owns
        if config.capture_ordering.value != self.coordinator.oracle().capture_ordering() {
            let oracle = ChessOracle::new(config.capture_ordering.value);
            self.coordinator = Coordinator::new(
                config,
                oracle,
                Arc::clone(&self.evaluator),
                Arc::clone(&self.stop),
            )?;
            return Ok(());
        }

        self.coordinator.configure(config)
    }

    /// Searches the current position. Reports an `info` line and `info string`
    /// diagnostics to `output` when given.
    pub fn search(
        &mut self,
        params: &GoParams,
        output: Option<&Sender<UciOutput>>,
    ) -> Result<SearchOutcome, SearchError> {
        let maximizing = ChessOracle::is_maximizing(&self.board);
        let limits = SearchLimits {
            time_limit: TimeBudget::new(params, maximizing),
            depth: params.depth,
        };
        debug!("Searching with {:?}", limits);

        let report = self.coordinator.search(&self.board, maximizing, limits)?;

        if let Some(output) = output {
            self.report(output, report.best_move, report.score, &report.stats, maximizing);
        }

        match report.best_move {
            Some(mv) => Ok(Some((mv, report.score))),
            None => self.fallback_move(maximizing, output),
        }
    }

    /// First legal move, for searches that ended before any group finished a
    /// root move. `None` only when the side to move has no moves at all.
    fn fallback_move(
        &self,
        maximizing: bool,
        output: Option<&Sender<UciOutput>>,
    ) -> Result<SearchOutcome, SearchError> {
        let moves = self
            .coordinator
            .oracle()
            .generate_legal_moves(&self.board, maximizing)
            .map_err(SearchError::RootMoveGeneration)?;

        let Some(&mv) = moves.first() else {
            return Ok(None);
        };

        warn!("No root move finished searching, playing {}", mv);
        if let Some(output) = output {
            let _ = output.send(UciOutput::InfoString(format!(
                "no search result, playing first legal move {}",
                move_to_uci(&self.board, mv)
            )));
        }
        Ok(Some((mv, None)))
    }

    fn report(
        &self,
        output: &Sender<UciOutput>,
        best_move: Option<Move>,
        score: Option<i32>,
        stats: &SearchStats,
        maximizing: bool,
    ) {
        if let Some(score) = score {
            let _ = output.send(UciOutput::Info(Info {
                depth: stats.depth,
                nodes: stats.nodes,
                nodes_per_second: stats.nodes_per_second(),
                time: stats.elapsed.as_millis() as u64,
                hashfull: stats.hashfull,
                pv: best_move
                    .map(|mv| vec![move_to_uci(&self.board, mv)])
                    .unwrap_or_default(),
                score: to_uci_score(score, stats.depth, maximizing),
            }));
        }

        let _ = output.send(UciOutput::InfoString(format!(
            "tt hits {} ({:.1}%) entries {}",
            stats.tt_hits,
            stats.tt_hit_rate(),
            stats.tt_entries
        )));

        if stats.groups_failed > 0 {
            let _ = output.send(UciOutput::InfoString(format!(
                "{} of {} worker groups failed",
                stats.groups_failed, stats.groups_dispatched
            )));
        }
        if stats.timed_out {
            let _ = output.send(UciOutput::InfoString(format!(
                "deadline reached with {} of {} groups complete",
                stats.groups_completed, stats.groups_dispatched
            )));
        }
    }
}
