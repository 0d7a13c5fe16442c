use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, RecvTimeoutError, Sender},
    Arc,
};
use std::time::{Duration, Instant};

use evaluation::Evaluator;
use log::{debug, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    error::SearchError,
    oracle::Oracle,
    partition::{partition, reduce},
    shared::{SharedSearchState, StopOnDrop},
    stats::SearchStats,
    transposition::TranspositionTable,
    worker::{SearchResult, SearchWorker},
    EngineConfig,
};

// Upper bound on how long the wait loop sleeps before re-checking the external stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Wall-clock budget, before the safety margin. `None` waits for every group.
    pub time_limit: Option<Duration>,
    /// Overrides the configured depth.
    pub depth: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    pub best_move: Option<M>,
    /// `None` when the move was chosen without searching (single legal move) or
    /// when nothing was found.
    pub score: Option<i32>,
    pub stats: SearchStats,
}

type TaskOutcome<M> = Result<Option<SearchResult<M>>, SearchError>;

struct Collected<M> {
    slots: Vec<Option<TaskOutcome<M>>>,
    timed_out: bool,
    aborted: bool,
}

/// Runs one root-split search end to end.
///
/// Root moves are partitioned into one group per pool thread, each group is
/// searched by a [`SearchWorker`] on the pool, and the per-group winners are
/// reduced to a single move. Which table entries exist at any moment depends on
/// how the workers race, so timed searches are not reproducible run to run. With
/// identical group results the chosen move is.
pub struct Coordinator<O: Oracle> {
    config: EngineConfig,
    oracle: Arc<O>,
    evaluator: Arc<dyn Evaluator<O::Position>>,

    /// Fixed-size worker pool, rebuilt only when the thread count changes
    pool: ThreadPool,
    /// Table reused across searches when `Persistent Hash` is enabled
    tt: Arc<TranspositionTable>,

    /// External stop request (UCI `stop`), checked while waiting on workers.
    /// Owned by the caller: a search never clears it.
    stop: Arc<AtomicBool>,

    /// Diagnostics of the last search
    stats: SearchStats,
}

impl<O: Oracle> Coordinator<O> {
    pub fn new(
        config: &EngineConfig,
        oracle: O,
        evaluator: Arc<dyn Evaluator<O::Position>>,
        stop: Arc<AtomicBool>,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            pool: build_pool(config.thread_count())?,
            tt: Arc::new(new_table(config)),
            config: config.clone(),
            oracle: Arc::new(oracle),
            evaluator,
            stop,
            stats: SearchStats::default(),
        })
    }

    pub fn configure(&mut self, config: &EngineConfig) -> Result<(), SearchError> {
        let old_config = std::mem::replace(&mut self.config, config.clone());

        if old_config.thread_count() != config.thread_count() {
            self.pool = build_pool(config.thread_count())?;
        }

        if old_config.hash_size_mb() != config.hash_size_mb()
            || old_config.shard_count() != config.shard_count()
            || old_config.replacement() != config.replacement()
        {
            self.tt = Arc::new(new_table(config));
        }

        Ok(())
    }

    pub fn new_game(&mut self) {
        self.tt.clear();
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Best move for the side to move within `time_limit`, or `None` if there
    /// are no legal moves or no group finished in time.
    pub fn get_best_move(
        &mut self,
        position: &O::Position,
        maximizing: bool,
        time_limit: Duration,
    ) -> Result<Option<O::Move>, SearchError> {
        let limits = SearchLimits {
            time_limit: Some(time_limit),
            depth: None,
        };
        Ok(self.search(position, maximizing, limits)?.best_move)
    }

    pub fn search(
        &mut self,
        position: &O::Position,
        maximizing: bool,
        limits: SearchLimits,
    ) -> Result<SearchReport<O::Move>, SearchError> {
        let start = Instant::now();

        let depth = limits
            .depth
            .unwrap_or(u32::from(self.config.depth.value))
            .max(1);
        let shared = Arc::new(SharedSearchState::new(self.table_for_search()));
        let _stop_guard = StopOnDrop(Arc::clone(&shared));

        let moves = self
            .oracle
            .generate_legal_moves(position, maximizing)
            .map_err(SearchError::RootMoveGeneration)?;

        let mut stats = SearchStats {
            depth,
            ..Default::default()
        };

        // Nothing to compare with zero or one legal move
        if moves.len() <= 1 {
            let best_move = moves.into_iter().next();
            debug!("Root has {:?} as its only option", best_move);

            stats.elapsed = start.elapsed();
            self.stats = stats.clone();
            return Ok(SearchReport {
                best_move,
                score: None,
                stats,
            });
        }

        let groups = partition(moves, self.worker_count());
        stats.groups_dispatched = groups.len();

        let (tx, rx) = mpsc::channel();
        for (group, moves) in groups.into_iter().enumerate() {
            debug!("Dispatching group {} with {} root moves", group, moves.len());
            self.dispatch(group, position, maximizing, moves, depth, &shared, tx.clone());
        }
        drop(tx);

        let deadline = limits
            .time_limit
            .map(|limit| start + limit - self.safety_margin(limit));
        let collected = self.collect(&rx, stats.groups_dispatched, deadline, &shared);
        shared.stop();

        let mut results = Vec::with_capacity(collected.slots.len());
        for (group, slot) in collected.slots.into_iter().enumerate() {
            match slot {
                Some(Ok(Some(result))) => {
                    stats.groups_completed += 1;
                    results.push(result);
                }
                Some(Ok(None)) => {
                    stats.groups_completed += 1;
                    debug!("Group {} stopped before finishing a move", group);
                }
                Some(Err(e)) => {
                    stats.groups_failed += 1;
                    warn!("Excluding group {} from the result: {}", group, e);
                }
                None => debug!("Group {} did not report in time", group),
            }
        }

        // Groups were numbered in move order, so this keeps the first-seen tie-break
        let best = reduce(results, maximizing);

        stats.nodes = shared.nodes();
        stats.tt_hits = shared.tt_hits();
        stats.elapsed = start.elapsed();
        stats.timed_out = collected.timed_out;
        stats.aborted = collected.aborted;
        stats.tt_entries = shared.tt.len();
        stats.hashfull = shared.tt.hashfull();

        if stats.timed_out {
            warn!(
                "Search hit its deadline with {}/{} groups reported",
                stats.groups_completed + stats.groups_failed,
                stats.groups_dispatched
            );
        }
        info!(
            "Search depth {} done in {} ms: {} nodes ({} nps), {} TT hits ({:.1}%), best {:?} score {:?}",
            depth,
            stats.elapsed.as_millis(),
            stats.nodes,
            stats.nodes_per_second(),
            stats.tt_hits,
            stats.tt_hit_rate(),
            best.as_ref().map(|b| &b.mv),
            best.as_ref().map(|b| b.score),
        );

        self.stats = stats.clone();

        Ok(match best {
            Some(best) => SearchReport {
                best_move: Some(best.mv),
                score: Some(best.score),
                stats,
            },
            None => SearchReport {
                best_move: None,
                score: None,
                stats,
            },
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn dispatch(
        &self,
        group: usize,
        position: &O::Position,
        maximizing: bool,
        moves: Vec<O::Move>,
        depth: u32,
        shared: &Arc<SharedSearchState>,
        tx: Sender<(usize, TaskOutcome<O::Move>)>,
    ) {
        let oracle = Arc::clone(&self.oracle);
        let evaluator = Arc::clone(&self.evaluator);
        let shared = Arc::clone(shared);
        let position = position.clone();
        let checkpoint_period = self.config.checkpoint_period.value.max(1) as u64;

        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut worker = SearchWorker::new(
                    oracle.as_ref(),
                    evaluator.as_ref(),
                    &shared,
                    checkpoint_period,
                );
                let result = worker.search_group(&position, maximizing, &moves, depth);
                debug!("Group {} visited {} nodes", group, worker.nodes());
                result
            }));

            let outcome = match outcome {
                Ok(result) => result.map_err(SearchError::from),
                Err(payload) => Err(SearchError::WorkerPanicked {
                    group,
                    message: panic_message(payload.as_ref()),
                }),
            };

            // The coordinator may have stopped listening already
            let _ = tx.send((group, outcome));
        });
    }

    /// Waits until every group reported, the deadline passed, or an external stop
    /// arrived. Groups that have not reported by then are left out.
    fn collect(
        &self,
        rx: &Receiver<(usize, TaskOutcome<O::Move>)>,
        expected: usize,
        deadline: Option<Instant>,
        shared: &SharedSearchState,
    ) -> Collected<O::Move> {
        let mut slots: Vec<Option<TaskOutcome<O::Move>>> = (0..expected).map(|_| None).collect();
        let mut received = 0;
        let mut timed_out = false;
        let mut aborted = false;

        while received < expected {
            if self.stop.load(Ordering::Relaxed) {
                aborted = true;
                break;
            }

            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        timed_out = true;
                        break;
                    }
                    (deadline - now).min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };

            match rx.recv_timeout(wait) {
                Ok((group, outcome)) => {
                    slots[group] = Some(outcome);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if received < expected {
            shared.stop();
            for (group, outcome) in rx.try_iter() {
                slots[group] = Some(outcome);
            }
        }

        Collected {
            slots,
            timed_out,
            aborted,
        }
    }

    fn table_for_search(&self) -> Arc<TranspositionTable> {
        if self.config.persistent_hash.value {
            Arc::clone(&self.tt)
        } else {
            Arc::new(new_table(&self.config))
        }
    }

    /// Configured margin, capped at half of `limit` so short budgets still search.
    fn safety_margin(&self, limit: Duration) -> Duration {
        let configured = Duration::from_millis(self.config.safety_margin_ms.value.max(0) as u64);
        configured.min(limit / 2)
    }
}

fn build_pool(threads: usize) -> Result<ThreadPool, SearchError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("search-worker-{}", i))
        .build()?;
    Ok(pool)
}

fn new_table(config: &EngineConfig) -> TranspositionTable {
    TranspositionTable::with_size_mb(
        config.hash_size_mb(),
        config.shard_count(),
        config.replacement(),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
