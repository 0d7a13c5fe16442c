use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use crate::transposition::TranspositionTable;

/// State shared by every worker of one search invocation.
///
/// Created fresh for each search so overlapping searches never mix their
/// counters or stop signals. The table may be fresh too, or the coordinator's
/// persistent one.
pub struct SharedSearchState {
    stop: AtomicBool,
    nodes: AtomicU64,
    tt_hits: AtomicU64,
    pub tt: Arc<TranspositionTable>,
}

impl SharedSearchState {
    pub fn new(tt: Arc<TranspositionTable>) -> Self {
        Self {
            stop: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
            tt_hits: AtomicU64::new(0),
            tt,
        }
    }

    /// Signal every worker to unwind. Idempotent.
    #[inline]
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn count_node(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn count_tt_hit(&self) {
        self.tt_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn tt_hits(&self) -> u64 {
        self.tt_hits.load(Ordering::Relaxed)
    }
}

/// Sets the stop flag when dropped, so workers unwind on every exit path.
pub(crate) struct StopOnDrop(pub Arc<SharedSearchState>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.stop();
    }
}
