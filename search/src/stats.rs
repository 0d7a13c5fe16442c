use std::time::Duration;

/// Diagnostics for one search. Purely observational.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub depth: u32,
    pub nodes: u64,
    pub tt_hits: u64,
    pub elapsed: Duration,

    pub groups_dispatched: usize,
    pub groups_completed: usize,
    pub groups_failed: usize,

    /// The deadline passed before every group reported back
    pub timed_out: bool,
    /// An external stop request ended the search early
    pub aborted: bool,

    pub tt_entries: usize,
    pub hashfull: u16,
}

impl SearchStats {
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes as f64 / secs) as u64
        } else {
            0
        }
    }

    /// TT hits as a percentage of visited nodes.
    pub fn tt_hit_rate(&self) -> f64 {
        if self.nodes > 0 {
            (self.tt_hits as f64 / self.nodes as f64) * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let stats = SearchStats {
            nodes: 2_000,
            tt_hits: 500,
            elapsed: Duration::from_millis(500),
            ..Default::default()
        };
        assert_eq!(stats.nodes_per_second(), 4_000);
        assert!((stats.tt_hit_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_without_work() {
        let stats = SearchStats::default();
        assert_eq!(stats.nodes_per_second(), 0);
        assert_eq!(stats.tt_hit_rate(), 0.0);
    }
}
