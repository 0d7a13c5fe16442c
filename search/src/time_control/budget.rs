use std::time::Duration;

use uci::commands::GoParams;

// Time management constants
const DEFAULT_MOVES_TO_GO: u64 = 30;
const INCREMENT_USAGE: f64 = 0.8;
const RESERVE_FRACTION: f64 = 0.08;
const MIN_RESERVE_MS: u64 = 300;
const OVERHEAD_MS: u64 = 20;
const MIN_TIME_PER_MOVE: u64 = 25;

/// Converts UCI `go` parameters into a wall-clock limit for one search.
pub struct TimeBudget;

impl TimeBudget {
    /// Returns `None` when the search should not be timed (fixed depth, infinite,
    /// or no clock information at all).
    pub fn new(params: &GoParams, maximizing: bool) -> Option<Duration> {
        // UCI movetime: spend exactly this amount
        if let Some(move_time) = params.move_time {
            return Some(Duration::from_millis(move_time));
        }

        if params.infinite || params.depth.is_some() {
            return None;
        }

        let (time_left, increment) = if maximizing {
            (params.wtime?, params.winc.unwrap_or(0))
        } else {
            (params.btime?, params.binc.unwrap_or(0))
        };
        let moves_left = params.moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);

        let reserve = (((time_left as f64) * RESERVE_FRACTION) as u64).max(MIN_RESERVE_MS);
        let available = time_left
            .saturating_sub(reserve)
            .saturating_sub(OVERHEAD_MS);

        let base_time = (available as f64) / (moves_left as f64);
        let increment_bonus = (increment as f64) * INCREMENT_USAGE;
        let millis = ((base_time + increment_bonus) as u64).max(MIN_TIME_PER_MOVE);

        Some(Duration::from_millis(millis))
    }
}
