use std::fmt::Debug;

use thiserror::Error;

/// Failure reported by an [`Oracle`] for a position it cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("side to move does not match the position")]
    SideMismatch,
    #[error("illegal move {0}")]
    IllegalMove(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// Game rules consumed by the search: move generation, move application,
/// terminal detection and position fingerprints.
///
/// The search never mutates a position. `apply_move` returns a new one, so each
/// recursive frame (and each worker thread) owns its own copy.
pub trait Oracle: Send + Sync + 'static {
    type Position: Clone + Send + Sync + 'static;
    type Move: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Legal moves for the given side, in the order the search should try them.
    fn generate_legal_moves(
        &self,
        position: &Self::Position,
        maximizing: bool,
    ) -> Result<Vec<Self::Move>, OracleError>;

    fn apply_move(
        &self,
        position: &Self::Position,
        mv: &Self::Move,
    ) -> Result<Self::Position, OracleError>;

    fn is_in_check(&self, position: &Self::Position, maximizing: bool) -> bool;

    /// Transposition key for (position, side to move). Rule-equivalent positions
    /// must produce the same key.
    fn fingerprint(&self, position: &Self::Position, maximizing: bool) -> u64;
}
