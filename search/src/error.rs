use thiserror::Error;

use crate::oracle::OracleError;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Root moves could not be generated, so nothing can be searched.
    #[error("root move generation failed: {0}")]
    RootMoveGeneration(#[source] OracleError),

    /// A subtree could not be explored. Fatal for the worker that hit it only.
    #[error("oracle failure in subtree: {0}")]
    Oracle(#[from] OracleError),

    #[error("worker for group {group} panicked: {message}")]
    WorkerPanicked { group: usize, message: String },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
