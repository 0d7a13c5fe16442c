mod config;
mod coordinator;
mod error;
mod oracle;
mod partition;
mod score;
mod shared;
mod stats;
mod time_control;
pub mod transposition;
mod worker;


pub use config::{ConfigParam, EngineConfig};
pub use coordinator::{Coordinator, SearchLimits, SearchReport};
pub use error::SearchError;
pub use oracle::{Oracle, OracleError};
pub use partition::{partition, reduce};
pub use score::to_uci_score;
pub use shared::SharedSearchState;
pub use stats::SearchStats;
pub use time_control::TimeBudget;
pub use worker::{SearchResult, SearchWorker};
