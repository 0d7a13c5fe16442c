mod table;

pub use table::{Replacement, TTEntry, TranspositionTable, DEFAULT_SHARDS};
