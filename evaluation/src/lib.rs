pub mod def;
pub mod scores;

pub use def::Evaluator;
