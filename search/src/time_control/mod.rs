mod budget;

pub use budget::TimeBudget;
