mod moves;
mod oracle;

pub use moves::{collect_legal_moves, has_check, is_capture, make_move, order_captures};
pub use oracle::ChessOracle;
