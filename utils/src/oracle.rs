use cozy_chess::{Board, Color, Move};
use search::{Oracle, OracleError};

use crate::moves::{collect_legal_moves, has_check, make_move, order_captures};

// Mixed into the board hash for the maximizing side.
const SIDE_KEY: u64 = 0x9D39_247E_3377_6D41;

/// Chess rules for the search, delegated to `cozy-chess`. White maximizes.
#[derive(Debug, Clone)]
pub struct ChessOracle {
    capture_ordering: bool,
}

impl ChessOracle {
    pub fn new(capture_ordering: bool) -> Self {
        Self { capture_ordering }
    }

    pub fn capture_ordering(&self) -> bool {
        self.capture_ordering
    }

    #[inline]
    pub fn side(maximizing: bool) -> Color {
        if maximizing {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub fn is_maximizing(board: &Board) -> bool {
        board.side_to_move() == Color::White
    }
}

impl Default for ChessOracle {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Oracle for ChessOracle {
    type Position = Board;
    type Move = Move;

    fn generate_legal_moves(&self, board: &Board, maximizing: bool) -> Result<Vec<Move>, OracleError> {
        if board.side_to_move() != Self::side(maximizing) {
            return Err(OracleError::SideMismatch);
        }

        let mut moves = collect_legal_moves(board);
        if self.capture_ordering {
            order_captures(board, &mut moves);
        }
        Ok(moves)
    }

    fn apply_move(&self, board: &Board, mv: &Move) -> Result<Board, OracleError> {
        if !board.is_legal(*mv) {
            return Err(OracleError::IllegalMove(mv.to_string()));
        }
        Ok(make_move(board, *mv))
    }

    fn is_in_check(&self, board: &Board, maximizing: bool) -> bool {
        board.side_to_move() == Self::side(maximizing) && has_check(board)
    }

    fn fingerprint(&self, board: &Board, maximizing: bool) -> u64 {
        if maximizing {
            board.hash() ^ SIDE_KEY
        } else {
            board.hash()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaluation::{scores::MATE_VALUE, Evaluator};
    use search::{Coordinator, EngineConfig, SearchLimits};
    use std::str::FromStr;
    use std::sync::{atomic::AtomicBool, Arc};

    fn board(fen: &str) -> Board {
        Board::from_str(fen).unwrap()
    }

    fn uci_move(board: &Board, uci: &str) -> Move {
        cozy_chess::util::parse_uci_move(board, uci).unwrap()
    }

    fn coordinator(depth: u8) -> Coordinator<ChessOracle> {
        let mut config = EngineConfig::default();
        config.threads.value = 2;
        config.depth.value = depth;
        let evaluator: Arc<dyn Evaluator<Board>> = Arc::new(hce::Evaluator::default());
        Coordinator::new(
            &config,
            ChessOracle::default(),
            evaluator,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap()
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let moves = ChessOracle::default()
            .generate_legal_moves(&Board::default(), true)
            .unwrap();
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn test_wrong_side_is_rejected() {
        let result = ChessOracle::default().generate_legal_moves(&Board::default(), false);
        assert_eq!(result, Err(OracleError::SideMismatch));
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let start = Board::default();
        let illegal = Move {
            from: cozy_chess::Square::E2,
            to: cozy_chess::Square::E5,
            promotion: None,
        };

        let result = ChessOracle::default().apply_move(&start, &illegal);
        assert!(matches!(result, Err(OracleError::IllegalMove(_))));
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let oracle = ChessOracle::default();
        let start = Board::default();
        let next = oracle.apply_move(&start, &uci_move(&start, "e2e4")).unwrap();

        assert_eq!(start.hash(), Board::default().hash());
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let oracle = ChessOracle::default();

        // Fool's mate, White to move
        let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(oracle.generate_legal_moves(&mated, true).unwrap().is_empty());
        assert!(oracle.is_in_check(&mated, true));
        assert!(!oracle.is_in_check(&mated, false));

        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(oracle.generate_legal_moves(&stalemate, false).unwrap().is_empty());
        assert!(!oracle.is_in_check(&stalemate, false));
    }

    #[test]
    fn test_transpositions_share_a_fingerprint() {
        let oracle = ChessOracle::default();
        let start = Board::default();

        let mut board = start.clone();
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = uci_move(&board, uci);
            board = oracle.apply_move(&board, &mv).unwrap();
        }

        assert_eq!(oracle.fingerprint(&board, true), oracle.fingerprint(&start, true));
        assert_ne!(oracle.fingerprint(&start, true), oracle.fingerprint(&start, false));
    }

    #[test]
    fn test_finds_mate_in_one_for_white() {
        let position = board("6k1/5ppp/8/8/8/8/8/R6K w - - 0 1");
        let report = coordinator(2)
            .search(&position, true, SearchLimits::default())
            .unwrap();

        assert_eq!(report.best_move, Some(uci_move(&position, "a1a8")));
        assert_eq!(report.score, Some(MATE_VALUE + 1));
    }

    #[test]
    fn test_finds_mate_in_one_for_black() {
        let position = board("r6k/8/8/8/8/8/5PPP/6K1 b - - 0 1");
        let report = coordinator(3)
            .search(&position, false, SearchLimits::default())
            .unwrap();

        assert_eq!(report.best_move, Some(uci_move(&position, "a8a1")));
        assert_eq!(report.score, Some(-(MATE_VALUE + 2)));
    }

    #[test]
    fn test_get_best_move_on_starting_position() {
        let best = coordinator(3)
            .get_best_move(&Board::default(), true, std::time::Duration::from_secs(30))
            .unwrap();

        let legal = collect_legal_moves(&Board::default());
        assert!(best.is_some_and(|mv| legal.contains(&mv)));
    }
}
