use std::str::FromStr;

use cozy_chess::{util::parse_uci_move, Board};
use log::debug;

use super::commands::{GoParams, UciInput};

pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &str) -> UciInput {
        match input {
            "uci" => UciInput::Uci,
            "isready" => UciInput::IsReady,
            "ucinewgame" => UciInput::UciNewGame,

            _ if input.starts_with("debug") => UciInput::Debug(input.ends_with(" on")),
            _ if input.starts_with("position") => self.decode_position(input),
            _ if input.starts_with("go") => self.decode_go(input),
            _ if input.starts_with("setoption") => self.decode_setoption(input),
            _ if input.starts_with("stop") => UciInput::Stop,
            _ if input.starts_with("quit") => UciInput::Quit,

            _ => UciInput::Unknown(input.to_string()),
        }
    }

    fn decode_position(&self, input: &str) -> UciInput {
        let (setup, moves) = match input.split_once(" moves") {
            Some((setup, moves)) => (setup, Some(moves)),
            None => (input, None),
        };

        let mut board = match setup.split_once("fen") {
            Some((_, fen)) => match Board::from_str(fen.trim()) {
                Ok(board) => board,
                Err(e) => {
                    debug!("Rejected FEN {:?}: {:?}", fen.trim(), e);
                    return UciInput::Unknown(input.to_string());
                }
            },
            None => Board::default(),
        };

        for mv_str in moves.unwrap_or_default().split_whitespace() {
            match parse_uci_move(&board, mv_str) {
                Ok(mv) if board.is_legal(mv) => board.play_unchecked(mv),
                _ => {
                    debug!("Stopped applying moves at illegal move {:?}", mv_str);
                    break;
                }
            }
        }

        UciInput::Position(Box::new(board))
    }

    fn decode_setoption(&self, input: &str) -> UciInput {
        // setoption name <name> [value <value>]
        // Button-type options carry no value.
        let Some(rest) = input.strip_prefix("setoption name ") else {
            return UciInput::SetOption {
                name: String::new(),
                value: String::new(),
            };
        };

        let (name, value) = match rest.split_once(" value ") {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (rest.trim(), ""),
        };

        UciInput::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn decode_go(&self, input: &str) -> UciInput {
        let tokens: Vec<&str> = input.split_whitespace().collect();

        UciInput::Go(GoParams {
            infinite: tokens.contains(&"infinite"),
            wtime: numeric_param(&tokens, "wtime"),
            btime: numeric_param(&tokens, "btime"),
            winc: numeric_param(&tokens, "winc"),
            binc: numeric_param(&tokens, "binc"),
            moves_to_go: numeric_param(&tokens, "movestogo"),
            depth: numeric_param(&tokens, "depth"),
            move_time: numeric_param(&tokens, "movetime"),
        })
    }
}

fn numeric_param<T: FromStr>(tokens: &[&str], param: &str) -> Option<T> {
    tokens
        .windows(2)
        .find(|w| w[0] == param)
        .and_then(|w| w[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::{Color, Piece, Square};

    #[test]
    fn test_simple_commands() {
        assert!(matches!(Decoder.decode("uci"), UciInput::Uci));
        assert!(matches!(Decoder.decode("isready"), UciInput::IsReady));
        assert!(matches!(Decoder.decode("ucinewgame"), UciInput::UciNewGame));
        assert!(matches!(Decoder.decode("stop"), UciInput::Stop));
        assert!(matches!(Decoder.decode("quit"), UciInput::Quit));
    }

    #[test]
    fn test_debug() {
        assert!(matches!(Decoder.decode("debug on"), UciInput::Debug(true)));
        assert!(matches!(
            Decoder.decode("debug off"),
            UciInput::Debug(false)
        ));
    }

    #[test]
    fn test_setoption_with_value() {
        let UciInput::SetOption { name, value } =
            Decoder.decode("setoption name Checkpoint Period value 500")
        else {
            panic!("Expected SetOption")
        };
        assert_eq!(name, "Checkpoint Period");
        assert_eq!(value, "500");
    }

    #[test]
    fn test_setoption_malformed() {
        let UciInput::SetOption { name, value } = Decoder.decode("setoption value 123") else {
            panic!("Expected SetOption")
        };
        assert_eq!(name, "");
        assert_eq!(value, "");
    }

    #[test]
    fn test_go_with_clock() {
        let UciInput::Go(params) =
            Decoder.decode("go wtime 60000 btime 50000 winc 1000 binc 500 movestogo 12")
        else {
            panic!("Expected Go")
        };
        assert!(!params.infinite);
        assert_eq!(params.wtime, Some(60000));
        assert_eq!(params.btime, Some(50000));
        assert_eq!(params.winc, Some(1000));
        assert_eq!(params.binc, Some(500));
        assert_eq!(params.moves_to_go, Some(12));
        assert_eq!(params.depth, None);
    }

    #[test]
    fn test_go_depth_and_movetime() {
        let UciInput::Go(params) = Decoder.decode("go depth 5 movetime 2500") else {
            panic!("Expected Go")
        };
        assert_eq!(params.depth, Some(5));
        assert_eq!(params.move_time, Some(2500));
    }

    #[test]
    fn test_go_infinite() {
        let UciInput::Go(params) = Decoder.decode("go infinite") else {
            panic!("Expected Go")
        };
        assert!(params.infinite);
        assert!(params.move_time.is_none());
    }

    #[test]
    fn test_position_startpos() {
        let UciInput::Position(board) = Decoder.decode("position startpos") else {
            panic!("Expected Position")
        };
        assert_eq!(board.hash(), Board::default().hash());
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let UciInput::Position(board) = Decoder.decode("position startpos moves e2e4 e7e5")
        else {
            panic!("Expected Position")
        };
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
        assert_eq!(board.piece_on(Square::E5), Some(Piece::Pawn));
        assert_eq!(board.piece_on(Square::E2), None);
    }

    #[test]
    fn test_position_fen_with_moves() {
        let fen = "6k1/5ppp/8/8/8/8/8/R6K w - - 0 1";
        let UciInput::Position(board) = Decoder.decode(&format!("position fen {} moves a1a8", fen))
        else {
            panic!("Expected Position")
        };
        assert_eq!(board.side_to_move(), Color::Black);
        assert!(!board.checkers().is_empty());
    }

    #[test]
    fn test_position_bad_fen() {
        assert!(matches!(
            Decoder.decode("position fen not a fen"),
            UciInput::Unknown(_)
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            Decoder.decode("invalid command"),
            UciInput::Unknown(_)
        ));
    }
}
