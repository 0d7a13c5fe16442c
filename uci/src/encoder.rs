use super::commands::{Score, UciOutput};

pub struct Encoder;

impl Encoder {
    pub fn encode(&self, response: &UciOutput) -> String {
        match response {
            UciOutput::IdName(name) => format!("id name {}", name),
            UciOutput::IdAuthor(author) => format!("id author {}", author),

            UciOutput::UciOk => "uciok".to_string(),
            UciOutput::ReadyOk => "readyok".to_string(),

            UciOutput::BestMove(best_move) => format!("bestmove {}", best_move),
            UciOutput::Info(info) => {
                let mut line = format!(
                    "info depth {} score {} nodes {} nps {} hashfull {} time {}",
                    info.depth,
                    match info.score {
                        Score::Centipawns(cp) => format!("cp {}", cp),
                        Score::Mate(moves) => format!("mate {}", moves),
                    },
                    info.nodes,
                    info.nodes_per_second,
                    info.hashfull,
                    info.time,
                );
                if !info.pv.is_empty() {
                    line.push_str(" pv ");
                    line.push_str(&info.pv.join(" "));
                }
                line
            }
            UciOutput::InfoString(message) => format!("info string {}", message),
            UciOutput::Option(option_str) => option_str.clone(),
            UciOutput::Raw(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Info;

    #[test]
    fn test_encode_info_with_pv() {
        let info = Info {
            depth: 4,
            nodes: 12345,
            nodes_per_second: 100000,
            time: 123,
            hashfull: 17,
            pv: vec!["e2e4".to_string()],
            score: Score::Centipawns(35),
        };
        assert_eq!(
            Encoder.encode(&UciOutput::Info(info)),
            "info depth 4 score cp 35 nodes 12345 nps 100000 hashfull 17 time 123 pv e2e4"
        );
    }

    #[test]
    fn test_encode_info_mate_without_pv() {
        let info = Info {
            depth: 2,
            score: Score::Mate(-1),
            ..Default::default()
        };
        assert_eq!(
            Encoder.encode(&UciOutput::Info(info)),
            "info depth 2 score mate -1 nodes 0 nps 0 hashfull 0 time 0"
        );
    }

    #[test]
    fn test_encode_simple_responses() {
        assert_eq!(Encoder.encode(&UciOutput::UciOk), "uciok");
        assert_eq!(Encoder.encode(&UciOutput::ReadyOk), "readyok");
        assert_eq!(
            Encoder.encode(&UciOutput::BestMove("0000".to_string())),
            "bestmove 0000"
        );
        assert_eq!(
            Encoder.encode(&UciOutput::InfoString("tt hits 10".to_string())),
            "info string tt hits 10"
        );
    }
}
