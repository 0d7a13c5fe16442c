use cozy_chess::Board;

#[derive(Debug)]
pub enum UciInput {
    Uci,
    IsReady,
    Debug(bool),

    UciNewGame,
    Position(Box<Board>),
    Go(GoParams),

    Stop,
    Quit,
    SetOption {
        name: String,
        value: String,
    },
    Unknown(String),
}

#[derive(Debug)]
pub enum UciOutput {
    IdName(String),
    IdAuthor(String),
    UciOk,
    ReadyOk,
    BestMove(String),
    Info(Info),
    InfoString(String),
    Option(String),
    Raw(String),
}

/// Summary of a finished search, reported once per `go`.
#[derive(Debug, Default)]
pub struct Info {
    pub depth: u32,
    pub nodes: u64,
    pub nodes_per_second: u64,
    pub time: u64,
    pub hashfull: u16,
    pub pv: Vec<String>,
    pub score: Score,
}

#[derive(Debug, PartialEq)]
pub enum Score {
    Centipawns(i32),
    Mate(i32), // Positive for mate-in-n, negative for mated-in-n
}

impl Default for Score {
    fn default() -> Self {
        Score::Centipawns(0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct GoParams {
    // Search until a stop command is received.
    pub infinite: bool,

    // Milliseconds White has left on the clock.
    pub wtime: Option<u64>,

    // Milliseconds Black has left on the clock.
    pub btime: Option<u64>,

    // White increment per move in milliseconds.
    pub winc: Option<u64>,

    // Black increment per move in milliseconds.
    pub binc: Option<u64>,

    // Moves to the next time control. Sudden death when absent.
    pub moves_to_go: Option<u64>,

    // Search depth in plies.
    pub depth: Option<u32>,

    // Search exactly movetime milliseconds.
    pub move_time: Option<u64>,
}
