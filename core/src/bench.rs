use std::error::Error;
use std::str::FromStr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, Sender},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cozy_chess::Board;
use search::EngineConfig;
use uci::commands::{GoParams, Info, Score};
use uci::{move_to_uci, UciOutput};

use crate::engine::{create_engine, Engine, SearchOutcome};

pub struct BenchOptions {
    pub depth: u32,
    pub movetime: Option<u64>,
    pub threads: Option<usize>,
    pub fen: Option<String>,
}

pub fn run(options: BenchOptions) -> Result<(), Box<dyn Error>> {
    let board = match &options.fen {
        Some(fen) => Board::from_str(fen).map_err(|e| format!("invalid FEN {:?}: {:?}", fen, e))?,
        None => Board::default(),
    };

    let mut config = EngineConfig::default();
    if let Some(threads) = options.threads {
        config.threads.value = threads.clamp(1, 256) as i32;
    }

    // Ctrl-C ends the search early instead of killing the process
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))?;

    let mut engine = create_engine(&config, stop)?;
    engine.set_position(board);

    let benchmark = Benchmark::new(engine, options, config.thread_count());
    benchmark.run()
}

struct Benchmark {
    engine: Engine,
    options: BenchOptions,
    threads: usize,
}

impl Benchmark {
    fn new(engine: Engine, options: BenchOptions, threads: usize) -> Self {
        Self {
            engine,
            options,
            threads,
        }
    }

    fn run(mut self) -> Result<(), Box<dyn Error>> {
        self.print_header();

        let params = self.create_search_params();
        let (tx, rx) = mpsc::channel();

        let printer = InfoPrinter::spawn(rx);
        let result = self.execute_search(&params, tx)?;

        printer.join();
        self.print_summary(&result);
        Ok(())
    }

    fn print_header(&self) {
        println!(
            "Running benchmark: depth {}, {} threads{}\n{}\n",
            self.options.depth,
            self.threads,
            self.options
                .movetime
                .map(|ms| format!(", movetime {} ms", ms))
                .unwrap_or_default(),
            self.engine.board()
        );
    }

    fn create_search_params(&self) -> GoParams {
        GoParams {
            depth: Some(self.options.depth),
            move_time: self.options.movetime,
            ..Default::default()
        }
    }

    fn execute_search(
        &mut self,
        params: &GoParams,
        tx: Sender<UciOutput>,
    ) -> Result<BenchResult, Box<dyn Error>> {
        let start = Instant::now();
        let outcome = self.engine.search(params, Some(&tx))?;
        let elapsed = start.elapsed();

        Ok(BenchResult { outcome, elapsed })
    }

    fn print_summary(&self, result: &BenchResult) {
        println!("\n=== Benchmark Summary ===");

        match result.outcome {
            Some((best_move, score)) => {
                println!("Best move: {}", move_to_uci(self.engine.board(), best_move));
                match score {
                    Some(score) => println!("Score: {}", score),
                    None => println!("Score: n/a (only move)"),
                }
            }
            None => println!("Best move: none"),
        }

        let stats = self.engine.stats();
        println!("Nodes: {}", stats.nodes);
        println!("NPS: {}", stats.nodes_per_second());
        println!("TT hits: {} ({:.1}%)", stats.tt_hits, stats.tt_hit_rate());
        println!("TT entries: {} (hashfull {})", stats.tt_entries, stats.hashfull);
        println!(
            "Groups: {} dispatched, {} completed, {} failed",
            stats.groups_dispatched, stats.groups_completed, stats.groups_failed
        );
        if stats.timed_out || stats.aborted {
            println!("Stopped early: timed out {}, aborted {}", stats.timed_out, stats.aborted);
        }
        println!("Time: {} ms", result.elapsed.as_millis());
    }
}

struct BenchResult {
    outcome: SearchOutcome,
    elapsed: Duration,
}

struct InfoPrinter {
    handle: JoinHandle<()>,
}

impl InfoPrinter {
    fn spawn(rx: Receiver<UciOutput>) -> Self {
        let handle = thread::spawn(move || {
            for output in rx {
                match output {
                    UciOutput::Info(info) => Self::print_info(&info),
                    UciOutput::InfoString(message) => println!("info string {}", message),
                    _ => {}
                }
            }
        });

        Self { handle }
    }

    fn join(self) {
        let _ = self.handle.join();
    }

    fn print_info(info: &Info) {
        print!(
            "info depth {} nodes {} nps {} hashfull {} time {} ",
            info.depth, info.nodes, info.nodes_per_second, info.hashfull, info.time
        );

        match info.score {
            Score::Centipawns(cp) => print!("score cp {}", cp),
            Score::Mate(m) => print!("score mate {}", m),
        }

        if !info.pv.is_empty() {
            print!(" pv {}", info.pv.join(" "));
        }

        println!();
    }
}
