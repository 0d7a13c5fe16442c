use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "Rootsplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Root-splitting parallel minimax chess engine speaking UCI")]
pub struct Args {
    /// Log UCI communication to a file for debugging.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a single position and print search statistics.
    Bench {
        /// Plies to search below the root.
        #[arg(long, default_value_t = 5)]
        depth: u32,

        /// Stop after this many milliseconds.
        #[arg(long)]
        movetime: Option<u64>,

        /// Worker threads. Defaults to the number of CPUs.
        #[arg(long)]
        threads: Option<usize>,

        /// Position to search. Defaults to the starting position.
        #[arg(long)]
        fen: Option<String>,
    },
}
