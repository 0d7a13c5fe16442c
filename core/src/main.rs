mod args;
mod bench;
mod engine;
mod rootsplit;
mod worker;

use std::error::Error;
use std::fs::File;

use args::{Args, Command};
use clap::Parser;
use log::LevelFilter;
use rootsplit::Rootsplit;
use simplelog::{Config, SimpleLogger, WriteLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Some(Command::Bench {
            depth,
            movetime,
            threads,
            fen,
        }) => {
            SimpleLogger::init(LevelFilter::Info, Config::default())?;
            bench::run(bench::BenchOptions {
                depth,
                movetime,
                threads,
                fen,
            })
        }
        None => {
            // stdout carries the protocol, so logs only ever go to a file
            if let Some(log_file) = &args.log_file {
                WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(log_file)?)?;
            }
            Rootsplit::new()?.run()
        }
    }
}
