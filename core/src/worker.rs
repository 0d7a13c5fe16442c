use std::sync::mpsc::{Receiver, Sender};

use cozy_chess::Board;
use log::{error, warn};
use search::EngineConfig;
use uci::{commands::GoParams, move_to_uci, UciOutput, NULL_MOVE};

use crate::engine::Engine;

/// Commands sent from the UCI thread to the engine worker.
pub enum EngineCommand {
    /// Update engine configuration.
    Configure(Box<EngineConfig>),
    /// Reset engine state for a new game.
    NewGame,
    /// Set the position to search from.
    SetPosition(Box<Board>),
    /// Start searching with the given parameters.
    Go(GoParams),
    /// Shut down the worker thread.
    Quit,
}

/// Engine worker that processes commands on a dedicated thread.
///
/// Owns the engine and receives commands via channel from the main UCI thread,
/// so the protocol loop stays responsive to `stop` while a search runs.
pub struct EngineWorker {
    engine: Engine,
    rx: Receiver<EngineCommand>,
    output: Sender<UciOutput>,
}

impl EngineWorker {
    pub fn new(engine: Engine, rx: Receiver<EngineCommand>, output: Sender<UciOutput>) -> Self {
        Self { engine, rx, output }
    }

    /// Main loop: process commands until Quit is received.
    pub fn run(mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::Go(params) => self.go(&params),
                EngineCommand::SetPosition(board) => {
                    self.engine.set_position(*board);
                }
                EngineCommand::NewGame => {
                    self.engine.new_game();
                }
                EngineCommand::Configure(config) => {
                    if let Err(e) = self.engine.configure(&config) {
                        error!("Failed to apply configuration: {}", e);
                        let _ = self
                            .output
                            .send(UciOutput::InfoString(format!("configuration failed: {}", e)));
                    }
                }
                EngineCommand::Quit => break,
            }
        }
    }

    fn go(&mut self, params: &GoParams) {
        let best_move = match self.engine.search(params, Some(&self.output)) {
            Ok(outcome) => outcome.map(|(mv, _)| move_to_uci(self.engine.board(), mv)),
            Err(e) => {
                warn!("Search failed: {}", e);
                let _ = self
                    .output
                    .send(UciOutput::InfoString(format!("search failed: {}", e)));
                None
            }
        };

        // UCI requires bestmove for every "go" command, even in checkmate positions
        let _ = self.output.send(UciOutput::BestMove(
            best_move.unwrap_or_else(|| NULL_MOVE.to_string()),
        ));
    }
}
