use super::commands::UciOutput;
use super::encoder::Encoder;
use log::debug;
use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Owns the stdout side of the protocol.
///
/// Responses are queued on a channel and written by a dedicated thread, so the
/// engine worker never blocks on terminal I/O while a search is running.
pub struct UciConnection {
    output_tx: Sender<UciOutput>,
    writer: Option<JoinHandle<()>>,
}

impl Default for UciConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl UciConnection {
    pub fn new() -> Self {
        let (output_tx, output_rx) = channel();
        let writer = Self::spawn_output_handler(output_rx);

        Self {
            output_tx,
            writer: Some(writer),
        }
    }

    pub fn output_sender(&self) -> Sender<UciOutput> {
        self.output_tx.clone()
    }

    /// Drops this connection's sender and waits for queued output to flush.
    /// Other clones of the sender must be dropped first or this blocks.
    pub fn close(self) {
        let Self { output_tx, writer } = self;
        drop(output_tx);
        if let Some(writer) = writer {
            let _ = writer.join();
        }
    }

    fn spawn_output_handler(output_rx: Receiver<UciOutput>) -> JoinHandle<()> {
        thread::spawn(move || {
            let encoder = Encoder;
            let stdout = io::stdout();

            while let Ok(output) = output_rx.recv() {
                let out_line = encoder.encode(&output);
                debug!("Output: {:?}", out_line);

                let mut handle = stdout.lock();
                if writeln!(handle, "{}", out_line)
                    .and_then(|_| handle.flush())
                    .is_err()
                {
                    break;
                }
            }
        })
    }
}
