use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

/// Feedback signals raised by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Cue {
    Correct,
    Incorrect,
    Completion,
}

/// Receiver of feedback cues. Implementations must return immediately; a cue that
/// cannot be delivered is dropped.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCues;

impl CueSink for NullCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Keeps every cue it receives; cloned handles share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingCues {
    log: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: Cue) {
        if let Ok(mut log) = self.log.lock() {
            log.push(cue);
        }
    }
}

struct BellWorker {
    tx: Sender<Cue>,
    handle: JoinHandle<()>,
}

/// Rings the terminal bell on mistakes and on completion.
///
/// The writer thread is only spawned on the first cue played while enabled and is
/// joined when the sink is dropped.
pub struct TerminalBell {
    enabled: bool,
    worker: Option<BellWorker>,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            worker: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn worker(&mut self) -> Option<&BellWorker> {
        if self.worker.is_none() {
            let (tx, rx) = mpsc::channel::<Cue>();
            let spawned = thread::Builder::new()
                .name("kanatype-bell".into())
                .spawn(move || {
                    let mut out = io::stderr();
                    for cue in rx {
                        let rings = match cue {
                            Cue::Correct => 0,
                            Cue::Incorrect => 1,
                            Cue::Completion => 2,
                        };
                        for _ in 0..rings {
                            if out.write_all(b"\x07").and_then(|_| out.flush()).is_err() {
                                return;
                            }
                        }
                    }
                });
            match spawned {
                Ok(handle) => {
                    debug!("bell worker started");
                    self.worker = Some(BellWorker { tx, handle });
                }
                Err(err) => {
                    warn!(%err, "could not start bell worker, disabling cues");
                    self.enabled = false;
                }
            }
        }
        self.worker.as_ref()
    }
}

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        if let Some(worker) = self.worker() {
            let _ = worker.tx.send(cue);
        }
    }
}

impl Drop for TerminalBell {
    fn drop(&mut self) {
        if let Some(BellWorker { tx, handle }) = self.worker.take() {
            drop(tx);
            let _ = handle.join();
        }
    }
}
