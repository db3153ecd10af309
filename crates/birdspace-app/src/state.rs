//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use birdspace_core::commands::{InputFrame, SimCommand};
use birdspace_core::state::FrameSnapshot;

/// Messages from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queue a command on the engine.
    Sim(SimCommand),
    /// Replace the input frame used by subsequent ticks.
    Input(InputFrame),
    /// Stop the loop after the current tick.
    Shutdown,
}

/// Handle to a running (or not yet started) game loop.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`; the snapshot
/// is shared with the loop thread through an `Arc`.
pub struct AppState {
    /// `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Written by the loop thread after every tick.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the sender of a freshly spawned loop.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = Some(tx);
        }
        if let Ok(mut running) = self.running.lock() {
            *running = true;
        }
    }

    /// Forward a message to the loop. Returns false when no loop is attached
    /// or the loop has already exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(slot) = self.command_tx.lock() else {
            return false;
        };
        match slot.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().map(|r| *r).unwrap_or(false)
    }

    /// Ask the loop to stop and drop the sender.
    pub fn shutdown(&self) {
        self.send(GameLoopCommand::Shutdown);
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = None;
        }
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }
}
