//! Game loop thread: runs the simulation engine at 30Hz and publishes snapshots.
//!
//! The engine lives entirely inside the thread. Commands and input frames
//! arrive over an `mpsc` channel; the latest snapshot is stored in shared
//! state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use birdspace_core::commands::{InputFrame, SimCommand};
use birdspace_core::constants::{DT, TICK_RATE};
use birdspace_core::state::FrameSnapshot;
use birdspace_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the game loop thread. `startup` is queued on the engine before the
/// first tick.
pub fn spawn_game_loop(
    config: SimConfig,
    startup: Vec<SimCommand>,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("birdspace-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config);
            engine.queue_commands(startup);
            run_game_loop(&mut engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Runs until `Shutdown` or until every sender is dropped.
fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) {
    log::info!("game loop started at {} Hz", TICK_RATE);
    let mut input = InputFrame::default();
    let mut next_tick_time = Instant::now();

    loop {
        if !drain_commands(&cmd_rx, engine, &mut input) {
            break;
        }

        let snapshot = engine.tick(DT, &input);
        // Scroll is a per-frame delta; held keys persist until replaced.
        input.mouse.scroll = 0.0;

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; skip ahead instead of bursting.
            next_tick_time = now;
        }
    }

    log::info!(
        "game loop stopped after {} ticks ({:.1} s simulated)",
        engine.time().tick,
        engine.time().elapsed_secs
    );
}

/// Apply every pending message. Returns false when the loop should stop.
fn drain_commands(
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    engine: &mut SimulationEngine,
    input: &mut InputFrame,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Sim(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Input(frame)) => *input = frame,
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}
