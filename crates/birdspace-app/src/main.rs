//! Headless runner: loads the configured scene, runs the game loop for a
//! fixed wall-clock time and logs a summary.

use std::time::Duration;

use anyhow::Context;

use birdspace_app::config::AppConfig;
use birdspace_app::game_loop::spawn_game_loop;
use birdspace_app::state::AppState;
use birdspace_core::commands::SimCommand;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();
    let startup = match config.level() {
        Some(level) => SimCommand::LoadLevel {
            level,
            scene: config.scene,
        },
        None => SimCommand::LoadScene {
            scene: config.scene,
        },
    };

    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(
        config.sim_config(),
        vec![startup],
        state.latest_snapshot.clone(),
    )
    .context("failed to spawn game loop thread")?;
    state.attach(tx);

    std::thread::sleep(Duration::from_secs_f64(config.run_seconds.max(0.0)));
    state.shutdown();
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;

    if let Some(snap) = state.snapshot() {
        log::info!(
            "final frame {}: {:?} {:?}, {} entities, controlled {:?}",
            snap.time.tick,
            snap.scene,
            snap.phase,
            snap.entities.len(),
            snap.controlled
        );
    }
    Ok(())
}
