//! Birdspace game-loop driver.
//!
//! Runs the simulation engine on its own thread at a fixed rate and exposes
//! a command channel and the latest snapshot to the host.

pub mod config;
pub mod game_loop;
pub mod state;

pub use birdspace_core as core;
