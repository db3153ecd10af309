//! Simulation engine for Birdspace.
//!
//! Owns the hecs world and entity registry, runs every entity once per
//! frame, and produces `FrameSnapshot`s and draw calls for the host.

pub mod camera;
pub mod context;
pub mod engine;
pub mod registry;
pub mod render;
pub mod systems;
pub mod world_setup;

pub use birdspace_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
