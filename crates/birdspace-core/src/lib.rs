//! Core types and definitions for the Birdspace simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, level descriptions, state snapshots, events,
//! errors and constants. It has no dependency on any runtime or windowing
//! framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod level;
pub mod state;
pub mod types;
