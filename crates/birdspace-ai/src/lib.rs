//! Targeting and pursuit AI for Birdspace.
//!
//! Implements the retarget/track/fire state machine shared by turret
//! stations and enemy craft, and the archetype-driven tuning profiles.

pub mod fsm;
pub mod profiles;

pub use birdspace_core as core;

#[cfg(test)]
mod tests;
