//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype parameters for the targeting FSM.

use birdspace_core::enums::AiArchetype;

/// Behavioral profile for an autonomous controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Seconds between retarget rolls.
    pub retarget_interval: f64,
    /// Probability that a retarget roll drops the target instead of picking one.
    pub idle_bias: f64,
    /// Maximum heading change (rad/s).
    pub turn_rate: f64,
    /// Seconds between shots while a target is held.
    pub fire_interval: f64,
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: AiArchetype) -> AiProfile {
    match archetype {
        // Three rolls in four leave a station idle.
        AiArchetype::TurretStation => AiProfile {
            retarget_interval: 3.7,
            idle_bias: 0.75,
            turn_rate: 2.5,
            fire_interval: 0.1,
        },
        AiArchetype::EnemyCraft => AiProfile {
            retarget_interval: 5.0,
            idle_bias: 0.0,
            turn_rate: 0.75,
            fire_interval: 2.0,
        },
    }
}
