//! Events emitted by the simulation for audio and UI feedback.
//!
//! Entities are referred to by their stable `u64` bit representation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    LaserFired {
        team: Team,
        from: Position,
    },
    /// A laser struck a damageable entity.
    Hit {
        target: u64,
        kind: EntityKind,
        point: Position,
        remaining: f64,
    },
    /// A damageable entity ran out of health and was removed.
    Destroyed {
        entity: u64,
        kind: EntityKind,
        position: Position,
    },
    /// A controller took the seat of a vehicle.
    Boarded { controller: u64, vehicle: u64 },
    /// A controller left a vehicle.
    Disembarked { controller: u64, vehicle: u64 },
    /// A mothership released a new craft.
    Spawned { entity: u64, kind: EntityKind },
}
