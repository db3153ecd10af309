//! Frame snapshot: the complete visible state after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime};

/// Complete simulation state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub scene: Option<SceneId>,
    /// Entity currently receiving input.
    pub controlled: Option<u64>,
    /// Live entities in registry order.
    pub entities: Vec<EntityView>,
    pub camera: CameraView,
    pub events: Vec<SimEvent>,
}

/// One entity as seen from outside the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    pub heading: Option<f64>,
    pub team: Option<Team>,
    pub health: Option<HealthView>,
    pub ai_state: Option<AiState>,
    /// Controller seated in this vehicle, if any.
    pub occupant: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthView {
    pub current: f64,
    pub max: f64,
}

/// Camera state for display and culling.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub focus: Position,
    pub height: f64,
    pub goto_height: f64,
    pub cull: CullBounds,
}

/// World-space rectangle outside of which draw calls may be skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CullBounds {
    pub min: Position,
    pub max: Position,
}

impl CullBounds {
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
