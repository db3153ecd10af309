//! Snapshot system: builds a `FrameSnapshot` from the context.
//!
//! Read-only over the world.

use hecs::Entity;

use birdspace_core::components::{Cockpit, Health, StationLink, Targeting};
use birdspace_core::enums::{SimPhase, Team};
use birdspace_core::events::SimEvent;
use birdspace_core::state::{EntityView, FrameSnapshot, HealthView};
use birdspace_core::types::{Pose, SimTime};

use crate::context::{entity_id, SimContext};

pub fn build_snapshot(
    ctx: &SimContext,
    time: &SimTime,
    phase: SimPhase,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase,
        scene: ctx.scene,
        controlled: ctx.controlled.map(entity_id),
        entities: ctx
            .registry
            .iter()
            .filter_map(|e| build_entity(ctx, e))
            .collect(),
        camera: ctx.camera.view(),
        events,
    }
}

fn build_entity(ctx: &SimContext, entity: Entity) -> Option<EntityView> {
    let kind = ctx.kind(entity)?;
    let position = ctx.position(entity)?;
    // Stations report the aim of their turret as heading.
    let heading = ctx
        .world
        .get::<&Pose>(entity)
        .map(|p| p.theta)
        .or_else(|_| ctx.world.get::<&StationLink>(entity).map(|l| l.aim))
        .ok();
    Some(EntityView {
        id: entity_id(entity),
        kind,
        position,
        heading,
        team: ctx.world.get::<&Team>(entity).ok().map(|t| *t),
        health: ctx.world.get::<&Health>(entity).ok().map(|h| HealthView {
            current: h.current,
            max: h.max,
        }),
        ai_state: ctx.world.get::<&Targeting>(entity).ok().map(|t| t.state),
        occupant: ctx
            .world
            .get::<&Cockpit>(entity)
            .ok()
            .and_then(|c| c.occupant)
            .map(entity_id),
    })
}
