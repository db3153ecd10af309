//! Cleanup system: evicts damageable entities whose health ran out.

use glam::DVec2;
use hecs::Entity;
use rand::Rng;

use birdspace_core::components::{Avatar, Cockpit, Health, TileSet};
use birdspace_core::constants::ENEMY_CRAFT_DEBRIS;
use birdspace_core::enums::EntityKind;
use birdspace_core::events::SimEvent;
use birdspace_core::types::{Pose, Position};

use crate::context::{entity_id, SimContext};
use crate::world_setup::spawn_explosion;

/// Scan the damageable index (newest first), run the destroy hook of every
/// depleted entity and remove it. Returns the number removed.
pub fn purge_dead(ctx: &mut SimContext) -> usize {
    let dead: Vec<Entity> = ctx
        .registry
        .damageable()
        .iter()
        .rev()
        .copied()
        .filter(|&e| {
            ctx.world
                .get::<&Health>(e)
                .map(|h| h.is_depleted())
                .unwrap_or(false)
        })
        .collect();

    for &entity in &dead {
        let kind = ctx.kind(entity);
        let position = ctx.position(entity).unwrap_or_default();
        match kind {
            Some(EntityKind::Ship) => destroy_ship(ctx, entity, &position),
            Some(EntityKind::EnemyCraft) => scatter_debris(ctx, &position),
            _ => {}
        }
        ctx.remove(entity);
        if let Some(kind) = kind {
            ctx.emit(SimEvent::Destroyed {
                entity: entity_id(entity),
                kind,
                position,
            });
        }
        log::debug!("{:?} {:?} destroyed", kind, entity);
    }
    dead.len()
}

/// One explosion per tile, and the occupant is thrown clear.
fn destroy_ship(ctx: &mut SimContext, ship: Entity, origin: &Position) {
    let pose = ctx.world.get::<&Pose>(ship).map(|p| *p).unwrap_or_default();
    let blasts: Vec<Position> = ctx
        .world
        .get::<&TileSet>(ship)
        .map(|set| {
            set.tiles
                .iter()
                .map(|t| t.world_point(&pose, origin, DVec2::ZERO))
                .collect()
        })
        .unwrap_or_default();
    for at in blasts {
        spawn_explosion(ctx, at);
    }

    let occupant = ctx
        .world
        .get::<&mut Cockpit>(ship)
        .ok()
        .and_then(|mut c| c.occupant.take());
    if let Some(bird) = occupant {
        if let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(bird) {
            avatar.boarded = None;
        }
        ctx.controlled = Some(bird);
        ctx.emit(SimEvent::Disembarked {
            controller: entity_id(bird),
            vehicle: entity_id(ship),
        });
    }
}

fn scatter_debris(ctx: &mut SimContext, center: &Position) {
    for _ in 0..ENEMY_CRAFT_DEBRIS {
        let dx = ctx.rng.gen_range(-4.0..4.0);
        let dy = ctx.rng.gen_range(-4.0..4.0);
        spawn_explosion(ctx, center.offset(dx, dy));
    }
}
