//! Mothership spawners. Active only in the battle scene.

use hecs::Entity;
use rand::Rng;

use birdspace_core::components::Spawner;
use birdspace_core::constants::{ALLIANCE_SHIP_QUOTA, ENEMY_SPAWN_CAP};
use birdspace_core::enums::{EntityKind, SceneId, Team};
use birdspace_core::events::SimEvent;

use crate::context::{entity_id, SimContext};
use crate::world_setup::{spawn_enemy_craft, spawn_ship};

/// Count down the spawner timer. Returns true when it fires.
fn tick_timer(ctx: &mut SimContext, mothership: Entity, dt: f64) -> bool {
    if ctx.scene != Some(SceneId::Battle) {
        return false;
    }
    let Ok(mut spawner) = ctx.world.get::<&mut Spawner>(mothership) else {
        return false;
    };
    spawner.cooldown -= dt;
    if spawner.cooldown < 0.0 {
        spawner.cooldown = spawner.interval;
        true
    } else {
        false
    }
}

fn announce(ctx: &mut SimContext, entity: Entity, kind: EntityKind) {
    ctx.emit(SimEvent::Spawned {
        entity: entity_id(entity),
        kind,
    });
    log::debug!("mothership released {:?} {:?}", kind, entity);
}

/// Keep the alliance ship quota filled, one ship per interval.
pub fn update_alliance(ctx: &mut SimContext, mothership: Entity, dt: f64) {
    if !tick_timer(ctx, mothership, dt) {
        return;
    }
    let ships = ctx
        .registry
        .damageable()
        .iter()
        .filter(|&&e| ctx.kind(e) == Some(EntityKind::Ship) && ctx.team(e) == Some(Team::Alliance))
        .count();
    if ships >= ALLIANCE_SHIP_QUOTA {
        return;
    }
    let Some(base) = ctx.position(mothership) else {
        return;
    };
    let jitter = ctx.rng.gen_range(0.0..20.0);
    let ship = spawn_ship(ctx, base.offset(-16.0, 7.0 + jitter));
    announce(ctx, ship, EntityKind::Ship);
}

/// Release the opening burst, then one craft per interval, while the
/// damageable population is under the cap.
pub fn update_enemy(ctx: &mut SimContext, mothership: Entity, dt: f64) {
    if ctx.scene != Some(SceneId::Battle) {
        return;
    }
    let burst = match ctx.world.get::<&mut Spawner>(mothership) {
        Ok(mut spawner) => std::mem::take(&mut spawner.burst),
        Err(_) => return,
    };
    let count = if tick_timer(ctx, mothership, dt) {
        burst + 1
    } else {
        burst
    };
    let Some(base) = ctx.position(mothership) else {
        return;
    };
    for _ in 0..count {
        if ctx.registry.damageable().len() >= ENEMY_SPAWN_CAP {
            break;
        }
        let craft = spawn_enemy_craft(ctx, base);
        announce(ctx, craft, EntityKind::EnemyCraft);
    }
}
