//! Combat resolver: hit detection and damage application.

use hecs::Entity;

use birdspace_core::components::{Health, HitRegion, ShieldGlow};
use birdspace_core::constants::{LASER_DAMAGE, SHIELD_MAX_BRIGHTNESS};
use birdspace_core::enums::Team;
use birdspace_core::events::SimEvent;
use birdspace_core::types::Position;

use crate::context::{entity_id, SimContext};

/// First damageable entity, in registry order, that a `team` projectile at
/// `point` overlaps. Friendly entities and the shooter are never tested.
pub fn find_hit(
    ctx: &SimContext,
    point: &Position,
    team: Team,
    origin: Option<Entity>,
) -> Option<Entity> {
    ctx.registry.damageable().iter().copied().find(|&e| {
        if Some(e) == origin || ctx.team(e) == Some(team) {
            return false;
        }
        let (Some(center), Ok(region)) = (ctx.position(e), ctx.world.get::<&HitRegion>(e)) else {
            return false;
        };
        region.contains(&center, point)
    })
}

/// Apply one projectile hit to `target`. Shields flare whether or not the
/// hit changes their health. Returns the remaining health.
pub fn apply_hit(ctx: &mut SimContext, target: Entity, point: Position) -> f64 {
    let remaining = match ctx.world.get::<&mut Health>(target) {
        Ok(mut health) => {
            health.current -= LASER_DAMAGE;
            health.current
        }
        Err(_) => 0.0,
    };
    if let Ok(mut glow) = ctx.world.get::<&mut ShieldGlow>(target) {
        glow.brightness = SHIELD_MAX_BRIGHTNESS;
    }
    if let Some(kind) = ctx.kind(target) {
        ctx.emit(SimEvent::Hit {
            target: entity_id(target),
            kind,
            point,
            remaining,
        });
    }
    log::trace!("hit {:?} at ({:.2}, {:.2}), {} left", target, point.x, point.y, remaining);
    remaining
}
