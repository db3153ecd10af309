//! Laser projectile update.

use hecs::Entity;

use birdspace_core::components::Laser;
use birdspace_core::types::Position;

use crate::context::SimContext;
use crate::systems::combat;
use crate::world_setup::spawn_explosion;

/// Advance the beam, then expire it or resolve at most one hit.
pub fn update(ctx: &mut SimContext, laser: Entity, dt: f64) {
    let Ok((head, beam)) = ctx.world.query_one_mut::<(&mut Position, &mut Laser)>(laser) else {
        return;
    };
    head.x += beam.velocity.x * dt;
    head.y += beam.velocity.y * dt;
    beam.tip.x += beam.velocity.x * dt;
    beam.tip.y += beam.velocity.y * dt;
    beam.lifespan -= dt;
    let (point, team, origin, expired) = (*head, beam.team, beam.origin, beam.lifespan < 0.0);

    if expired {
        ctx.remove(laser);
        return;
    }

    if let Some(target) = combat::find_hit(ctx, &point, team, origin) {
        combat::apply_hit(ctx, target, point);
        ctx.remove(laser);
        spawn_explosion(ctx, point);
    }
}
