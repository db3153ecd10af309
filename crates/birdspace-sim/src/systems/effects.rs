//! Cosmetic and passive effects: explosions, shield regeneration and flare.

use hecs::Entity;

use birdspace_core::components::{Explosion, Health, ShieldGlow};
use birdspace_core::constants::{EXPLOSION_GROWTH, SHIELD_FADE_RATE};
use birdspace_core::enums::SceneId;

use crate::context::SimContext;

pub fn update_explosion(ctx: &mut SimContext, explosion: Entity, dt: f64) {
    let expired = match ctx.world.get::<&mut Explosion>(explosion) {
        Ok(mut e) => {
            e.size += EXPLOSION_GROWTH * dt;
            e.lifespan -= dt;
            e.lifespan < 0.0
        }
        Err(_) => return,
    };
    if expired {
        ctx.remove(explosion);
    }
}

/// Regenerate up to max health. In battle the flare fades by at least one
/// brightness step per frame; in the editor shields stay lit.
pub fn update_shield(ctx: &mut SimContext, shield: Entity, dt: f64) {
    let battle = ctx.scene == Some(SceneId::Battle);
    let Ok((health, glow)) = ctx
        .world
        .query_one_mut::<(&mut Health, &mut ShieldGlow)>(shield)
    else {
        return;
    };
    if health.current > 0.0 {
        health.current = (health.current + health.regen * dt).min(health.max);
    }
    if battle {
        glow.brightness -= fade_step(glow.brightness, dt);
    }
}

fn fade_step(brightness: u8, dt: f64) -> u8 {
    let step = (dt * SHIELD_FADE_RATE).round().max(1.0);
    step.min(brightness as f64) as u8
}
