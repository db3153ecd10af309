//! Per-frame systems operating on the simulation context.
//!
//! Systems are free functions over `&mut SimContext`. They hold no state of
//! their own; everything lives in components or in the context.

pub mod ai;
pub mod binding;
pub mod bird;
pub mod cleanup;
pub mod combat;
pub mod control;
pub mod effects;
pub mod laser;
pub mod snapshot;
pub mod spawner;
pub mod turret;
pub mod vehicle;

use hecs::Entity;

use birdspace_core::enums::EntityKind;

use crate::context::SimContext;

/// Run the per-kind update of one entity.
///
/// Kinds without per-frame behavior fall through to a no-op; the match is
/// exhaustive so a new kind cannot be added without deciding its update.
pub fn update_entity(ctx: &mut SimContext, entity: Entity, dt: f64) {
    let Some(kind) = ctx.kind(entity) else {
        return;
    };
    match kind {
        EntityKind::Ship => vehicle::update(ctx, entity, dt),
        EntityKind::EnemyCraft => ai::update_enemy_craft(ctx, entity, dt),
        EntityKind::Turret => turret::update(ctx, entity),
        EntityKind::TurretStation => ai::update_station(ctx, entity, dt),
        EntityKind::Bird => bird::update(ctx, entity, dt),
        EntityKind::Laser => laser::update(ctx, entity, dt),
        EntityKind::Shield => effects::update_shield(ctx, entity, dt),
        EntityKind::Explosion => effects::update_explosion(ctx, entity, dt),
        EntityKind::AllianceMothership => spawner::update_alliance(ctx, entity, dt),
        EntityKind::EnemyMothership => spawner::update_enemy(ctx, entity, dt),
        EntityKind::Wall | EntityKind::Decoration | EntityKind::Room => {}
    }
}
