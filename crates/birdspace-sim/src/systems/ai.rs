//! Autonomous targeting for enemy craft and unoccupied turret stations.
//!
//! Reads components, calls the targeting state machine from birdspace-ai,
//! then writes the results back.

use hecs::Entity;

use birdspace_ai::fsm::{evaluate_tracking, roll_retarget, twin_gun_offsets, TrackingContext};
use birdspace_ai::profiles::get_profile;
use birdspace_core::components::{Cockpit, Cruise, Gun, StationLink, Targeting};
use birdspace_core::constants::ENEMY_CRAFT_GUN_OFFSET;
use birdspace_core::enums::{AiArchetype, AiState, EntityKind, Team};
use birdspace_core::types::{Pose, Position};

use crate::context::SimContext;
use crate::world_setup::spawn_laser;

/// Opposing vehicles a `team` controller may pick as a target.
fn candidates(ctx: &SimContext, team: Team) -> Vec<Entity> {
    ctx.registry
        .damageable()
        .iter()
        .copied()
        .filter(|&e| ctx.team(e) == Some(team.opponent()))
        .filter(|&e| matches!(ctx.kind(e), Some(EntityKind::Ship | EntityKind::EnemyCraft)))
        .collect()
}

/// Count down the retarget timer and re-roll when it runs out. Returns the
/// held target, if still alive, and whether it was picked this frame.
fn retarget(ctx: &mut SimContext, entity: Entity, team: Team, dt: f64) -> (Option<Entity>, bool) {
    let (archetype, mut target, cooldown) = match ctx.world.get::<&mut Targeting>(entity) {
        Ok(mut t) => {
            t.retarget_cooldown -= dt;
            (t.archetype, t.target, t.retarget_cooldown)
        }
        Err(_) => return (None, false),
    };

    let mut acquired = false;
    if cooldown < 0.0 {
        let pool = candidates(ctx, team);
        let roll = roll_retarget(&mut ctx.rng, &get_profile(archetype), &pool);
        if roll.target != target {
            log::debug!("{:?} retargeted {:?} -> {:?}", entity, target, roll.target);
        }
        acquired = roll.target.is_some() && roll.target != target;
        target = roll.target;
        if let Ok(mut t) = ctx.world.get::<&mut Targeting>(entity) {
            t.target = target;
            t.retarget_cooldown = roll.cooldown;
        }
    }

    if let Some(t) = target {
        if !ctx.is_alive(t) {
            target = None;
            if let Ok(mut targeting) = ctx.world.get::<&mut Targeting>(entity) {
                targeting.target = None;
            }
        }
    }
    (target, acquired)
}

fn set_state(ctx: &mut SimContext, entity: Entity, state: AiState) {
    if let Ok(mut t) = ctx.world.get::<&mut Targeting>(entity) {
        t.state = state;
    }
}

fn gun_cooldown(ctx: &SimContext, entity: Entity) -> f64 {
    ctx.world.get::<&Gun>(entity).map(|g| g.cooldown).unwrap_or(0.0)
}

fn set_gun_cooldown(ctx: &mut SimContext, entity: Entity, cooldown: f64) {
    if let Ok(mut gun) = ctx.world.get::<&mut Gun>(entity) {
        gun.cooldown = cooldown;
    }
}

/// Enemy craft: pursue the held target nose-first, firing twin lasers.
pub fn update_enemy_craft(ctx: &mut SimContext, craft: Entity, dt: f64) {
    let team = ctx.team(craft).unwrap_or(Team::Enemy);
    let (target, acquired) = retarget(ctx, craft, team, dt);

    let (Some(position), Ok(pose)) = (ctx.position(craft), ctx.world.get::<&Pose>(craft).map(|p| *p))
    else {
        return;
    };
    let update = evaluate_tracking(&TrackingContext {
        archetype: AiArchetype::EnemyCraft,
        heading: pose.theta,
        position,
        target: target.and_then(|t| ctx.position(t)),
        acquired,
        fire_cooldown: gun_cooldown(ctx, craft),
        dt,
    });
    set_state(ctx, craft, update.state);
    set_gun_cooldown(ctx, craft, update.fire_cooldown);

    let Ok((pos, pose, cruise)) = ctx
        .world
        .query_one_mut::<(&mut Position, &mut Pose, &Cruise)>(craft)
    else {
        return;
    };
    pose.set_heading(update.heading);
    let v = pose.forward_velocity(cruise.speed);
    pos.x += v.x * dt;
    pos.y += v.y * dt;

    if update.fire {
        for offset in twin_gun_offsets(update.heading, ENEMY_CRAFT_GUN_OFFSET) {
            spawn_laser(
                ctx,
                position.offset(offset.x, offset.y),
                update.heading,
                team,
                Some(craft),
            );
        }
    }
}

/// Turret station: while unoccupied, aim the linked turret at a target.
/// A station without a live turret stays idle.
pub fn update_station(ctx: &mut SimContext, station: Entity, dt: f64) {
    let occupied = ctx
        .world
        .get::<&Cockpit>(station)
        .map(|c| c.occupant.is_some())
        .unwrap_or(false);
    if occupied {
        let cooldown = gun_cooldown(ctx, station) - dt;
        set_gun_cooldown(ctx, station, cooldown);
        set_state(ctx, station, AiState::Idle);
        return;
    }

    let Ok((turret, aim)) = ctx
        .world
        .get::<&StationLink>(station)
        .map(|link| (link.turret, link.aim))
    else {
        return;
    };
    let Some(pivot) = turret.filter(|t| ctx.is_alive(*t)).and_then(|t| ctx.position(t)) else {
        set_state(ctx, station, AiState::Idle);
        return;
    };

    let team = ctx.team(station).unwrap_or(Team::Alliance);
    let (target, acquired) = retarget(ctx, station, team, dt);
    let update = evaluate_tracking(&TrackingContext {
        archetype: AiArchetype::TurretStation,
        heading: aim,
        position: pivot,
        target: target.and_then(|t| ctx.position(t)),
        acquired,
        fire_cooldown: gun_cooldown(ctx, station),
        dt,
    });
    set_state(ctx, station, update.state);
    set_gun_cooldown(ctx, station, update.fire_cooldown);
    if let Ok(mut link) = ctx.world.get::<&mut StationLink>(station) {
        link.aim = update.heading;
        link.aim_point = pivot;
    }

    if update.fire {
        spawn_laser(ctx, pivot, update.heading, team, Some(station));
    }
}
