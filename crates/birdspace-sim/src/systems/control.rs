//! Input handling for whatever entity is currently controlled.
//!
//! Nothing controlled means free camera. Birds walk, ships fly and stations
//! aim their turret. `Interact` is edge-triggered by the engine.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use glam::DVec2;
use hecs::Entity;

use birdspace_core::commands::{InputFrame, Key};
use birdspace_core::components::{Avatar, Gun, Helm, StationLink, TileSet};
use birdspace_core::constants::*;
use birdspace_core::enums::{EntityKind, Team};
use birdspace_core::types::{Pose, Position};

use crate::context::SimContext;
use crate::systems::binding;
use crate::world_setup::spawn_laser;

/// Apply one frame of input. `interact` is true only on the frame the
/// interact key went down.
pub fn run(ctx: &mut SimContext, input: &InputFrame, interact: bool, dt: f64) {
    let Some(controlled) = ctx.controlled else {
        pan_camera(ctx, input);
        return;
    };
    match ctx.kind(controlled) {
        Some(EntityKind::Bird) => control_bird(ctx, controlled, input, interact, dt),
        Some(EntityKind::Ship) => control_ship(ctx, controlled, input, interact, dt),
        Some(EntityKind::TurretStation) => control_station(ctx, controlled, input, interact),
        _ => {}
    }
}

/// Unit step per axis from the movement keys; y grows downward.
fn axes(input: &InputFrame) -> (f64, f64) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if input.held(Key::Left) {
        dx -= 1.0;
    }
    if input.held(Key::Right) {
        dx += 1.0;
    }
    if input.held(Key::Forward) {
        dy -= 1.0;
    }
    if input.held(Key::Back) {
        dy += 1.0;
    }
    (dx, dy)
}

fn pan_camera(ctx: &mut SimContext, input: &InputFrame) {
    let (dx, dy) = axes(input);
    if dx != 0.0 || dy != 0.0 {
        ctx.camera.pan(dx, dy);
    }
}

fn control_bird(ctx: &mut SimContext, bird: Entity, input: &InputFrame, interact: bool, dt: f64) {
    if interact {
        match binding::enter_vehicle(ctx, bird) {
            Ok(_) => return,
            Err(err) => log::debug!("entry refused for {:?}: {}", bird, err),
        }
    }

    let (dx, dy) = axes(input);
    let speed = {
        let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(bird) else {
            return;
        };
        if avatar.boarded.is_some() {
            return;
        }
        if dx < 0.0 {
            avatar.flipped = false;
        } else if dx > 0.0 {
            avatar.flipped = true;
        }
        avatar.speed
    };
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    let scale = if dx != 0.0 && dy != 0.0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    };
    if let Ok(mut pos) = ctx.world.get::<&mut Position>(bird) {
        pos.x += dx * scale * speed * dt;
        pos.y += dy * scale * speed * dt;
    }
}

fn control_ship(ctx: &mut SimContext, ship: Entity, input: &InputFrame, interact: bool, dt: f64) {
    if interact {
        if let Err(err) = binding::exit_vehicle(ctx, ship) {
            log::debug!("exit refused for {:?}: {}", ship, err);
        }
        return;
    }

    let dt = dt.min(CONTROL_MAX_DT);
    let fire = {
        let Ok((helm, pose)) = ctx.world.query_one_mut::<(&mut Helm, &mut Pose)>(ship) else {
            return;
        };
        let step = (dt * helm.acceleration).min(SHIP_MAX_THROTTLE_STEP);
        if input.held(Key::Forward) {
            helm.speed += (helm.max_speed - helm.speed) * step;
            helm.engines_on = true;
        } else {
            if input.held(Key::Back) {
                helm.speed += (0.0 - helm.speed) * step;
            }
            helm.engines_on = false;
        }

        let mut theta = pose.theta;
        if input.held(Key::Left) {
            theta -= dt * helm.rot_speed;
        }
        if input.held(Key::Right) {
            theta += dt * helm.rot_speed;
        }
        pose.set_heading(theta);

        helm.fire_cooldown -= dt;
        if input.mouse.left && helm.fire_cooldown < 0.0 {
            helm.fire_cooldown = helm.fire_interval;
            true
        } else {
            false
        }
    };

    if fire {
        fire_weapon_tiles(ctx, ship);
    }
}

/// One laser per weapon tile, leaving along the thrust axis.
fn fire_weapon_tiles(ctx: &mut SimContext, ship: Entity) {
    let (Some(origin), Ok(pose)) = (ctx.position(ship), ctx.world.get::<&Pose>(ship).map(|p| *p))
    else {
        return;
    };
    let muzzles: Vec<Position> = match ctx.world.get::<&TileSet>(ship) {
        Ok(set) => set
            .tiles
            .iter()
            .filter(|t| t.kind.is_weapon())
            .map(|t| t.world_point(&pose, &origin, DVec2::new(TILE_MUZZLE.0, TILE_MUZZLE.1)))
            .collect(),
        Err(_) => return,
    };
    let team = ctx.team(ship).unwrap_or(Team::Alliance);
    for muzzle in muzzles {
        spawn_laser(ctx, muzzle, pose.theta + PI, team, Some(ship));
    }
}

fn control_station(ctx: &mut SimContext, station: Entity, input: &InputFrame, interact: bool) {
    if interact {
        if let Err(err) = binding::exit_vehicle(ctx, station) {
            log::debug!("exit refused for {:?}: {}", station, err);
        }
        return;
    }

    let Some(station_pos) = ctx.position(station) else {
        return;
    };
    let turret = ctx
        .world
        .get::<&StationLink>(station)
        .ok()
        .and_then(|link| link.turret)
        .filter(|t| ctx.is_alive(*t));
    let pivot = turret.and_then(|t| ctx.position(t)).unwrap_or(station_pos);

    let mouse = DVec2::new(input.mouse.x, input.mouse.y);
    let aim = pivot.angle_to(&ctx.camera.screen_to_world(mouse));
    let (w, h) = ctx.camera.viewport();

    if let Ok(mut link) = ctx.world.get::<&mut StationLink>(station) {
        link.aim = aim;
        if w > 0.0 && h > 0.0 {
            let phi = PI - (input.mouse.y / h - 0.5) * STATION_AIM_SWEEP;
            let reach = (0.75 * w - input.mouse.x).max(0.0) / w * STATION_AIM_REACH;
            let goal = pivot.offset(reach * phi.cos(), reach * phi.sin());
            link.aim_point.x += (goal.x - link.aim_point.x) * STATION_AIM_SMOOTHING;
            link.aim_point.y += (goal.y - link.aim_point.y) * STATION_AIM_SMOOTHING;
        }
    }

    if turret.is_none() {
        return;
    }
    let fire = match ctx.world.get::<&mut Gun>(station) {
        Ok(mut gun) if input.mouse.left && gun.cooldown < 0.0 => {
            gun.cooldown = gun.interval;
            true
        }
        _ => false,
    };
    if fire {
        let team = ctx.team(station).unwrap_or(Team::Alliance);
        spawn_laser(ctx, pivot, aim, team, Some(station));
    }
}
