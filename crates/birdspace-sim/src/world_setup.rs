//! Entity spawn factories and level replay.
//!
//! Each factory attaches the component bundle of one entity kind and
//! registers the entity. `populate` replays a level description in order;
//! `link_turret_stations` then pairs stations with turrets in a separate pass.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::Entity;
use rand::Rng;

use birdspace_ai::fsm::jittered;
use birdspace_core::components::*;
use birdspace_core::constants::*;
use birdspace_core::enums::*;
use birdspace_core::geometry::{alliance_hull, basic_ship_tiles, enemy_hull};
use birdspace_core::level::{LevelDescription, LevelRecord};
use birdspace_core::types::{Pose, Position};

use crate::context::SimContext;

/// Spawn a standard alliance ship.
pub fn spawn_ship(ctx: &mut SimContext, position: Position) -> Entity {
    ctx.spawn(
        (
            EntityKind::Ship,
            Team::Alliance,
            position,
            Pose::new(0.0),
            Helm::default(),
            Health::new(SHIP_HEALTH),
            HitRegion::Circle {
                radius: SHIP_HIT_RADIUS,
            },
            TileSet {
                tiles: basic_ship_tiles(),
            },
            Cockpit {
                occupant: None,
                seat: DVec2::new(SHIP_COCKPIT_OFFSET.0, SHIP_COCKPIT_OFFSET.1),
                exit_offset: DVec2::ZERO,
            },
            CameraLimit {
                max_height: SHIP_MAX_CAM_HEIGHT,
            },
            Boardable,
        ),
        true,
    )
}

/// Spawn an enemy fighter with a random heading.
pub fn spawn_enemy_craft(ctx: &mut SimContext, position: Position) -> Entity {
    let heading = ctx.rng.gen_range(0.0..TAU);
    let profile = birdspace_ai::profiles::get_profile(AiArchetype::EnemyCraft);
    let retarget = jittered(&mut ctx.rng, profile.retarget_interval);
    let gun = jittered(&mut ctx.rng, profile.fire_interval);
    ctx.spawn(
        (
            EntityKind::EnemyCraft,
            Team::Enemy,
            position,
            Pose::new(heading),
            Health::new(ENEMY_CRAFT_HEALTH),
            HitRegion::Circle {
                radius: ENEMY_CRAFT_HIT_RADIUS,
            },
            Cruise {
                speed: ENEMY_CRAFT_SPEED,
            },
            Gun {
                cooldown: gun,
                interval: profile.fire_interval,
            },
            Targeting {
                archetype: AiArchetype::EnemyCraft,
                target: None,
                retarget_cooldown: retarget,
                state: AiState::Idle,
            },
        ),
        true,
    )
}

pub fn spawn_turret(ctx: &mut SimContext, position: Position) -> Entity {
    ctx.spawn(
        (
            EntityKind::Turret,
            position,
            Pose::new(0.0),
            TurretMount::default(),
        ),
        false,
    )
}

/// Spawn a turret station acting for `team`. It is unlinked until
/// `link_turret_stations` runs.
pub fn spawn_turret_station(ctx: &mut SimContext, position: Position, team: Team) -> Entity {
    let profile = birdspace_ai::profiles::get_profile(AiArchetype::TurretStation);
    let retarget = jittered(&mut ctx.rng, profile.retarget_interval);
    ctx.spawn(
        (
            EntityKind::TurretStation,
            team,
            position,
            Cockpit {
                occupant: None,
                seat: DVec2::ZERO,
                exit_offset: DVec2::new(0.0, STATION_SIZE / 2.0),
            },
            CameraLimit {
                max_height: STATION_MAX_CAM_HEIGHT,
            },
            Boardable,
            Gun {
                cooldown: 0.0,
                interval: profile.fire_interval,
            },
            Targeting {
                archetype: AiArchetype::TurretStation,
                target: None,
                retarget_cooldown: retarget,
                state: AiState::Idle,
            },
            StationLink {
                turret: None,
                aim: 0.0,
                aim_point: position,
            },
        ),
        false,
    )
}

pub fn spawn_bird(ctx: &mut SimContext, position: Position, variant: u8, flipped: bool) -> Entity {
    ctx.spawn(
        (
            EntityKind::Bird,
            position,
            Avatar::new(variant, flipped),
            CameraLimit {
                max_height: BIRD_MAX_CAM_HEIGHT,
            },
        ),
        false,
    )
}

/// Spawn a laser whose head starts at `from` and travels along `heading`.
pub fn spawn_laser(
    ctx: &mut SimContext,
    from: Position,
    heading: f64,
    team: Team,
    origin: Option<Entity>,
) -> Entity {
    let pose = Pose::new(heading);
    let tip = pose.to_world(&from, DVec2::new(LASER_LENGTH, 0.0));
    ctx.emit(birdspace_core::events::SimEvent::LaserFired { team, from });
    ctx.spawn(
        (
            EntityKind::Laser,
            from,
            Laser {
                team,
                origin,
                velocity: pose.forward_velocity(LASER_SPEED),
                tip,
                lifespan: LASER_LIFESPAN,
            },
        ),
        false,
    )
}

pub fn spawn_shield(
    ctx: &mut SimContext,
    position: Position,
    w: f64,
    h: f64,
    team: Team,
) -> Entity {
    ctx.spawn(
        (
            EntityKind::Shield,
            team,
            position,
            Health::with_regen(SHIELD_HEALTH, SHIELD_REGEN),
            HitRegion::Ellipse {
                w: w.abs(),
                h: h.abs(),
            },
            ShieldGlow {
                brightness: SHIELD_MAX_BRIGHTNESS,
            },
        ),
        true,
    )
}

pub fn spawn_explosion(ctx: &mut SimContext, position: Position) -> Entity {
    ctx.spawn(
        (EntityKind::Explosion, position, Explosion::default()),
        false,
    )
}

pub fn spawn_alliance_mothership(
    ctx: &mut SimContext,
    position: Position,
    size: f64,
    width: f64,
) -> Entity {
    ctx.spawn(
        (
            EntityKind::AllianceMothership,
            Team::Alliance,
            position,
            Hull {
                points: alliance_hull(size, width),
            },
            Spawner {
                cooldown: ALLIANCE_SPAWN_INTERVAL,
                interval: ALLIANCE_SPAWN_INTERVAL,
                burst: 0,
            },
        ),
        false,
    )
}

pub fn spawn_enemy_mothership(
    ctx: &mut SimContext,
    position: Position,
    size: f64,
    burst: u32,
) -> Entity {
    ctx.spawn(
        (
            EntityKind::EnemyMothership,
            Team::Enemy,
            position,
            Hull {
                points: enemy_hull(size),
            },
            Spawner {
                cooldown: ENEMY_SPAWN_INTERVAL,
                interval: ENEMY_SPAWN_INTERVAL,
                burst,
            },
        ),
        false,
    )
}

/// Spawn an axis-aligned wall; corners are reordered so `Position` is the minimum.
pub fn spawn_wall(ctx: &mut SimContext, a: Position, b: Position) -> Entity {
    let (min, max) = ordered(a, b);
    ctx.spawn((EntityKind::Wall, min, Wall { end: max }), false)
}

pub fn spawn_room(ctx: &mut SimContext, a: Position, b: Position) -> Entity {
    let (min, max) = ordered(a, b);
    ctx.spawn((EntityKind::Room, min, Room { end: max }), false)
}

pub fn spawn_decoration(ctx: &mut SimContext, position: Position, index: u8) -> Entity {
    ctx.spawn(
        (
            EntityKind::Decoration,
            position,
            Decoration {
                index: index.min(3),
            },
        ),
        false,
    )
}

fn ordered(a: Position, b: Position) -> (Position, Position) {
    (
        Position::new(a.x.min(b.x), a.y.min(b.y)),
        Position::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Replay a level description into the context, in record order.
///
/// The first bird becomes the controlled entity and the second bird, if
/// any, its follower. Returns the number of entities spawned.
pub fn populate(ctx: &mut SimContext, level: &LevelDescription) -> usize {
    let mut birds = Vec::new();
    for record in &level.records {
        match record {
            LevelRecord::Bird(c) => {
                birds.push(spawn_bird(ctx, Position::new(c.x, c.y), c.variant, c.flipped));
            }
            LevelRecord::AllianceMothership(c) => {
                spawn_alliance_mothership(ctx, Position::new(c.x, c.y), c.size, c.width);
            }
            LevelRecord::EnemyMothership(c) => {
                spawn_enemy_mothership(ctx, Position::new(c.x, c.y), c.size, c.burst);
            }
            LevelRecord::AllianceShip(c) => {
                spawn_ship(ctx, Position::new(c.x, c.y));
            }
            LevelRecord::EnemyCraft(c) => {
                spawn_enemy_craft(ctx, Position::new(c.x, c.y));
            }
            LevelRecord::Wall(c) => {
                spawn_wall(ctx, Position::new(c.x, c.y), Position::new(c.x2, c.y2));
            }
            LevelRecord::Decoration(c) => {
                spawn_decoration(ctx, Position::new(c.x, c.y), c.index);
            }
            LevelRecord::Room(c) => {
                spawn_room(ctx, Position::new(c.x, c.y), Position::new(c.x2, c.y2));
            }
            LevelRecord::TurretStation(c) => {
                spawn_turret_station(ctx, Position::new(c.x, c.y), c.team);
            }
            LevelRecord::Turret(c) => {
                spawn_turret(ctx, Position::new(c.x, c.y));
            }
            LevelRecord::Shield(c) => {
                spawn_shield(ctx, Position::new(c.x, c.y), c.w, c.h, c.team);
            }
        }
    }

    if let Some(&player) = birds.first() {
        ctx.controlled = Some(player);
        if let Some(&follower) = birds.get(1) {
            set_follower(ctx, player, follower);
        }
    }
    ctx.registry.len()
}

/// Make `follower` trail `leader`. Returns false if `leader` is not a bird.
pub fn set_follower(ctx: &mut SimContext, leader: Entity, follower: Entity) -> bool {
    if leader == follower || ctx.kind(follower) != Some(EntityKind::Bird) {
        return false;
    }
    match ctx.world.get::<&mut Avatar>(leader) {
        Ok(mut avatar) => {
            avatar.follower = Some(follower);
            true
        }
        Err(_) => false,
    }
}

/// Pair every station with the first unclaimed turret, both in registry
/// order. Returns the number of links made.
pub fn link_turret_stations(ctx: &mut SimContext) -> usize {
    let order: Vec<Entity> = ctx.registry.iter().collect();
    let mut turrets: Vec<Entity> = order
        .iter()
        .copied()
        .filter(|e| ctx.kind(*e) == Some(EntityKind::Turret))
        .filter(|e| {
            ctx.world
                .get::<&TurretMount>(*e)
                .map(|m| m.station.is_none())
                .unwrap_or(false)
        })
        .collect();
    turrets.reverse();

    let mut linked = 0;
    for station in order {
        let Ok(mut link) = ctx.world.get::<&mut StationLink>(station) else {
            continue;
        };
        if link.turret.is_some() {
            continue;
        }
        let Some(turret) = turrets.pop() else {
            log::warn!("turret station {:?} has no turret to control", station);
            continue;
        };
        link.turret = Some(turret);
        drop(link);
        if let Ok(mut mount) = ctx.world.get::<&mut TurretMount>(turret) {
            mount.station = Some(station);
        }
        linked += 1;
    }
    linked
}
