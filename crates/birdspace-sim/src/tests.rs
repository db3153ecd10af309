//! Tests for the engine, combat, control binding, camera and draw pass.

use glam::DVec2;

use birdspace_core::commands::{InputFrame, Key, SimCommand};
use birdspace_core::components::*;
use birdspace_core::constants::DT;
use birdspace_core::enums::*;
use birdspace_core::error::BindError;
use birdspace_core::events::SimEvent;
use birdspace_core::level::LevelDescription;
use birdspace_core::state::CullBounds;
use birdspace_core::types::{Pose, Position};

use crate::camera::Camera;
use crate::context::SimContext;
use crate::engine::{SimConfig, SimulationEngine};
use crate::render::{Canvas, Rgb, Sprite};
use crate::systems::{ai, binding, bird, cleanup, effects, laser, vehicle};
use crate::world_setup::*;

const EPS: f64 = 1e-9;

fn context() -> SimContext {
    SimContext::new(7, 600.0, 600.0)
}

fn engine_with(text: &str, scene: SceneId) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let level = LevelDescription::parse(text).unwrap();
    engine.queue_command(SimCommand::LoadLevel { level, scene });
    engine
}

fn count_kind(ctx: &SimContext, kind: EntityKind) -> usize {
    ctx.registry.iter().filter(|e| ctx.kind(*e) == Some(kind)).count()
}

fn health(ctx: &SimContext, e: hecs::Entity) -> f64 {
    ctx.world.get::<&Health>(e).unwrap().current
}

/// Fire one `team` laser that is already at `at` and resolve it.
fn strike(ctx: &mut SimContext, at: Position, team: Team) -> hecs::Entity {
    let beam = spawn_laser(ctx, at, 0.0, team, None);
    laser::update(ctx, beam, 0.0);
    beam
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine_a.queue_command(SimCommand::LoadScene {
        scene: SceneId::Battle,
    });
    engine_b.queue_command(SimCommand::LoadScene {
        scene: SceneId::Battle,
    });

    let input = InputFrame::default();
    for _ in 0..300 {
        let a = serde_json::to_string(&engine_a.tick(DT, &input)).unwrap();
        let b = serde_json::to_string(&engine_b.tick(DT, &input)).unwrap();
        assert_eq!(a, b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.load_scene(SceneId::Battle);
    engine_b.load_scene(SceneId::Battle);

    // Alliance spawn offsets are jittered, so the runs split within seconds.
    let input = InputFrame::default();
    let mut diverged = false;
    for _ in 0..300 {
        let a = serde_json::to_string(&engine_a.tick(DT, &input)).unwrap();
        let b = serde_json::to_string(&engine_b.tick(DT, &input)).unwrap();
        if a != b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Combat ----

#[test]
fn test_fifty_hits_then_exactly_one_destroy() {
    let mut ctx = context();
    let ship = spawn_ship(&mut ctx, Position::new(0.0, 0.0));
    {
        let mut h = ctx.world.get::<&mut Health>(ship).unwrap();
        h.current = 200.0;
        h.max = 200.0;
    }

    for _ in 0..50 {
        strike(&mut ctx, Position::new(0.0, 0.0), Team::Enemy);
    }
    assert!((health(&ctx, ship) - 150.0).abs() < EPS);
    assert_eq!(cleanup::purge_dead(&mut ctx), 0);

    let mut purged = 0;
    for _ in 0..151 {
        strike(&mut ctx, Position::new(0.0, 0.0), Team::Enemy);
        purged += cleanup::purge_dead(&mut ctx);
    }
    assert_eq!(purged, 1);
    assert!(!ctx.is_alive(ship));
    let destroyed = ctx
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Destroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    // One explosion per tile from the destroy hook.
    assert!(count_kind(&ctx, EntityKind::Explosion) >= 8);
}

#[test]
fn test_friendly_lasers_never_damage() {
    let mut ctx = context();
    let ship = spawn_ship(&mut ctx, Position::new(0.0, 0.0));
    let shield = spawn_shield(&mut ctx, Position::new(0.0, 0.0), 10.0, 10.0, Team::Alliance);
    for _ in 0..20 {
        let beam = strike(&mut ctx, Position::new(0.0, 0.0), Team::Alliance);
        assert!(ctx.is_alive(beam), "friendly beam should pass through");
    }
    assert_eq!(health(&ctx, ship), 20.0);
    assert_eq!(health(&ctx, shield), 100.0);
}

#[test]
fn test_laser_never_hits_its_origin() {
    let mut ctx = context();
    let craft = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    let beam = spawn_laser(&mut ctx, Position::new(0.0, 0.0), 0.0, Team::Alliance, Some(craft));
    laser::update(&mut ctx, beam, 0.0);
    assert!(ctx.is_alive(beam));
    assert_eq!(health(&ctx, craft), 10.0);
}

#[test]
fn test_first_match_in_registry_order_takes_the_hit() {
    let mut ctx = context();
    let first = spawn_shield(&mut ctx, Position::new(0.0, 0.0), 5.0, 5.0, Team::Enemy);
    let second = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    strike(&mut ctx, Position::new(0.0, 0.0), Team::Alliance);
    assert_eq!(health(&ctx, first), 99.0);
    assert_eq!(health(&ctx, second), 10.0);
    assert_eq!(count_kind(&ctx, EntityKind::Explosion), 1);
}

#[test]
fn test_hit_flares_shield() {
    let mut ctx = context();
    let shield = spawn_shield(&mut ctx, Position::new(0.0, 0.0), 4.0, 2.0, Team::Enemy);
    ctx.world.get::<&mut ShieldGlow>(shield).unwrap().brightness = 10;
    strike(&mut ctx, Position::new(0.0, 0.0), Team::Alliance);
    assert_eq!(ctx.world.get::<&ShieldGlow>(shield).unwrap().brightness, 255);
}

#[test]
fn test_laser_expires_after_lifespan() {
    let mut ctx = context();
    let beam = spawn_laser(&mut ctx, Position::new(0.0, 0.0), 0.0, Team::Enemy, None);
    for _ in 0..5 {
        laser::update(&mut ctx, beam, 1.0);
        assert!(ctx.is_alive(beam));
    }
    let head = ctx.position(beam).unwrap();
    assert!((head.x - 600.0).abs() < EPS);

    laser::update(&mut ctx, beam, 1.0);
    assert!(!ctx.is_alive(beam));
    assert!(!ctx.registry.contains(beam));
    // Removal is idempotent.
    laser::update(&mut ctx, beam, 1.0);
    ctx.remove(beam);
}

#[test]
fn test_laser_tip_leads_hit_point_along_heading() {
    let mut ctx = context();
    let beam = spawn_laser(&mut ctx, Position::new(1.0, 2.0), 0.0, Team::Alliance, None);
    let tip = ctx.world.get::<&Laser>(beam).unwrap().tip;
    assert!((tip.x - (1.0 + birdspace_core::constants::LASER_LENGTH)).abs() < EPS);
    assert!((tip.y - 2.0).abs() < EPS);
    assert_eq!(ctx.position(beam), Some(Position::new(1.0, 2.0)));
}

// ---- Effects ----

#[test]
fn test_explosion_grows_then_expires() {
    let mut ctx = context();
    let e = spawn_explosion(&mut ctx, Position::new(0.0, 0.0));
    effects::update_explosion(&mut ctx, e, 0.25);
    let size = ctx.world.get::<&Explosion>(e).unwrap().size;
    assert!((size - 0.6).abs() < EPS);
    effects::update_explosion(&mut ctx, e, 0.3);
    assert!(!ctx.is_alive(e));
}

#[test]
fn test_shield_regen_is_clamped() {
    let mut ctx = context();
    ctx.scene = Some(SceneId::Battle);
    let shield = spawn_shield(&mut ctx, Position::new(0.0, 0.0), 4.0, 2.0, Team::Alliance);
    ctx.world.get::<&mut Health>(shield).unwrap().current = 95.0;
    effects::update_shield(&mut ctx, shield, 0.5);
    assert_eq!(health(&ctx, shield), 99.0);
    effects::update_shield(&mut ctx, shield, 0.5);
    assert_eq!(health(&ctx, shield), 100.0);
    assert!(ctx.world.get::<&ShieldGlow>(shield).unwrap().brightness < 255);
}

// ---- AI ----

#[test]
fn test_enemy_craft_targets_and_fires_at_ship() {
    let mut ctx = context();
    let ship = spawn_ship(&mut ctx, Position::new(0.0, 50.0));
    let craft = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    ctx.world.get::<&mut Targeting>(craft).unwrap().retarget_cooldown = 0.0;

    ai::update_enemy_craft(&mut ctx, craft, 2.5);

    let targeting = ctx.world.get::<&Targeting>(craft).unwrap().clone();
    assert_eq!(targeting.target, Some(ship));
    assert_eq!(targeting.state, AiState::Firing);
    assert_eq!(count_kind(&ctx, EntityKind::Laser), 2);
}

#[test]
fn test_enemy_craft_without_targets_holds_heading() {
    let mut ctx = context();
    let craft = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    let before = ctx.world.get::<&Pose>(craft).unwrap().theta;
    ai::update_enemy_craft(&mut ctx, craft, 6.0);
    let after = ctx.world.get::<&Pose>(craft).unwrap().theta;
    assert_eq!(before, after);
    assert_eq!(count_kind(&ctx, EntityKind::Laser), 0);
    assert_eq!(ctx.world.get::<&Targeting>(craft).unwrap().state, AiState::Idle);
}

#[test]
fn test_ai_timers_are_jittered_per_entity() {
    let mut ctx = context();
    let a = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    let b = spawn_enemy_craft(&mut ctx, Position::new(0.0, 0.0));
    let timers = |ctx: &SimContext, e: hecs::Entity| {
        let retarget = ctx.world.get::<&Targeting>(e).unwrap().retarget_cooldown;
        let gun = ctx.world.get::<&Gun>(e).unwrap().cooldown;
        (retarget, gun)
    };
    assert_ne!(timers(&ctx, a).0, timers(&ctx, b).0);
    assert_ne!(timers(&ctx, a).1, timers(&ctx, b).1);

    let mut identical = 0;
    for _ in 0..1800 {
        ai::update_enemy_craft(&mut ctx, a, DT);
        ai::update_enemy_craft(&mut ctx, b, DT);
        if timers(&ctx, a).0 == timers(&ctx, b).0 {
            identical += 1;
        }
    }
    assert_eq!(identical, 0);

    let s1 = spawn_turret_station(&mut ctx, Position::new(0.0, 5.0), Team::Alliance);
    let s2 = spawn_turret_station(&mut ctx, Position::new(2.0, 5.0), Team::Alliance);
    let station = ctx.world.get::<&Targeting>(s1).unwrap().retarget_cooldown;
    assert!(station < 3.7);
    assert_ne!(station, ctx.world.get::<&Targeting>(s2).unwrap().retarget_cooldown);
}

#[test]
fn test_station_without_turret_is_inert() {
    let mut ctx = context();
    let station = spawn_turret_station(&mut ctx, Position::new(0.0, 0.0), Team::Alliance);
    spawn_enemy_craft(&mut ctx, Position::new(10.0, 0.0));
    assert_eq!(link_turret_stations(&mut ctx), 0);
    for _ in 0..300 {
        ai::update_station(&mut ctx, station, DT);
    }
    assert_eq!(count_kind(&ctx, EntityKind::Laser), 0);
    assert_eq!(ctx.world.get::<&Targeting>(station).unwrap().state, AiState::Idle);
}

#[test]
fn test_station_targeting_is_reproducible() {
    let run = |seed: u64| {
        let mut ctx = SimContext::new(seed, 600.0, 600.0);
        spawn_turret(&mut ctx, Position::new(0.0, 0.0));
        spawn_turret(&mut ctx, Position::new(5.0, 0.0));
        let a = spawn_turret_station(&mut ctx, Position::new(0.0, 2.0), Team::Alliance);
        let b = spawn_turret_station(&mut ctx, Position::new(5.0, 2.0), Team::Alliance);
        for i in 0..4 {
            spawn_enemy_craft(&mut ctx, Position::new(40.0, i as f64 * 10.0));
        }
        link_turret_stations(&mut ctx);
        let mut aims = Vec::new();
        for _ in 0..400 {
            ai::update_station(&mut ctx, a, DT);
            ai::update_station(&mut ctx, b, DT);
            let aim_a = ctx.world.get::<&StationLink>(a).unwrap().aim;
            let aim_b = ctx.world.get::<&StationLink>(b).unwrap().aim;
            aims.push((aim_a, aim_b));
        }
        aims
    };
    assert_eq!(run(9), run(9));
}

// ---- Linking ----

#[test]
fn test_link_pairs_in_registry_order() {
    let mut ctx = context();
    let t1 = spawn_turret(&mut ctx, Position::new(0.0, 0.0));
    let s1 = spawn_turret_station(&mut ctx, Position::new(1.0, 0.0), Team::Alliance);
    let s2 = spawn_turret_station(&mut ctx, Position::new(2.0, 0.0), Team::Alliance);
    let t2 = spawn_turret(&mut ctx, Position::new(3.0, 0.0));

    assert_eq!(link_turret_stations(&mut ctx), 2);
    assert_eq!(ctx.world.get::<&StationLink>(s1).unwrap().turret, Some(t1));
    assert_eq!(ctx.world.get::<&StationLink>(s2).unwrap().turret, Some(t2));
    assert_eq!(ctx.world.get::<&TurretMount>(t2).unwrap().station, Some(s2));
    // A second pass finds nothing new.
    assert_eq!(link_turret_stations(&mut ctx), 0);
}

#[test]
fn test_battle_scene_links_every_station() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_scene(SceneId::Battle);
    let ctx = engine.context();
    let mut linked = 0;
    for e in ctx.registry.iter() {
        if let Ok(link) = ctx.world.get::<&StationLink>(e) {
            assert!(link.turret.is_some(), "station {e:?} left unlinked");
            linked += 1;
        }
    }
    assert_eq!(linked, 7);
    assert_eq!(engine.phase(), SimPhase::Running);
    assert_eq!(ctx.kind(engine.controlled().unwrap()), Some(EntityKind::Bird));
}

// ---- Control binding ----

#[test]
fn test_enter_and_exit_vehicle() {
    let mut ctx = context();
    let bird_e = spawn_bird(&mut ctx, Position::new(0.0, 0.0), 0, false);
    let ship = spawn_ship(&mut ctx, Position::new(1.0, 0.0));
    ctx.controlled = Some(bird_e);

    assert_eq!(binding::enter_vehicle(&mut ctx, bird_e), Ok(ship));
    assert_eq!(ctx.controlled, Some(ship));
    let seat = ctx.position(bird_e).unwrap();
    assert!((seat.x - 1.25).abs() < EPS && (seat.y - 0.5).abs() < EPS);
    assert_eq!(
        binding::enter_vehicle(&mut ctx, bird_e),
        Err(BindError::AlreadyBoarded)
    );

    assert_eq!(binding::exit_vehicle(&mut ctx, ship), Ok(bird_e));
    assert_eq!(ctx.controlled, Some(bird_e));
    assert_eq!(binding::exit_vehicle(&mut ctx, ship), Err(BindError::NotBoarded));
}

#[test]
fn test_occupied_vehicle_refuses_second_controller() {
    let mut ctx = context();
    let first = spawn_bird(&mut ctx, Position::new(0.0, 0.0), 0, false);
    let second = spawn_bird(&mut ctx, Position::new(0.5, 0.0), 1, false);
    let ship = spawn_ship(&mut ctx, Position::new(1.0, 0.0));

    binding::enter_vehicle(&mut ctx, first).unwrap();
    assert_eq!(binding::nearest_boardable(&ctx, &Position::new(0.5, 0.0)), None);
    assert_eq!(
        binding::enter_vehicle(&mut ctx, second),
        Err(BindError::NoVehicleInRange)
    );
    assert_eq!(binding::board(&mut ctx, second, ship), Err(BindError::Occupied));
    assert_eq!(
        ctx.world.get::<&Cockpit>(ship).unwrap().occupant,
        Some(first)
    );
}

#[test]
fn test_binding_refusals() {
    let mut ctx = context();
    let wall = spawn_wall(&mut ctx, Position::new(0.0, 0.0), Position::new(0.0, 1.0));
    let bird_e = spawn_bird(&mut ctx, Position::new(0.0, 0.0), 0, false);
    let far = spawn_ship(&mut ctx, Position::new(10.0, 0.0));

    assert_eq!(binding::enter_vehicle(&mut ctx, wall), Err(BindError::NotAController));
    assert_eq!(binding::enter_vehicle(&mut ctx, bird_e), Err(BindError::NoVehicleInRange));
    assert_eq!(binding::board(&mut ctx, bird_e, far), Err(BindError::NoVehicleInRange));
    assert_eq!(binding::board(&mut ctx, bird_e, wall), Err(BindError::NotBoardable));
}

#[test]
fn test_interact_is_edge_triggered() {
    let mut engine = engine_with("Bird(0, 0)\nAllianceShip(1, 0)", SceneId::Editor);
    let held = InputFrame::with_keys([Key::Interact]);
    let none = InputFrame::default();

    engine.tick(DT, &held);
    let ship = engine.controlled().unwrap();
    assert_eq!(engine.context().kind(ship), Some(EntityKind::Ship));

    // Still held: no exit.
    engine.tick(DT, &held);
    assert_eq!(engine.controlled(), Some(ship));

    engine.tick(DT, &none);
    let snap = engine.tick(DT, &held);
    let bird_e = engine.controlled().unwrap();
    assert_eq!(engine.context().kind(bird_e), Some(EntityKind::Bird));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Disembarked { .. })));
}

#[test]
fn test_piloted_ship_thrusts_backward_and_fires() {
    let mut engine = engine_with("Bird(0, 0)\nAllianceShip(1, 0)", SceneId::Editor);
    engine.tick(DT, &InputFrame::with_keys([Key::Interact]));
    let ship = engine.controlled().unwrap();

    let forward = InputFrame::with_keys([Key::Forward]);
    for _ in 0..30 {
        engine.tick(DT, &forward);
    }
    let ctx = engine.context();
    assert!(ctx.world.get::<&Helm>(ship).unwrap().engines_on);
    assert!(ctx.position(ship).unwrap().x < 1.0, "thrust acts along -heading");

    let mut fire = InputFrame::default();
    fire.mouse.left = true;
    let snap = engine.tick(DT, &fire);
    let fired = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::LaserFired { .. }))
        .count();
    assert_eq!(fired, 2, "one beam per weapon tile");
}

#[test]
fn test_walking_controller_opens_nearby_door() {
    let mut ctx = context();
    let ship = spawn_ship(&mut ctx, Position::new(0.0, 0.0));
    // Anchor of the bottom-left door on the tile at (2, -2).
    let walker = spawn_bird(&mut ctx, Position::new(2.5, -1.04), 0, false);
    ctx.controlled = Some(walker);

    vehicle::update(&mut ctx, ship, DT);
    let tiles = ctx.world.get::<&TileSet>(ship).unwrap();
    assert!((tiles.tiles[0].doors[0].openness - 0.75).abs() < EPS);
    for door in &tiles.tiles[3].doors {
        assert_eq!(door.openness, 1.0);
    }
}

#[test]
fn test_follower_trails_leader() {
    let mut ctx = context();
    let leader = spawn_bird(&mut ctx, Position::new(0.0, 0.0), 1, false);
    let follower = spawn_bird(&mut ctx, Position::new(5.0, 0.0), 2, true);
    assert!(set_follower(&mut ctx, leader, follower));
    assert!(!set_follower(&mut ctx, leader, leader));

    bird::update(&mut ctx, leader, 0.5);
    let p = ctx.position(follower).unwrap();
    assert!((p.x - (5.0 - 4.0 * 0.8 * 0.5)).abs() < EPS);
    assert!(!ctx.world.get::<&Avatar>(follower).unwrap().flipped);
}

#[test]
fn test_destroyed_ship_ejects_occupant() {
    let mut ctx = context();
    let pilot = spawn_bird(&mut ctx, Position::new(0.0, 0.0), 0, false);
    let ship = spawn_ship(&mut ctx, Position::new(1.0, 0.0));
    binding::enter_vehicle(&mut ctx, pilot).unwrap();
    ctx.world.get::<&mut Health>(ship).unwrap().current = 0.0;

    assert_eq!(cleanup::purge_dead(&mut ctx), 1);
    assert_eq!(ctx.controlled, Some(pilot));
    assert_eq!(ctx.world.get::<&Avatar>(pilot).unwrap().boarded, None);
    assert_eq!(count_kind(&ctx, EntityKind::Explosion), 8);
}

// ---- Spawners ----

#[test]
fn test_enemy_mothership_burst_respects_cap() {
    let mut engine = engine_with("EnemyMotherShip(0, 0, 1, 3)", SceneId::Battle);
    engine.tick(DT, &InputFrame::default());
    assert_eq!(count_kind(engine.context(), EntityKind::EnemyCraft), 3);

    let mut engine = engine_with("EnemyMotherShip(0, 0, 1, 25)", SceneId::Battle);
    engine.tick(DT, &InputFrame::default());
    assert_eq!(count_kind(engine.context(), EntityKind::EnemyCraft), 10);
}

#[test]
fn test_spawners_idle_in_editor() {
    let mut engine = engine_with(
        "AllianceMotherShip(0, 0)\nEnemyMotherShip(50, 0, 1, 3)",
        SceneId::Editor,
    );
    for _ in 0..90 {
        engine.tick(DT, &InputFrame::default());
    }
    assert_eq!(count_kind(engine.context(), EntityKind::Ship), 0);
    assert_eq!(count_kind(engine.context(), EntityKind::EnemyCraft), 0);
}

#[test]
fn test_alliance_mothership_fills_quota() {
    let mut engine = engine_with("AllianceMotherShip(0, 0)", SceneId::Battle);
    for _ in 0..150 {
        engine.tick(DT, &InputFrame::default());
    }
    assert_eq!(count_kind(engine.context(), EntityKind::Ship), 2);
}

// ---- Engine ----

#[test]
fn test_pause_freezes_time() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_scene(SceneId::Editor);
    engine.tick(DT, &InputFrame::default());
    engine.queue_command(SimCommand::Pause);
    let paused = engine.tick(DT, &InputFrame::default());
    assert_eq!(paused.phase, SimPhase::Paused);
    assert_eq!(paused.time.tick, 1);
    engine.queue_command(SimCommand::Resume);
    assert_eq!(engine.tick(DT, &InputFrame::default()).time.tick, 2);
}

#[test]
fn test_frame_dt_is_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_scene(SceneId::Editor);
    let snap = engine.tick(10.0, &InputFrame::default());
    assert!((snap.time.elapsed_secs - 0.25).abs() < EPS);
}

#[test]
fn test_scene_change_clears_world() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.load_scene(SceneId::Battle);
    let before = engine.registry().len();
    engine.load_level(&LevelDescription::parse("Bird(1, 1)").unwrap(), SceneId::Editor);
    assert!(before > 1);
    assert_eq!(engine.registry().len(), 1);
    assert_eq!(engine.world().len(), 1);
    assert_eq!(engine.scene(), Some(SceneId::Editor));
}

#[test]
fn test_free_camera_pans_without_controlled_entity() {
    let mut engine = engine_with("CollisionWall(0, 0, 5, 0)", SceneId::Editor);
    let snap = engine.tick(DT, &InputFrame::with_keys([Key::Right]));
    assert!(snap.controlled.is_none());
    assert!(snap.camera.focus.x > 0.0);
    assert_eq!(snap.camera.focus.y, 0.0);
}

// ---- Camera ----

#[test]
fn test_camera_zoom_moves_halfway() {
    let mut cam = Camera::new(600.0, 600.0);
    cam.goto_height = 1.0;
    cam.update(-1.0, None);
    assert!((cam.goto_height - 1.2).abs() < EPS);
    assert!((cam.height - 1.1).abs() < EPS);
}

#[test]
fn test_camera_respects_limits() {
    let mut cam = Camera::new(600.0, 600.0);
    cam.goto_height = 3.0;
    cam.update(0.0, Some(1.5));
    assert_eq!(cam.goto_height, 1.5);
    cam.goto_height = 0.0001;
    cam.update(0.0, None);
    assert_eq!(cam.goto_height, 0.005);
}

#[test]
fn test_screen_world_round_trip() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.focus = Position::new(-12.5, 7.25);
    cam.height = 0.037;
    for p in [
        Position::new(0.0, 0.0),
        Position::new(-582.0, -24.0),
        Position::new(3.3, 99.9),
    ] {
        let back = cam.screen_to_world(cam.world_to_screen(&p));
        assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
    }
    assert!((cam.scale_to_world(cam.scale_to_screen(2.0)) - 2.0).abs() < EPS);
}

#[test]
fn test_cull_bounds_cover_viewport() {
    let mut cam = Camera::new(600.0, 600.0);
    cam.height = 0.1;
    cam.goto_height = 0.1;
    cam.update(0.0, None);
    let cull = cam.cull();
    assert!(cull.contains(&cam.focus));
    assert!(cam.is_visible(&Position::new(cam.focus.x - 31.0, cam.focus.y)));
    assert!(!cam.is_visible(&Position::new(cam.focus.x + 1000.0, cam.focus.y)));
}

// ---- Draw ----

#[derive(Default)]
struct RecordingCanvas {
    frames: usize,
    lines: usize,
    circles: usize,
    ellipses: usize,
    polygons: usize,
    rects: usize,
    images: Vec<Sprite>,
    texts: Vec<String>,
}

impl Canvas for RecordingCanvas {
    fn begin_frame(&mut self, _cull: &CullBounds) {
        self.frames += 1;
    }
    fn line(&mut self, _a: DVec2, _b: DVec2, _color: Rgb, _width: f64) {
        self.lines += 1;
    }
    fn circle(&mut self, _center: DVec2, _radius: f64, _color: Rgb) {
        self.circles += 1;
    }
    fn ellipse_outline(&mut self, _c: DVec2, _rx: f64, _ry: f64, _color: Rgb, _w: f64) {
        self.ellipses += 1;
    }
    fn polygon(&mut self, _points: &[DVec2], _color: Rgb) {
        self.polygons += 1;
    }
    fn rect(&mut self, _min: DVec2, _size: DVec2, _color: Rgb) {
        self.rects += 1;
    }
    fn image(&mut self, sprite: Sprite, _at: DVec2, _size: f64, _rot: f64, _flipped: bool) {
        self.images.push(sprite);
    }
    fn text(&mut self, _at: DVec2, text: &str, _color: Rgb) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn test_draw_issues_one_call_set_per_entity() {
    let engine = {
        let mut e = engine_with(
            "CollisionWall(0, 0, 4, 0)\nShields(0, 0, 3, 2, Enemy)\nRectRoom(0, 0, 2, 2)\nBird(0, 5, 2)",
            SceneId::Editor,
        );
        e.tick(DT, &InputFrame::default());
        e
    };
    let mut canvas = RecordingCanvas::default();
    engine.draw(&mut canvas);
    assert_eq!(canvas.frames, 1);
    assert_eq!(canvas.lines, 1);
    assert_eq!(canvas.ellipses, 1);
    assert_eq!(canvas.rects, 1);
    assert_eq!(canvas.images, vec![Sprite::Bird(2)]);
    assert!(canvas.texts.is_empty());
}

#[test]
fn test_draw_ship_tiles_and_boarding_hint() {
    let mut engine = engine_with("Bird(0, 0)\nAllianceShip(1, 0)", SceneId::Editor);
    engine.tick(DT, &InputFrame::default());
    let mut canvas = RecordingCanvas::default();
    engine.draw(&mut canvas);
    let tiles = canvas
        .images
        .iter()
        .filter(|s| matches!(s, Sprite::Tile(_)))
        .count();
    assert_eq!(tiles, 8);
    // Two leaves per door.
    assert_eq!(canvas.lines, 22);
    assert_eq!(canvas.texts.len(), 1);
}
