//! Draw pass.
//!
//! The simulation never talks to a window. It issues pixel-space primitives
//! to a `Canvas` implemented by the host; `WorldCanvas` maps world
//! coordinates through the camera first. Culling is left to the backend,
//! which receives the cull rectangle at the start of every frame.

use glam::DVec2;
use hecs::Entity;

use birdspace_core::components::*;
use birdspace_core::constants::*;
use birdspace_core::enums::{EntityKind, Team, TileKind};
use birdspace_core::geometry::{door_geometry, ENGINE_FLAME};
use birdspace_core::state::CullBounds;
use birdspace_core::types::{Pose, Position};

use crate::camera::Camera;
use crate::context::SimContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const ALLIANCE_LASER: Rgb = Rgb(0x40, 0xe0, 0xff);
    pub const ENEMY_LASER: Rgb = Rgb(0xff, 0x30, 0x30);
    pub const EXPLOSION: Rgb = Rgb(0xff, 0xa0, 0x20);
    pub const WALL: Rgb = Rgb(0x06, 0x02, 0x70);
    pub const ROOM: Rgb = Rgb(0x20, 0x20, 0x38);
    pub const TURRET: Rgb = Rgb(0x60, 0x60, 0x70);
    pub const BARREL: Rgb = Rgb(0x33, 0x33, 0x33);
    pub const DOOR: Rgb = Rgb(0x90, 0x90, 0xa0);
    pub const FLAME: Rgb = Rgb(0xff, 0x80, 0x00);
    pub const ALLIANCE_HULL: Rgb = Rgb(0x30, 0x40, 0x90);
    pub const ENEMY_HULL: Rgb = Rgb(0x70, 0x20, 0x20);
    pub const TEXT: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Team tint scaled by a 0..=255 brightness.
    pub fn shield(team: Team, brightness: u8) -> Rgb {
        let scale = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
        match team {
            Team::Alliance => Rgb(scale(0x40), scale(0x80), scale(0xff)),
            Team::Enemy => Rgb(scale(0xff), scale(0x40), scale(0x40)),
        }
    }
}

/// Image assets the host is expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Tile(TileKind),
    Bird(u8),
    EnemyCraft,
    TurretStation,
    Decoration(u8),
}

/// Rendering backend. All coordinates and lengths are screen pixels.
pub trait Canvas {
    fn begin_frame(&mut self, _cull: &CullBounds) {}
    fn line(&mut self, a: DVec2, b: DVec2, color: Rgb, width: f64);
    fn circle(&mut self, center: DVec2, radius: f64, color: Rgb);
    fn ellipse_outline(&mut self, center: DVec2, rx: f64, ry: f64, color: Rgb, width: f64);
    fn polygon(&mut self, points: &[DVec2], color: Rgb);
    fn rect(&mut self, min: DVec2, size: DVec2, color: Rgb);
    /// Draw `sprite` centered at `at`, `size` pixels wide.
    fn image(&mut self, sprite: Sprite, at: DVec2, size: f64, rotation: f64, flipped: bool);
    fn text(&mut self, at: DVec2, text: &str, color: Rgb);
}

/// World-coordinate view over a `Canvas`.
pub struct WorldCanvas<'a, C: Canvas + ?Sized> {
    camera: &'a Camera,
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> WorldCanvas<'a, C> {
    pub fn new(camera: &'a Camera, canvas: &'a mut C) -> Self {
        Self { camera, canvas }
    }

    fn px(&self, p: &Position) -> DVec2 {
        self.camera.world_to_screen(p)
    }

    fn len(&self, l: f64) -> f64 {
        self.camera.scale_to_screen(l)
    }

    pub fn line(&mut self, a: &Position, b: &Position, color: Rgb, width: f64) {
        let (a, b, w) = (self.px(a), self.px(b), self.len(width));
        self.canvas.line(a, b, color, w);
    }

    pub fn circle(&mut self, center: &Position, radius: f64, color: Rgb) {
        let (c, r) = (self.px(center), self.len(radius));
        self.canvas.circle(c, r, color);
    }

    pub fn ellipse_outline(&mut self, center: &Position, w: f64, h: f64, color: Rgb, width: f64) {
        let (c, rx, ry, t) = (self.px(center), self.len(w), self.len(h), self.len(width));
        self.canvas.ellipse_outline(c, rx, ry, color, t);
    }

    pub fn polygon(&mut self, points: &[Position], color: Rgb) {
        let pts: Vec<DVec2> = points.iter().map(|p| self.px(p)).collect();
        self.canvas.polygon(&pts, color);
    }

    pub fn rect(&mut self, min: &Position, max: &Position, color: Rgb) {
        let (a, b) = (self.px(min), self.px(max));
        self.canvas.rect(a, b - a, color);
    }

    pub fn image(&mut self, sprite: Sprite, at: &Position, size: f64, rotation: f64, flipped: bool) {
        let (p, s) = (self.px(at), self.len(size));
        self.canvas.image(sprite, p, s, rotation, flipped);
    }
}

/// Draw every live entity in registry order.
pub fn draw_world<C: Canvas + ?Sized>(ctx: &SimContext, canvas: &mut C) {
    canvas.begin_frame(&ctx.camera.cull());
    {
        let mut out = WorldCanvas::new(&ctx.camera, &mut *canvas);
        for entity in ctx.registry.iter() {
            draw_entity(ctx, entity, &mut out);
        }
    }
    draw_hint(ctx, canvas);
}

fn draw_entity<C: Canvas + ?Sized>(ctx: &SimContext, entity: Entity, out: &mut WorldCanvas<'_, C>) {
    let (Some(kind), Some(pos)) = (ctx.kind(entity), ctx.position(entity)) else {
        return;
    };
    let pose = ctx.world.get::<&Pose>(entity).map(|p| *p).unwrap_or_default();
    let world = &ctx.world;

    match kind {
        EntityKind::Ship => {
            let engines_on = world.get::<&Helm>(entity).map(|h| h.engines_on).unwrap_or(false);
            if let Ok(set) = world.get::<&TileSet>(entity) {
                for tile in &set.tiles {
                    draw_tile(tile, &pose, &pos, engines_on, out);
                }
            }
        }
        EntityKind::EnemyCraft => {
            out.image(Sprite::EnemyCraft, &pos, ENEMY_CRAFT_HIT_RADIUS, pose.theta, false);
        }
        EntityKind::Turret => {
            let barrel = pose.to_world(&pos, DVec2::new(TURRET_BARREL_LENGTH, 0.0));
            let base = pose.to_world(&pos, DVec2::new(TURRET_BASE_LENGTH, 0.0));
            out.circle(&pos, TURRET_RADIUS, Rgb::TURRET);
            out.line(&pos, &barrel, Rgb::BARREL, TURRET_BARREL_WIDTH);
            out.line(&pos, &base, Rgb::BARREL, TURRET_BASE_WIDTH);
        }
        EntityKind::TurretStation => {
            out.image(Sprite::TurretStation, &pos, STATION_SIZE, 0.0, false);
        }
        EntityKind::Bird => {
            if let Ok(avatar) = world.get::<&Avatar>(entity) {
                out.image(Sprite::Bird(avatar.variant), &pos, avatar.size, 0.0, avatar.flipped);
            }
        }
        EntityKind::Laser => {
            if let Ok(beam) = world.get::<&Laser>(entity) {
                let color = match beam.team {
                    Team::Alliance => Rgb::ALLIANCE_LASER,
                    Team::Enemy => Rgb::ENEMY_LASER,
                };
                out.line(&pos, &beam.tip, color, LASER_WIDTH);
            }
        }
        EntityKind::Shield => {
            let team = world.get::<&Team>(entity).map(|t| *t).unwrap_or_default();
            let brightness = world.get::<&ShieldGlow>(entity).map(|g| g.brightness).unwrap_or(0);
            if let Ok(HitRegion::Ellipse { w: rx, h: ry }) = world.get::<&HitRegion>(entity).map(|r| *r) {
                out.ellipse_outline(&pos, rx, ry, Rgb::shield(team, brightness), SHIELD_THICKNESS);
            }
        }
        EntityKind::Explosion => {
            if let Ok(e) = world.get::<&Explosion>(entity) {
                out.circle(&pos, e.size, Rgb::EXPLOSION);
            }
        }
        EntityKind::AllianceMothership | EntityKind::EnemyMothership => {
            let color = if kind == EntityKind::AllianceMothership {
                Rgb::ALLIANCE_HULL
            } else {
                Rgb::ENEMY_HULL
            };
            if let Ok(hull) = world.get::<&Hull>(entity) {
                let points: Vec<Position> =
                    hull.points.iter().map(|p| pos.offset(p.x, p.y)).collect();
                out.polygon(&points, color);
            }
        }
        EntityKind::Wall => {
            if let Ok(wall) = world.get::<&Wall>(entity) {
                out.line(&pos, &wall.end, Rgb::WALL, 0.1);
            }
        }
        EntityKind::Decoration => {
            if let Ok(d) = world.get::<&Decoration>(entity) {
                out.image(Sprite::Decoration(d.index), &pos, 1.0, 0.0, false);
            }
        }
        EntityKind::Room => {
            if let Ok(room) = world.get::<&Room>(entity) {
                out.rect(&pos, &room.end, Rgb::ROOM);
            }
        }
    }
}

fn draw_tile<C: Canvas + ?Sized>(
    tile: &Tile,
    pose: &Pose,
    origin: &Position,
    engines_on: bool,
    out: &mut WorldCanvas<'_, C>,
) {
    let center = tile.world_point(pose, origin, DVec2::new(TILE_SIZE / 2.0, 0.5));
    out.image(Sprite::Tile(tile.kind), &center, TILE_SIZE, pose.theta, false);

    if engines_on && tile.kind == TileKind::Engine {
        let flame: Vec<Position> = ENGINE_FLAME
            .iter()
            .map(|&(x, y)| tile.world_point(pose, origin, DVec2::new(x, y)))
            .collect();
        out.polygon(&flame, Rgb::FLAME);
    }

    let half = DOOR_OPEN_AMOUNT / 2.0;
    for door in &tile.doors {
        let g = door_geometry(door.side);
        let extent = half * door.openness;
        for end in [g.end_a, g.end_b] {
            let inward = (g.anchor - end).normalize_or_zero() * extent;
            let a = tile.world_point(pose, origin, end);
            let b = tile.world_point(pose, origin, end + inward);
            out.line(&a, &b, Rgb::DOOR, DOOR_THICKNESS);
        }
    }
}

/// Prompt shown while the walking controller stands next to a vehicle.
fn draw_hint<C: Canvas + ?Sized>(ctx: &SimContext, canvas: &mut C) {
    let Some(bird) = ctx.controlled else {
        return;
    };
    let offered = ctx
        .world
        .get::<&Avatar>(bird)
        .map(|a| a.boarded.is_none() && a.nearest_vehicle.is_some())
        .unwrap_or(false);
    if offered {
        let (_, h) = ctx.camera.viewport();
        canvas.text(DVec2::new(20.0, h - 40.0), "Return: enter vehicle", Rgb::TEXT);
    }
}
