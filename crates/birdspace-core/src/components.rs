//! ECS components for hecs entities.
//!
//! Components are plain data. `EntityKind` and `Team` from `enums` are also
//! attached directly as components. Behavior lives in the sim crate's systems.

use glam::DVec2;
use hecs::Entity;

use crate::constants::*;
use crate::enums::*;
use crate::geometry::{point_in_circle, point_in_ellipse};
use crate::types::{Pose, Position};

/// Hit points. Invariant: `current <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    /// Passive regeneration per second (0 for most entities).
    pub regen: f64,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self {
            current: max,
            max,
            regen: 0.0,
        }
    }

    pub fn with_regen(max: f64, regen: f64) -> Self {
        Self {
            current: max,
            max,
            regen,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Region a projectile point is tested against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitRegion {
    Circle { radius: f64 },
    /// Axis-aligned ellipse with half-extents `w` and `h`.
    Ellipse { w: f64, h: f64 },
}

impl HitRegion {
    /// Whether `point` overlaps this region centered at `center`.
    pub fn contains(&self, center: &Position, point: &Position) -> bool {
        match *self {
            HitRegion::Circle { radius } => point_in_circle(point, center, radius),
            HitRegion::Ellipse { w, h } => point_in_ellipse(point, center, w, h),
        }
    }
}

/// Kinematic drive of a pilotable tile-built ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Helm {
    pub speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub rot_speed: f64,
    pub engines_on: bool,
    pub fire_cooldown: f64,
    pub fire_interval: f64,
}

impl Default for Helm {
    fn default() -> Self {
        Self {
            speed: 0.0,
            max_speed: SHIP_MAX_SPEED,
            acceleration: SHIP_ACCELERATION,
            rot_speed: SHIP_ROT_SPEED,
            engines_on: false,
            fire_cooldown: 0.0,
            fire_interval: SHIP_FIRE_INTERVAL,
        }
    }
}

/// Seat that a single controller may occupy.
#[derive(Debug, Clone, PartialEq)]
pub struct Cockpit {
    /// Non-owning reference to the bound controller.
    pub occupant: Option<Entity>,
    /// Parent-relative seat offset the occupant is slaved to.
    pub seat: DVec2,
    /// World offset applied to the controller on exit.
    pub exit_offset: DVec2,
}

/// Largest camera height the camera may use while this entity is controlled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimit {
    pub max_height: f64,
}

/// A door on a tile edge; `openness` is 0 when open and 1 when closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub side: DoorSide,
    pub openness: f64,
}

impl Door {
    pub fn closed(side: DoorSide) -> Self {
        Self {
            side,
            openness: 1.0,
        }
    }

    /// Exponentially approach open (0) or closed (1).
    pub fn animate(&mut self, open: bool) {
        if open {
            self.openness += (0.0 - self.openness) * DOOR_OPEN_SMOOTHING;
        } else {
            self.openness += (1.0 - self.openness) * DOOR_CLOSE_SMOOTHING;
        }
    }
}

/// A 2×1 modular ship part, owned by exactly one ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Offset of the tile's top-left corner in the parent frame.
    pub offset: DVec2,
    pub kind: TileKind,
    pub doors: Vec<Door>,
}

impl Tile {
    pub fn new(x: f64, y: f64, kind: TileKind, doors: &[DoorSide]) -> Self {
        Self {
            offset: DVec2::new(x, y),
            kind,
            doors: doors.iter().copied().map(Door::closed).collect(),
        }
    }

    /// World position of a tile-local point on a ship at `origin` with `pose`.
    pub fn world_point(&self, pose: &Pose, origin: &Position, local: DVec2) -> Position {
        pose.to_world(origin, self.offset + local)
    }
}

/// The tiles of a ship. Dropped together with the ship.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSet {
    pub tiles: Vec<Tile>,
}

/// Laser projectile state. `Position` is the hit-test point.
#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    pub team: Team,
    /// Entity that fired the beam; never struck by it.
    pub origin: Option<Entity>,
    pub velocity: DVec2,
    /// Drawn end of the beam, `LASER_LENGTH` ahead of the hit-test point.
    pub tip: Position,
    pub lifespan: f64,
}

/// Shield flare intensity, reset to full on every strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldGlow {
    pub brightness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub size: f64,
    pub lifespan: f64,
}

impl Default for Explosion {
    fn default() -> Self {
        Self {
            size: EXPLOSION_START_SIZE,
            lifespan: EXPLOSION_LIFESPAN,
        }
    }
}

/// Cooldown-gated weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gun {
    pub cooldown: f64,
    pub interval: f64,
}

/// Autonomous targeting state.
#[derive(Debug, Clone, PartialEq)]
pub struct Targeting {
    pub archetype: AiArchetype,
    pub target: Option<Entity>,
    pub retarget_cooldown: f64,
    pub state: AiState,
}

/// Forward cruise speed of a nose-first craft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cruise {
    pub speed: f64,
}

/// Turret end of the station/turret association.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurretMount {
    pub station: Option<Entity>,
}

/// Station end of the station/turret association.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLink {
    pub turret: Option<Entity>,
    /// Aim angle reported to the turret.
    pub aim: f64,
    /// Smoothed camera focus while piloted.
    pub aim_point: Position,
}

/// Controller avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub speed: f64,
    pub size: f64,
    pub flipped: bool,
    pub variant: u8,
    /// Closest unoccupied boardable vehicle within range, refreshed each frame.
    pub nearest_vehicle: Option<Entity>,
    /// Vehicle this controller currently occupies.
    pub boarded: Option<Entity>,
    pub follower: Option<Entity>,
    pub follower_distance: f64,
}

impl Avatar {
    pub fn new(variant: u8, flipped: bool) -> Self {
        Self {
            speed: BIRD_SPEED,
            size: BIRD_SIZE,
            flipped,
            variant,
            nearest_vehicle: None,
            boarded: None,
            follower: None,
            follower_distance: FOLLOWER_DISTANCE,
        }
    }
}

/// Marks vehicles a controller may board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boardable;

/// Axis-aligned wall segment from the entity `Position` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub end: Position,
}

/// Periodic spawner attached to a mothership.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub cooldown: f64,
    pub interval: f64,
    /// Craft released at once on the next eligible frame.
    pub burst: u32,
}

/// Filled polygon outline relative to the entity position.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    pub points: Vec<DVec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub index: u8,
}

/// Filled rectangle from the entity `Position` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    pub end: Position,
}
