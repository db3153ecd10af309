//! Simulation constants and tuning parameters.

/// Nominal frame rate of the game-loop driver (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per nominal frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Upper bound on the frame delta fed to control logic (seconds).
pub const CONTROL_MAX_DT: f64 = 0.1;

// --- Combat ---

/// Health removed by one laser hit.
pub const LASER_DAMAGE: f64 = 1.0;

pub const LASER_SPEED: f64 = 120.0;

/// Visual length of the beam segment.
pub const LASER_LENGTH: f64 = 2.0;

pub const LASER_WIDTH: f64 = 0.03;

/// Seconds a laser lives before expiring.
pub const LASER_LIFESPAN: f64 = 5.0;

pub const EXPLOSION_START_SIZE: f64 = 0.1;
pub const EXPLOSION_GROWTH: f64 = 2.0;
pub const EXPLOSION_LIFESPAN: f64 = 0.5;

// --- Shields ---

pub const SHIELD_HEALTH: f64 = 100.0;
pub const SHIELD_REGEN: f64 = 8.0;
pub const SHIELD_THICKNESS: f64 = 0.2;
pub const SHIELD_MAX_BRIGHTNESS: u8 = 255;

/// Brightness lost per second after a flare.
pub const SHIELD_FADE_RATE: f64 = 255.0 * 2.0;

// --- Alliance ship ---

pub const SHIP_HEALTH: f64 = 20.0;
pub const SHIP_HIT_RADIUS: f64 = 3.0;
pub const SHIP_MAX_SPEED: f64 = 20.0;
pub const SHIP_ACCELERATION: f64 = 5.0;

/// Upper bound on the per-frame throttle smoothing factor.
pub const SHIP_MAX_THROTTLE_STEP: f64 = 0.5;
pub const SHIP_ROT_SPEED: f64 = 1.0;
pub const SHIP_FIRE_INTERVAL: f64 = 0.1;
pub const SHIP_COCKPIT_OFFSET: (f64, f64) = (0.25, 0.5);
pub const SHIP_MAX_CAM_HEIGHT: f64 = 1.0;

/// Tile-local point weapons discharge from (center of a 2×1 tile).
pub const TILE_MUZZLE: (f64, f64) = (1.0, 0.5);

/// Tile sprite width in world units.
pub const TILE_SIZE: f64 = 2.0;

// --- Doors ---

pub const DOOR_THICKNESS: f64 = 0.04;
pub const DOOR_LENGTH: f64 = 0.4;
pub const DOOR_OPEN_AMOUNT: f64 = 0.8;

/// Distance from a door anchor within which the controller opens it.
pub const DOOR_OPEN_RADIUS: f64 = 0.35;
pub const DOOR_OPEN_SMOOTHING: f64 = 0.25;
pub const DOOR_CLOSE_SMOOTHING: f64 = 0.75;

// --- Enemy craft ---

pub const ENEMY_CRAFT_HEALTH: f64 = 10.0;
pub const ENEMY_CRAFT_HIT_RADIUS: f64 = 8.0;
pub const ENEMY_CRAFT_SPEED: f64 = 20.0;

/// Lateral spacing of the twin guns from the craft center, along the heading.
pub const ENEMY_CRAFT_GUN_OFFSET: f64 = 0.5;

/// Number of explosions scattered when an enemy craft is destroyed.
pub const ENEMY_CRAFT_DEBRIS: usize = 5;

// --- Turrets ---

pub const TURRET_RADIUS: f64 = 1.45;
pub const TURRET_BARREL_LENGTH: f64 = 1.7;
pub const TURRET_BARREL_WIDTH: f64 = 0.1;
pub const TURRET_BASE_LENGTH: f64 = 0.5;
pub const TURRET_BASE_WIDTH: f64 = 0.7;

pub const STATION_SIZE: f64 = 1.0;
pub const STATION_MAX_CAM_HEIGHT: f64 = 1.5;

/// Per-frame smoothing of the piloted station's camera aim point.
pub const STATION_AIM_SMOOTHING: f64 = 0.2;

/// Vertical mouse sweep mapped onto the aim angle.
pub const STATION_AIM_SWEEP: f64 = 2.5;

/// Maximum distance of the aim point from the turret (world units).
pub const STATION_AIM_REACH: f64 = 850.0;

// --- Birds ---

pub const BIRD_SIZE: f64 = 0.65;
pub const BIRD_SPEED: f64 = 4.0;
pub const BIRD_MAX_CAM_HEIGHT: f64 = 0.04;

/// Vehicles farther than this are never offered for boarding.
pub const BOARDING_RANGE: f64 = 3.0;
pub const FOLLOWER_DISTANCE: f64 = 1.0;

/// Follower speed as a fraction of the leader's speed.
pub const FOLLOWER_SPEED_FACTOR: f64 = 0.8;

// --- Motherships ---

pub const ALLIANCE_SPAWN_INTERVAL: f64 = 1.0;

/// Alliance mothership keeps at least this many ships in play.
pub const ALLIANCE_SHIP_QUOTA: usize = 2;
pub const ENEMY_SPAWN_INTERVAL: f64 = 30.0;

/// Enemy mothership stops spawning at this many damageable entities.
pub const ENEMY_SPAWN_CAP: usize = 10;

// --- Camera ---

pub const CAMERA_SMOOTHING: f64 = 0.5;
pub const CAMERA_ZOOM_OUT: f64 = 1.2;
pub const CAMERA_ZOOM_IN: f64 = 0.8;
pub const CAMERA_MIN_HEIGHT: f64 = 0.005;
pub const CAMERA_START_HEIGHT: f64 = 1.0;
pub const CAMERA_START_GOTO_HEIGHT: f64 = 0.015;

/// Fraction of the half-width panned per frame in free-camera mode.
pub const CAMERA_PAN_STEP: f64 = 0.1;

/// Cull margins in world units: (left, top, right, bottom).
pub const CULL_MARGIN: (f64, f64, f64, f64) = (2.0, 1.0, 1.0, 1.0);
