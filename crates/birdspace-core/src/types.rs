//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (world units, y grows downward on screen).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Heading of a rotating entity with its trigonometry cached once per frame.
///
/// Every child placement (tiles, doors, cockpit, weapon points) reads the cached
/// `sin`/`cos` instead of recomputing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Heading in radians. Unbounded; wraps naturally through sin/cos.
    pub theta: f64,
    pub sin: f64,
    pub cos: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frame number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle from this position toward another, `atan2(dy, dx)`.
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        p.to_vec()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Pose {
    pub fn new(theta: f64) -> Self {
        Self {
            theta,
            sin: theta.sin(),
            cos: theta.cos(),
        }
    }

    pub fn set_heading(&mut self, theta: f64) {
        self.theta = theta;
        self.refresh();
    }

    /// Recompute the cached trigonometry from `theta`.
    pub fn refresh(&mut self) {
        self.sin = self.theta.sin();
        self.cos = self.theta.cos();
    }

    /// Unit rotation vector `(cos θ, sin θ)`.
    pub fn rotation(&self) -> DVec2 {
        DVec2::new(self.cos, self.sin)
    }

    /// Place a parent-relative offset in world space:
    /// `x' = px + ox·cosθ − oy·sinθ`, `y' = py + oy·cosθ + ox·sinθ`.
    pub fn to_world(&self, origin: &Position, offset: DVec2) -> Position {
        Position::from(origin.to_vec() + self.rotation().rotate(offset))
    }

    /// Velocity of a tile-built vehicle: thrust acts along the negative heading axis.
    pub fn reverse_thrust_velocity(&self, speed: f64) -> DVec2 {
        DVec2::new(-self.cos * speed, -self.sin * speed)
    }

    /// Velocity along the positive heading axis (nose-first craft and projectiles).
    pub fn forward_velocity(&self, speed: f64) -> DVec2 {
        DVec2::new(self.cos * speed, self.sin * speed)
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
