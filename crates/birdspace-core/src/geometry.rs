//! Static geometry tables: door placement, the basic ship layout and
//! mothership hull outlines.
//!
//! Tables are indexed by enums so an out-of-range lookup cannot be expressed.

use glam::DVec2;

use crate::components::Tile;
use crate::types::Position;
use crate::constants::{DOOR_LENGTH, DOOR_THICKNESS};
use crate::enums::{DoorSide, TileKind};

/// Strict circular overlap: `distance(point, center) < radius`.
pub fn point_in_circle(point: &Position, center: &Position, radius: f64) -> bool {
    point.distance_to(center) < radius
}

/// Axis-aligned elliptical overlap: `((x-cx)/w)^2 + ((y-cy)/h)^2 <= 1`.
pub fn point_in_ellipse(point: &Position, center: &Position, w: f64, h: f64) -> bool {
    if w <= 0.0 || h <= 0.0 {
        return false;
    }
    let nx = (point.x - center.x) / w;
    let ny = (point.y - center.y) / h;
    nx * nx + ny * ny <= 1.0
}

/// Tile-local placement of a door.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    /// Center of the doorway; proximity is measured from here.
    pub anchor: DVec2,
    /// Outer end of the first leaf.
    pub end_a: DVec2,
    /// Outer end of the second leaf.
    pub end_b: DVec2,
    /// Leaves slide along y when true, along x otherwise.
    pub vertical: bool,
}

pub fn door_geometry(side: DoorSide) -> DoorGeometry {
    let (t, l) = (DOOR_THICKNESS, DOOR_LENGTH);
    let horizontal = |cx: f64, cy: f64| DoorGeometry {
        anchor: DVec2::new(cx, cy),
        end_a: DVec2::new(cx - l, cy),
        end_b: DVec2::new(cx + l, cy),
        vertical: false,
    };
    let vertical = |cx: f64, cy: f64| DoorGeometry {
        anchor: DVec2::new(cx, cy),
        end_a: DVec2::new(cx, cy - l),
        end_b: DVec2::new(cx, cy + l),
        vertical: true,
    };

    match side {
        DoorSide::TopLeft => horizontal(0.5, t),
        DoorSide::TopRight => horizontal(1.5, t),
        DoorSide::Right => vertical(2.0 - t, 0.5),
        DoorSide::BottomRight => horizontal(1.5, 1.0 - t),
        DoorSide::BottomLeft => horizontal(0.5, 1.0 - t),
        DoorSide::Left => vertical(t, 0.5),
    }
}

/// Tile layout of the standard alliance ship.
pub fn basic_ship_tiles() -> Vec<Tile> {
    use DoorSide::*;
    use TileKind::*;

    vec![
        Tile::new(2.0, -2.0, WeaponRight, &[BottomLeft]),
        Tile::new(1.0, -1.0, AllPurpose, &[TopRight, BottomRight, BottomLeft]),
        Tile::new(3.0, -1.0, Engine, &[]),
        Tile::new(0.0, 0.0, Control, &[TopRight, BottomRight]),
        Tile::new(2.0, 0.0, AllPurpose, &[TopLeft, Right]),
        Tile::new(1.0, 1.0, AllPurpose, &[TopLeft, BottomRight]),
        Tile::new(3.0, 1.0, Engine, &[]),
        Tile::new(2.0, 2.0, WeaponLeft, &[TopLeft]),
    ]
}

/// Tile-local triangle of an engine flame.
pub const ENGINE_FLAME: [(f64, f64); 3] = [(2.5, 0.5), (2.0, 0.1), (2.0, 0.9)];

/// Elongated hexagon of the alliance mothership.
pub fn alliance_hull(size: f64, width: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, -size * 1.1),
        DVec2::new(width, -size),
        DVec2::new(width, size),
        DVec2::new(0.0, size * 1.1),
        DVec2::new(-width, size),
        DVec2::new(-width, -size),
    ]
}

/// Octagon of the enemy mothership.
pub fn enemy_hull(size: f64) -> Vec<DVec2> {
    let (a, b) = (size * 1.5, size * 1.1);
    vec![
        DVec2::new(0.0, -a),
        DVec2::new(b, -b),
        DVec2::new(a, 0.0),
        DVec2::new(b, b),
        DVec2::new(0.0, a),
        DVec2::new(-b, b),
        DVec2::new(-a, 0.0),
        DVec2::new(-b, -b),
    ]
}
