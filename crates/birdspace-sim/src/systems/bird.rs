//! Bird update: vehicle proximity, wall collision and follower trailing.

use hecs::Entity;

use birdspace_core::components::{Avatar, Wall};
use birdspace_core::constants::FOLLOWER_SPEED_FACTOR;
use birdspace_core::types::Position;

use crate::context::SimContext;
use crate::systems::binding::nearest_boardable;

pub fn update(ctx: &mut SimContext, bird: Entity, dt: f64) {
    let Ok((boarded, size, speed, follower, follower_distance)) =
        ctx.world.get::<&Avatar>(bird).map(|a| {
            (
                a.boarded.is_some(),
                a.size,
                a.speed,
                a.follower,
                a.follower_distance,
            )
        })
    else {
        return;
    };
    if boarded {
        return;
    }
    let Some(mut pos) = ctx.position(bird) else {
        return;
    };

    let nearest = nearest_boardable(ctx, &pos);
    if let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(bird) {
        avatar.nearest_vehicle = nearest;
    }

    for (_, (start, wall)) in ctx.world.query::<(&Position, &Wall)>().iter() {
        pos = push_out_of_wall(pos, size, start, &wall.end);
    }
    ctx.set_position(bird, pos);

    if let Some(follower) = follower.filter(|f| ctx.is_alive(*f)) {
        trail(ctx, follower, &pos, speed * FOLLOWER_SPEED_FACTOR, follower_distance, dt);
    }
}

/// Move `follower` toward `leader` while it is farther than `distance`,
/// turning its sprite to face the leader.
fn trail(ctx: &mut SimContext, follower: Entity, leader: &Position, speed: f64, distance: f64, dt: f64) {
    let Some(pos) = ctx.position(follower) else {
        return;
    };
    let (dx, dy) = (leader.x - pos.x, leader.y - pos.y);
    if (dx * dx + dy * dy).sqrt() > distance {
        let angle = dy.atan2(dx);
        ctx.set_position(
            follower,
            pos.offset(angle.cos() * speed * dt, angle.sin() * speed * dt),
        );
    }
    if let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(follower) {
        avatar.flipped = dx > 0.0;
    }
}

/// Push a body of half-extent `size` out of an axis-aligned wall segment
/// from `start` to `end` (coordinates already ordered).
pub fn push_out_of_wall(mut pos: Position, size: f64, start: &Position, end: &Position) -> Position {
    if start.x == end.x {
        if pos.y + size <= start.y || pos.y >= end.y {
            return pos;
        }
        if pos.x + size > start.x && pos.x - size < start.x {
            pos.x = if pos.x < start.x {
                start.x - size
            } else {
                start.x + size
            };
        }
    } else {
        if pos.x + size <= start.x || pos.x >= end.x {
            return pos;
        }
        if pos.y + size > start.y && pos.y - size < start.y {
            pos.y = if pos.y < start.y {
                start.y - size
            } else {
                start.y + size
            };
        }
    }
    pos
}
