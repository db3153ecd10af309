//! Modular ship update: kinematics, seated occupant and door animation.

use glam::DVec2;
use hecs::Entity;

use birdspace_core::components::{Avatar, Cockpit, Helm, TileSet};
use birdspace_core::constants::DOOR_OPEN_RADIUS;
use birdspace_core::enums::EntityKind;
use birdspace_core::geometry::door_geometry;
use birdspace_core::types::{Pose, Position};

use crate::context::SimContext;

pub fn update(ctx: &mut SimContext, ship: Entity, dt: f64) {
    let Ok((pos, pose, helm, cockpit)) = ctx
        .world
        .query_one_mut::<(&mut Position, &mut Pose, &Helm, &Cockpit)>(ship)
    else {
        return;
    };
    pose.refresh();
    let v = pose.reverse_thrust_velocity(helm.speed);
    pos.x += v.x * dt;
    pos.y += v.y * dt;
    let (origin, pose) = (*pos, *pose);
    let seated = cockpit.occupant.map(|o| (o, pose.to_world(&origin, cockpit.seat)));

    if let Some((occupant, seat)) = seated {
        ctx.set_position(occupant, seat);
    }

    animate_doors(ctx, ship, &origin, &pose);
}

/// Open each door the walking controller stands near; close the rest.
fn animate_doors(ctx: &mut SimContext, ship: Entity, origin: &Position, pose: &Pose) {
    let walker = ctx.controlled.filter(|c| {
        ctx.kind(*c) == Some(EntityKind::Bird)
            && ctx
                .world
                .get::<&Avatar>(*c)
                .map(|a| a.boarded.is_none())
                .unwrap_or(false)
    });
    let walker_pos = walker.and_then(|w| ctx.position(w));

    let Ok(mut tiles) = ctx.world.get::<&mut TileSet>(ship) else {
        return;
    };
    for tile in tiles.tiles.iter_mut() {
        let offset = tile.offset;
        for door in tile.doors.iter_mut() {
            let anchor: DVec2 = door_geometry(door.side).anchor;
            let open = walker_pos.map_or(false, |w| {
                pose.to_world(origin, offset + anchor).distance_to(&w) < DOOR_OPEN_RADIUS
            });
            door.animate(open);
        }
    }
}
