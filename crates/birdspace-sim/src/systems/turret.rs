//! Turret update: mirror the aim of the linked station.

use hecs::Entity;

use birdspace_core::components::{StationLink, TurretMount};
use birdspace_core::types::Pose;

use crate::context::SimContext;

pub fn update(ctx: &mut SimContext, turret: Entity) {
    let Some(station) = ctx.world.get::<&TurretMount>(turret).ok().and_then(|m| m.station) else {
        return;
    };
    let Ok(aim) = ctx.world.get::<&StationLink>(station).map(|link| link.aim) else {
        return;
    };
    if let Ok(mut pose) = ctx.world.get::<&mut Pose>(turret) {
        pose.set_heading(aim);
    }
}
