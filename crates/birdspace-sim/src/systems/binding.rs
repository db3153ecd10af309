//! Control binding: a bird taking and leaving the seat of a vehicle.
//!
//! While bound, the vehicle's `Cockpit::occupant` and the bird's
//! `Avatar::boarded` point at each other and the context's controlled entity
//! is the vehicle.

use hecs::Entity;

use birdspace_core::components::{Avatar, Boardable, Cockpit};
use birdspace_core::constants::BOARDING_RANGE;
use birdspace_core::error::BindError;
use birdspace_core::events::SimEvent;
use birdspace_core::types::{Pose, Position};

use crate::context::{entity_id, SimContext};

/// Closest unoccupied boardable vehicle strictly within boarding range of
/// `from`. Ties resolve to the earliest in registry order.
pub fn nearest_boardable(ctx: &SimContext, from: &Position) -> Option<Entity> {
    let mut best: Option<(Entity, f64)> = None;
    for entity in ctx.registry.iter() {
        if ctx.world.get::<&Boardable>(entity).is_err() {
            continue;
        }
        let Ok(cockpit) = ctx.world.get::<&Cockpit>(entity) else {
            continue;
        };
        if cockpit.occupant.is_some() {
            continue;
        }
        let Some(pos) = ctx.position(entity) else {
            continue;
        };
        let d = from.distance_to(&pos);
        if d < BOARDING_RANGE && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((entity, d));
        }
    }
    best.map(|(e, _)| e)
}

/// Board the nearest vehicle in range. Returns the vehicle entered.
pub fn enter_vehicle(ctx: &mut SimContext, controller: Entity) -> Result<Entity, BindError> {
    let from = {
        let avatar = ctx
            .world
            .get::<&Avatar>(controller)
            .map_err(|_| BindError::NotAController)?;
        if avatar.boarded.is_some() {
            return Err(BindError::AlreadyBoarded);
        }
        ctx.position(controller).ok_or(BindError::NotAController)?
    };
    let vehicle = nearest_boardable(ctx, &from).ok_or(BindError::NoVehicleInRange)?;
    board(ctx, controller, vehicle)
}

/// Seat `controller` in a specific vehicle.
pub fn board(ctx: &mut SimContext, controller: Entity, vehicle: Entity) -> Result<Entity, BindError> {
    let from = {
        let avatar = ctx
            .world
            .get::<&Avatar>(controller)
            .map_err(|_| BindError::NotAController)?;
        if avatar.boarded.is_some() {
            return Err(BindError::AlreadyBoarded);
        }
        ctx.position(controller).ok_or(BindError::NotAController)?
    };
    if ctx.world.get::<&Boardable>(vehicle).is_err() {
        return Err(BindError::NotBoardable);
    }
    let vehicle_pos = ctx.position(vehicle).ok_or(BindError::NotBoardable)?;
    if from.distance_to(&vehicle_pos) >= BOARDING_RANGE {
        return Err(BindError::NoVehicleInRange);
    }

    let seat = {
        let mut cockpit = ctx
            .world
            .get::<&mut Cockpit>(vehicle)
            .map_err(|_| BindError::NotBoardable)?;
        if cockpit.occupant.is_some() {
            return Err(BindError::Occupied);
        }
        cockpit.occupant = Some(controller);
        cockpit.seat
    };
    let seat_pos = match ctx.world.get::<&Pose>(vehicle) {
        Ok(pose) => pose.to_world(&vehicle_pos, seat),
        Err(_) => vehicle_pos.offset(seat.x, seat.y),
    };

    if let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(controller) {
        avatar.boarded = Some(vehicle);
        avatar.nearest_vehicle = None;
    }
    ctx.set_position(controller, seat_pos);
    ctx.controlled = Some(vehicle);
    ctx.emit(SimEvent::Boarded {
        controller: entity_id(controller),
        vehicle: entity_id(vehicle),
    });
    log::debug!("{:?} boarded {:?}", controller, vehicle);
    Ok(vehicle)
}

/// Release the occupant of `vehicle`. Returns the freed controller.
pub fn exit_vehicle(ctx: &mut SimContext, vehicle: Entity) -> Result<Entity, BindError> {
    let (controller, exit_offset) = {
        let mut cockpit = ctx
            .world
            .get::<&mut Cockpit>(vehicle)
            .map_err(|_| BindError::NotBoardable)?;
        let controller = cockpit.occupant.take().ok_or(BindError::NotBoarded)?;
        (controller, cockpit.exit_offset)
    };

    if let Ok(mut avatar) = ctx.world.get::<&mut Avatar>(controller) {
        avatar.boarded = None;
    }
    if let Some(pos) = ctx.position(controller) {
        ctx.set_position(controller, pos.offset(exit_offset.x, exit_offset.y));
    }
    ctx.controlled = Some(controller);
    ctx.emit(SimEvent::Disembarked {
        controller: entity_id(controller),
        vehicle: entity_id(vehicle),
    });
    log::debug!("{:?} left {:?}", controller, vehicle);
    Ok(controller)
}
