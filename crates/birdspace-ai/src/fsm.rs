//! Targeting finite state machine.
//!
//! Pure functions that pick targets, turn toward them with a clamped rate and
//! gate weapon discharge on a cooldown. No ECS dependency: targets are opaque
//! handles and randomness is always injected by the caller.

use std::f64::consts::{PI, TAU};

use birdspace_core::enums::{AiArchetype, AiState};
use birdspace_core::types::Position;
use glam::DVec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::profiles::{get_profile, AiProfile};

/// Normalize an angular difference into `(-π, π]`.
pub fn normalize_angle(diff: f64) -> f64 {
    let wrapped = (diff + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Desired aim angle from `from` toward `to`.
pub fn aim_angle(from: &Position, to: &Position) -> f64 {
    from.angle_to(to)
}

/// Move `heading` toward `desired` along the shortest arc by at most
/// `max_step` radians, snapping once within reach.
pub fn turn_toward(heading: f64, desired: f64, max_step: f64) -> f64 {
    let diff = normalize_angle(desired - heading);
    if diff.abs() <= max_step {
        desired
    } else {
        heading + max_step * diff.signum()
    }
}

/// Outcome of a retarget roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retarget<T> {
    pub target: Option<T>,
    /// Seconds until the next roll.
    pub cooldown: f64,
}

/// Timer length drawn uniformly from `[0.5, 1.0)` of `interval`.
pub fn jittered<R: Rng>(rng: &mut R, interval: f64) -> f64 {
    interval * rng.gen_range(0.5..1.0)
}

/// Roll for a new target once the retarget timer has expired.
///
/// With probability `idle_bias` the target is dropped and the next roll comes
/// after a random fraction of the interval. Otherwise a candidate is chosen
/// uniformly (an empty pool yields no target) and the next roll is jittered.
pub fn roll_retarget<T: Copy, R: Rng>(
    rng: &mut R,
    profile: &AiProfile,
    candidates: &[T],
) -> Retarget<T> {
    if rng.gen::<f64>() < profile.idle_bias {
        return Retarget {
            target: None,
            cooldown: profile.retarget_interval * rng.gen::<f64>(),
        };
    }
    Retarget {
        target: candidates.choose(rng).copied(),
        cooldown: jittered(rng, profile.retarget_interval),
    }
}

/// Input to the tracking step for a single controller.
pub struct TrackingContext {
    pub archetype: AiArchetype,
    /// Current aim or travel heading.
    pub heading: f64,
    pub position: Position,
    /// Position of the held target, if any.
    pub target: Option<Position>,
    /// True when the target was picked this frame.
    pub acquired: bool,
    pub fire_cooldown: f64,
    pub dt: f64,
}

/// Output of the tracking step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingUpdate {
    pub heading: f64,
    pub state: AiState,
    pub fire_cooldown: f64,
    /// Discharge a weapon along `heading` this frame.
    pub fire: bool,
}

/// Evaluate one frame of tracking: turn toward the held target and fire when
/// the cooldown has elapsed. Without a target the heading is kept and the
/// weapon stays silent.
pub fn evaluate_tracking(ctx: &TrackingContext) -> TrackingUpdate {
    let profile = get_profile(ctx.archetype);
    let cooldown = ctx.fire_cooldown - ctx.dt;

    let Some(target) = ctx.target else {
        return TrackingUpdate {
            heading: ctx.heading,
            state: AiState::Idle,
            fire_cooldown: cooldown,
            fire: false,
        };
    };

    let desired = aim_angle(&ctx.position, &target);
    let heading = turn_toward(ctx.heading, desired, profile.turn_rate * ctx.dt);

    if cooldown <= 0.0 {
        return TrackingUpdate {
            heading,
            state: AiState::Firing,
            fire_cooldown: profile.fire_interval,
            fire: true,
        };
    }

    TrackingUpdate {
        heading,
        state: if ctx.acquired {
            AiState::Acquiring
        } else {
            AiState::Tracking
        },
        fire_cooldown: cooldown,
        fire: false,
    }
}

/// Offsets of a pair of guns placed `spacing` ahead of and behind the center
/// along `heading`.
pub fn twin_gun_offsets(heading: f64, spacing: f64) -> [DVec2; 2] {
    let d = DVec2::from_angle(heading) * spacing;
    [d, -d]
}
