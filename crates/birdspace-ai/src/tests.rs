#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use birdspace_core::enums::{AiArchetype, AiState};
    use birdspace_core::types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::fsm::*;
    use crate::profiles::get_profile;

    const EPS: f64 = 1e-9;

    fn tracking(target: Option<Position>, heading: f64, cooldown: f64) -> TrackingContext {
        TrackingContext {
            archetype: AiArchetype::EnemyCraft,
            heading,
            position: Position::new(0.0, 0.0),
            target,
            acquired: false,
            fire_cooldown: cooldown,
            dt: 1.0 / 30.0,
        }
    }

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(0.5) - 0.5).abs() < EPS);
        assert!((normalize_angle(PI) - PI).abs() < EPS);
        assert!((normalize_angle(-PI) - PI).abs() < EPS);
        assert!((normalize_angle(1.5 * PI) + 0.5 * PI).abs() < EPS);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < EPS);
        for i in -40..=40 {
            let a = normalize_angle(i as f64 * 0.37);
            assert!(a > -PI && a <= PI, "{a} out of range");
        }
    }

    #[test]
    fn test_aim_angle() {
        let from = Position::new(1.0, 1.0);
        assert!((aim_angle(&from, &Position::new(1.0, 5.0)) - FRAC_PI_2).abs() < EPS);
        assert!((aim_angle(&from, &Position::new(-3.0, 1.0)) - PI).abs() < EPS);
    }

    #[test]
    fn test_turn_takes_short_way_round() {
        // From just below +π toward just above -π: shortest path is through π.
        let h = turn_toward(PI - 0.1, -PI + 0.1, 0.05);
        assert!((h - (PI - 0.05)).abs() < EPS);

        let h = turn_toward(0.0, -FRAC_PI_2, 0.1);
        assert!((h + 0.1).abs() < EPS);
    }

    #[test]
    fn test_turn_snaps_within_step() {
        let h = turn_toward(1.0, 1.04, 0.05);
        assert_eq!(h, 1.04);
    }

    #[test]
    fn test_turn_never_overshoots() {
        for step_i in 1..20 {
            let step = step_i as f64 * 0.15;
            assert!(step < PI);
            for h_i in -12..12 {
                for t_i in -12..12 {
                    let old = h_i as f64 * 0.53;
                    let target = t_i as f64 * 0.29;
                    let new = turn_toward(old, target, step);
                    let before = normalize_angle(target - old).abs();
                    let after = normalize_angle(target - new).abs();
                    assert!(after <= before + EPS, "old={old} target={target} step={step}");
                }
            }
        }
    }

    #[test]
    fn test_turn_converges() {
        let mut h = 3.0;
        let target = -2.5;
        for _ in 0..200 {
            h = turn_toward(h, target, 0.75 / 30.0);
        }
        assert_eq!(h, target);
    }

    #[test]
    fn test_retarget_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let profile = get_profile(AiArchetype::EnemyCraft);
        let r = roll_retarget::<u32, _>(&mut rng, &profile, &[]);
        assert_eq!(r.target, None);
        assert!(r.cooldown >= 0.5 * profile.retarget_interval);
        assert!(r.cooldown < profile.retarget_interval);
    }

    #[test]
    fn test_retarget_cooldowns_vary_between_rolls() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let profile = get_profile(AiArchetype::EnemyCraft);
        let pool = [1u32];
        let a = roll_retarget(&mut rng, &profile, &pool).cooldown;
        let b = roll_retarget(&mut rng, &profile, &pool).cooldown;
        assert_ne!(a, b);
    }

    #[test]
    fn test_jittered_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1000 {
            let t = jittered(&mut rng, 2.0);
            assert!((1.0..2.0).contains(&t), "{t}");
        }
    }

    #[test]
    fn test_retarget_without_bias_always_picks() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let profile = get_profile(AiArchetype::EnemyCraft);
        let pool = [10u32, 20, 30];
        let mut seen = [false; 3];
        for _ in 0..100 {
            let r = roll_retarget(&mut rng, &profile, &pool);
            let t = r.target.unwrap();
            seen[pool.iter().position(|p| *p == t).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s), "uniform pick should reach every candidate");
    }

    #[test]
    fn test_retarget_idle_bias() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let profile = get_profile(AiArchetype::TurretStation);
        let pool = [1u32, 2];
        let mut idle = 0;
        for _ in 0..4000 {
            let r = roll_retarget(&mut rng, &profile, &pool);
            if r.target.is_none() {
                idle += 1;
                assert!(r.cooldown >= 0.0 && r.cooldown < profile.retarget_interval);
            } else {
                assert!(r.cooldown >= 0.5 * profile.retarget_interval);
                assert!(r.cooldown < profile.retarget_interval);
            }
        }
        let ratio = idle as f64 / 4000.0;
        assert!((0.7..0.8).contains(&ratio), "idle ratio {ratio}");
    }

    #[test]
    fn test_retarget_is_reproducible_with_seed() {
        let profile = get_profile(AiArchetype::TurretStation);
        let pool = [1u32, 2, 3, 4, 5];
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| roll_retarget(&mut rng, &profile, &pool))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_tracking_without_target_holds_heading() {
        let update = evaluate_tracking(&tracking(None, 1.25, -5.0));
        assert_eq!(update.heading, 1.25);
        assert_eq!(update.state, AiState::Idle);
        assert!(!update.fire);
    }

    #[test]
    fn test_tracking_fires_on_cooldown() {
        let profile = get_profile(AiArchetype::EnemyCraft);
        let target = Some(Position::new(0.0, 10.0));

        let update = evaluate_tracking(&tracking(target, 0.0, 0.0));
        assert!(update.fire);
        assert_eq!(update.state, AiState::Firing);
        assert_eq!(update.fire_cooldown, profile.fire_interval);
        // Turned toward +y by at most turn_rate * dt.
        assert!((update.heading - profile.turn_rate / 30.0).abs() < EPS);

        let update = evaluate_tracking(&tracking(target, 0.0, 1.0));
        assert!(!update.fire);
        assert_eq!(update.state, AiState::Tracking);
        assert!((update.fire_cooldown - (1.0 - 1.0 / 30.0)).abs() < EPS);
    }

    #[test]
    fn test_tracking_reports_acquisition() {
        let mut ctx = tracking(Some(Position::new(5.0, 0.0)), 0.0, 1.0);
        ctx.acquired = true;
        assert_eq!(evaluate_tracking(&ctx).state, AiState::Acquiring);
    }

    #[test]
    fn test_twin_gun_offsets() {
        let [a, b] = twin_gun_offsets(FRAC_PI_2, 0.5);
        assert!(a.x.abs() < EPS && (a.y - 0.5).abs() < EPS);
        assert!((a + b).length() < EPS);
        let [c, _] = twin_gun_offsets(TAU, 0.5);
        assert!((c.x - 0.5).abs() < EPS);
    }

    #[test]
    fn test_profiles() {
        let station = get_profile(AiArchetype::TurretStation);
        assert_eq!(station.retarget_interval, 3.7);
        assert_eq!(station.idle_bias, 0.75);
        let craft = get_profile(AiArchetype::EnemyCraft);
        assert_eq!(craft.idle_bias, 0.0);
        assert_eq!(craft.fire_interval, 2.0);
    }
}
