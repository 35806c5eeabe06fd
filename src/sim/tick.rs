//! Per-frame simulation tick
//!
//! Order within a tick: advance run time, ramp difficulty, spawn, integrate
//! motion, test collision. An ended run ignores ticks until restarted.

use super::collision::first_collision;
use super::state::{Run, RunPhase};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run is not running; nothing changed
    Halted,
    /// Normal frame
    Advanced { spawned: usize },
    /// The player hit an obstacle this frame and the run ended
    Collided { obstacle: usize },
}

/// Advance the run by one frame of `dt` seconds
pub fn tick(run: &mut Run, dt: f32) -> TickOutcome {
    if run.phase != RunPhase::Running {
        return TickOutcome::Halted;
    }

    let dt = crate::sanitize_dt(dt);
    run.elapsed += dt;
    run.difficulty.update(run.elapsed);

    let player_pos = run.player.effective_position();
    let despawn_distance = run.config.obstacles.despawn_distance;

    let spawned = run.scheduler.update(
        dt,
        run.difficulty.spawn_rate(),
        &mut run.pool,
        &run.region,
        player_pos,
        despawn_distance,
        &mut run.rng,
    );

    let closing_speed = run.difficulty.closing_speed();
    run.pool.advance(closing_speed, dt);
    run.dust.update(
        closing_speed,
        dt,
        &run.region,
        player_pos,
        despawn_distance,
        &mut run.dust_rng,
    );

    if run.config.collision_enabled && run.player.loaded {
        if let Some(obstacle) = first_collision(run.player.position, run.player.radius, run.pool.as_slice()) {
            run.end(obstacle);
            return TickOutcome::Collided { obstacle };
        }
    }

    TickOutcome::Advanced { spawned }
}

impl Run {
    /// Advance by one frame; see [`tick`]
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        tick(self, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RateConfig, RunnerConfig};
    use crate::consts::PARKED_POSITION;
    use glam::Vec3;
    use proptest::prelude::*;

    fn config() -> RunnerConfig {
        let mut config = RunnerConfig::default();
        config.obstacles.count = 16;
        config.dust.count = 8;
        config.seed = 99;
        config
    }

    fn loaded_run(config: RunnerConfig) -> Run {
        let mut run = Run::new(config).unwrap();
        run.mark_all_loaded();
        run
    }

    /// A run with no motion so obstacles stay where tests put them
    fn frozen_config() -> RunnerConfig {
        let mut config = config();
        config.closing_speed = RateConfig::new(0.0, 0.0, 0.0);
        config.spawn_rate = RateConfig::new(0.0, 0.0, 0.0);
        config
    }

    #[test]
    fn test_new_run_is_running() {
        let run = Run::new(config()).unwrap();
        assert_eq!(run.phase(), RunPhase::Running);
        assert_eq!(run.elapsed_time(), 0.0);
        assert!(!run.is_ended());
        assert_eq!(run.count_obstacles(), 16);
    }

    #[test]
    fn test_invalid_config_rejected_before_start() {
        let mut config = config();
        config.obstacles.count = 0;
        assert!(Run::new(config).is_err());
    }

    #[test]
    fn test_tick_spawns_into_box() {
        let mut run = loaded_run(config());
        let outcome = run.tick(0.5);
        // 0.5s at 8/s
        assert_eq!(outcome, TickOutcome::Advanced { spawned: 4 });
        let ahead = run
            .obstacles()
            .iter()
            .filter(|o| o.position.z > 0.0)
            .count();
        assert_eq!(ahead, 4);
        assert_eq!(run.debug_snapshot().last_spawn_count, 4);
    }

    #[test]
    fn test_spawn_timer_consumed_on_empty_pool() {
        let mut config = config();
        config.spawn_rate = RateConfig::new(2.0, 2.0, 0.0);
        // Nothing loaded, nothing eligible
        let mut run = Run::new(config).unwrap();
        assert_eq!(run.tick(1.0), TickOutcome::Advanced { spawned: 0 });
        let snap = run.debug_snapshot();
        assert_eq!(snap.last_spawn_count, 0);
        assert_eq!(snap.spawn_timer, 0.0);
        assert_eq!(snap.eligible_count, 0);
    }

    #[test]
    fn test_motion_is_frame_rate_independent() {
        let mut a = loaded_run(config());
        let mut b = loaded_run(config());
        a.pool.relocate(0, Vec3::new(0.0, 50.0, 100.0));
        b.pool.relocate(0, Vec3::new(0.0, 50.0, 100.0));
        a.tick(0.1);
        for _ in 0..10 {
            b.tick(0.01);
        }
        let za = a.obstacles()[0].position.z;
        let zb = b.obstacles()[0].position.z;
        assert!((za - zb).abs() < 0.05, "{za} vs {zb}");
    }

    #[test]
    fn test_collision_ends_run() {
        let mut run = loaded_run(frozen_config());
        run.pool.relocate(3, Vec3::new(0.0, 0.0, 1.0));
        run.tick(0.25);
        assert_eq!(run.tick(0.25), TickOutcome::Halted);
        assert!(run.is_ended());
        assert_eq!(run.collided_with(), Some(3));
        assert_eq!(run.final_time(), Some(0.25));
    }

    #[test]
    fn test_ended_run_ignores_ticks() {
        let mut run = loaded_run(frozen_config());
        run.pool.relocate(0, Vec3::ZERO);
        assert_eq!(run.tick(0.1), TickOutcome::Collided { obstacle: 0 });

        let positions = run.obstacle_positions();
        let snapshot = run.debug_snapshot();
        let elapsed = run.elapsed_time();
        for _ in 0..5 {
            assert_eq!(run.tick(1.0), TickOutcome::Halted);
        }
        assert_eq!(run.obstacle_positions(), positions);
        assert_eq!(run.debug_snapshot(), snapshot);
        assert_eq!(run.elapsed_time(), elapsed);
    }

    #[test]
    fn test_collision_disabled() {
        let mut config = frozen_config();
        config.collision_enabled = false;
        let mut run = loaded_run(config);
        run.pool.relocate(0, Vec3::ZERO);
        assert!(matches!(run.tick(0.1), TickOutcome::Advanced { .. }));
        assert!(!run.is_ended());
    }

    #[test]
    fn test_unloaded_player_never_collides() {
        let mut run = loaded_run(frozen_config());
        run.set_player_loaded(false);
        run.pool.relocate(0, Vec3::ZERO);
        run.tick(0.1);
        assert!(!run.is_ended());
    }

    #[test]
    fn test_unloaded_obstacle_never_collides() {
        let mut run = Run::new(frozen_config()).unwrap();
        run.pool.relocate(0, Vec3::ZERO);
        run.tick(0.1);
        assert!(!run.is_ended());
        run.mark_obstacle_loaded(0);
        run.tick(0.1);
        assert!(run.is_ended());
    }

    #[test]
    fn test_negative_dt_is_zero() {
        let mut run = loaded_run(config());
        run.tick(0.2);
        let positions = run.obstacle_positions();
        let snapshot = run.debug_snapshot();
        run.tick(-1.0);
        run.tick(f32::NAN);
        assert_eq!(run.elapsed_time(), 0.2);
        assert_eq!(run.obstacle_positions(), positions);
        assert_eq!(run.debug_snapshot().spawn_timer, snapshot.spawn_timer);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut run = loaded_run(frozen_config());
        run.pool.relocate(0, Vec3::ZERO);
        run.tick(0.5);
        assert!(run.is_ended());

        run.restart();
        assert_eq!(run.phase(), RunPhase::Running);
        assert_eq!(run.elapsed_time(), 0.0);
        assert_eq!(run.final_time(), None);
        assert!(run.obstacles().iter().all(|o| o.position == PARKED_POSITION && o.loaded));
        let snap = run.debug_snapshot();
        assert_eq!(snap.spawn_timer, 0.0);
        assert_eq!(snap.last_spawn_count, 0);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut run = loaded_run(config());
        for _ in 0..30 {
            run.tick(1.0 / 60.0);
        }
        run.restart();
        let once = (
            run.phase(),
            run.elapsed_time(),
            run.obstacle_positions(),
            run.debug_snapshot(),
            run.difficulty().clone(),
        );
        run.restart();
        let twice = (
            run.phase(),
            run.elapsed_time(),
            run.obstacle_positions(),
            run.debug_snapshot(),
            run.difficulty().clone(),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_difficulty_ramps_with_run_time() {
        let mut config = config();
        config.closing_speed = RateConfig::new(10.0, 12.0, 1.0);
        let mut run = loaded_run(config);
        run.set_player_loaded(false); // no collisions
        for _ in 0..300 {
            run.tick(0.01);
        }
        let speed = run.debug_snapshot().current_closing_speed;
        assert!((speed - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        let mut a = loaded_run(config());
        let mut b = loaded_run(config());
        for i in 0..240 {
            let command = glam::Vec2::new((i as f32 * 0.1).sin(), 0.3);
            a.steer_player(command, 1.0 / 60.0);
            b.steer_player(command, 1.0 / 60.0);
            assert_eq!(a.tick(1.0 / 60.0), b.tick(1.0 / 60.0));
        }
        assert_eq!(a.obstacle_positions(), b.obstacle_positions());
        assert_eq!(a.dust().positions(), b.dust().positions());
    }

    #[test]
    fn test_dust_does_not_change_spawns() {
        let mut without = config();
        without.dust.count = 0;
        let mut with = config();
        with.dust.count = 8;

        let mut a = loaded_run(without);
        let mut b = loaded_run(with);
        a.set_player_loaded(false);
        b.set_player_loaded(false);
        for _ in 0..60 {
            assert_eq!(a.tick(1.0 / 60.0), b.tick(1.0 / 60.0));
        }
        assert_eq!(a.obstacle_positions(), b.obstacle_positions());
        assert!(a.dust().is_empty());
        assert_eq!(b.dust().len(), 8);
    }

    proptest! {
        #[test]
        fn prop_pool_size_never_changes(
            seed in any::<u64>(),
            dts in prop::collection::vec(-0.05f32..0.2, 1..120),
        ) {
            let mut config = config();
            config.seed = seed;
            let mut run = loaded_run(config);
            run.set_player_loaded(false);
            let mut last_speed = 0.0;
            for dt in dts {
                run.tick(dt);
                let snap = run.debug_snapshot();
                prop_assert_eq!(run.count_obstacles(), 16);
                prop_assert_eq!(snap.total_count, 16);
                prop_assert!(snap.eligible_count <= 16);
                prop_assert!(snap.current_closing_speed >= last_speed);
                last_speed = snap.current_closing_speed;
            }
        }
    }
}
