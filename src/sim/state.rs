//! Run state and lifecycle
//!
//! `Run` exclusively owns the obstacle pool, difficulty rates, spawn timer
//! and RNG. Collaborators get read-only views plus a few narrow setters
//! (player position, readiness callbacks).

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::dust::DustField;
use super::player::Player;
use super::pool::{Obstacle, ObstaclePool};
use super::scheduler::SpawnScheduler;
use super::spawn_region::SpawnRegion;
use crate::config::RunnerConfig;
use crate::error::ConfigError;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Pool placement and difficulty reset in progress
    Initializing,
    /// Ticking
    Running,
    /// Collision happened; waiting for restart
    Ended,
}

/// Read-only counters for overlays and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub spawn_timer: f32,
    pub last_spawn_count: usize,
    pub total_count: usize,
    pub eligible_count: usize,
    pub current_spawn_rate: f32,
    pub current_closing_speed: f32,
}

/// PCG stream for the cosmetic dust generator, kept apart from spawning
const DUST_STREAM: u64 = 0xd057;

/// A complete endless run
#[derive(Debug, Clone)]
pub struct Run {
    pub(crate) config: RunnerConfig,
    pub(crate) phase: RunPhase,
    pub(crate) elapsed: f32,
    pub(crate) final_time: Option<f32>,
    pub(crate) collided_with: Option<usize>,
    pub(crate) player: Player,
    pub(crate) pool: ObstaclePool,
    pub(crate) difficulty: Difficulty,
    pub(crate) scheduler: SpawnScheduler,
    pub(crate) region: SpawnRegion,
    pub(crate) dust: DustField,
    pub(crate) rng: Pcg32,
    /// Dust only; draws here never shift obstacle spawns
    pub(crate) dust_rng: Pcg32,
}

impl Run {
    /// Validate the config and build a run ready to tick
    pub fn new(config: RunnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let pool = ObstaclePool::new(
            config.obstacles.count,
            config.obstacles.min_size,
            config.obstacles.max_size,
            &mut rng,
        );
        let region = SpawnRegion::from_config(&config.spawn_box);
        let player = Player::new(config.player.collision_radius);
        let mut dust_rng = Pcg32::new(config.seed, DUST_STREAM);
        let dust = DustField::new(
            config.dust.count,
            &region,
            player.effective_position(),
            &mut dust_rng,
        );

        let mut run = Self {
            difficulty: Difficulty::new(config.closing_speed, config.spawn_rate),
            scheduler: SpawnScheduler::with_capacity(pool.len()),
            phase: RunPhase::Initializing,
            elapsed: 0.0,
            final_time: None,
            collided_with: None,
            player,
            pool,
            region,
            dust,
            rng,
            dust_rng,
            config,
        };
        run.initialize();
        log::info!(
            "Run started: {} obstacles, seed {}",
            run.pool.len(),
            run.config.seed
        );
        Ok(run)
    }

    /// Initializing -> Running. Re-parks the pool and rewinds all timers.
    fn initialize(&mut self) {
        self.phase = RunPhase::Initializing;
        self.pool.park_all();
        self.difficulty.reset();
        self.scheduler.reset();
        self.elapsed = 0.0;
        self.final_time = None;
        self.collided_with = None;
        self.phase = RunPhase::Running;
    }

    /// Start over from a clean run. Radii and load state carry over.
    pub fn restart(&mut self) {
        self.initialize();
        log::info!("Run restarted");
    }

    /// Mark the run finished (collision)
    pub(crate) fn end(&mut self, obstacle: usize) {
        self.phase = RunPhase::Ended;
        self.final_time = Some(self.elapsed);
        self.collided_with = Some(obstacle);
        log::info!(
            "Game over at {:.2}s: hit obstacle {} (closing speed {:.1})",
            self.elapsed,
            obstacle,
            self.difficulty.closing_speed()
        );
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    /// Elapsed time at the moment of collision
    pub fn final_time(&self) -> Option<f32> {
        self.final_time
    }

    pub fn collided_with(&self) -> Option<usize> {
        self.collided_with
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// For the movement collaborator
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn set_player_position(&mut self, position: Vec3) {
        self.player.position = position;
    }

    pub fn set_player_loaded(&mut self, loaded: bool) {
        self.player.loaded = loaded;
    }

    /// Apply a command vector through the player's configured steering
    pub fn steer_player(&mut self, command: Vec2, dt: f32) {
        let p = &self.config.player;
        let limits = Vec2::new(p.lateral_limit, p.vertical_limit);
        self.player.steer(command, p.steer_speed, dt, limits);
    }

    /// Mesh readiness callback. Unknown indices are ignored.
    pub fn mark_obstacle_loaded(&mut self, index: usize) -> bool {
        let ok = self.pool.mark_loaded(index);
        if ok {
            log::debug!("Obstacle {} loaded", index);
        } else {
            log::warn!("Load callback for unknown obstacle {}", index);
        }
        ok
    }

    pub fn mark_all_loaded(&mut self) {
        self.pool.mark_all_loaded();
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.pool.as_slice()
    }

    pub fn count_obstacles(&self) -> usize {
        self.pool.len()
    }

    /// (position, radius) for every pool slot, in slot order
    pub fn obstacle_positions(&self) -> Vec<(Vec3, f32)> {
        self.pool.iter().map(|o| (o.position, o.radius)).collect()
    }

    pub fn eligible_count(&self) -> usize {
        self.pool
            .eligible_count(self.player.effective_position().z, self.config.obstacles.despawn_distance)
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            spawn_timer: self.scheduler.spawn_timer,
            last_spawn_count: self.scheduler.last_spawn_count,
            total_count: self.pool.len(),
            eligible_count: self.eligible_count(),
            current_spawn_rate: self.difficulty.spawn_rate(),
            current_closing_speed: self.difficulty.closing_speed(),
        }
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn spawn_region(&self) -> &SpawnRegion {
        &self.region
    }

    pub fn dust(&self) -> &DustField {
        &self.dust
    }
}
