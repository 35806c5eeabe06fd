//! Time-budgeted spawn scheduler
//!
//! Accumulates elapsed time and converts it into a whole number of recycle
//! operations at the current spawn rate. The accumulator is consumed on
//! attempt: any shortfall (not enough eligible obstacles) is dropped.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::ObstaclePool;
use super::spawn_region::SpawnRegion;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds accumulated since the last spawn attempt
    pub spawn_timer: f32,
    /// Successful recycles on the last tick
    pub last_spawn_count: usize,
    /// Scratch buffer of eligible slots, reused across ticks
    #[serde(skip)]
    candidates: Vec<usize>,
}

impl SpawnScheduler {
    pub fn with_capacity(pool_size: usize) -> Self {
        Self {
            spawn_timer: 0.0,
            last_spawn_count: 0,
            candidates: Vec::with_capacity(pool_size),
        }
    }

    /// Number of recycles owed for the current accumulator
    #[inline]
    pub fn pending(&self, spawn_rate: f32) -> usize {
        let owed = (self.spawn_timer * spawn_rate).floor();
        if owed.is_finite() && owed > 0.0 { owed as usize } else { 0 }
    }

    /// Advance the accumulator and recycle obstacles into the spawn box.
    ///
    /// Returns the number of obstacles actually repositioned.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        spawn_rate: f32,
        pool: &mut ObstaclePool,
        region: &SpawnRegion,
        player_pos: Vec3,
        despawn_distance: f32,
        rng: &mut R,
    ) -> usize {
        self.spawn_timer += crate::sanitize_dt(dt);

        let to_spawn = self.pending(spawn_rate);
        if to_spawn == 0 {
            self.last_spawn_count = 0;
            return 0;
        }
        self.spawn_timer = 0.0;

        pool.eligible_indices_into(player_pos.z, despawn_distance, &mut self.candidates);
        let available = self.candidates.len();
        let spawned = to_spawn.min(available);

        // Partial Fisher-Yates: each pick is uniform over the slots not yet
        // chosen this tick, so no obstacle is recycled twice.
        for i in 0..spawned {
            let j = rng.random_range(i..available);
            self.candidates.swap(i, j);
            let index = self.candidates[i];
            pool.relocate(index, region.sample(player_pos, rng));
        }

        if spawned < to_spawn {
            log::debug!(
                "Spawn shortfall: wanted {}, only {} eligible",
                to_spawn,
                available
            );
        }

        self.last_spawn_count = spawned;
        spawned
    }

    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
        self.last_spawn_count = 0;
        self.candidates.clear();
    }
}
