//! Fixed-capacity obstacle pool
//!
//! Obstacles are allocated once and never destroyed. Slot index is the
//! obstacle's identity. An obstacle becomes reusable purely by scrolling far
//! enough behind the player; there is no explicit release.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PARKED_POSITION;

/// A single asteroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    /// Fixed at pool creation
    pub radius: f32,
    /// Set once the host has the visual resource ready
    pub loaded: bool,
}

impl Obstacle {
    /// Loaded and more than `despawn_distance` behind the player on z
    #[inline]
    pub fn is_eligible(&self, player_z: f32, despawn_distance: f32) -> bool {
        self.loaded && self.position.z < player_z - despawn_distance
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    /// Allocate `count` obstacles with radii drawn uniformly from
    /// `[min_size, max_size]`, all parked far behind the player.
    pub fn new<R: Rng + ?Sized>(count: usize, min_size: f32, max_size: f32, rng: &mut R) -> Self {
        let obstacles = (0..count)
            .map(|_| Obstacle {
                position: PARKED_POSITION,
                radius: rng.random_range(min_size..=max_size),
                loaded: false,
            })
            .collect();
        Self { obstacles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    /// Readiness callback from the host. Returns false for unknown slots.
    pub fn mark_loaded(&mut self, index: usize) -> bool {
        match self.obstacles.get_mut(index) {
            Some(obstacle) => {
                obstacle.loaded = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_loaded(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.loaded = true;
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.loaded).count()
    }

    /// Collect eligible slot indices into `out` (cleared first)
    pub fn eligible_indices_into(&self, player_z: f32, despawn_distance: f32, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.obstacles
                .iter()
                .enumerate()
                .filter(|(_, o)| o.is_eligible(player_z, despawn_distance))
                .map(|(i, _)| i),
        );
    }

    pub fn eligible_count(&self, player_z: f32, despawn_distance: f32) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.is_eligible(player_z, despawn_distance))
            .count()
    }

    /// Move a slot to a new position (the only way obstacles "spawn")
    pub(crate) fn relocate(&mut self, index: usize, position: Vec3) {
        if let Some(obstacle) = self.obstacles.get_mut(index) {
            obstacle.position = position;
        }
    }

    /// Motion integration: every obstacle closes in along -z
    pub fn advance(&mut self, closing_speed: f32, dt: f32) {
        let dz = closing_speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.position.z -= dz;
        }
    }

    /// Park every obstacle again. Radii and load state are kept.
    pub fn park_all(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.position = PARKED_POSITION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pool(count: usize) -> ObstaclePool {
        let mut rng = Pcg32::seed_from_u64(3);
        ObstaclePool::new(count, 1.0, 2.0, &mut rng)
    }

    #[test]
    fn test_new_pool_is_parked_and_unloaded() {
        let pool = pool(10);
        assert_eq!(pool.len(), 10);
        for o in pool.iter() {
            assert_eq!(o.position, PARKED_POSITION);
            assert!((1.0..=2.0).contains(&o.radius));
            assert!(!o.loaded);
        }
    }

    #[test]
    fn test_unloaded_obstacles_are_never_eligible() {
        let pool = pool(5);
        assert_eq!(pool.eligible_count(0.0, 10.0), 0);
    }

    #[test]
    fn test_eligibility_threshold() {
        let mut pool = pool(3);
        pool.mark_all_loaded();
        pool.relocate(0, Vec3::new(0.0, 0.0, -10.0)); // exactly at threshold
        pool.relocate(1, Vec3::new(0.0, 0.0, -10.5));
        pool.relocate(2, Vec3::new(0.0, 0.0, 50.0));
        let mut out = Vec::new();
        pool.eligible_indices_into(0.0, 10.0, &mut out);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_mark_loaded_out_of_range() {
        let mut pool = pool(2);
        assert!(pool.mark_loaded(1));
        assert!(!pool.mark_loaded(2));
        assert_eq!(pool.loaded_count(), 1);
    }

    #[test]
    fn test_advance_moves_every_obstacle() {
        let mut pool = pool(4);
        pool.relocate(2, Vec3::new(1.0, 2.0, 100.0));
        pool.advance(20.0, 0.5);
        assert_eq!(pool.get(2).unwrap().position, Vec3::new(1.0, 2.0, 90.0));
        assert_eq!(pool.get(0).unwrap().position.z, PARKED_POSITION.z - 10.0);
    }

    #[test]
    fn test_park_all_keeps_radius_and_loaded() {
        let mut pool = pool(3);
        pool.mark_loaded(0);
        let radius = pool.get(0).unwrap().radius;
        pool.relocate(0, Vec3::new(0.0, 0.0, 40.0));
        pool.park_all();
        let o = pool.get(0).unwrap();
        assert_eq!(o.position, PARKED_POSITION);
        assert_eq!(o.radius, radius);
        assert!(o.loaded);
    }
}
