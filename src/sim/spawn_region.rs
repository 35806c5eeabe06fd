//! Spawn region sampling
//!
//! An axis-aligned box positioned `forward_offset` ahead of the player along
//! +z. The box is recomputed from the player position on every query and is
//! never stored as a world object. Sampling borrows the caller's RNG so the
//! region itself holds no mutable state and can be shared by reference.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SpawnBoxConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    /// Box extent along x, y, z
    pub size: Vec3,
    /// Distance from player to box center along +z
    pub forward_offset: f32,
}

impl SpawnRegion {
    pub fn new(width: f32, height: f32, depth: f32, forward_offset: f32) -> Self {
        Self {
            size: Vec3::new(width, height, depth),
            forward_offset,
        }
    }

    pub fn from_config(config: &SpawnBoxConfig) -> Self {
        Self::new(config.width, config.height, config.depth, config.forward_offset)
    }

    /// Replace the box dimensions (debug tooling)
    pub fn set_dimensions(&mut self, width: f32, height: f32, depth: f32, forward_offset: f32) {
        *self = Self::new(width, height, depth, forward_offset);
        log::debug!("Spawn region resized to {:?} at +{}", self.size, forward_offset);
    }

    /// Box center for the given player position
    #[inline]
    pub fn center(&self, player_pos: Vec3) -> Vec3 {
        player_pos + Vec3::new(0.0, 0.0, self.forward_offset)
    }

    /// (min, max) corners for the given player position
    pub fn bounds(&self, player_pos: Vec3) -> (Vec3, Vec3) {
        let center = self.center(player_pos);
        let half = self.size * 0.5;
        (center - half, center + half)
    }

    /// Uniform random point inside the box, independent draw per axis
    pub fn sample<R: Rng + ?Sized>(&self, player_pos: Vec3, rng: &mut R) -> Vec3 {
        let offset = Vec3::new(
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
        );
        self.center(player_pos) + offset * self.size
    }

    /// Inclusive containment test (with a small tolerance for float error)
    pub fn contains(&self, player_pos: Vec3, point: Vec3) -> bool {
        const EPS: f32 = 1e-3;
        let (min, max) = self.bounds(player_pos);
        point.cmpge(min - Vec3::splat(EPS)).all() && point.cmple(max + Vec3::splat(EPS)).all()
    }
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self::from_config(&SpawnBoxConfig::default())
    }
}
