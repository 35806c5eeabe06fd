//! Ambient dust motes
//!
//! Purely cosmetic speed cue. Motes scroll with the obstacles and are
//! re-placed through the same spawn region as soon as they fall behind, so
//! the field stays a constant size. Never touches collision or scheduling.

use glam::Vec3;
use rand::Rng;

use super::spawn_region::SpawnRegion;

#[derive(Debug, Clone, Default)]
pub struct DustField {
    motes: Vec<Vec3>,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(count: usize, region: &SpawnRegion, player_pos: Vec3, rng: &mut R) -> Self {
        let mut field = Self {
            motes: vec![Vec3::ZERO; count],
        };
        field.scatter(region, player_pos, rng);
        field
    }

    /// Fill the corridor from the player to the far side of the spawn box
    pub fn scatter<R: Rng + ?Sized>(&mut self, region: &SpawnRegion, player_pos: Vec3, rng: &mut R) {
        let (_, far) = region.bounds(player_pos);
        for mote in &mut self.motes {
            let mut p = region.sample(player_pos, rng);
            p.z = rng.random_range(player_pos.z..=far.z.max(player_pos.z));
            *mote = p;
        }
    }

    /// Scroll toward the player and recycle anything that fell behind
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        closing_speed: f32,
        dt: f32,
        region: &SpawnRegion,
        player_pos: Vec3,
        despawn_distance: f32,
        rng: &mut R,
    ) {
        let dz = closing_speed * crate::sanitize_dt(dt);
        let cutoff = player_pos.z - despawn_distance;
        for mote in &mut self.motes {
            mote.z -= dz;
            if mote.z < cutoff {
                *mote = region.sample(player_pos, rng);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.motes
    }
}
